//! Tooltip timing and default placement.
//!
//! Geometry constants (gap, flip gap, shift threshold) live in
//! [`crate::placement`] and are not configurable.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::PerchError;
use crate::models::Placement;

/// Default delay between hover/focus and the tooltip appearing.
pub const DEFAULT_SHOW_DELAY_MS: u64 = 250;

/// Default length of the leave animation.
pub const DEFAULT_LEAVE_DURATION_MS: u64 = 200;

/// Default press duration that counts as a long press.
pub const DEFAULT_LONG_PRESS_MS: u64 = 500;

/// Default time a long-press tooltip stays up.
pub const DEFAULT_LONG_PRESS_HIDE_MS: u64 = 5000;

/// Longest delay accepted for any timing; browsers fire longer timeouts
/// immediately.
pub const MAX_DELAY_MS: u64 = i32::MAX as u64;

/// Tooltip behavior settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    /// Placement used when a caller does not pick one
    pub placement: Placement,
    /// Hover/focus show delay in milliseconds
    pub show_delay_ms: u64,
    /// Leave animation length in milliseconds
    pub leave_duration_ms: u64,
    /// Long-press threshold in milliseconds
    pub long_press_ms: u64,
    /// Auto-hide delay after a long-press show, in milliseconds
    pub long_press_hide_ms: u64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            show_delay_ms: DEFAULT_SHOW_DELAY_MS,
            leave_duration_ms: DEFAULT_LEAVE_DURATION_MS,
            long_press_ms: DEFAULT_LONG_PRESS_MS,
            long_press_hide_ms: DEFAULT_LONG_PRESS_HIDE_MS,
        }
    }
}

impl TooltipConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, PerchError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PerchError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), "Tooltip config loaded");
        Ok(config)
    }

    /// Reject settings that would break the lifecycle.
    pub fn validate(&self) -> Result<(), PerchError> {
        let delays = [
            ("show_delay_ms", self.show_delay_ms),
            ("leave_duration_ms", self.leave_duration_ms),
            ("long_press_ms", self.long_press_ms),
            ("long_press_hide_ms", self.long_press_hide_ms),
        ];
        if let Some((name, _)) = delays.iter().find(|(_, ms)| *ms > MAX_DELAY_MS) {
            return Err(PerchError::config(format!("{name} must not exceed {MAX_DELAY_MS}")));
        }
        if self.leave_duration_ms == 0 {
            return Err(PerchError::config("leave_duration_ms must be greater than zero"));
        }
        if self.long_press_ms == 0 {
            return Err(PerchError::config("long_press_ms must be greater than zero"));
        }
        if self.long_press_hide_ms <= self.show_delay_ms {
            return Err(PerchError::config(
                "long_press_hide_ms must be longer than show_delay_ms",
            ));
        }
        Ok(())
    }

    /// Set the default placement.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Hover/focus show delay.
    pub fn show_delay(&self) -> Duration {
        Duration::from_millis(self.show_delay_ms)
    }

    /// Leave animation length.
    pub fn leave_duration(&self) -> Duration {
        Duration::from_millis(self.leave_duration_ms)
    }

    /// Long-press threshold.
    pub fn long_press(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }

    /// Auto-hide delay after a long-press show.
    pub fn long_press_hide(&self) -> Duration {
        Duration::from_millis(self.long_press_hide_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = TooltipConfig::default();
        assert_eq!(config.placement, Placement::Bottom);
        assert_eq!(config.show_delay(), Duration::from_millis(250));
        assert_eq!(config.long_press(), Duration::from_millis(500));
        assert_eq!(config.long_press_hide(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = TooltipConfig::from_json_str(r#"{"placement": "left"}"#).unwrap();
        assert_eq!(config.placement, Placement::Left);
        assert_eq!(config.show_delay_ms, DEFAULT_SHOW_DELAY_MS);
    }

    #[test]
    fn test_invalid_placement_rejected() {
        let err = TooltipConfig::from_json_str(r#"{"placement": "center"}"#).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("center"));
    }

    #[test]
    fn test_zero_long_press_rejected() {
        let err = TooltipConfig::from_json_str(r#"{"long_press_ms": 0}"#).unwrap_err();
        assert!(matches!(err, PerchError::Config { .. }));
    }

    #[test]
    fn test_oversized_delay_rejected() {
        let err = TooltipConfig::from_json_str(r#"{"long_press_hide_ms": 4294967295}"#).unwrap_err();
        assert!(err.to_string().contains("long_press_hide_ms"));

        let config = TooltipConfig { long_press_hide_ms: MAX_DELAY_MS, ..TooltipConfig::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"placement": "top", "show_delay_ms": 100}}"#).unwrap();

        let config = TooltipConfig::load(file.path()).unwrap();
        assert_eq!(config.placement, Placement::Top);
        assert_eq!(config.show_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TooltipConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(err.is_config());
    }
}

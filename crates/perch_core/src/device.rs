//! Device capability probe.
//!
//! Decides whether hover/focus or long press drives tooltips. The browser
//! binding feeds the navigator's user agent; tests use [`FixedProbe`].

use regex::Regex;
use std::sync::LazyLock;

static MOBILE_USER_AGENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)android|webos|iphone|ipad|ipod|blackberry|iemobile|opera mini")
        .expect("mobile user agent pattern is valid")
});

/// Whether the current environment is touch-first.
pub trait DeviceProbe {
    /// `true` on phones and tablets.
    fn is_touch(&self) -> bool;
}

/// Probe backed by a user agent string.
#[derive(Debug, Clone)]
pub struct UserAgentProbe {
    user_agent: String,
}

impl UserAgentProbe {
    /// Create a probe for `user_agent`.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self { user_agent: user_agent.into() }
    }

    /// The probed user agent.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl DeviceProbe for UserAgentProbe {
    fn is_touch(&self) -> bool {
        is_mobile_user_agent(&self.user_agent)
    }
}

/// Probe with a fixed answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedProbe(pub bool);

impl DeviceProbe for FixedProbe {
    fn is_touch(&self) -> bool {
        self.0
    }
}

/// Classify a user agent string as mobile.
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    MOBILE_USER_AGENT.is_match(user_agent)
}

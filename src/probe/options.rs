use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROBE_URL: &str = "https://www.verifyemailaddress.org/";

/// Configuration knobs for [`WebProbe`](super::WebProbe).
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    pub url: String,
    /// Sent as `referer`; defaults to `url` when empty.
    pub referer: String,
    pub timeout_ms: u64,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_PROBE_URL.to_string(),
            referer: String::new(),
            timeout_ms: 15_000,
        }
    }
}

impl ProbeOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.max(1))
    }

    pub fn referer(&self) -> &str {
        if self.referer.trim().is_empty() {
            &self.url
        } else {
            &self.referer
        }
    }
}

use std::fmt;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// What the verification service concluded about one address.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxStatus {
    Exists,
    /// The service stopped at its own format check.
    SyntaxRejected,
    /// The service could not reach a conclusion, or could not be queried.
    Unverifiable,
    MailboxNotFound,
}

impl fmt::Display for MailboxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exists => f.write_str("Exists"),
            Self::SyntaxRejected => f.write_str("SyntaxRejected"),
            Self::Unverifiable => f.write_str("Unverifiable"),
            Self::MailboxNotFound => f.write_str("MailboxNotFound"),
        }
    }
}

/// One step reported by the service (format, domain, mailbox), identified by
/// its CSS class (`success`, `failure`, ...).
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    pub class: String,
}

impl Indicator {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.class == "failure"
    }
}

/// Raw answer of the `http_post` capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

use std::fmt;

/// Final classification of one input row. The numeric codes and labels are a
/// stable contract for whoever consumes the annotated file.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusCode {
    Exists,
    Empty,
    BadSyntax,
    Disposable,
    DomainNotFound,
    Unverifiable,
    MailboxNotFound,
}

impl StatusCode {
    pub const ALL: [StatusCode; 7] = [
        Self::Exists,
        Self::Empty,
        Self::BadSyntax,
        Self::Disposable,
        Self::DomainNotFound,
        Self::Unverifiable,
        Self::MailboxNotFound,
    ];

    pub fn code(self) -> u8 {
        match self {
            Self::Exists => 0,
            Self::Empty => 1,
            Self::BadSyntax => 2,
            Self::Disposable => 3,
            Self::DomainNotFound => 4,
            Self::Unverifiable => 5,
            Self::MailboxNotFound => 6,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Exists => "Email exists",
            Self::Empty => "Email is empty",
            Self::BadSyntax => "Email syntax is incorrect",
            Self::Disposable => "Email is disposable",
            Self::DomainNotFound => "Email domain does not exist",
            Self::Unverifiable => "Email is ok but cannot be verified",
            Self::MailboxNotFound => "Email not found in domain",
        }
    }

    /// Only these two outcomes may carry a corrected address.
    pub fn accepts_suggestion(self) -> bool {
        matches!(self, Self::DomainNotFound | Self::MailboxNotFound)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of the row pipeline for a single record.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub status: StatusCode,
    pub suggestion: Option<String>,
}

impl Verdict {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            suggestion: None,
        }
    }

    /// Attach `suggestion` when the status allows one; dropped otherwise.
    pub fn with_suggestion(status: StatusCode, suggestion: Option<String>) -> Self {
        let suggestion = suggestion
            .filter(|s| !s.is_empty())
            .filter(|_| status.accepts_suggestion());
        Self { status, suggestion }
    }
}

use std::collections::HashSet;

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MxRecord {
    pub preference: u16,
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MxStatus {
    Records(Vec<MxRecord>),
    NoRecords,
}

impl MxStatus {
    pub fn records(&self) -> &[MxRecord] {
        match self {
            Self::Records(records) => records.as_slice(),
            Self::NoRecords => &[],
        }
    }

    pub fn accepts_mail(&self) -> bool {
        !self.records().is_empty()
    }
}

/// Result of [`classify_domain`](super::classify_domain).
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainCheck {
    Exists,
    Disposable,
    NotFound,
}

/// Allowlist of domains known to accept mail.
///
/// Keeps insertion order so the persisted file is stable from run to run.
/// Entries are never removed; lookups are exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainSet {
    order: Vec<String>,
    index: HashSet<String>,
}

impl DomainSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.index.contains(domain)
    }

    /// Returns `true` when the set grew.
    pub fn insert(&mut self, domain: impl Into<String>) -> bool {
        let domain = domain.into();
        if self.index.contains(&domain) {
            return false;
        }
        self.index.insert(domain.clone());
        self.order.push(domain);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }
}

impl<S: Into<String>> FromIterator<S> for DomainSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for domain in iter {
            set.insert(domain);
        }
        set
    }
}

/// Read-only list of throwaway-mailbox providers.
#[derive(Debug, Clone, Default)]
pub struct DisposableDomains {
    domains: HashSet<String>,
}

impl DisposableDomains {
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for DisposableDomains {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            domains: iter.into_iter().map(Into::into).collect(),
        }
    }
}

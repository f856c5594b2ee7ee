use std::time::Duration;

use tracing::debug;
use trust_dns_resolver::{
    Resolver,
    error::{ResolveError, ResolveErrorKind},
    system_conf::read_system_conf,
};

use super::{Error, MxRecord, MxStatus};

/// Capability used by the classifier: does `domain` publish a mail exchanger?
///
/// Implementations fail closed: errors, timeouts and empty answers are `false`.
pub trait ResolveMx {
    fn resolve_mx(&self, domain: &str) -> bool;
}

/// Knobs for [`DnsResolver`].
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsOptions {
    pub timeout_ms: u64,
    pub attempts: usize,
}

impl Default for DnsOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            attempts: 1,
        }
    }
}

impl DnsOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.max(1))
    }
}

/// System-configured resolver with a bounded per-query timeout.
pub struct DnsResolver {
    inner: Resolver,
}

impl DnsResolver {
    pub fn new(options: &DnsOptions) -> Result<Self, Error> {
        let (config, mut opts) = read_system_conf().map_err(Error::resolver_init)?;
        opts.timeout = options.timeout();
        opts.attempts = options.attempts.max(1);
        let inner = Resolver::new(config, opts).map_err(Error::resolver_init)?;
        Ok(Self { inner })
    }

    /// Full MX answer for `domain`, normalized via IDNA first.
    pub fn lookup(&self, domain: &str) -> Result<MxStatus, Error> {
        lookup_domain(&self.inner, domain)
    }
}

impl ResolveMx for DnsResolver {
    fn resolve_mx(&self, domain: &str) -> bool {
        accepts_mail_with(&self.inner, domain)
    }
}

fn lookup_domain<R: LookupMx>(resolver: &R, domain: &str) -> Result<MxStatus, Error> {
    let ascii = normalize_domain(domain)?;
    resolve_with(resolver, &ascii)
}

/// Fail-closed answer: any error is `false`.
pub(crate) fn accepts_mail_with<R: LookupMx>(resolver: &R, domain: &str) -> bool {
    match lookup_domain(resolver, domain) {
        Ok(status) => status.accepts_mail(),
        Err(err) if err.is_timeout() => {
            debug!(domain, "MX lookup timed out, treating domain as unknown");
            false
        }
        Err(err) => {
            debug!(domain, error = %err, "MX lookup failed, treating domain as unknown");
            false
        }
    }
}

pub(crate) fn resolve_with<R>(resolver: &R, ascii_domain: &str) -> Result<MxStatus, Error>
where
    R: LookupMx,
{
    let mut records = match resolver.lookup_mx(ascii_domain) {
        Ok(records) => records,
        Err(err) if is_empty_answer(&err) => Vec::new(),
        Err(err) => return Err(Error::lookup(ascii_domain, err)),
    };

    records.sort();
    records.dedup();

    if records.is_empty() {
        Ok(MxStatus::NoRecords)
    } else {
        Ok(MxStatus::Records(records))
    }
}

fn is_empty_answer(err: &ResolveError) -> bool {
    matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. })
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, Error> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(|err| Error::idna(trimmed, err))
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    let trimmed = exchange.trim_end_matches('.');
    trimmed.to_ascii_lowercase()
}

pub(crate) trait LookupMx {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError>;
}

impl LookupMx for Resolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
        let lookup = Resolver::mx_lookup(self, domain)?;
        let mut records = Vec::new();
        for mx in lookup.iter() {
            let exchange = normalize_exchange(mx.exchange().to_utf8());
            records.push(MxRecord::new(mx.preference(), exchange));
        }
        Ok(records)
    }
}

#[cfg(test)]
impl LookupMx for crate::domain::tests::StubLookup {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
        (self.on_lookup)(domain)
    }
}

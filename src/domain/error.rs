use thiserror::Error;
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};

/// Why a domain could not be confirmed. The classifier folds every variant
/// into "not found"; the distinction only reaches the logs.
#[derive(Debug, Error)]
pub enum MxError {
    #[error("domain is empty")]
    EmptyDomain,
    #[error("'{domain}' is not a valid IDNA domain")]
    Idna {
        domain: String,
        #[source]
        source: idna::Errors,
    },
    #[error("system resolver configuration unusable: {source}")]
    ResolverInit {
        #[source]
        source: std::io::Error,
    },
    #[error("MX lookup for '{domain}' timed out")]
    Timeout { domain: String },
    #[error("MX lookup for '{domain}' failed: {source}")]
    Lookup {
        domain: String,
        #[source]
        source: ResolveError,
    },
}

impl MxError {
    pub(crate) fn idna(domain: &str, source: idna::Errors) -> Self {
        Self::Idna {
            domain: domain.to_string(),
            source,
        }
    }

    pub(crate) fn resolver_init(source: std::io::Error) -> Self {
        Self::ResolverInit { source }
    }

    pub(crate) fn lookup(domain: &str, source: ResolveError) -> Self {
        let domain = domain.to_string();
        match source.kind() {
            ResolveErrorKind::Timeout => Self::Timeout { domain },
            _ => Self::Lookup { domain, source },
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

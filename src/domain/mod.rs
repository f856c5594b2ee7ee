//! Domain classification against the allowlist, the disposable list and DNS.
//!
//! The allowlist ([`DomainSet`]) is the only state shared between rows of a
//! batch: [`classify_domain`] appends to it when a previously unknown domain
//! is confirmed by a live MX lookup.

mod error;
mod resolver;
mod types;

pub use error::MxError as Error;
pub use resolver::{DnsOptions, DnsResolver, ResolveMx};
pub use types::{DisposableDomains, DomainCheck, DomainSet, MxRecord, MxStatus};

use tracing::{debug, info};

/// Allowlist first, then the disposable list, then DNS. Only the DNS success
/// path mutates `valid_domains`.
pub fn classify_domain<R>(
    domain: &str,
    valid_domains: &mut DomainSet,
    disposable: &DisposableDomains,
    resolver: &R,
) -> DomainCheck
where
    R: ResolveMx + ?Sized,
{
    if valid_domains.contains(domain) {
        return DomainCheck::Exists;
    }
    if disposable.contains(domain) {
        return DomainCheck::Disposable;
    }
    if resolver.resolve_mx(domain) {
        debug!(domain, "domain confirmed by DNS, adding to allowlist");
        valid_domains.insert(domain);
        return DomainCheck::Exists;
    }
    DomainCheck::NotFound
}

/// Re-check every persisted domain and keep those that still publish MX
/// records.
pub fn prune_domains<'a, I, R>(domains: I, resolver: &R) -> DomainSet
where
    I: IntoIterator<Item = &'a str>,
    R: ResolveMx + ?Sized,
{
    let mut kept = DomainSet::new();
    let mut dropped = 0usize;
    for domain in domains {
        if resolver.resolve_mx(domain) {
            kept.insert(domain);
        } else {
            debug!(domain, "dropping domain without MX records");
            dropped += 1;
        }
    }
    info!(kept = kept.len(), dropped, "allowlist revalidated");
    kept
}

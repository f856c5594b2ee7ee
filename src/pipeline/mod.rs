//! Per-record decision pipeline.
//!
//! Order: empty, syntax, domain classification (with domain correction on
//! failure), mailbox probe (with prefix correction on failure). Every path
//! ends in exactly one [`Verdict`].

use tracing::debug;

use crate::correct::{suggest_domain, suggest_prefix};
use crate::domain::{DisposableDomains, DomainCheck, DomainSet, ResolveMx, classify_domain};
use crate::probe::{MailboxProbe, MailboxStatus};
use crate::status::{StatusCode, Verdict};
use crate::syntax::{EmailParts, is_syntactically_valid, split_email};

/// One input row.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRecord {
    pub surname: String,
    pub given_name: String,
    pub email: Option<String>,
}

impl EmailRecord {
    pub fn new(
        surname: impl Into<String>,
        given_name: impl Into<String>,
        email: Option<String>,
    ) -> Self {
        Self {
            surname: surname.into(),
            given_name: given_name.into(),
            email,
        }
    }

    /// The address, or `None` when missing or blank.
    pub fn address(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.trim().is_empty())
    }
}

/// Collaborators shared by every row of a batch.
pub struct Pipeline<'a, R: ?Sized, P> {
    disposable: &'a DisposableDomains,
    resolver: &'a R,
    prober: P,
}

impl<'a, R, P> Pipeline<'a, R, P>
where
    R: ResolveMx + ?Sized,
    P: MailboxProbe,
{
    pub fn new(disposable: &'a DisposableDomains, resolver: &'a R, prober: P) -> Self {
        Self {
            disposable,
            resolver,
            prober,
        }
    }

    /// Run one record. `valid_domains` may grow when the domain is confirmed
    /// by DNS.
    pub fn check(&self, record: &EmailRecord, valid_domains: &mut DomainSet) -> Verdict {
        let Some(email) = record.address() else {
            return Verdict::new(StatusCode::Empty);
        };
        let email = email.trim();

        let parts = match split_email(email) {
            Some(parts) if is_syntactically_valid(email) => parts,
            _ => {
                debug!(email, "syntax rejected");
                return Verdict::new(StatusCode::BadSyntax);
            }
        };

        match classify_domain(&parts.domain, valid_domains, self.disposable, self.resolver) {
            DomainCheck::Disposable => {
                debug!(email, "disposable domain");
                Verdict::new(StatusCode::Disposable)
            }
            DomainCheck::NotFound => self.on_unknown_domain(&parts, valid_domains),
            DomainCheck::Exists => self.on_known_domain(record, email, &parts),
        }
    }

    fn on_unknown_domain(&self, parts: &EmailParts, valid_domains: &DomainSet) -> Verdict {
        let Some(domain) = suggest_domain(&parts.domain, valid_domains.iter()) else {
            debug!(domain = %parts.domain, "unknown domain, no correction");
            return Verdict::new(StatusCode::DomainNotFound);
        };

        let candidate = format!("{}@{}", parts.prefix, domain);
        let suggestion = match self.prober.probe(&candidate) {
            MailboxStatus::Exists | MailboxStatus::Unverifiable => Some(candidate),
            MailboxStatus::SyntaxRejected | MailboxStatus::MailboxNotFound => None,
        };
        debug!(domain = %parts.domain, ?suggestion, "unknown domain");
        Verdict::with_suggestion(StatusCode::DomainNotFound, suggestion)
    }

    fn on_known_domain(&self, record: &EmailRecord, email: &str, parts: &EmailParts) -> Verdict {
        match self.prober.probe(email) {
            MailboxStatus::Exists => Verdict::new(StatusCode::Exists),
            MailboxStatus::SyntaxRejected => Verdict::new(StatusCode::BadSyntax),
            MailboxStatus::Unverifiable => Verdict::new(StatusCode::Unverifiable),
            MailboxStatus::MailboxNotFound => {
                let suggestion =
                    suggest_prefix(&record.surname, &record.given_name, &parts.prefix)
                        .map(|prefix| format!("{}@{}", prefix, parts.domain))
                        .filter(|candidate| self.prober.probe(candidate) == MailboxStatus::Exists);
                debug!(email, ?suggestion, "mailbox not found");
                Verdict::with_suggestion(StatusCode::MailboxNotFound, suggestion)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests;

//! Mailbox existence through a third-party verification website.
//!
//! The site answers with an HTML page listing one indicator per completed
//! check (format, domain, mailbox). [`parse_indicators`] isolates the markup;
//! [`classify_indicators`] maps the indicator list onto [`MailboxStatus`] and
//! is usable on synthetic lists.

mod agents;
mod error;
mod html;
mod http;
mod options;
mod types;

pub use agents::UserAgentPool;
pub use error::ProbeError;
pub use html::parse_indicators;
pub use http::{HttpClient, PostForm};
pub use options::{DEFAULT_PROBE_URL, ProbeOptions};
pub use types::{HttpReply, Indicator, MailboxStatus};

use tracing::{debug, warn};

/// Capability used by the row pipeline.
pub trait MailboxProbe {
    fn probe(&self, email: &str) -> MailboxStatus;
}

impl<P: MailboxProbe + ?Sized> MailboxProbe for &P {
    fn probe(&self, email: &str) -> MailboxStatus {
        (**self).probe(email)
    }
}

/// Map the service's indicator list to a status. `None` when the list does
/// not have between one and three entries.
pub fn classify_indicators(indicators: &[Indicator]) -> Option<MailboxStatus> {
    match indicators {
        [_] => Some(MailboxStatus::SyntaxRejected),
        [_, _] => Some(MailboxStatus::Unverifiable),
        [_, _, mailbox] if mailbox.is_failure() => Some(MailboxStatus::MailboxNotFound),
        [_, _, _] => Some(MailboxStatus::Exists),
        _ => None,
    }
}

/// [`MailboxProbe`] backed by the verification website.
pub struct WebProbe<T = HttpClient> {
    transport: T,
    user_agents: UserAgentPool,
    options: ProbeOptions,
}

impl WebProbe<HttpClient> {
    pub fn new(user_agents: UserAgentPool, options: ProbeOptions) -> Result<Self, ProbeError> {
        let transport = HttpClient::new(&options)?;
        Ok(Self::with_transport(transport, user_agents, options))
    }
}

impl<T: PostForm> WebProbe<T> {
    pub fn with_transport(transport: T, user_agents: UserAgentPool, options: ProbeOptions) -> Self {
        Self {
            transport,
            user_agents,
            options,
        }
    }

    /// One request, no retry. Non-200 answers are `Unverifiable`; transport
    /// failures and unexpected markup are returned as errors.
    pub fn query(&self, email: &str) -> Result<MailboxStatus, ProbeError> {
        let headers = [
            ("user-agent", self.user_agents.pick()),
            ("referer", self.options.referer()),
        ];
        let reply = self
            .transport
            .post_form(&self.options.url, &headers, &[("email", email)])?;

        if !reply.is_success() {
            debug!(email, status = reply.status, "verification service refused the request");
            return Ok(MailboxStatus::Unverifiable);
        }

        let indicators = parse_indicators(&reply.body)?;
        classify_indicators(&indicators).ok_or_else(|| {
            ProbeError::malformed(format!("{} result indicators", indicators.len()))
        })
    }
}

impl<T: PostForm> MailboxProbe for WebProbe<T> {
    fn probe(&self, email: &str) -> MailboxStatus {
        match self.query(email) {
            Ok(status) => {
                debug!(email, %status, "mailbox probed");
                status
            }
            Err(err) => {
                if err.is_timeout() {
                    warn!(email, "verification service timed out");
                } else {
                    warn!(email, error = %err, "mailbox probe failed");
                }
                MailboxStatus::Unverifiable
            }
        }
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("user-agent pool is empty")]
    EmptyUserAgentPool,
    #[error("HTTP client initialization failed: {source}")]
    ClientInit {
        #[source]
        source: reqwest::Error,
    },
    #[error("request to verification service failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected verification response: {0}")]
    MalformedResponse(String),
}

impl ProbeError {
    pub(crate) fn client_init(source: reqwest::Error) -> Self {
        Self::ClientInit { source }
    }

    pub(crate) fn transport(source: reqwest::Error) -> Self {
        Self::Transport { source }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse(reason.into())
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport { source } => source.is_timeout(),
            _ => false,
        }
    }
}

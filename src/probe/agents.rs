use rand::Rng;

use super::ProbeError;

/// Browser identities rotated across probe requests.
#[derive(Debug, Clone)]
pub struct UserAgentPool {
    agents: Vec<String>,
}

impl UserAgentPool {
    /// Blank entries are dropped; an empty pool is rejected.
    pub fn new<I, S>(agents: I) -> Result<Self, ProbeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let agents: Vec<String> = agents
            .into_iter()
            .map(Into::into)
            .filter(|a| !a.trim().is_empty())
            .collect();
        if agents.is_empty() {
            return Err(ProbeError::EmptyUserAgentPool);
        }
        Ok(Self { agents })
    }

    /// Uniformly random entry.
    pub fn pick(&self) -> &str {
        let idx = rand::thread_rng().gen_range(0..self.agents.len());
        &self.agents[idx]
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

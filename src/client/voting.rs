use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::Authority;

/// Bare candidate identity as the voting authority publishes it. Display
/// metadata is enriched later from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BallotOption {
    pub id: i32,
    #[serde(default)]
    pub name: Option<String>,
}

/// The authority's verdict on a submitted ballot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BallotDecision {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// One raw tally row: votes for a candidate, no percentages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TallyLine {
    pub id: i32,
    #[serde(default)]
    pub name: Option<String>,
    pub votes: u64,
}

#[cfg_attr(test, allow(dead_code))]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoteRequest<'a> {
    voting_credential: &'a str,
    candidate_id: i32,
}

/// Client for the Voting Authority (AV).
#[derive(Debug, Clone)]
pub struct VotingClient {
    #[cfg_attr(test, allow(dead_code))]
    http: reqwest::Client,
    base_url: String,
}

impl VotingClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `GetCandidates`: the registered candidates, in the authority's order.
    pub async fn get_candidates(&self) -> Result<Vec<BallotOption>> {
        #[cfg(test)]
        {
            self.reachable()?;
            Ok(canned::candidates())
        }
        #[cfg(not(test))]
        {
            super::fetch(
                Authority::Voting,
                self.http
                    .get(format!("{}/api/voting/candidates", self.base_url)),
            )
            .await
        }
    }

    /// `Vote`: deposit a ballot for the given candidate, spending the
    /// credential.
    pub async fn vote(
        &self,
        voting_credential: &str,
        candidate_id: i32,
    ) -> Result<BallotDecision> {
        #[cfg(test)]
        {
            self.reachable()?;
            Ok(canned::decision(voting_credential, candidate_id))
        }
        #[cfg(not(test))]
        {
            super::fetch(
                Authority::Voting,
                self.http
                    .post(format!("{}/api/voting/votes", self.base_url))
                    .json(&VoteRequest {
                        voting_credential,
                        candidate_id,
                    }),
            )
            .await
        }
    }

    /// `GetResults`: raw per-candidate vote counts, in the authority's order.
    pub async fn get_results(&self) -> Result<Vec<TallyLine>> {
        #[cfg(test)]
        {
            self.reachable()?;
            Ok(canned::results())
        }
        #[cfg(not(test))]
        {
            super::fetch(
                Authority::Voting,
                self.http.get(format!("{}/api/voting/results", self.base_url)),
            )
            .await
        }
    }
}


#[cfg(test)]
pub use canned::{
    SILENT_REJECT_CREDENTIAL, SPENT_CREDENTIAL, SPENT_MESSAGE, UNLISTED_CANDIDATE_ID,
};

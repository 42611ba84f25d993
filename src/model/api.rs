//! Request and response bodies of the REST surface, shared with the flow
//! controllers on the client side.

use serde::{Deserialize, Serialize};

/// Body of `POST /credential`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCredentialRequest {
    pub citizen_card_number: String,
}

/// Body of `POST /vote`: a one-shot submission, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSubmission {
    pub credential: String,
    pub candidate_id: i32,
}

/// A candidate as rendered on the ballot: the voting authority's identity
/// plus catalog metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i32,
    pub name: String,
    pub party: String,
    pub image: String,
}

/// One line of the published results. `percentage` is derived by the gateway
/// and never supplied by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TallyEntry {
    pub candidate_id: i32,
    pub candidate_name: String,
    pub votes: u64,
    pub percentage: f64,
}

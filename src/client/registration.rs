use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::Authority;

/// Reply of the registration authority's eligibility check.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialGrant {
    pub is_eligible: bool,
    #[serde(default)]
    pub voting_credential: String,
}

#[cfg_attr(test, allow(dead_code))]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialRequest<'a> {
    citizen_card_number: &'a str,
}

/// Client for the Registration Authority (AR).
#[derive(Debug, Clone)]
pub struct RegistrationClient {
    #[cfg_attr(test, allow(dead_code))]
    http: reqwest::Client,
    base_url: String,
}

impl RegistrationClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `IssueVotingCredential`: check eligibility of the given citizen card
    /// number and obtain an anonymous voting credential.
    pub async fn issue_voting_credential(
        &self,
        citizen_card_number: &str,
    ) -> Result<CredentialGrant> {
        // Test builds never touch the network; replies are canned below.
        #[cfg(test)]
        {
            self.canned_grant(citizen_card_number)
        }
        #[cfg(not(test))]
        {
            super::fetch(
                Authority::Registration,
                self.http
                    .post(format!("{}/api/registration/credentials", self.base_url))
                    .json(&CredentialRequest {
                        citizen_card_number,
                    }),
            )
            .await
        }
    }
}


#[cfg(test)]
pub use canned::{EMPTY_GRANT_CARD, INELIGIBLE_CARD, ISSUED_CREDENTIAL};

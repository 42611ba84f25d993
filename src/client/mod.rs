//! Outbound RPC clients for the two remote authorities. This is the only
//! place the gateway performs network I/O of its own.

pub mod registration;
pub mod voting;

pub use registration::{CredentialGrant, RegistrationClient};
pub use voting::{BallotDecision, BallotOption, TallyLine, VotingClient};

use crate::error::Error;

/// The remote authorities the gateway consumes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Authority {
    /// Checks citizen eligibility and issues anonymous credentials.
    Registration,
    /// Accepts ballots and reports tallies.
    Voting,
}

impl Authority {
    /// Name used in server-side logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Registration => "registration authority",
            Self::Voting => "voting authority",
        }
    }

    /// Fixed user-facing message when this authority cannot be reached.
    /// Deliberately generic: the technical cause stays in the logs.
    pub fn outage_message(self) -> &'static str {
        match self {
            Self::Registration => "Falha ao contactar o serviço de registo.",
            Self::Voting => "Falha ao contactar o serviço de votação.",
        }
    }

    pub(crate) fn transport_error(self, detail: impl std::fmt::Display) -> Error {
        Error::Transport {
            authority: self,
            detail: detail.to_string(),
        }
    }
}

/// Send a request and decode the JSON reply, folding every failure mode
/// (connect, non-2xx status, body decode) into a single transport error.
/// There is exactly one catch point per backend call and no retry.
#[cfg(not(test))]
pub(crate) async fn fetch<T: serde::de::DeserializeOwned>(
    authority: Authority,
    request: reqwest::RequestBuilder,
) -> crate::error::Result<T> {
    let response = request
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|err| authority.transport_error(&err))?;
    response
        .json()
        .await
        .map_err(|err| authority.transport_error(&err))
}

use rocket::{http::Status, response::Responder, serde::json::Json, Request};
use thiserror::Error;

use crate::{client::Authority, logging::RequestId, model::envelope::Envelope};

pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy of the gateway. Every operation either succeeds, is
/// validated away before any backend call, is refused by an authority, or
/// fails wholesale in transport; there are no partial outcomes.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field was missing or blank. Raised before the backend call.
    #[error("{0}")]
    Validation(String),
    /// An authority explicitly denied the operation. A normal protocol
    /// outcome, not a system fault.
    #[error("{0}")]
    Rejection(String),
    /// The authority could not be reached or did not complete the call.
    #[error("{} unavailable: {detail}", .authority.label())]
    Transport {
        authority: Authority,
        detail: String,
    },
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn rejection(message: impl Into<String>) -> Self {
        Self::Rejection(message.into())
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> rocket::response::Result<'o> {
        let (status, message) = match self {
            // A business-level "no" still travels in a 200; the envelope's
            // `success` flag disambiguates.
            Self::Validation(message) | Self::Rejection(message) => (Status::Ok, message),
            // 502 is reserved for not completing the backend call. The
            // technical detail is logged and never reaches the caller.
            Self::Transport { authority, detail } => {
                let id = req.local_cache(RequestId::next);
                error!("rsp{id} {} call failed: {detail}", authority.label());
                (Status::BadGateway, authority.outage_message().to_string())
            }
        };
        (status, Json(Envelope::<()>::failure(message))).respond_to(req)
    }
}

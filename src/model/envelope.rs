use serde::{Deserialize, Serialize};

/// Uniform response envelope returned by every BFF endpoint.
///
/// Modeled as a tagged result rather than a pair of optionals, so the invalid
/// states (`success == true` with an error message, `success == false` with
/// data) cannot be constructed. On the wire this becomes
/// `{"success": bool, "data"?: T, "error"?: string}`; contradictory payloads
/// are rejected on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    into = "WireEnvelope<T>",
    try_from = "WireEnvelope<T>",
    bound(
        serialize = "T: Serialize + Clone",
        deserialize = "T: Deserialize<'de>"
    )
)]
pub enum Envelope<T> {
    Success(T),
    Failure(String),
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self::Success(data)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(message) => Some(message),
        }
    }
}

/// The untagged shape the browser sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
struct WireEnvelope<T> {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> From<Envelope<T>> for WireEnvelope<T> {
    fn from(envelope: Envelope<T>) -> Self {
        match envelope {
            Envelope::Success(data) => WireEnvelope {
                success: true,
                data: Some(data),
                error: None,
            },
            Envelope::Failure(error) => WireEnvelope {
                success: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

impl<T> TryFrom<WireEnvelope<T>> for Envelope<T> {
    type Error = String;

    fn try_from(wire: WireEnvelope<T>) -> Result<Self, String> {
        match (wire.success, wire.data, wire.error) {
            (true, Some(data), None) => Ok(Envelope::Success(data)),
            (false, None, Some(error)) => Ok(Envelope::Failure(error)),
            (true, _, Some(_)) => Err("success envelope carrying an error message".to_string()),
            (true, None, None) => Err("success envelope missing its data".to_string()),
            (false, Some(_), _) => Err("failure envelope carrying data".to_string()),
            (false, None, None) => Err("failure envelope missing its message".to_string()),
        }
    }
}

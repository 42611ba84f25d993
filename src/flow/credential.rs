use crate::model::envelope::Envelope;

/// UI states of the credential issuance flow. `Issued` and `Ineligible` are
/// terminal until an explicit [`CredentialFlow::reset`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CredentialState {
    #[default]
    Idle,
    Submitting,
    Issued {
        credential: String,
    },
    Ineligible {
        message: String,
    },
    TransientError {
        message: String,
    },
}

/// State machine behind the registration screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialFlow {
    card_number: String,
    state: CredentialState,
}

impl CredentialFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CredentialState {
        &self.state
    }

    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    /// Text input; editable only before submission.
    pub fn set_card_number(&mut self, value: &str) {
        if self.state == CredentialState::Idle {
            self.card_number = value.to_string();
        }
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.state == CredentialState::Idle && !self.card_number.trim().is_empty()
    }

    /// Fire the submission. Returns the card number to send, or `None` when
    /// the control is disabled (nothing entered, in flight, or terminal).
    pub fn submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        self.state = CredentialState::Submitting;
        Some(self.card_number.clone())
    }

    /// Settle the in-flight call with the gateway's reply. A reply arriving
    /// in any other state is dropped.
    pub fn resolve(&mut self, reply: Envelope<String>) {
        if self.state != CredentialState::Submitting {
            return;
        }
        self.state = match reply {
            Envelope::Success(credential) => CredentialState::Issued { credential },
            Envelope::Failure(message) if is_ineligible_message(&message) => {
                CredentialState::Ineligible { message }
            }
            Envelope::Failure(message) => CredentialState::TransientError { message },
        };
    }

    /// Explicit restart: clears the card number and any outcome.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// The registration authority communicates eligibility failure only through
/// message text, so the flow folds diacritics and case and matches the known
/// phrasings. Anything else deliberately falls through to the transient
/// branch, where a retry makes sense.
fn is_ineligible_message(message: &str) -> bool {
    let normalized = fold_diacritics(&message.to_lowercase());
    normalized.contains("nao elegivel") || normalized.contains("not eligible")
}

/// Folds the accented letters that occur in authority messages.
fn fold_diacritics(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' | 'ü' => 'u',
            'ç' => 'c',
            _ => c,
        })
        .collect()
}

use crate::model::{api::VoteSubmission, envelope::Envelope};

/// UI states of the vote casting flow. `Accepted` is terminal; `Rejected`
/// keeps the ballot on screen and permits immediate resubmission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BallotState {
    #[default]
    Idle,
    Submitting,
    Accepted,
    Rejected {
        message: String,
    },
}

/// State machine behind the voting screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BallotFlow {
    credential: String,
    selected_candidate: Option<i32>,
    state: BallotState,
}

impl BallotFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BallotState {
        &self.state
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn selected_candidate(&self) -> Option<i32> {
        self.selected_candidate
    }

    /// Pick a candidate. Ignored while a call is in flight or after
    /// acceptance.
    pub fn select_candidate(&mut self, id: i32) {
        if self.editable() {
            self.selected_candidate = Some(id);
        }
    }

    /// Credential text input, same editability rule.
    pub fn set_credential(&mut self, value: &str) {
        if self.editable() {
            self.credential = value.to_string();
        }
    }

    /// Submitting needs both a selection and a non-blank credential,
    /// enforced here before any network call.
    pub fn can_submit(&self) -> bool {
        self.editable()
            && self.selected_candidate.is_some()
            && !self.credential.trim().is_empty()
    }

    /// Fire the submission. Returns the payload to send, or `None` when the
    /// control is disabled.
    pub fn submit(&mut self) -> Option<VoteSubmission> {
        if !self.can_submit() {
            return None;
        }
        let candidate_id = self.selected_candidate?;
        self.state = BallotState::Submitting;
        Some(VoteSubmission {
            credential: self.credential.clone(),
            candidate_id,
        })
    }

    /// Settle the in-flight call. Rejection preserves the selection and the
    /// credential text so the elector can correct and resubmit at once.
    pub fn resolve(&mut self, reply: Envelope<bool>) {
        if self.state != BallotState::Submitting {
            return;
        }
        self.state = match reply {
            Envelope::Success(_) => BallotState::Accepted,
            Envelope::Failure(message) => BallotState::Rejected { message },
        };
    }

    /// Back to a blank ballot.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn editable(&self) -> bool {
        matches!(self.state, BallotState::Idle | BallotState::Rejected { .. })
    }
}

//! Client-side flow controllers: explicit finite-state machines for the
//! three voting stages, decoupled from any rendering layer so transitions
//! can be tested without a view.
//!
//! A controller never performs network I/O itself. `submit()` hands the
//! driving UI the payload to send and moves the machine to its in-flight
//! state; the settled reply comes back through `resolve()` as the uniform
//! [`Envelope`](crate::model::envelope::Envelope). While a call is in
//! flight the triggering control is disabled (`can_submit()` is false) —
//! a second attempt is prevented by disabling, not by cancellation.

pub mod ballot;
pub mod credential;
pub mod results;

pub use ballot::{BallotFlow, BallotState};
pub use credential::{CredentialFlow, CredentialState};
pub use results::ResultsBoard;

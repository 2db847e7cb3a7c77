//! Guided conversation flows.
//!
//! A flow is a fixed, linear sequence of question steps. The controller
//! presents each step's prompt and options, validates the user's answer,
//! records it, and moves on until the terminal step is answered. Sessions are
//! in-memory only and never go backwards except through a reset.

pub mod answers;
pub mod clock;
pub mod controller;
pub mod result;
pub mod session;
pub mod shared;
pub mod state;
pub mod step;
pub mod transcript;

pub use answers::CollectedAnswers;
pub use clock::{Clock, FixedClock, SystemClock};
pub use controller::{GuidedConversationController, SubmitOutcome};
pub use result::FlowResult;
pub use session::FlowSession;
pub use shared::{SessionSnapshot, SharedSession};
pub use state::FlowState;
pub use step::{StepDefinition, StepId, StepTable};
pub use transcript::{Speaker, Transcript, TranscriptEntry};

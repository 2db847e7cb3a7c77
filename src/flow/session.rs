//! A single traversal of a flow.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::answers::CollectedAnswers;
use super::state::FlowState;
use super::step::{StepDefinition, StepTable};
use super::transcript::Transcript;

/// In-memory session state. Created by
/// [`GuidedConversationController::start`](super::GuidedConversationController::start)
/// and mutated only through the controller.
#[derive(Debug, Clone)]
pub struct FlowSession {
    pub(crate) id: Uuid,
    pub(crate) table: Arc<StepTable>,
    pub(crate) state: FlowState,
    pub(crate) transcript: Transcript,
    pub(crate) answers: CollectedAnswers,
    pub(crate) started_at: DateTime<Utc>,
}

impl FlowSession {
    pub(crate) fn new(table: Arc<StepTable>, started_at: DateTime<Utc>) -> Self {
        let first = table.first().id;
        Self {
            id: Uuid::new_v4(),
            table,
            state: FlowState::AwaitingAnswer(first),
            transcript: Transcript::new(),
            answers: CollectedAnswers::new(),
            started_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn table(&self) -> &StepTable {
        &self.table
    }

    pub fn flow_name(&self) -> &str {
        self.table.name()
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The step awaiting an answer; `None` once completed.
    pub fn current_step(&self) -> Option<&StepDefinition> {
        self.state.step_id().and_then(|id| self.table.get(id))
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn answers(&self) -> &CollectedAnswers {
        &self.answers
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_terminal()
    }
}

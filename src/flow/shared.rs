//! SharedSession — serialized access to a session from concurrent callers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::FlowError;

use super::answers::CollectedAnswers;
use super::controller::{GuidedConversationController, SubmitOutcome};
use super::session::FlowSession;
use super::state::FlowState;
use super::step::{StepDefinition, StepTable};
use super::transcript::Transcript;

/// Point-in-time copy of a session's observable state.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub state: FlowState,
    pub current_step: Option<StepDefinition>,
    pub transcript: Transcript,
    pub answers: CollectedAnswers,
}

/// A session behind a mutex. Each operation holds the lock for its whole
/// duration, so racing UI events are applied one at a time and the transcript
/// stays strictly ordered.
#[derive(Debug, Clone)]
pub struct SharedSession {
    controller: Arc<GuidedConversationController>,
    session: Arc<Mutex<FlowSession>>,
}

impl SharedSession {
    pub fn new(controller: Arc<GuidedConversationController>, session: FlowSession) -> Self {
        Self {
            controller,
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Start a new session on `table` and wrap it.
    pub fn start(
        controller: Arc<GuidedConversationController>,
        table: impl Into<Arc<StepTable>>,
    ) -> Self {
        let session = controller.start_table(table);
        Self::new(controller, session)
    }

    pub async fn submit_answer(&self, raw_answer: &str) -> Result<SubmitOutcome, FlowError> {
        let mut session = self.session.lock().await;
        self.controller.submit_answer(&mut session, raw_answer)
    }

    pub async fn reset(&self) {
        let mut session = self.session.lock().await;
        self.controller.reset(&mut session);
    }

    pub async fn restart_with(&self, table: impl Into<Arc<StepTable>>) {
        let mut session = self.session.lock().await;
        self.controller.restart_with(&mut session, table);
    }

    pub async fn acknowledge(&self, text: impl Into<String>) {
        let mut session = self.session.lock().await;
        self.controller.acknowledge(&mut session, text);
    }

    pub async fn is_complete(&self) -> bool {
        self.session.lock().await.is_complete()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let session = self.session.lock().await;
        SessionSnapshot {
            state: session.state(),
            current_step: session.current_step().cloned(),
            transcript: session.transcript().clone(),
            answers: session.answers().clone(),
        }
    }
}

//! GuidedConversationController — validates answers and drives a session
//! through its steps.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::FlowError;

use super::answers::CollectedAnswers;
use super::clock::{Clock, SystemClock};
use super::result::FlowResult;
use super::session::FlowSession;
use super::state::FlowState;
use super::step::{StepDefinition, StepId, StepTable};
use super::transcript::{Transcript, TranscriptEntry};

/// What an accepted answer did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Moved on; the next prompt has been appended to the transcript.
    Advanced { next_step: StepId },
    /// The terminal step was answered. No further prompt is emitted.
    Completed(FlowResult),
}

/// Stateless driver for [`FlowSession`]s.
///
/// Every operation is synchronous and touches nothing but the session it is
/// given. Exclusive access comes from `&mut FlowSession`; callers that share a
/// session between tasks go through [`SharedSession`](super::SharedSession).
#[derive(Clone)]
pub struct GuidedConversationController {
    clock: Arc<dyn Clock>,
}

impl Default for GuidedConversationController {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GuidedConversationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuidedConversationController").finish_non_exhaustive()
    }
}

impl GuidedConversationController {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Validate `steps` and start a session on them.
    pub fn start(
        &self,
        name: impl Into<String>,
        steps: Vec<StepDefinition>,
    ) -> Result<FlowSession, FlowError> {
        let table = StepTable::new(name, steps)?;
        Ok(self.start_table(table))
    }

    /// Start a session on an already-validated table.
    pub fn start_table(&self, table: impl Into<Arc<StepTable>>) -> FlowSession {
        let mut session = FlowSession::new(table.into(), self.clock.now());
        self.prompt_current(&mut session);
        info!(
            session_id = %session.id,
            flow = %session.flow_name(),
            steps = session.table.len(),
            "Flow started"
        );
        session
    }

    /// Validate and record an answer for the current step.
    ///
    /// The answer is trimmed first. On error the session is left untouched.
    pub fn submit_answer(
        &self,
        session: &mut FlowSession,
        raw_answer: &str,
    ) -> Result<SubmitOutcome, FlowError> {
        let step_id = session.state.step_id().ok_or(FlowError::AlreadyCompleted)?;
        let table = Arc::clone(&session.table);
        let step = table
            .get(step_id)
            .ok_or_else(|| FlowError::invalid(format!("session points at missing step {step_id}")))?;

        let answer = raw_answer.trim();
        if answer.is_empty() {
            debug!(session_id = %session.id, step_id, "Rejected empty answer");
            return Err(FlowError::EmptyAnswer { step_id });
        }
        if !step.allows_free_text && !step.has_option(answer) {
            debug!(session_id = %session.id, step_id, answer, "Rejected unrecognized option");
            return Err(FlowError::UnrecognizedOption {
                step_id,
                answer: answer.to_string(),
                options: step.options.clone(),
            });
        }

        let target = if step.is_terminal {
            FlowState::Completed
        } else {
            let next = table.next_after(step_id).ok_or_else(|| {
                FlowError::invalid(format!("non-terminal step {step_id} has no successor"))
            })?;
            FlowState::AwaitingAnswer(next.id)
        };
        debug_assert!(session.state.can_transition_to(target));

        let now = self.clock.now();
        session
            .transcript
            .push(TranscriptEntry::user(answer, now).for_step(step_id));
        let recorded = session.answers.record(step_id, answer.to_string());
        debug_assert!(recorded, "step {step_id} answered twice");
        session.state = target;

        match target {
            FlowState::Completed => {
                info!(
                    session_id = %session.id,
                    flow = %session.flow_name(),
                    answers = session.answers.len(),
                    "Flow completed"
                );
                Ok(SubmitOutcome::Completed(FlowResult {
                    flow_name: session.flow_name().to_string(),
                    session_id: session.id,
                    answers: session.answers.clone(),
                    completed_at: now,
                }))
            }
            FlowState::AwaitingAnswer(next_step) => {
                debug!(session_id = %session.id, from = step_id, to = next_step, "Flow advanced");
                self.prompt_current(session);
                Ok(SubmitOutcome::Advanced { next_step })
            }
        }
    }

    /// Discard transcript and answers and start over on the same table.
    pub fn reset(&self, session: &mut FlowSession) {
        let table = Arc::clone(&session.table);
        self.restart_with(session, table);
    }

    /// Discard the session and start over on `table`, e.g. when the user
    /// switches persona.
    pub fn restart_with(&self, session: &mut FlowSession, table: impl Into<Arc<StepTable>>) {
        let previous = session.id;
        *session = FlowSession::new(table.into(), self.clock.now());
        self.prompt_current(session);
        info!(
            previous_session = %previous,
            session_id = %session.id,
            flow = %session.flow_name(),
            "Flow reset"
        );
    }

    /// Append a free-form assistant message not tied to any step. State and
    /// answers are unaffected.
    pub fn acknowledge(&self, session: &mut FlowSession, text: impl Into<String>) {
        session
            .transcript
            .push(TranscriptEntry::assistant(text, self.clock.now()));
    }

    pub fn current_step<'a>(&self, session: &'a FlowSession) -> Option<&'a StepDefinition> {
        session.current_step()
    }

    pub fn transcript<'a>(&self, session: &'a FlowSession) -> &'a Transcript {
        session.transcript()
    }

    pub fn answers<'a>(&self, session: &'a FlowSession) -> &'a CollectedAnswers {
        session.answers()
    }

    pub fn is_complete(&self, session: &FlowSession) -> bool {
        session.is_complete()
    }

    fn prompt_current(&self, session: &mut FlowSession) {
        let Some(step) = session.current_step() else {
            return;
        };
        let entry = TranscriptEntry::assistant(step.prompt.clone(), self.clock.now())
            .for_step(step.id)
            .with_options(step.options.clone());
        session.transcript.push(entry);
    }
}

//! Flow state machine — which step the session is waiting on.

use serde::{Deserialize, Serialize};

use super::step::StepId;

/// The state of a guided flow.
///
/// Progresses linearly: AwaitingAnswer(first) → AwaitingAnswer(first + 1) →
/// … → Completed. Only `reset` moves a session back to an earlier step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "step_id", rename_all = "snake_case")]
pub enum FlowState {
    AwaitingAnswer(StepId),
    Completed,
}

impl FlowState {
    /// Check if a transition from `self` to `target` is valid.
    ///
    /// Only a single step forward, or completion from an awaiting state, is
    /// allowed. Whether completion is reached from the terminal step is the
    /// controller's concern.
    pub fn can_transition_to(&self, target: FlowState) -> bool {
        use FlowState::*;
        match (self, target) {
            (AwaitingAnswer(from), AwaitingAnswer(to)) => from.checked_add(1) == Some(to),
            (AwaitingAnswer(_), Completed) => true,
            (Completed, _) => false,
        }
    }

    /// Whether this state is terminal (the flow is done).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// The step awaiting an answer, if any.
    pub fn step_id(&self) -> Option<StepId> {
        match self {
            Self::AwaitingAnswer(id) => Some(*id),
            Self::Completed => None,
        }
    }
}

impl std::fmt::Display for FlowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AwaitingAnswer(id) => write!(f, "awaiting_answer({id})"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use FlowState::*;
        let transitions = [
            (AwaitingAnswer(0), AwaitingAnswer(1)),
            (AwaitingAnswer(1), AwaitingAnswer(2)),
            (AwaitingAnswer(3), Completed),
        ];
        for (from, to) in transitions {
            assert!(from.can_transition_to(to), "{from} should transition to {to}");
        }
    }

    #[test]
    fn invalid_transitions() {
        use FlowState::*;
        // Skip steps
        assert!(!AwaitingAnswer(0).can_transition_to(AwaitingAnswer(2)));
        // Go backward
        assert!(!AwaitingAnswer(2).can_transition_to(AwaitingAnswer(1)));
        // Self-transition
        assert!(!AwaitingAnswer(1).can_transition_to(AwaitingAnswer(1)));
        // Terminal
        assert!(!Completed.can_transition_to(AwaitingAnswer(0)));
        assert!(!Completed.can_transition_to(Completed));
        // Overflow
        assert!(!AwaitingAnswer(StepId::MAX).can_transition_to(AwaitingAnswer(0)));
    }

    #[test]
    fn is_terminal() {
        assert!(FlowState::Completed.is_terminal());
        assert!(!FlowState::AwaitingAnswer(0).is_terminal());
    }

    #[test]
    fn step_id_only_while_awaiting() {
        assert_eq!(FlowState::AwaitingAnswer(4).step_id(), Some(4));
        assert_eq!(FlowState::Completed.step_id(), None);
    }

    #[test]
    fn serde_shape() {
        let json = serde_json::to_value(FlowState::AwaitingAnswer(2)).unwrap();
        assert_eq!(json, serde_json::json!({"state": "awaiting_answer", "step_id": 2}));

        let json = serde_json::to_value(FlowState::Completed).unwrap();
        assert_eq!(json, serde_json::json!({"state": "completed"}));
    }
}

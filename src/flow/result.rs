//! The summary produced when a flow completes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::answers::CollectedAnswers;
use super::step::StepId;

/// Everything collected by a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowResult {
    pub flow_name: String,
    pub session_id: Uuid,
    pub answers: CollectedAnswers,
    pub completed_at: DateTime<Utc>,
}

impl FlowResult {
    pub fn answer(&self, step_id: StepId) -> Option<&str> {
        self.answers.get(step_id)
    }

    /// Render the answers as a markdown list, labelling each step with
    /// `label(step_id)` (falling back to `Step N`).
    pub fn to_markdown<'a, F>(&self, title: &str, label: F) -> String
    where
        F: Fn(StepId) -> Option<&'a str>,
    {
        let mut parts = vec![format!("# {title}")];
        for (id, answer) in self.answers.iter() {
            match label(id) {
                Some(name) => parts.push(format!("- **{name}:** {answer}")),
                None => parts.push(format!("- **Step {id}:** {answer}")),
            }
        }
        parts.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> FlowResult {
        FlowResult {
            flow_name: "travel".to_string(),
            session_id: Uuid::new_v4(),
            answers: [(0, "Goa"), (1, "Next Week")].into_iter().collect(),
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn markdown_uses_labels_with_fallback() {
        let md = result().to_markdown("Trip", |id| (id == 0).then_some("Destination"));
        assert_eq!(md, "# Trip\n- **Destination:** Goa\n- **Step 1:** Next Week");
    }

    #[test]
    fn json_contains_answers() {
        let r = result();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["flow_name"], "travel");
        assert_eq!(json["answers"]["1"], "Next Week");

        let parsed: FlowResult = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, r);
    }
}

//! Step definitions and validated step tables.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::FlowError;

/// Ordinal position of a step within a flow.
pub type StepId = u32;

/// One question of a guided flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDefinition {
    pub id: StepId,
    pub prompt: String,
    /// Choices offered as quick replies. May be empty for free-text-only steps.
    #[serde(default)]
    pub options: Vec<String>,
    /// Whether an answer outside `options` is accepted.
    #[serde(default)]
    pub allows_free_text: bool,
    #[serde(default)]
    pub is_terminal: bool,
    /// Short name for the answer in result summaries, e.g. "Destination".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl StepDefinition {
    /// Create a strict-choice, non-terminal step.
    pub fn new(id: StepId, prompt: impl Into<String>) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            options: Vec::new(),
            allows_free_text: false,
            is_terminal: false,
            label: None,
        }
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn free_text(mut self) -> Self {
        self.allows_free_text = true;
        self
    }

    pub fn terminal(mut self) -> Self {
        self.is_terminal = true;
        self
    }

    /// Case-sensitive match against the listed options.
    pub fn has_option(&self, answer: &str) -> bool {
        self.options.iter().any(|o| o == answer)
    }
}

/// A validated, immutable flow: a named, non-empty, contiguous run of steps
/// ending in exactly one terminal step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepTable {
    name: String,
    steps: Vec<StepDefinition>,
}

impl StepTable {
    /// Validate `steps` and build a table.
    ///
    /// Steps may be supplied in any order; they are sorted by id. Ids must
    /// start at 0 or 1 and be contiguous.
    pub fn new(name: impl Into<String>, mut steps: Vec<StepDefinition>) -> Result<Self, FlowError> {
        let name = name.into();
        if steps.is_empty() {
            return Err(FlowError::invalid(format!("flow {name:?} has no steps")));
        }

        steps.sort_by_key(|s| s.id);

        let mut seen = HashSet::new();
        for step in &steps {
            if !seen.insert(step.id) {
                return Err(FlowError::invalid(format!("duplicate step id {}", step.id)));
            }
        }

        let first = steps[0].id;
        if first > 1 {
            return Err(FlowError::invalid(format!(
                "step ids must start at 0 or 1, found {first}"
            )));
        }
        for (offset, step) in steps.iter().enumerate() {
            if step.id != first + offset as StepId {
                return Err(FlowError::invalid(format!(
                    "step ids are not contiguous: expected {}, found {}",
                    first + offset as StepId,
                    step.id
                )));
            }
            if step.options.is_empty() && !step.allows_free_text {
                return Err(FlowError::invalid(format!(
                    "step {} has no options and does not allow free text",
                    step.id
                )));
            }
        }

        let terminals: Vec<StepId> = steps.iter().filter(|s| s.is_terminal).map(|s| s.id).collect();
        match terminals.as_slice() {
            [] => return Err(FlowError::invalid("no terminal step")),
            [only] => {
                let last = steps[steps.len() - 1].id;
                if *only != last {
                    return Err(FlowError::invalid(format!(
                        "terminal step {only} is not the last step ({last})"
                    )));
                }
            }
            many => {
                return Err(FlowError::invalid(format!(
                    "multiple terminal steps: {many:?}"
                )));
            }
        }

        Ok(Self { name, steps })
    }

    /// Parse and validate a table from JSON of the form
    /// `{"name": "...", "steps": [ ... ]}`.
    pub fn from_json(json: &str) -> Result<Self, FlowError> {
        #[derive(Deserialize)]
        struct RawTable {
            name: String,
            steps: Vec<StepDefinition>,
        }

        let raw: RawTable = serde_json::from_str(json)
            .map_err(|e| FlowError::invalid(format!("malformed table JSON: {e}")))?;
        Self::new(raw.name, raw.steps)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false: validation rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn first(&self) -> &StepDefinition {
        &self.steps[0]
    }

    /// Summary label for `id`, if the step defines one.
    pub fn label(&self, id: StepId) -> Option<&str> {
        self.get(id).and_then(|s| s.label.as_deref())
    }

    pub fn get(&self, id: StepId) -> Option<&StepDefinition> {
        let first = self.steps[0].id;
        id.checked_sub(first)
            .and_then(|offset| self.steps.get(offset as usize))
    }

    /// The step after `id`, if any.
    pub fn next_after(&self, id: StepId) -> Option<&StepDefinition> {
        self.get(id.checked_add(1)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(id: StepId) -> StepDefinition {
        StepDefinition::new(id, format!("Question {id}?")).with_options(["A", "B"])
    }

    #[test]
    fn accepts_zero_and_one_based_tables() {
        let zero = StepTable::new("zero", vec![step(0), step(1).terminal()]).unwrap();
        assert_eq!(zero.first().id, 0);
        assert_eq!(zero.len(), 2);

        let one = StepTable::new("one", vec![step(1), step(2), step(3).terminal()]).unwrap();
        assert_eq!(one.first().id, 1);
        assert_eq!(one.get(3).map(|s| s.id), Some(3));
        assert!(one.get(0).is_none());
    }

    #[test]
    fn sorts_out_of_order_steps() {
        let table = StepTable::new("shuffled", vec![step(2).terminal(), step(0), step(1)]).unwrap();
        let ids: Vec<StepId> = table.steps().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn rejects_empty_table() {
        let err = StepTable::new("empty", vec![]).unwrap_err();
        assert!(matches!(err, FlowError::InvalidFlowDefinition { .. }));
    }

    #[test]
    fn rejects_gaps_and_bad_start() {
        assert!(StepTable::new("gap", vec![step(0), step(2).terminal()]).is_err());
        assert!(StepTable::new("late", vec![step(2), step(3).terminal()]).is_err());
        assert!(StepTable::new("dup", vec![step(0), step(0).terminal()]).is_err());
    }

    #[test]
    fn rejects_bad_terminal_marking() {
        assert!(StepTable::new("none", vec![step(0), step(1)]).is_err());
        assert!(StepTable::new("many", vec![step(0).terminal(), step(1).terminal()]).is_err());
        assert!(StepTable::new("early", vec![step(0).terminal(), step(1)]).is_err());
    }

    #[test]
    fn rejects_unanswerable_step() {
        let bare = StepDefinition::new(0, "Say something").terminal();
        assert!(StepTable::new("bare", vec![bare]).is_err());

        let open = StepDefinition::new(0, "Say something").free_text().terminal();
        assert!(StepTable::new("open", vec![open]).is_ok());
    }

    #[test]
    fn next_after_walks_the_table() {
        let table = StepTable::new("walk", vec![step(0), step(1), step(2).terminal()]).unwrap();
        assert_eq!(table.next_after(0).map(|s| s.id), Some(1));
        assert_eq!(table.next_after(1).map(|s| s.id), Some(2));
        assert!(table.next_after(2).is_none());
        assert!(table.next_after(StepId::MAX).is_none());
    }

    #[test]
    fn option_match_is_case_sensitive() {
        let s = step(0);
        assert!(s.has_option("A"));
        assert!(!s.has_option("a"));
    }

    #[test]
    fn from_json_validates() {
        let json = r#"{
            "name": "coffee",
            "steps": [
                {"id": 0, "prompt": "Size?", "options": ["Small", "Large"]},
                {"id": 1, "prompt": "Name?", "allows_free_text": true, "is_terminal": true}
            ]
        }"#;
        let table = StepTable::from_json(json).unwrap();
        assert_eq!(table.name(), "coffee");
        assert!(table.get(1).unwrap().is_terminal);
        assert_eq!(table.label(0), None);

        let bad = r#"{"name": "broken", "steps": [{"id": 0, "prompt": "?", "options": ["x"]}]}"#;
        assert!(StepTable::from_json(bad).is_err());
        assert!(StepTable::from_json("not json").is_err());
    }
}

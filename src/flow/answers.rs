//! Answers collected during a flow, keyed by step.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::step::StepId;

/// One answer per passed step. Steps are passed in ascending id order, so the
/// sorted map also preserves insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectedAnswers {
    answers: BTreeMap<StepId, String>,
}

impl CollectedAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the answer for `step_id`. Returns false if the step already
    /// has an answer (the existing value is kept).
    pub(crate) fn record(&mut self, step_id: StepId, answer: String) -> bool {
        match self.answers.entry(step_id) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(answer);
                true
            }
            std::collections::btree_map::Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, step_id: StepId) -> Option<&str> {
        self.answers.get(&step_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StepId, &str)> {
        self.answers.iter().map(|(id, a)| (*id, a.as_str()))
    }
}

impl<S: Into<String>> FromIterator<(StepId, S)> for CollectedAnswers {
    fn from_iter<I: IntoIterator<Item = (StepId, S)>>(iter: I) -> Self {
        Self {
            answers: iter.into_iter().map(|(id, a)| (id, a.into())).collect(),
        }
    }
}

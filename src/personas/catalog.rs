//! PersonaCatalog — the step tables in use for this process.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::error::{ConfigError, Error, FlowError};
use crate::flow::StepTable;

use super::{tables, Persona};

/// The selector table plus one validated table per persona.
///
/// Tables are shared read-only; every session holds its own `Arc`.
#[derive(Debug, Clone)]
pub struct PersonaCatalog {
    selector: Arc<StepTable>,
    travel: Arc<StepTable>,
    shopping: Arc<StepTable>,
    research: Arc<StepTable>,
    chat: Arc<StepTable>,
}

impl PersonaCatalog {
    /// Catalog of the built-in tables.
    pub fn builtin() -> Result<Self, FlowError> {
        Ok(Self {
            selector: Arc::new(tables::selector()?),
            travel: Arc::new(tables::travel()?),
            shopping: Arc::new(tables::shopping()?),
            research: Arc::new(tables::research()?),
            chat: Arc::new(tables::chat()?),
        })
    }

    pub fn selector(&self) -> Arc<StepTable> {
        Arc::clone(&self.selector)
    }

    pub fn table(&self, persona: Persona) -> Arc<StepTable> {
        let table = match persona {
            Persona::Travel => &self.travel,
            Persona::Shopping => &self.shopping,
            Persona::Research => &self.research,
            Persona::Chat => &self.chat,
        };
        Arc::clone(table)
    }

    /// Replace a persona's flow. The table's name picks the persona.
    pub fn with_override(mut self, table: StepTable) -> Result<Self, Error> {
        let persona: Persona = table.name().parse()?;
        info!(persona = %persona, steps = table.len(), "Overriding persona flow");
        let slot = match persona {
            Persona::Travel => &mut self.travel,
            Persona::Shopping => &mut self.shopping,
            Persona::Research => &mut self.research,
            Persona::Chat => &mut self.chat,
        };
        *slot = Arc::new(table);
        Ok(self)
    }

    /// Load a JSON step table from `path` and apply it with
    /// [`with_override`](Self::with_override).
    pub fn with_override_file(self, path: &Path) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let table = StepTable::from_json(&json)?;
        self.with_override(table)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::PersonaError;

    const CUSTOM_TRAVEL: &str = r#"{
        "name": "travel",
        "steps": [
            {"id": 1, "prompt": "Where to?", "allows_free_text": true, "label": "Destination"},
            {"id": 2, "prompt": "Window or aisle?", "options": ["Window", "Aisle"], "is_terminal": true}
        ]
    }"#;

    #[test]
    fn builtin_tables_are_named_after_personas() {
        let catalog = PersonaCatalog::builtin().unwrap();
        assert_eq!(catalog.selector().name(), tables::SELECTOR);
        for persona in Persona::ALL {
            assert_eq!(catalog.table(persona).name(), persona.id());
        }
    }

    #[test]
    fn override_replaces_only_named_persona() {
        let table = StepTable::from_json(CUSTOM_TRAVEL).unwrap();
        let catalog = PersonaCatalog::builtin().unwrap().with_override(table).unwrap();
        assert_eq!(catalog.table(Persona::Travel).len(), 2);
        assert_eq!(catalog.table(Persona::Shopping).len(), 5);
    }

    #[test]
    fn override_with_unknown_name_fails() {
        let table = StepTable::new(
            "weather",
            vec![crate::flow::StepDefinition::new(0, "?").free_text().terminal()],
        )
        .unwrap();
        let err = PersonaCatalog::builtin().unwrap().with_override(table).unwrap_err();
        assert!(matches!(err, Error::Persona(PersonaError::Unknown(_))));
    }

    #[test]
    fn override_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CUSTOM_TRAVEL.as_bytes()).unwrap();

        let catalog = PersonaCatalog::builtin()
            .unwrap()
            .with_override_file(file.path())
            .unwrap();
        assert_eq!(catalog.table(Persona::Travel).first().id, 1);
    }

    #[test]
    fn override_file_errors() {
        let missing = PersonaCatalog::builtin()
            .unwrap()
            .with_override_file(Path::new("/nonexistent/flow.json"))
            .unwrap_err();
        assert!(matches!(missing, Error::Config(ConfigError::Io(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"name": "travel", "steps": []}"#).unwrap();
        let invalid = PersonaCatalog::builtin()
            .unwrap()
            .with_override_file(file.path())
            .unwrap_err();
        assert!(matches!(
            invalid,
            Error::Flow(FlowError::InvalidFlowDefinition { .. })
        ));
    }
}

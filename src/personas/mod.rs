//! Assistant personas and their built-in guided flows.

pub mod catalog;
pub mod replies;
pub mod tables;

pub use catalog::PersonaCatalog;

use serde::{Deserialize, Serialize};

use crate::error::PersonaError;

/// An assistant the user can talk to.
///
/// Travel, shopping and research run a multi-step guided flow ending in a
/// summary. General chat asks a single open question and answers every
/// message with a canned reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    Travel,
    Shopping,
    Research,
    Chat,
}

impl Persona {
    pub const ALL: [Persona; 4] = [Self::Travel, Self::Shopping, Self::Research, Self::Chat];

    /// Stable identifier; also the name of the persona's step table.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Travel => "travel",
            Self::Shopping => "shopping",
            Self::Research => "research",
            Self::Chat => "chat",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Travel => "Travel Planner",
            Self::Shopping => "Shopping Assistant",
            Self::Research => "Research Assistant",
            Self::Chat => "AI Chat",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Travel => "✈️",
            Self::Shopping => "🛍️",
            Self::Research => "🔬",
            Self::Chat => "💬",
        }
    }

    /// The option offered for this persona on the selector menu.
    pub fn menu_label(&self) -> &'static str {
        match self {
            Self::Travel => "✈️ Travel Planning",
            Self::Shopping => "🛍️ Shopping Assistant",
            Self::Research => "🔬 Research Help",
            Self::Chat => "💬 General Chat",
        }
    }

    /// Announcement shown when the user picks this persona.
    pub fn switch_notice(&self) -> &'static str {
        match self {
            Self::Travel => {
                "✈️ Great! Switching you to the Travel Planner Assistant. Let's plan your perfect trip!"
            }
            Self::Shopping => "🛍️ Sure! Let's find you the best deals with the Shopping Assistant!",
            Self::Research => {
                "🔬 Perfect! The Research Assistant is here to help you find information on any topic."
            }
            Self::Chat => "💬 Sure! Ask me anything and I'll do my best to help.",
        }
    }

    /// Announcement for a direct `/switch` from another persona.
    pub fn switching_notice(&self) -> String {
        format!("🔄 Switching to {}... {}", self.display_name(), self.emoji())
    }

    /// Shown after the terminal step is answered, before the summary.
    /// `None` for personas that produce no summary.
    pub fn completion_message(&self) -> Option<&'static str> {
        match self {
            Self::Travel => Some("✨ Amazing! Let me create your perfect travel plan..."),
            Self::Shopping => Some("Perfect! Here are some top picks for you:"),
            Self::Research => {
                Some("✨ Perfect! Let me compile comprehensive research findings for you...")
            }
            Self::Chat => None,
        }
    }

    /// Heading of the completed-flow summary.
    pub fn summary_title(&self) -> Option<&'static str> {
        match self {
            Self::Travel => Some("Your Travel Plan"),
            Self::Shopping => Some("Your Shopping Brief"),
            Self::Research => Some("Your Research Brief"),
            Self::Chat => None,
        }
    }

    /// Resolve a selector answer or typed request to a persona by keyword.
    ///
    /// Matches "travel", "shop", "research" and "chat" case-insensitively anywhere in
    /// the text. Text matching none (or several) is rejected rather than
    /// routed to a default.
    pub fn from_selection(text: &str) -> Result<Self, PersonaError> {
        let lower = text.to_lowercase();
        let matches: Vec<Persona> = Self::ALL
            .into_iter()
            .filter(|p| {
                let keyword = match p {
                    Self::Travel => "travel",
                    Self::Shopping => "shop",
                    Self::Research => "research",
                    Self::Chat => "chat",
                };
                lower.contains(keyword)
            })
            .collect();

        match matches.as_slice() {
            [one] => Ok(*one),
            _ => Err(PersonaError::NoMatch(text.trim().to_string())),
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for Persona {
    type Err = PersonaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "travel" => Ok(Self::Travel),
            "shopping" => Ok(Self::Shopping),
            "research" => Ok(Self::Research),
            "chat" | "ai chat" => Ok(Self::Chat),
            _ => Err(PersonaError::Unknown(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_labels_select_their_persona() {
        for persona in Persona::ALL {
            assert_eq!(Persona::from_selection(persona.menu_label()), Ok(persona));
        }
    }

    #[test]
    fn selection_by_keyword() {
        assert_eq!(Persona::from_selection("I want to plan TRAVEL"), Ok(Persona::Travel));
        assert_eq!(
            Persona::from_selection("help me shop for shoes"),
            Ok(Persona::Shopping)
        );
        assert_eq!(
            Persona::from_selection("I need help researching something"),
            Ok(Persona::Research)
        );
    }

    #[test]
    fn ambiguous_or_unknown_selection_fails() {
        assert_eq!(
            Persona::from_selection("  tell me a joke "),
            Err(PersonaError::NoMatch("tell me a joke".to_string()))
        );
        assert!(Persona::from_selection("research travel deals").is_err());
    }

    #[test]
    fn general_chat_is_selectable() {
        assert_eq!(Persona::from_selection("let's just chat"), Ok(Persona::Chat));
        assert_eq!("AI Chat".parse::<Persona>(), Ok(Persona::Chat));
        assert_eq!(Persona::Chat.completion_message(), None);
        assert_eq!(Persona::Chat.summary_title(), None);
    }

    #[test]
    fn switching_notice_names_persona() {
        assert_eq!(
            Persona::Research.switching_notice(),
            "🔄 Switching to Research Assistant... 🔬"
        );
    }

    #[test]
    fn display_matches_serde_and_from_str() {
        for persona in Persona::ALL {
            let display = persona.to_string();
            let json = serde_json::to_string(&persona).unwrap();
            assert_eq!(format!("\"{display}\""), json);
            assert_eq!(display.parse::<Persona>(), Ok(persona));
        }
        assert_eq!(
            "weather".parse::<Persona>(),
            Err(PersonaError::Unknown("weather".to_string()))
        );
    }
}

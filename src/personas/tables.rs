//! Built-in step tables for the selector menu and each persona.

use crate::error::FlowError;
use crate::flow::{StepDefinition, StepTable};

use super::Persona;

/// Table name of the persona selector menu.
pub const SELECTOR: &str = "selector";

/// Whether a listed option asks the user to type their own answer instead
/// of being recorded literally (e.g. "Custom Date"). Only meaningful for
/// options of the current step; typed text is never checked.
pub fn is_custom_option(option: &str) -> bool {
    option.starts_with("Custom")
}

/// Single-step menu choosing which persona to talk to.
pub fn selector() -> Result<StepTable, FlowError> {
    StepTable::new(
        SELECTOR,
        vec![
            StepDefinition::new(0, "👋 Hi! I'm your AI Assistant. Which type of help would you like today?")
                .with_options(Persona::ALL.map(|p| p.menu_label()))
                .labelled("Assistant")
                .terminal(),
        ],
    )
}

/// The built-in flow for `persona`.
pub fn for_persona(persona: Persona) -> Result<StepTable, FlowError> {
    match persona {
        Persona::Travel => travel(),
        Persona::Shopping => shopping(),
        Persona::Research => research(),
        Persona::Chat => chat(),
    }
}

/// One open question; every later message gets a canned reply.
pub fn chat() -> Result<StepTable, FlowError> {
    StepTable::new(
        Persona::Chat.id(),
        vec![
            StepDefinition::new(0, "💬 Hi! I'm your AI Chat assistant. What can I help you with?")
                .with_options([
                    "Explain quantum computing in simple terms",
                    "Help me write a professional email",
                    "What are the latest AI trends?",
                    "Debug my React component",
                ])
                .free_text()
                .labelled("Question")
                .terminal(),
        ],
    )
}

/// Destination → date → budget → stay preference.
pub fn travel() -> Result<StepTable, FlowError> {
    StepTable::new(
        Persona::Travel.id(),
        vec![
            StepDefinition::new(0, "✈️ Hi! I'm your Travel Planner Assistant. Where would you like to travel?")
                .with_options(["Goa", "Paris", "Bali", "Tokyo", "Custom"])
                .free_text()
                .labelled("Destination"),
            StepDefinition::new(1, "🗓️ Great choice! When do you plan to go?")
                .with_options(["Next Week", "July 15", "August 10", "Custom Date"])
                .free_text()
                .labelled("Travel date"),
            StepDefinition::new(2, "💰 Perfect! Any preferences on budget or travel type?")
                .with_options(["Luxury", "Mid-Range", "Budget", "Adventure", "Romantic"])
                .labelled("Budget"),
            StepDefinition::new(3, "🏨 Do you want us to plan your stay, food, and activities?")
                .with_options(["Yes, everything!", "Just places to visit", "Stay & activities only"])
                .labelled("Planning scope")
                .terminal(),
        ],
    )
}

/// Product → category → brand → budget → features.
pub fn shopping() -> Result<StepTable, FlowError> {
    StepTable::new(
        Persona::Shopping.id(),
        vec![
            StepDefinition::new(0, "Hi! I'm your shopping assistant 🛍️ What are you looking for today?")
                .with_options(["Running shoes", "Laptop", "Skincare", "Headphones"])
                .free_text()
                .labelled("Looking for"),
            StepDefinition::new(1, "Great choice! Which category would you like to explore?")
                .with_options(["Clothing", "Gadgets", "Groceries", "Skincare", "Accessories", "Other"])
                .labelled("Category"),
            StepDefinition::new(2, "Do you have a preferred brand in mind?")
                .with_options(["Nike", "Sony", "Apple", "Samsung", "No preference"])
                .free_text()
                .labelled("Brand"),
            StepDefinition::new(3, "What's your budget range?")
                .with_options(["Below ₹1000", "₹1000–₹5000", "₹5000+", "No Limit"])
                .labelled("Budget"),
            StepDefinition::new(4, "Any specific preferences or features you're looking for?")
                .with_options([
                    "Lightweight",
                    "Waterproof",
                    "Compact",
                    "Organic",
                    "Eco-Friendly",
                    "No Preference",
                ])
                .free_text()
                .labelled("Preferences")
                .terminal(),
        ],
    )
}

/// Topic → approach → timeframe → focus.
pub fn research() -> Result<StepTable, FlowError> {
    StepTable::new(
        Persona::Research.id(),
        vec![
            StepDefinition::new(
                0,
                "🔬 Hi! I'm your Research Assistant. What topic would you like me to research for you?",
            )
            .with_options([
                "Technology Trends",
                "Market Analysis",
                "Academic Research",
                "Industry Reports",
                "Custom Topic",
            ])
            .free_text()
            .labelled("Topic"),
            StepDefinition::new(1, "📚 Great choice! What type of research approach would you prefer?")
                .with_options([
                    "Comprehensive Overview",
                    "Quick Summary",
                    "Deep Dive Analysis",
                    "Comparative Study",
                    "Recent Developments",
                ])
                .labelled("Approach"),
            StepDefinition::new(2, "⏰ What timeframe should I focus on for this research?")
                .with_options([
                    "Latest (Past Month)",
                    "Recent (Past 6 Months)",
                    "Current Year",
                    "Past 2-3 Years",
                    "Historical Overview",
                ])
                .labelled("Timeframe"),
            StepDefinition::new(3, "🎯 Any specific focus area or aspect you want me to emphasize?")
                .with_options([
                    "Key Statistics",
                    "Expert Opinions",
                    "Case Studies",
                    "Future Predictions",
                    "No Specific Focus",
                ])
                .labelled("Focus")
                .terminal(),
        ],
    )
}

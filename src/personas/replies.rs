//! Canned assistant replies for free-form messages outside the guided steps.

use rand::seq::SliceRandom;
use rand::Rng;

use super::Persona;

/// Sent when selector input matches no persona.
pub const UNMATCHED_REQUEST: &str =
    "I understand you have a specific request. Let me connect you with the right assistant for better help.";

/// Shown when the user returns to the selector menu.
pub const BACK_TO_MENU: &str = "👋 Back to the main menu! Which assistant would you like to use?";

/// Possible replies to a follow-up message once `persona`'s flow is complete.
/// General chat uses these for every message.
pub fn follow_ups(persona: Persona) -> &'static [&'static str] {
    match persona {
        Persona::Travel => &[
            "I've updated your itinerary based on your request! The changes have been applied to your travel plan.",
            "🌍 Exciting! I've found some amazing destinations for you. Here's what I recommend...",
            "✈️ Based on your preferences, I've crafted the perfect itinerary...",
            "🗺️ Let me help you plan an unforgettable trip with these suggestions...",
            "🏖️ I've researched the best options for your travel needs...",
        ],
        Persona::Shopping => &[
            "🛍️ I've found some excellent options that match your criteria...",
            "💰 Here are the best deals I've discovered for you...",
            "⭐ Based on reviews and ratings, I recommend these products...",
            "🔍 After comparing various options, here's what stands out...",
        ],
        Persona::Research => &[
            "I've updated the research based on your additional requirements. The new information has been integrated into your research findings.",
            "📊 Based on the latest research and data, here are my findings...",
            "🔬 I've analyzed multiple sources and here's what the evidence shows...",
            "📈 The current trends and studies indicate that...",
            "📚 According to recent publications and expert opinions...",
        ],
        Persona::Chat => &[
            "I'd be happy to help you with that! Let me break this down for you...",
            "That's a great question! Here's what I think...",
            "Based on my knowledge, I can provide you with the following insights...",
            "Let me analyze this for you and provide a comprehensive answer...",
        ],
    }
}

/// Pick a follow-up reply for `persona` at random.
pub fn follow_up<R: Rng + ?Sized>(persona: Persona, rng: &mut R) -> &'static str {
    let replies = follow_ups(persona);
    replies.choose(rng).copied().unwrap_or(replies[0])
}

//! persona-flow — guided conversation flows for canned assistant personas.

pub mod assistant;
pub mod channels;
pub mod config;
pub mod error;
pub mod flow;
pub mod personas;

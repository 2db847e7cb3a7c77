//! The assistant front-end: picks a persona, then walks its guided flow.
//!
//! All replies are canned. Typing delays are cosmetic and applied only when
//! sending to a channel, never inside the flow controller.

pub mod assistant_loop;
pub mod submission;

pub use assistant_loop::Assistant;
pub use submission::{Submission, SubmissionParser};

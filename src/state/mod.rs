//! State management module
//!
//! This module handles the onboarding questionnaire and per-user progress through it

pub mod script;
pub mod storage;

// Re-export commonly used state components
pub use script::OnboardingScript;
pub use storage::{ConversationState, ConversationStateStore};

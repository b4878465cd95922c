//! Conversation state storage
//!
//! This module keeps per-user onboarding progress in process memory. Entries
//! are created on the first message of a user and live until the process exits;
//! a restart sends everybody back to the first onboarding prompt.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use serde::{Deserialize, Serialize};
use tracing::debug;
use super::script::OnboardingScript;

/// Onboarding progress of one user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    /// Number of onboarding prompts already issued
    pub step: usize,
}

impl ConversationState {
    /// Whether the user still has onboarding prompts to answer
    pub fn is_onboarding(&self, script: &OnboardingScript) -> bool {
        self.step < script.len()
    }
}

/// In-memory state store shared by every message handler
#[derive(Debug, Clone)]
pub struct ConversationStateStore {
    script: Arc<OnboardingScript>,
    states: Arc<Mutex<HashMap<String, ConversationState>>>,
}

impl ConversationStateStore {
    /// Create an empty store for the given questionnaire
    pub fn new(script: Arc<OnboardingScript>) -> Self {
        Self {
            script,
            states: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The questionnaire this store tracks progress through
    pub fn script(&self) -> &OnboardingScript {
        &self.script
    }

    /// Return the user's state, creating it at step 0 on first contact
    pub fn get_or_create(&self, user_id: &str) -> ConversationState {
        *self.lock().entry(user_id.to_string()).or_insert_with(|| {
            debug!(user_id = user_id, "Created conversation state");
            ConversationState::default()
        })
    }

    /// Move the user one onboarding step forward
    pub fn advance(&self, user_id: &str) -> ConversationState {
        let mut states = self.lock();
        let state = states.entry(user_id.to_string()).or_default();
        state.step += 1;
        *state
    }

    /// Whether the user has not finished onboarding yet
    pub fn is_onboarding(&self, user_id: &str) -> bool {
        self.get_or_create(user_id).is_onboarding(&self.script)
    }

    /// Hand out the user's next onboarding prompt and advance past it.
    ///
    /// Lookup and increment happen under one lock, so concurrent messages of the
    /// same user receive distinct prompts. Returns `None` in free conversation.
    pub fn claim_onboarding_prompt(&self, user_id: &str) -> Option<(usize, String)> {
        let mut states = self.lock();
        let state = states.entry(user_id.to_string()).or_default();
        let prompt = self.script.prompt(state.step)?.to_string();
        let step = state.step;
        state.step += 1;
        Some((step, prompt))
    }

    /// Number of users seen so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, ConversationState>> {
        // The map holds plain counters; a panic elsewhere cannot leave it torn.
        self.states.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

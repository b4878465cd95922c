//! Onboarding questionnaire
//!
//! The ordered list of prompts every new user walks through before free
//! conversation starts. Built once at startup and shared read-only.

use crate::config::OnboardingConfig;

/// Ordered, immutable onboarding prompts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingScript {
    prompts: Vec<String>,
}

impl OnboardingScript {
    pub fn new(prompts: Vec<String>) -> Self {
        Self { prompts }
    }

    /// Prompt for the given step, `None` once onboarding is over
    pub fn prompt(&self, step: usize) -> Option<&str> {
        self.prompts.get(step).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

impl From<&OnboardingConfig> for OnboardingScript {
    fn from(config: &OnboardingConfig) -> Self {
        Self::new(config.prompts.clone())
    }
}

impl Default for OnboardingScript {
    fn default() -> Self {
        Self::from(&OnboardingConfig::default())
    }
}

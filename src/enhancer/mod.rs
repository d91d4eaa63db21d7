use super::*;
use tracing::info;

mod card_reveal;
mod example_ideas;
mod submission_guard;

pub(crate) use example_ideas::apply_fill;
pub(crate) use submission_guard::{GuardDecision, check_submission};

/// What [`FormEnhancer::initialize`] found and wired. Each behavior that
/// found nothing to work on leaves its field empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    pub guard_attached: bool,
    pub example_buttons: Vec<NodeId>,
    pub animated_cards: Vec<NodeId>,
    pub timers: Vec<TimerId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormEnhancer {
    config: EnhancerConfig,
}

impl Default for FormEnhancer {
    fn default() -> Self {
        Self {
            config: EnhancerConfig::default(),
        }
    }
}

impl FormEnhancer {
    pub fn new(config: EnhancerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EnhancerConfig {
        &self.config
    }

    /// Wires the submission guard, the example-idea buttons and the card
    /// reveal onto `document`. A document can only be enhanced once.
    pub fn initialize(
        &self,
        document: &mut Document,
        scheduler: &mut dyn Scheduler,
    ) -> Result<InitReport> {
        if document.enhanced {
            return Err(Error::AlreadyInitialized);
        }
        document.enhanced = true;

        let guard_attached = submission_guard::attach(&self.config, document);
        let example_buttons = example_ideas::inject(&self.config, document)?;
        let (animated_cards, timers) = card_reveal::animate(&self.config, document, scheduler)?;

        info!(
            guard_attached,
            example_buttons = example_buttons.len(),
            animated_cards = animated_cards.len(),
            "form enhancer initialized"
        );
        Ok(InitReport {
            guard_attached,
            example_buttons,
            animated_cards,
            timers,
        })
    }
}

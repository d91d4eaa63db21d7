use super::*;

/// A quick-fill button: the label shown on the button and the premise it
/// writes into the story idea field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleIdea {
    pub label: String,
    pub text: String,
}

impl ExampleIdea {
    pub fn new(label: &str, text: &str) -> Self {
        Self {
            label: label.to_string(),
            text: text.to_string(),
        }
    }
}

pub(crate) const DEFAULT_FORM_ID: &str = "storyForm";
pub(crate) const DEFAULT_FIELD_ID: &str = "story_idea";
pub(crate) const DEFAULT_EMPTY_FIELD_MESSAGE: &str = "Please enter a story idea!";
pub(crate) const DEFAULT_CARD_CLASS: &str = "scene-card";
pub(crate) const DEFAULT_EXAMPLES_HEADING: &str = "Try these examples:";
pub(crate) const DEFAULT_EXAMPLE_IDEAS: [(&str, &str); 3] = [
    (
        "Fantasy",
        "A young girl finds a secret door in her grandmother's attic",
    ),
    (
        "Sci-Fi",
        "A robot discovers a flower in a post-apocalyptic city",
    ),
    (
        "Mystery",
        "A detective solves a mysterious case from 50 years ago",
    ),
];
pub(crate) const DEFAULT_STAGGER_MS: i64 = 100;
pub(crate) const DEFAULT_INITIAL_OFFSET_PX: i64 = 20;
pub(crate) const DEFAULT_TRANSITION_MS: i64 = 500;

/// Everything the enhancer looks for or writes. `Default` reproduces the
/// story generator page exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancerConfig {
    pub(crate) form_id: String,
    pub(crate) field_id: String,
    pub(crate) empty_field_message: String,
    pub(crate) examples_heading: String,
    pub(crate) examples: Vec<ExampleIdea>,
    pub(crate) card_class: String,
    pub(crate) stagger_ms: i64,
    pub(crate) initial_offset_px: i64,
    pub(crate) transition_ms: i64,
    pub(crate) timing: TimingFunction,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            form_id: DEFAULT_FORM_ID.to_string(),
            field_id: DEFAULT_FIELD_ID.to_string(),
            empty_field_message: DEFAULT_EMPTY_FIELD_MESSAGE.to_string(),
            examples_heading: DEFAULT_EXAMPLES_HEADING.to_string(),
            examples: DEFAULT_EXAMPLE_IDEAS
                .iter()
                .map(|(label, text)| ExampleIdea::new(label, text))
                .collect(),
            card_class: DEFAULT_CARD_CLASS.to_string(),
            stagger_ms: DEFAULT_STAGGER_MS,
            initial_offset_px: DEFAULT_INITIAL_OFFSET_PX,
            transition_ms: DEFAULT_TRANSITION_MS,
            timing: TimingFunction::Ease,
        }
    }
}

impl EnhancerConfig {
    pub fn with_form_id(mut self, form_id: &str) -> Self {
        self.form_id = form_id.to_string();
        self
    }

    pub fn with_field_id(mut self, field_id: &str) -> Self {
        self.field_id = field_id.to_string();
        self
    }

    pub fn with_empty_field_message(mut self, message: &str) -> Self {
        self.empty_field_message = message.to_string();
        self
    }

    pub fn with_examples_heading(mut self, heading: &str) -> Self {
        self.examples_heading = heading.to_string();
        self
    }

    pub fn with_examples(mut self, examples: Vec<ExampleIdea>) -> Self {
        self.examples = examples;
        self
    }

    pub fn with_card_class(mut self, card_class: &str) -> Self {
        self.card_class = card_class.to_string();
        self
    }

    pub fn with_stagger_ms(mut self, stagger_ms: i64) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    pub fn with_initial_offset_px(mut self, offset_px: i64) -> Self {
        self.initial_offset_px = offset_px;
        self
    }

    pub fn with_transition(mut self, duration_ms: i64, timing: TimingFunction) -> Self {
        self.transition_ms = duration_ms;
        self.timing = timing;
        self
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    pub fn empty_field_message(&self) -> &str {
        &self.empty_field_message
    }

    pub fn examples(&self) -> &[ExampleIdea] {
        &self.examples
    }

    pub fn card_class(&self) -> &str {
        &self.card_class
    }

    pub fn stagger_ms(&self) -> i64 {
        self.stagger_ms
    }

    pub fn initial_offset_px(&self) -> i64 {
        self.initial_offset_px
    }

    pub fn transition_ms(&self) -> i64 {
        self.transition_ms
    }

    pub fn timing(&self) -> TimingFunction {
        self.timing
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("form id", &self.form_id),
            ("field id", &self.field_id),
            ("card class", &self.card_class),
        ] {
            if value.trim().is_empty() || value.chars().any(char::is_whitespace) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a single non-empty token, got {value:?}"
                )));
            }
        }
        if self.stagger_ms < 0 {
            return Err(Error::InvalidConfig(format!(
                "stagger must be non-negative, got {}ms",
                self.stagger_ms
            )));
        }
        if self.transition_ms < 0 {
            return Err(Error::InvalidConfig(format!(
                "transition duration must be non-negative, got {}ms",
                self.transition_ms
            )));
        }
        if let Some(idx) = self
            .examples
            .iter()
            .position(|example| example.label.trim().is_empty())
        {
            return Err(Error::InvalidConfig(format!(
                "example idea #{idx} has an empty label"
            )));
        }
        Ok(())
    }
}

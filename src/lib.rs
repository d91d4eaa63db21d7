//! Story-idea form enhancements over a deterministic, in-memory page model.
//!
//! A server-rendered story generator page is parsed into a [`Document`], and
//! [`FormEnhancer::initialize`] wires three independent behaviors onto it:
//!
//! - a submission guard that refuses to post the form while the story idea
//!   field is blank,
//! - a block of example-idea buttons that fill the field on click,
//! - a staggered fade/slide reveal of every `.scene-card`.
//!
//! Reveals are deferred through the [`Scheduler`] trait, so they can be
//! recorded by a mock or advanced synthetically with [`VirtualScheduler`].
//! [`Page`] bundles a document, a virtual scheduler and the user-facing
//! actions (typing, clicking, submitting) needed to drive it from tests.
//!
//! ```
//! use form_enhancer::{Page, Result};
//!
//! fn main() -> Result<()> {
//!     let html = r#"
//!         <form id="storyForm" action="/generate" method="post">
//!           <div class="mb-3"><input id="story_idea" name="story_idea"></div>
//!           <button id="generate" type="submit">Generate</button>
//!         </form>
//!     "#;
//!     let mut page = Page::load(html)?;
//!     page.type_text("#story_idea", "   ")?;
//!     page.click("#generate")?;
//!     assert_eq!(page.take_alert_messages(), vec!["Please enter a story idea!".to_string()]);
//!     assert!(page.take_submissions().is_empty());
//!     Ok(())
//! }
//! ```

use std::collections::{HashMap, HashSet, VecDeque};

mod config;
mod document;
mod dom;
mod enhancer;
mod events;
mod forms;
mod html;
mod page;
mod scheduler;
mod selector;
mod style;
mod transition;

pub use config::{EnhancerConfig, ExampleIdea};
pub use document::Document;
pub use dom::{ElementBuilder, NodeId};
pub use enhancer::{FormEnhancer, InitReport};
pub use forms::FormSubmission;
pub use page::Page;
pub use scheduler::{PendingTimer, RevealTask, Scheduler, StyleUpdate, TimerId, VirtualScheduler};
pub use transition::{TimingFunction, TransitionSpec, VisualState};

use dom::Dom;
use events::{EventState, Listener, ListenerStore};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("html parse error: {0}")]
    HtmlParse(String),
    #[error("runtime error: {0}")]
    Runtime(String),
    #[error("selector not found: {0}")]
    SelectorNotFound(String),
    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),
    #[error("invalid enhancer config: {0}")]
    InvalidConfig(String),
    #[error("page is already initialized")]
    AlreadyInitialized,
    #[error("{0}")]
    TimerStepLimit(String),
    #[error("type mismatch for {selector}: expected {expected}, actual {actual}")]
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    #[error(
        "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
    )]
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

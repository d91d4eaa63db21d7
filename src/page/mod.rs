use super::*;
use tracing::info;

mod actions;
mod assertions;
mod timers;
mod trace;

pub(crate) use trace::TraceState;

pub(crate) const DEFAULT_TIMER_STEP_LIMIT: usize = 10_000;

/// Appearance of a card just before its reveal ran, and when that was.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RevealRecord {
    pub(crate) fired_at: i64,
    pub(crate) from: VisualState,
}

/// A server-rendered page with the enhancer's runtime around it: a virtual
/// clock, a focus pointer, and recorders for alerts and form posts.
///
/// Nothing runs on its own. Timers fire only through [`Page::advance_time`],
/// [`Page::run_due_timers`] and friends.
#[derive(Debug)]
pub struct Page {
    pub(crate) document: Document,
    pub(crate) scheduler: VirtualScheduler,
    pub(crate) report: Option<InitReport>,
    pub(crate) active_element: Option<NodeId>,
    pub(crate) submissions: Vec<FormSubmission>,
    pub(crate) alert_messages: Vec<String>,
    pub(crate) reveals: HashMap<NodeId, RevealRecord>,
    pub(crate) trace_state: TraceState,
    pub(crate) timer_step_limit: usize,
}

impl Page {
    /// Parses `html` without enhancing it.
    pub fn from_html(html: &str) -> Result<Self> {
        Ok(Self {
            document: Document::parse(html)?,
            scheduler: VirtualScheduler::new(),
            report: None,
            active_element: None,
            submissions: Vec::new(),
            alert_messages: Vec::new(),
            reveals: HashMap::new(),
            trace_state: TraceState::default(),
            timer_step_limit: DEFAULT_TIMER_STEP_LIMIT,
        })
    }

    /// Parses `html` and runs the enhancer with the default configuration.
    pub fn load(html: &str) -> Result<Self> {
        let mut page = Self::from_html(html)?;
        page.initialize()?;
        Ok(page)
    }

    pub fn initialize(&mut self) -> Result<InitReport> {
        self.initialize_with(EnhancerConfig::default())
    }

    pub fn initialize_with(&mut self, config: EnhancerConfig) -> Result<InitReport> {
        let enhancer = FormEnhancer::new(config)?;
        let report = enhancer.initialize(&mut self.document, &mut self.scheduler)?;
        info!(now_ms = self.scheduler.now_ms(), "page enhanced");
        self.trace_line(format!(
            "[enhancer] init guard={} buttons={} cards={} timers={}",
            report.guard_attached,
            report.example_buttons.len(),
            report.animated_cards.len(),
            report.timers.len()
        ));
        self.report = Some(report.clone());
        Ok(report)
    }

    pub fn init_report(&self) -> Option<&InitReport> {
        self.report.as_ref()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn take_submissions(&mut self) -> Vec<FormSubmission> {
        std::mem::take(&mut self.submissions)
    }

    pub fn take_alert_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alert_messages)
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.document
            .dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    pub(crate) fn node_label(&self, node: NodeId) -> String {
        let dom = &self.document.dom;
        if node == dom.root {
            return "#document".to_string();
        }
        let tag = dom.tag_name(node).unwrap_or("#text");
        match dom.attr(node, "id") {
            Some(id) => format!("{tag}#{id}"),
            None => tag.to_string(),
        }
    }
}

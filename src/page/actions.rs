use super::*;
use tracing::debug;

impl Page {
    /// Replaces the value of an input or textarea and fires `input`.
    /// Disabled and read-only controls ignore typing.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let dom = &self.document.dom;
        let tag = dom
            .tag_name(target)
            .ok_or_else(|| Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: "non-element".into(),
            })?
            .to_string();
        if tag != "input" && tag != "textarea" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: tag,
            });
        }
        if dom.disabled(target) || dom.readonly(target) {
            return Ok(());
        }

        self.document.dom.set_value(target, text)?;
        self.dispatch_event(target, "input")?;
        Ok(())
    }

    /// Clicks an element. Submit controls then request a submit of their
    /// form unless a click listener cancelled it.
    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.document.dom.disabled(target) {
            self.trace_event_line(format!(
                "[event] click ignored target={} reason=disabled",
                self.node_label(target)
            ));
            return Ok(());
        }
        let event = self.dispatch_event(target, "click")?;
        if event.default_prevented {
            return Ok(());
        }
        if forms::is_submit_control(&self.document.dom, target) {
            if let Some(form) = forms::resolve_form_for_submit(&self.document.dom, target) {
                self.request_form_submit(form)?;
            }
        }
        Ok(())
    }

    /// Submits the form matched by `selector`, or the form owning the
    /// matched control, going through `submit` listeners first.
    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let dom = &self.document.dom;
        let form = if dom.is_tag(target, "form") {
            Some(target)
        } else {
            forms::resolve_form_for_submit(dom, target)
        };
        let Some(form) = form else {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "form or form control".into(),
                actual: dom.tag_name(target).unwrap_or("#text").to_string(),
            });
        };
        self.request_form_submit(form)
    }

    pub fn focus(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.focus_node(target)
    }

    pub fn blur(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.active_element == Some(target) {
            self.active_element = None;
            self.dispatch_event(target, "blur")?;
        }
        Ok(())
    }

    pub(crate) fn focus_node(&mut self, target: NodeId) -> Result<()> {
        if self.active_element == Some(target) {
            return Ok(());
        }
        if let Some(previous) = self.active_element.take() {
            self.dispatch_event(previous, "blur")?;
        }
        self.active_element = Some(target);
        self.dispatch_event(target, "focus")?;
        Ok(())
    }

    fn request_form_submit(&mut self, form: NodeId) -> Result<()> {
        let event = self.dispatch_event(form, "submit")?;
        if event.default_prevented {
            debug!(form = %self.node_label(form), "form submission cancelled");
            return Ok(());
        }
        let submission = forms::build_submission(&self.document.dom, form)?;
        debug!(
            form = %self.node_label(form),
            action = %submission.action,
            entries = submission.entries.len(),
            "form submitted"
        );
        self.submissions.push(submission);
        Ok(())
    }

    /// Bubbles `event_type` from `target` up to the document, running the
    /// listeners registered on every node along the way.
    pub(crate) fn dispatch_event(&mut self, target: NodeId, event_type: &str) -> Result<EventState> {
        let mut event = EventState::new(event_type, target);
        for node in events::bubble_path(&self.document.dom, target) {
            event.current_target = node;
            for listener in self.document.listeners.get(node, event_type) {
                self.run_listener(&listener, &mut event)?;
            }
        }
        self.trace_event_line(format!(
            "[event] done {} target={} default_prevented={}",
            event.event_type,
            self.node_label(event.target),
            event.default_prevented
        ));
        Ok(event)
    }

    fn run_listener(&mut self, listener: &Listener, event: &mut EventState) -> Result<()> {
        debug!(
            listener = listener.describe(),
            event = %event.event_type,
            current = %self.node_label(event.current_target),
            "running listener"
        );
        match listener {
            Listener::SubmissionGuard { field_id, message } => {
                if let enhancer::GuardDecision::Block { field } =
                    enhancer::check_submission(&self.document.dom, field_id)?
                {
                    event.prevent_default();
                    self.alert_messages.push(message.clone());
                    self.focus_node(field)?;
                }
            }
            Listener::FillField { field, text } => {
                enhancer::apply_fill(&mut self.document.dom, *field, text)?;
            }
        }
        Ok(())
    }
}

use super::*;

/// What a listener does when its event reaches it. Behaviors are plain data
/// so that listener tables can be inspected and compared in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Listener {
    /// Cancels a submission while the field is blank, alerts, refocuses.
    SubmissionGuard { field_id: String, message: String },
    /// Overwrites the field's value with a preset string.
    FillField { field: NodeId, text: String },
}

impl Listener {
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Self::SubmissionGuard { .. } => "submission-guard",
            Self::FillField { .. } => "fill-field",
        }
    }
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    map: HashMap<NodeId, HashMap<String, Vec<Listener>>>,
}

impl ListenerStore {
    pub(crate) fn add(&mut self, node_id: NodeId, event: &str, listener: Listener) {
        self.map
            .entry(node_id)
            .or_default()
            .entry(event.to_string())
            .or_default()
            .push(listener);
    }

    pub(crate) fn get(&self, node_id: NodeId, event: &str) -> Vec<Listener> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, node_id: NodeId, event: &str) -> usize {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .map_or(0, Vec::len)
    }

    pub(crate) fn total(&self) -> usize {
        self.map
            .values()
            .flat_map(HashMap::values)
            .map(Vec::len)
            .sum()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) event_type: String,
    pub(crate) target: NodeId,
    pub(crate) current_target: NodeId,
    pub(crate) default_prevented: bool,
}

impl EventState {
    pub(crate) fn new(event_type: &str, target: NodeId) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            default_prevented: false,
        }
    }

    pub(crate) fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// Nodes an event visits while bubbling: target first, document last.
pub(crate) fn bubble_path(dom: &Dom, target: NodeId) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut cursor = Some(target);
    while let Some(node) = cursor {
        path.push(node);
        cursor = dom.parent(node);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listeners_are_kept_per_node_and_event_in_registration_order() {
        let mut store = ListenerStore::default();
        let field = NodeId(3);
        store.add(
            NodeId(1),
            "click",
            Listener::FillField {
                field,
                text: "first".into(),
            },
        );
        store.add(
            NodeId(1),
            "click",
            Listener::FillField {
                field,
                text: "second".into(),
            },
        );
        store.add(
            NodeId(2),
            "submit",
            Listener::SubmissionGuard {
                field_id: "story_idea".into(),
                message: "Please enter a story idea!".into(),
            },
        );

        let clicks = store.get(NodeId(1), "click");
        assert_eq!(clicks.len(), 2);
        assert_eq!(
            clicks[1],
            Listener::FillField {
                field,
                text: "second".into()
            }
        );
        assert_eq!(store.count(NodeId(1), "submit"), 0);
        assert_eq!(store.count(NodeId(2), "submit"), 1);
        assert!(store.get(NodeId(9), "click").is_empty());
        assert_eq!(store.total(), 3);
    }

    #[test]
    fn bubble_path_runs_from_target_to_document() -> Result<()> {
        let dom = html::parse_html("<form id='f'><div><input id='i'></div></form>")?;
        let input = dom.by_id("i").expect("input");
        let form = dom.by_id("f").expect("form");
        let path = bubble_path(&dom, input);
        assert_eq!(path.first(), Some(&input));
        assert_eq!(path.get(2), Some(&form));
        assert_eq!(path.last(), Some(&dom.root));
        Ok(())
    }
}

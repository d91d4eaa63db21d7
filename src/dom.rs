use super::*;

/// Handle to a node in a [`Document`]. Handles stay valid for the lifetime of
/// the document; nodes are never freed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) node_type: NodeType,
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag_name: String,
    pub(crate) attrs: HashMap<String, String>,
    pub(crate) value: String,
}

#[derive(Debug, Clone)]
pub(crate) struct Dom {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    id_index: HashMap<String, NodeId>,
}

impl Dom {
    pub(crate) fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
        }
    }

    fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    pub(crate) fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: String,
        attrs: HashMap<String, String>,
    ) -> NodeId {
        let value = attrs.get("value").cloned().unwrap_or_default();
        let element = Element {
            tag_name,
            attrs,
            value,
        };
        let has_id = element.attrs.contains_key("id");
        let id = self.create_node(Some(parent), NodeType::Element(element));
        if has_id && self.is_connected(id) {
            self.index_subtree_ids(id);
        }
        id
    }

    pub(crate) fn create_detached_element(&mut self, tag_name: &str) -> NodeId {
        let element = Element {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs: HashMap::new(),
            value: String::new(),
        };
        self.create_node(None, NodeType::Element(element))
    }

    pub(crate) fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(Some(parent), NodeType::Text(text))
    }

    pub(crate) fn create_detached_text(&mut self, text: String) -> NodeId {
        self.create_node(None, NodeType::Text(text))
    }

    pub(crate) fn contains(&self, node_id: NodeId) -> bool {
        node_id.0 < self.nodes.len()
    }

    pub(crate) fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes.get(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|e| e.tag_name.as_str())
    }

    pub(crate) fn is_tag(&self, node_id: NodeId, tag: &str) -> bool {
        self.tag_name(node_id)
            .is_some_and(|name| name.eq_ignore_ascii_case(tag))
    }

    pub(crate) fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes.get(node_id.0)?.parent
    }

    pub(crate) fn children(&self, node_id: NodeId) -> &[NodeId] {
        self.nodes
            .get(node_id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    pub(crate) fn is_descendant_of(&self, node_id: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = self.parent(node_id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    pub(crate) fn is_connected(&self, node_id: NodeId) -> bool {
        node_id == self.root || self.is_descendant_of(node_id, self.root)
    }

    pub(crate) fn find_ancestor_by_tag(&self, node_id: NodeId, tag: &str) -> Option<NodeId> {
        let mut cursor = self.parent(node_id);
        while let Some(current) = cursor {
            if self.is_tag(current, tag) {
                return Some(current);
            }
            cursor = self.parent(current);
        }
        None
    }

    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_insertable(parent, child)?;
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        if self.is_connected(child) {
            self.index_subtree_ids(child);
        }
        Ok(())
    }

    pub(crate) fn insert_after(&mut self, reference: NodeId, child: NodeId) -> Result<()> {
        let parent = self
            .parent(reference)
            .ok_or_else(|| Error::Runtime("insert_after reference has no parent".into()))?;
        self.check_insertable(parent, child)?;
        let position = self.nodes[parent.0]
            .children
            .iter()
            .position(|node| *node == reference)
            .ok_or_else(|| Error::Runtime("insert_after reference is not a child".into()))?;
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(position + 1, child);
        if self.is_connected(child) {
            self.index_subtree_ids(child);
        }
        Ok(())
    }

    fn check_insertable(&self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.contains(parent) || !self.contains(child) {
            return Err(Error::Runtime("node does not belong to this document".into()));
        }
        if matches!(self.nodes[parent.0].node_type, NodeType::Text(_)) {
            return Err(Error::Runtime("text nodes cannot have children".into()));
        }
        if child == self.root {
            return Err(Error::Runtime("the document node cannot be inserted".into()));
        }
        if self.nodes[child.0].parent.is_some() {
            return Err(Error::Runtime("node is already attached".into()));
        }
        if parent == child || self.is_descendant_of(parent, child) {
            return Err(Error::Runtime("insertion would create a cycle".into()));
        }
        Ok(())
    }

    fn index_subtree_ids(&mut self, node_id: NodeId) {
        let mut stack = vec![node_id];
        while let Some(current) = stack.pop() {
            if let Some(id_attr) = self
                .element(current)
                .and_then(|element| element.attrs.get("id").cloned())
            {
                self.id_index.entry(id_attr).or_insert(current);
            }
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }
    }

    /// Points `id` at the first connected element carrying it, in document
    /// order, or drops the entry when none is left.
    fn reindex_id(&mut self, id: &str) {
        let mut stack = vec![self.root];
        while let Some(current) = stack.pop() {
            if self
                .element(current)
                .and_then(|element| element.attrs.get("id"))
                .is_some_and(|value| value == id)
            {
                self.id_index.insert(id.to_string(), current);
                return;
            }
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }
        self.id_index.remove(id);
    }

    pub(crate) fn by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    pub(crate) fn attr(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.element(node_id)
            .and_then(|element| element.attrs.get(&name.to_ascii_lowercase()).cloned())
    }

    pub(crate) fn has_attr(&self, node_id: NodeId, name: &str) -> bool {
        self.element(node_id)
            .is_some_and(|element| element.attrs.contains_key(&name.to_ascii_lowercase()))
    }

    pub(crate) fn set_attr(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        let connected = self.is_connected(node_id);
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("setAttribute target is not an element".into()))?;
        let previous = element.attrs.insert(name.clone(), value.to_string());
        if name == "value" && element.tag_name == "input" {
            element.value = value.to_string();
        }
        if name == "id" && connected {
            if let Some(old) = previous {
                self.reindex_id(&old);
            }
            self.reindex_id(value);
        }
        Ok(())
    }

    pub(crate) fn remove_attr(&mut self, node_id: NodeId, name: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("removeAttribute target is not an element".into()))?;
        let previous = element.attrs.remove(&name);
        if name == "id" {
            if let Some(old) = previous {
                if self.id_index.get(&old) == Some(&node_id) {
                    self.reindex_id(&old);
                }
            }
        }
        Ok(())
    }

    pub(crate) fn has_class(&self, node_id: NodeId, class_name: &str) -> bool {
        self.element(node_id).is_some_and(|element| {
            element
                .attrs
                .get("class")
                .is_some_and(|classes| classes.split_whitespace().any(|name| name == class_name))
        })
    }

    pub(crate) fn disabled(&self, node_id: NodeId) -> bool {
        self.has_attr(node_id, "disabled")
    }

    pub(crate) fn readonly(&self, node_id: NodeId) -> bool {
        self.has_attr(node_id, "readonly")
    }

    pub(crate) fn value(&self, node_id: NodeId) -> Result<String> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::Runtime("value target is not an element".into()))?;
        if element.tag_name == "select" {
            return Ok(forms::select_value(self, node_id).unwrap_or_default());
        }
        Ok(element.value.clone())
    }

    pub(crate) fn set_value(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("value target is not an element".into()))?;
        element.value = value.to_string();
        Ok(())
    }

    pub(crate) fn text_content(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        self.push_text_content(node_id, &mut out);
        out
    }

    fn push_text_content(&self, node_id: NodeId, out: &mut String) {
        stacker::maybe_grow(64 * 1024, 1024 * 1024, || {
            match &self.nodes[node_id.0].node_type {
                NodeType::Text(text) => out.push_str(text),
                NodeType::Document | NodeType::Element(_) => {
                    for child in &self.nodes[node_id.0].children {
                        self.push_text_content(*child, out);
                    }
                }
            }
        });
    }

    pub(crate) fn collect_elements_dfs(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        let mut stack = self.nodes[node_id.0]
            .children
            .iter()
            .rev()
            .copied()
            .collect::<Vec<_>>();
        while let Some(current) = stack.pop() {
            if self.element(current).is_some() {
                out.push(current);
            }
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }
    }

    /// Textareas take their initial value from their text content.
    pub(crate) fn initialize_form_control_values(&mut self) {
        let mut elements = Vec::new();
        self.collect_elements_dfs(self.root, &mut elements);
        for node in elements {
            if self.is_tag(node, "textarea") {
                let text = self.text_content(node);
                if let Some(element) = self.element_mut(node) {
                    element.value = text;
                }
            }
        }
    }

    pub(crate) fn outer_html(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        self.push_outer_html(node_id, &mut out);
        out
    }

    fn push_outer_html(&self, node_id: NodeId, out: &mut String) {
        stacker::maybe_grow(64 * 1024, 1024 * 1024, || {
            match &self.nodes[node_id.0].node_type {
                NodeType::Document => {
                    for child in &self.nodes[node_id.0].children {
                        self.push_outer_html(*child, out);
                    }
                }
                NodeType::Text(text) => out.push_str(&escape_html_text(text)),
                NodeType::Element(element) => {
                    out.push('<');
                    out.push_str(&element.tag_name);
                    let mut attrs = element.attrs.iter().collect::<Vec<_>>();
                    attrs.sort_by(|(left, _), (right, _)| left.cmp(right));
                    for (name, value) in attrs {
                        out.push(' ');
                        out.push_str(name);
                        out.push_str("=\"");
                        out.push_str(&escape_html_attr(value));
                        out.push('"');
                    }
                    out.push('>');
                    if html::is_void_tag(&element.tag_name) {
                        return;
                    }
                    let raw_text = matches!(element.tag_name.as_str(), "script" | "style");
                    for child in &self.nodes[node_id.0].children {
                        match &self.nodes[child.0].node_type {
                            NodeType::Text(text) if raw_text => out.push_str(text),
                            _ => self.push_outer_html(*child, out),
                        }
                    }
                    out.push_str("</");
                    out.push_str(&element.tag_name);
                    out.push('>');
                }
            }
        });
    }
}

fn escape_html_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_html_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum BuilderChild {
    Element(ElementBuilder),
    Text(String),
}

/// Structured element construction.
///
/// Attributes and text are stored verbatim, never re-parsed as markup, so
/// label and fill strings cannot inject elements.
///
/// ```
/// use form_enhancer::{Document, ElementBuilder};
///
/// let mut document = Document::parse("<div id='host'></div>").unwrap();
/// let host = document.by_id("host").unwrap();
/// let hint = ElementBuilder::new("p")
///     .class("mb-2")
///     .child(ElementBuilder::new("strong").text("<b>not markup</b>"));
/// document.append(host, &hint).unwrap();
/// assert_eq!(
///     document.outer_html(host),
///     r#"<div id="host"><p class="mb-2"><strong>&lt;b&gt;not markup&lt;/b&gt;</strong></p></div>"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementBuilder {
    tag: String,
    attrs: Vec<(String, String)>,
    classes: Vec<String>,
    children: Vec<BuilderChild>,
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        let name = name.to_ascii_lowercase();
        if let Some(existing) = self.attrs.iter_mut().find(|(key, _)| *key == name) {
            existing.1 = value.to_string();
        } else {
            self.attrs.push((name, value.to_string()));
        }
        self
    }

    pub fn class(mut self, class_name: &str) -> Self {
        for name in class_name.split_whitespace() {
            if !self.classes.iter().any(|existing| existing == name) {
                self.classes.push(name.to_string());
            }
        }
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.children.push(BuilderChild::Text(text.to_string()));
        self
    }

    pub fn child(mut self, child: ElementBuilder) -> Self {
        self.children.push(BuilderChild::Element(child));
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Builds a detached subtree and returns its root.
    pub(crate) fn build(&self, dom: &mut Dom) -> Result<NodeId> {
        stacker::maybe_grow(64 * 1024, 1024 * 1024, || {
            let node = dom.create_detached_element(&self.tag);
            for (name, value) in &self.attrs {
                dom.set_attr(node, name, value)?;
            }
            if !self.classes.is_empty() {
                let mut classes = dom
                    .attr(node, "class")
                    .map(|existing| {
                        existing
                            .split_whitespace()
                            .map(str::to_string)
                            .collect::<Vec<_>>()
                    })
                    .unwrap_or_default();
                for name in &self.classes {
                    if !classes.contains(name) {
                        classes.push(name.clone());
                    }
                }
                dom.set_attr(node, "class", &classes.join(" "))?;
            }
            for child in &self.children {
                let child_node = match child {
                    BuilderChild::Element(builder) => builder.build(dom)?,
                    BuilderChild::Text(text) => dom.create_detached_text(text.clone()),
                };
                dom.append_child(node, child_node)?;
            }
            if self.tag == "textarea" {
                let text = dom.text_content(node);
                dom.set_value(node, &text)?;
            }
            Ok(node)
        })
    }
}

use super::*;

/// A parsed page plus the listeners the enhancer attached to it.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) dom: Dom,
    pub(crate) listeners: ListenerStore,
    pub(crate) enhanced: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document with no content under the root.
    pub fn new() -> Self {
        Self {
            dom: Dom::new(),
            listeners: ListenerStore::default(),
            enhanced: false,
        }
    }

    pub fn parse(html: &str) -> Result<Self> {
        Ok(Self {
            dom: html::parse_html(html)?,
            listeners: ListenerStore::default(),
            enhanced: false,
        })
    }

    pub fn root(&self) -> NodeId {
        self.dom.root
    }

    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.dom.by_id(id)
    }

    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        self.dom.query_selector(selector)
    }

    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        self.dom.query_selector_all(selector)
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.dom.tag_name(node)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.dom.parent(node)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.dom.children(node)
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.dom.attr(node, name)
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        self.dom.set_attr(node, name, value)
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) -> Result<()> {
        self.dom.remove_attr(node, name)
    }

    pub fn has_class(&self, node: NodeId, class_name: &str) -> bool {
        self.dom.has_class(node, class_name)
    }

    pub fn value(&self, node: NodeId) -> Result<String> {
        self.dom.value(node)
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) -> Result<()> {
        self.dom.set_value(node, value)
    }

    pub fn text_content(&self, node: NodeId) -> String {
        if !self.dom.contains(node) {
            return String::new();
        }
        self.dom.text_content(node)
    }

    /// Inline style value of `property`, empty when unset.
    pub fn style(&self, node: NodeId, property: &str) -> Result<String> {
        self.dom.style_get(node, property)
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> Result<()> {
        self.dom.style_set(node, property, value)
    }

    pub fn outer_html(&self, node: NodeId) -> String {
        if !self.dom.contains(node) {
            return String::new();
        }
        self.dom.outer_html(node)
    }

    /// Builds `element` and appends it as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, element: &ElementBuilder) -> Result<NodeId> {
        let node = element.build(&mut self.dom)?;
        self.dom.append_child(parent, node)?;
        Ok(node)
    }

    /// Builds `element` and inserts it right after `reference`.
    pub fn insert_after(&mut self, reference: NodeId, element: &ElementBuilder) -> Result<NodeId> {
        let node = element.build(&mut self.dom)?;
        self.dom.insert_after(reference, node)?;
        Ok(node)
    }

    pub fn listener_count(&self, node: NodeId, event: &str) -> usize {
        self.listeners.count(node, event)
    }

    /// Listeners attached across the whole document.
    pub fn listener_total(&self) -> usize {
        self.listeners.total()
    }

    pub fn is_enhanced(&self) -> bool {
        self.enhanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_insert_after_place_built_elements() -> Result<()> {
        let mut document = Document::parse("<div id='box'><input id='field'></div>")?;
        let container = document.by_id("box").expect("container");
        let field = document.by_id("field").expect("field");
        document.append(container, &ElementBuilder::new("p").attr("id", "last"))?;
        document.insert_after(field, &ElementBuilder::new("span").attr("id", "next"))?;
        assert_eq!(
            document.outer_html(container),
            r#"<div id="box"><input id="field"><span id="next"></span><p id="last"></p></div>"#
        );
        assert!(document.by_id("last").is_some());
        Ok(())
    }

    #[test]
    fn append_into_text_node_fails_without_touching_tree() -> Result<()> {
        let mut document = Document::parse("<p id='p'>text</p>")?;
        let paragraph = document.by_id("p").expect("paragraph");
        let text = document.children(paragraph)[0];
        let before = document.outer_html(document.root());
        assert!(document.append(text, &ElementBuilder::new("b")).is_err());
        assert_eq!(document.outer_html(document.root()), before);
        Ok(())
    }

    #[test]
    fn queries_and_styles() -> Result<()> {
        let mut document =
            Document::parse("<div class='scene-card'>A</div><div class='scene-card'>B</div>")?;
        let cards = document.query_selector_all(".scene-card")?;
        assert_eq!(cards.len(), 2);
        document.set_style(cards[1], "opacity", "0")?;
        assert_eq!(document.style(cards[1], "opacity")?, "0");
        assert_eq!(document.style(cards[0], "opacity")?, "");
        assert_eq!(document.text_content(cards[1]), "B");
        assert!(!document.is_enhanced());
        assert_eq!(document.listener_total(), 0);
        Ok(())
    }

    #[test]
    fn attribute_edits_keep_id_lookup_current() -> Result<()> {
        let mut document = Document::parse("<input id='story_idea'>")?;
        let field = document.by_id("story_idea").expect("field");
        document.set_attr(field, "id", "idea")?;
        assert_eq!(document.by_id("idea"), Some(field));
        document.remove_attr(field, "id")?;
        assert_eq!(document.by_id("idea"), None);
        assert_eq!(document.by_id("story_idea"), None);
        Ok(())
    }
}

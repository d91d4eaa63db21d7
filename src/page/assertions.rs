use super::*;

const SNIPPET_CHARS: usize = 200;

impl Page {
    pub fn value(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.document.dom.value(target)
    }

    pub fn text(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.document.dom.text_content(target))
    }

    pub fn attr(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let target = self.select_one(selector)?;
        Ok(self.document.dom.attr(target, name))
    }

    pub fn style(&self, selector: &str, property: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.document.dom.style_get(target, property)
    }

    pub fn active_element_id(&self) -> Option<String> {
        self.active_element
            .and_then(|node| self.document.dom.attr(node, "id"))
    }

    pub fn count(&self, selector: &str) -> Result<usize> {
        Ok(self.document.dom.query_selector_all(selector)?.len())
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.document.dom.outer_html(target))
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        self.select_one(selector).map(|_| ())
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.document.dom.text_content(target);
        self.check(selector, target, expected, actual)
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.document.dom.value(target)?;
        self.check(selector, target, expected, actual)
    }

    pub fn assert_style(&self, selector: &str, property: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.document.dom.style_get(target, property)?;
        self.check(&format!("{selector} {{{property}}}"), target, expected, actual)
    }

    fn check(&self, selector: &str, target: NodeId, expected: &str, actual: String) -> Result<()> {
        if actual == expected {
            return Ok(());
        }
        Err(Error::AssertionFailed {
            selector: selector.to_string(),
            expected: expected.to_string(),
            actual,
            dom_snippet: self.node_snippet(target),
        })
    }

    pub(crate) fn node_snippet(&self, node: NodeId) -> String {
        truncate_chars(&self.document.dom.outer_html(node), SNIPPET_CHARS)
    }
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars();
    let mut out = chars.by_ref().take(max_chars).collect::<String>();
    if chars.next().is_some() {
        out.push_str("...");
    }
    out
}

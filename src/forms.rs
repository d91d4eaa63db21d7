use super::*;

/// A form post that was not cancelled. Entries are the name/value pairs of
/// the form's successful controls in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub form_id: Option<String>,
    pub action: String,
    pub method: String,
    pub entries: Vec<(String, String)>,
}

impl FormSubmission {
    /// First value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

pub(crate) fn select_value(dom: &Dom, select: NodeId) -> Option<String> {
    let mut options = Vec::new();
    dom.collect_elements_dfs(select, &mut options);
    options.retain(|node| dom.is_tag(*node, "option"));
    let chosen = options
        .iter()
        .rev()
        .find(|node| dom.has_attr(**node, "selected"))
        .or_else(|| options.first())?;
    Some(option_value(dom, *chosen))
}

fn option_value(dom: &Dom, option: NodeId) -> String {
    dom.attr(option, "value")
        .unwrap_or_else(|| dom.text_content(option).split_whitespace().collect::<Vec<_>>().join(" "))
}

fn input_type(dom: &Dom, node: NodeId) -> String {
    dom.attr(node, "type")
        .unwrap_or_else(|| "text".to_string())
        .to_ascii_lowercase()
}

pub(crate) fn is_submit_control(dom: &Dom, node: NodeId) -> bool {
    if dom.is_tag(node, "button") {
        return dom
            .attr(node, "type")
            .is_none_or(|kind| kind.eq_ignore_ascii_case("submit"));
    }
    dom.is_tag(node, "input") && matches!(input_type(dom, node).as_str(), "submit" | "image")
}

/// Form owned by a control: an explicit `form` attribute wins over the
/// nearest ancestor form.
pub(crate) fn resolve_form_for_submit(dom: &Dom, node: NodeId) -> Option<NodeId> {
    if let Some(form_id) = dom.attr(node, "form") {
        return dom.by_id(&form_id).filter(|form| dom.is_tag(*form, "form"));
    }
    dom.find_ancestor_by_tag(node, "form")
}

pub(crate) fn collect_form_entries(dom: &Dom, form: NodeId) -> Result<Vec<(String, String)>> {
    let mut controls = Vec::new();
    dom.collect_elements_dfs(form, &mut controls);
    let mut entries = Vec::new();
    for node in controls {
        let Some(tag) = dom.tag_name(node) else {
            continue;
        };
        if !matches!(tag, "input" | "select" | "textarea") || dom.disabled(node) {
            continue;
        }
        let Some(name) = dom.attr(node, "name").filter(|name| !name.is_empty()) else {
            continue;
        };
        if tag == "input" {
            match input_type(dom, node).as_str() {
                "submit" | "button" | "reset" | "image" | "file" => continue,
                "checkbox" | "radio" => {
                    if !dom.has_attr(node, "checked") {
                        continue;
                    }
                    let value = dom.attr(node, "value").unwrap_or_else(|| "on".to_string());
                    entries.push((name, value));
                    continue;
                }
                _ => {}
            }
        }
        entries.push((name, dom.value(node)?));
    }
    Ok(entries)
}

pub(crate) fn build_submission(dom: &Dom, form: NodeId) -> Result<FormSubmission> {
    let method = dom
        .attr(form, "method")
        .map(|method| method.to_ascii_lowercase())
        .filter(|method| method == "post" || method == "get")
        .unwrap_or_else(|| "get".to_string());
    Ok(FormSubmission {
        form_id: dom.attr(form, "id"),
        action: dom.attr(form, "action").unwrap_or_default(),
        method,
        entries: collect_form_entries(dom, form)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORY_FORM: &str = r#"
        <form id="storyForm" action="/generate" method="POST">
          <input id="story_idea" name="story_idea" value="A dragon learns to paint">
          <select id="genre" name="genre">
            <option value="fantasy">Fantasy</option>
            <option value="sci-fi" selected>Sci-Fi</option>
          </select>
          <select id="tone" name="tone"><option>  Light   hearted </option></select>
          <textarea name="notes">rainy day</textarea>
          <input type="checkbox" name="illustrate" checked>
          <input type="checkbox" name="pdf" value="yes">
          <input name="locked" value="x" disabled>
          <input value="no name">
          <button id="go" type="submit" name="action" value="go">Generate</button>
        </form>
    "#;

    #[test]
    fn select_prefers_selected_option_then_first() -> Result<()> {
        let dom = html::parse_html(STORY_FORM)?;
        let genre = dom.by_id("genre").expect("genre select");
        let tone = dom.by_id("tone").expect("tone select");
        assert_eq!(select_value(&dom, genre).as_deref(), Some("sci-fi"));
        assert_eq!(select_value(&dom, tone).as_deref(), Some("Light hearted"));
        Ok(())
    }

    #[test]
    fn submission_collects_enabled_named_controls() -> Result<()> {
        let dom = html::parse_html(STORY_FORM)?;
        let form = dom.by_id("storyForm").expect("form");
        let submission = build_submission(&dom, form)?;
        assert_eq!(submission.method, "post");
        assert_eq!(submission.action, "/generate");
        assert_eq!(submission.form_id.as_deref(), Some("storyForm"));
        assert_eq!(
            submission.entries,
            vec![
                ("story_idea".to_string(), "A dragon learns to paint".to_string()),
                ("genre".to_string(), "sci-fi".to_string()),
                ("tone".to_string(), "Light hearted".to_string()),
                ("notes".to_string(), "rainy day".to_string()),
                ("illustrate".to_string(), "on".to_string()),
            ]
        );
        assert_eq!(submission.get("genre"), Some("sci-fi"));
        assert_eq!(submission.get("pdf"), None);
        Ok(())
    }

    #[test]
    fn submit_controls_and_form_owner() -> Result<()> {
        let dom = html::parse_html(
            "<form id='f'><button id='plain'>Go</button><button id='b' type='button'>x</button>\
             <input id='s' type='submit'></form><button id='outside' form='f'>Out</button>",
        )?;
        let plain = dom.by_id("plain").expect("plain");
        let button = dom.by_id("b").expect("b");
        let input = dom.by_id("s").expect("s");
        let outside = dom.by_id("outside").expect("outside");
        let form = dom.by_id("f").expect("form");
        assert!(is_submit_control(&dom, plain));
        assert!(!is_submit_control(&dom, button));
        assert!(is_submit_control(&dom, input));
        assert_eq!(resolve_form_for_submit(&dom, outside), Some(form));
        assert_eq!(resolve_form_for_submit(&dom, plain), Some(form));
        Ok(())
    }

    #[test]
    fn unknown_method_falls_back_to_get() -> Result<()> {
        let dom = html::parse_html("<form id='f' method='dialog'></form>")?;
        let form = dom.by_id("f").expect("form");
        assert_eq!(build_submission(&dom, form)?.method, "get");
        Ok(())
    }
}

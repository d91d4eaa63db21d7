use super::*;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GuardDecision {
    Proceed,
    Block { field: NodeId },
}

pub(super) fn attach(config: &EnhancerConfig, document: &mut Document) -> bool {
    let Some(form) = document.dom.by_id(&config.form_id) else {
        debug!(form_id = %config.form_id, "no form on page; submission guard skipped");
        return false;
    };
    document.listeners.add(
        form,
        "submit",
        Listener::SubmissionGuard {
            field_id: config.field_id.clone(),
            message: config.empty_field_message.clone(),
        },
    );
    debug!(form_id = %config.form_id, "submission guard attached");
    true
}

/// Looks the field up again at submit time; a missing field never blocks.
pub(crate) fn check_submission(dom: &Dom, field_id: &str) -> Result<GuardDecision> {
    let Some(field) = dom.by_id(field_id) else {
        return Ok(GuardDecision::Proceed);
    };
    let value = dom.value(field)?;
    if trim_whitespace(&value).is_empty() {
        Ok(GuardDecision::Block { field })
    } else {
        Ok(GuardDecision::Proceed)
    }
}

/// Browser `String.prototype.trim`: Unicode `White_Space` without NEL, plus
/// the byte order mark.
fn trim_whitespace(value: &str) -> &str {
    value.trim_matches(|ch: char| ch == '\u{feff}' || (ch != '\u{85}' && ch.is_whitespace()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_page(value: &str) -> Result<Dom> {
        let mut dom = html::parse_html("<form id='storyForm'><input id='story_idea'></form>")?;
        let field = dom.by_id("story_idea").expect("field");
        dom.set_value(field, value)?;
        Ok(dom)
    }

    #[test]
    fn blank_values_block() -> Result<()> {
        for value in [
            "",
            " ",
            "\t\n  ",
            "\u{b}\u{c}\r",
            "\u{a0}",
            "\u{1680}\u{202f}\u{205f}",
            "\u{2028}\u{2029}",
            "\u{2003}\u{feff}",
            "\u{3000}",
        ] {
            let dom = field_page(value)?;
            let field = dom.by_id("story_idea").expect("field");
            assert_eq!(
                check_submission(&dom, "story_idea")?,
                GuardDecision::Block { field },
                "{value:?} should block"
            );
        }
        Ok(())
    }

    #[test]
    fn any_visible_character_proceeds() -> Result<()> {
        for value in [
            "A dragon learns to paint",
            "  x  ",
            ".",
            "\u{200b}",
            "\u{85}",
            " \u{85} ",
        ] {
            let dom = field_page(value)?;
            assert_eq!(
                check_submission(&dom, "story_idea")?,
                GuardDecision::Proceed,
                "{value:?} should proceed"
            );
        }
        Ok(())
    }

    #[test]
    fn missing_field_proceeds() -> Result<()> {
        let dom = html::parse_html("<form id='storyForm'></form>")?;
        assert_eq!(check_submission(&dom, "story_idea")?, GuardDecision::Proceed);
        Ok(())
    }

    #[test]
    fn attach_only_when_form_exists() -> Result<()> {
        let config = EnhancerConfig::default();
        let mut without_form = Document::parse("<input id='story_idea'>")?;
        assert!(!attach(&config, &mut without_form));
        assert_eq!(without_form.listeners.total(), 0);

        let mut with_form = Document::parse("<form id='storyForm'></form>")?;
        assert!(attach(&config, &mut with_form));
        let form = with_form.by_id("storyForm").expect("form");
        assert_eq!(
            with_form.listeners.get(form, "submit"),
            vec![Listener::SubmissionGuard {
                field_id: "story_idea".into(),
                message: "Please enter a story idea!".into(),
            }]
        );
        Ok(())
    }
}

use super::*;
use tracing::debug;

const BUTTON_CLASSES: &str = "btn btn-outline-secondary btn-sm";
const SPACED_BUTTON_CLASSES: &str = "btn btn-outline-secondary btn-sm me-2";
const BUTTON_MARKER_CLASS: &str = "example-idea";

fn example_block(config: &EnhancerConfig) -> ElementBuilder {
    let heading = ElementBuilder::new("p")
        .class("mb-2")
        .child(ElementBuilder::new("strong").text(&config.examples_heading));
    let last = config.examples.len().saturating_sub(1);
    let row = config
        .examples
        .iter()
        .enumerate()
        .fold(
            ElementBuilder::new("div").class("mt-3").child(heading),
            |row, (idx, example)| {
                let classes = if idx == last {
                    BUTTON_CLASSES
                } else {
                    SPACED_BUTTON_CLASSES
                };
                row.child(
                    ElementBuilder::new("button")
                        .attr("type", "button")
                        .class(classes)
                        .class(BUTTON_MARKER_CLASS)
                        .attr("data-idea", &example.text)
                        .text(&example.label),
                )
            },
        );
    ElementBuilder::new("div").class("example-ideas").child(row)
}

/// Appends the example block to the field's container and wires one fill
/// listener per button. Returns the buttons in example order.
pub(super) fn inject(config: &EnhancerConfig, document: &mut Document) -> Result<Vec<NodeId>> {
    let Some(field) = document.dom.by_id(&config.field_id) else {
        debug!(field_id = %config.field_id, "no story idea field; example ideas skipped");
        return Ok(Vec::new());
    };
    if config.examples.is_empty() {
        return Ok(Vec::new());
    }
    let Some(container) = document.dom.parent(field) else {
        return Ok(Vec::new());
    };

    let block = document.append(container, &example_block(config))?;
    let selector = format!("button.{BUTTON_MARKER_CLASS}");
    let buttons = document.dom.query_selector_all_within(block, &selector)?;
    for (button, example) in buttons.iter().zip(&config.examples) {
        document.listeners.add(
            *button,
            "click",
            Listener::FillField {
                field,
                text: example.text.clone(),
            },
        );
    }
    debug!(buttons = buttons.len(), "example idea buttons injected");
    Ok(buttons)
}

pub(crate) fn apply_fill(dom: &mut Dom, field: NodeId, text: &str) -> Result<()> {
    dom.set_value(field, text)
}

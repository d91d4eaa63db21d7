use super::*;
use tracing::debug;

pub(super) fn reveal_transition(config: &EnhancerConfig) -> String {
    transition::format_transition_list(&[
        TransitionSpec::new("opacity", config.transition_ms, config.timing),
        TransitionSpec::new("transform", config.transition_ms, config.timing),
    ])
}

/// Hides every card present now and schedules its reveal at
/// `index * stagger`. Cards added later are untouched.
pub(super) fn animate(
    config: &EnhancerConfig,
    document: &mut Document,
    scheduler: &mut dyn Scheduler,
) -> Result<(Vec<NodeId>, Vec<TimerId>)> {
    let mut elements = Vec::new();
    document
        .dom
        .collect_elements_dfs(document.dom.root, &mut elements);
    let cards = elements
        .into_iter()
        .filter(|node| document.dom.has_class(*node, &config.card_class))
        .collect::<Vec<_>>();
    if cards.is_empty() {
        debug!(card_class = %config.card_class, "no cards to reveal");
        return Ok((cards, Vec::new()));
    }

    let hidden_transform = transition::format_translate_y(config.initial_offset_px);
    let transition_value = reveal_transition(config);
    let mut timers = Vec::with_capacity(cards.len());
    for (idx, card) in cards.iter().enumerate() {
        document.dom.style_set(*card, "opacity", "0")?;
        document.dom.style_set(*card, "transform", &hidden_transform)?;
        document.dom.style_set(*card, "transition", &transition_value)?;

        let delay_ms = (idx as i64).saturating_mul(config.stagger_ms);
        timers.push(scheduler.schedule(RevealTask {
            target: *card,
            delay_ms,
            updates: vec![
                StyleUpdate::new("opacity", "1"),
                StyleUpdate::new("transform", &transition::format_translate_y(0)),
            ],
        }));
    }
    debug!(cards = cards.len(), stagger_ms = config.stagger_ms, "card reveals scheduled");
    Ok((cards, timers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_start_hidden_with_staggered_reveals() -> Result<()> {
        let mut document = Document::parse(
            "<div class='scene-card'>1</div><section><div class='card scene-card'>2</div></section>\
             <div class='scene-card'>3</div>",
        )?;
        let mut scheduler = VirtualScheduler::new();
        let (cards, timers) = animate(&EnhancerConfig::default(), &mut document, &mut scheduler)?;

        assert_eq!(cards.len(), 3);
        assert_eq!(timers.len(), 3);
        for card in &cards {
            assert_eq!(
                document.attr(*card, "style").as_deref(),
                Some(
                    "opacity: 0; transform: translateY(20px); \
                     transition: opacity 0.5s ease, transform 0.5s ease;"
                )
            );
        }
        let due = scheduler
            .pending_timers()
            .iter()
            .map(|timer| (timer.target, timer.due_at))
            .collect::<Vec<_>>();
        assert_eq!(due, vec![(cards[0], 0), (cards[1], 100), (cards[2], 200)]);
        Ok(())
    }

    #[test]
    fn existing_inline_styles_are_kept() -> Result<()> {
        let mut document =
            Document::parse("<div class='scene-card' style='margin: 4px; opacity: 0.7'>1</div>")?;
        let mut scheduler = VirtualScheduler::new();
        let (cards, _) = animate(&EnhancerConfig::default(), &mut document, &mut scheduler)?;
        assert_eq!(document.style(cards[0], "margin")?, "4px");
        assert_eq!(document.style(cards[0], "opacity")?, "0");
        Ok(())
    }

    #[test]
    fn no_cards_schedules_nothing() -> Result<()> {
        let mut document = Document::parse("<div class='scene'>not a card</div>")?;
        let mut scheduler = VirtualScheduler::new();
        let (cards, timers) = animate(&EnhancerConfig::default(), &mut document, &mut scheduler)?;
        assert!(cards.is_empty());
        assert!(timers.is_empty());
        assert!(scheduler.is_empty());
        Ok(())
    }

    #[test]
    fn custom_timing_shows_up_in_transition() {
        let config = EnhancerConfig::default().with_transition(250, TimingFunction::EaseOut);
        assert_eq!(
            reveal_transition(&config),
            "opacity 0.25s ease-out, transform 0.25s ease-out"
        );
    }
}

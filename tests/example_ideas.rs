use form_enhancer::{EnhancerConfig, ExampleIdea, Page, Result};

const FORM_HTML: &str = r#"
<form id="storyForm" action="/generate" method="POST">
  <div class="mb-3" id="idea-group">
    <label for="story_idea" class="form-label">Your story idea</label>
    <input type="text" class="form-control" id="story_idea" name="story_idea">
    <div class="form-text">Describe your story in one sentence.</div>
  </div>
  <button type="submit" id="generate" class="btn btn-primary">Generate Story</button>
</form>
"#;

const FANTASY: &str = "A young girl finds a secret door in her grandmother's attic";
const SCI_FI: &str = "A robot discovers a flower in a post-apocalyptic city";
const MYSTERY: &str = "A detective solves a mysterious case from 50 years ago";

#[test]
fn block_is_appended_to_the_field_container() -> Result<()> {
    let page = Page::load(FORM_HTML)?;
    page.assert_exists("#idea-group > .example-ideas > .mt-3 > p.mb-2 > strong")?;
    page.assert_text(".example-ideas strong", "Try these examples:")?;
    assert_eq!(page.count(".example-ideas")?, 1);
    assert_eq!(page.count("#idea-group > .example-ideas")?, 1);
    assert_eq!(page.count("#storyForm > .example-ideas")?, 0);

    let group = page.dump_dom("#idea-group")?;
    let field_at = group.find(r#"id="story_idea""#).expect("field in group");
    let hint_at = group.find("form-text").expect("hint in group");
    let block_at = group.find("example-ideas").expect("block in group");
    assert!(field_at < hint_at && hint_at < block_at);
    Ok(())
}

#[test]
fn buttons_carry_labels_data_and_spacing_classes() -> Result<()> {
    let page = Page::load(FORM_HTML)?;
    assert_eq!(page.count("button.example-idea[type=button]")?, 3);
    assert_eq!(page.count("button.example-idea.btn.btn-outline-secondary.btn-sm")?, 3);
    assert_eq!(page.count("button.example-idea.me-2")?, 2);

    let labels = ["Fantasy", "Sci-Fi", "Mystery"];
    let texts = [FANTASY, SCI_FI, MYSTERY];
    for (label, text) in labels.iter().zip(texts) {
        let selector = format!("button.example-idea[data-idea=\"{text}\"]");
        page.assert_text(&selector, label)?;
    }
    assert_eq!(
        page.attr("button.example-idea[data-idea^='A detective']", "class")?
            .as_deref(),
        Some("btn btn-outline-secondary btn-sm example-idea")
    );
    Ok(())
}

#[test]
fn each_click_overwrites_the_field() -> Result<()> {
    let mut page = Page::load(FORM_HTML)?;
    page.type_text("#story_idea", "my own idea")?;

    page.click("button.example-idea[data-idea^='A young girl']")?;
    page.assert_value("#story_idea", FANTASY)?;
    page.click("button.example-idea[data-idea$='50 years ago']")?;
    page.assert_value("#story_idea", MYSTERY)?;
    page.click("button.example-idea[data-idea*='robot']")?;
    page.click("button.example-idea[data-idea*='robot']")?;
    page.assert_value("#story_idea", SCI_FI)?;

    assert!(page.take_submissions().is_empty());
    assert!(page.take_alert_messages().is_empty());
    Ok(())
}

#[test]
fn filled_example_then_submit_posts_it() -> Result<()> {
    let mut page = Page::load(FORM_HTML)?;
    page.click("button.example-idea[data-idea*='robot']")?;
    page.click("#generate")?;
    let submissions = page.take_submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].get("story_idea"), Some(SCI_FI));
    Ok(())
}

#[test]
fn fill_does_not_fire_input_events() -> Result<()> {
    let mut page = Page::load(FORM_HTML)?;
    page.enable_trace(true);
    page.click("button.example-idea[data-idea^='A young girl']")?;
    let logs = page.take_trace_logs();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].starts_with("[event] done click target=button"));
    Ok(())
}

#[test]
fn missing_field_means_no_block() -> Result<()> {
    let page = Page::load(r#"<form id="storyForm"><div class="mb-3"></div></form>"#)?;
    assert_eq!(page.count(".example-ideas")?, 0);
    assert_eq!(page.count("button")?, 0);
    Ok(())
}

#[test]
fn custom_examples_replace_the_defaults() -> Result<()> {
    let mut page = Page::from_html(FORM_HTML)?;
    page.initialize_with(
        EnhancerConfig::default()
            .with_examples_heading("Need inspiration?")
            .with_examples(vec![
                ExampleIdea::new("Western", "A retired sheriff trains a stubborn mule"),
                ExampleIdea::new("Horror", "The lighthouse light blinks in Morse code"),
            ]),
    )?;
    page.assert_text(".example-ideas strong", "Need inspiration?")?;
    assert_eq!(page.count("button.example-idea")?, 2);
    assert_eq!(page.count("button.example-idea.me-2")?, 1);
    page.click("button.example-idea[data-idea^='The lighthouse']")?;
    page.assert_value("#story_idea", "The lighthouse light blinks in Morse code")?;
    Ok(())
}

#[test]
fn empty_example_list_injects_nothing() -> Result<()> {
    let mut page = Page::from_html(FORM_HTML)?;
    let report = page.initialize_with(EnhancerConfig::default().with_examples(Vec::new()))?;
    assert!(report.example_buttons.is_empty());
    assert_eq!(page.count(".example-ideas")?, 0);
    Ok(())
}

use form_enhancer::{Page, Result};

const INDEX_WITH_SAMPLE_STORY: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>AI Story Generator</title>
  <style>
    .scene-card { border-radius: 12px; }
    .example-idea:hover { transform: scale(1.05); }
  </style>
</head>
<body>
  <nav class="navbar navbar-dark bg-dark"><span class="navbar-brand">Story &amp; Art</span></nav>
  <main class="container">
    <div class="row">
      <div class="col-lg-6">
        <form id="storyForm" action="/generate" method="POST">
          <div class="mb-3">
            <label for="story_idea" class="form-label">What&#39;s your story about?</label>
            <textarea class="form-control" id="story_idea" name="story_idea" rows="3"></textarea>
          </div>
          <select class="form-select" id="genre" name="genre">
            <option value="fantasy">Fantasy</option>
            <option value="sci-fi">Sci-Fi</option>
            <option value="mystery" selected>Mystery</option>
          </select>
          <input type="hidden" name="csrf_token" value="t0k3n">
          <button type="submit" class="btn btn-primary btn-lg w-100 mt-3">
            Generate <i class="bi bi-magic"></i>
          </button>
        </form>
      </div>
      <div class="col-lg-6">
        <h2>Sample story</h2>
        <div class="card scene-card" id="sample-1"><div class="card-body">Once upon a time</div></div>
        <div class="card scene-card" id="sample-2"><div class="card-body">The end</div></div>
      </div>
    </div>
  </main>
  <script>
    // Inline scripts are inert text here.
    if (a < b && c > d) { console.log("</div>"); }
  </script>
</body>
</html>
"#;

#[test]
fn textarea_field_gets_examples_and_guard() -> Result<()> {
    let mut page = Page::load(INDEX_WITH_SAMPLE_STORY)?;
    let report = page.init_report().cloned().expect("page was initialized");
    assert!(report.guard_attached);
    assert_eq!(report.example_buttons.len(), 3);
    assert_eq!(report.animated_cards.len(), 2);

    page.assert_exists("div.mb-3 > .example-ideas")?;
    page.click("button[type=submit]")?;
    assert_eq!(page.take_alert_messages(), vec!["Please enter a story idea!"]);

    page.click(".example-idea[data-idea^='A detective']")?;
    page.click("button.btn-primary")?;
    let submissions = page.take_submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(
        submissions[0].entries,
        vec![
            (
                "story_idea".to_string(),
                "A detective solves a mysterious case from 50 years ago".to_string()
            ),
            ("genre".to_string(), "mystery".to_string()),
            ("csrf_token".to_string(), "t0k3n".to_string()),
        ]
    );
    Ok(())
}

#[test]
fn script_and_style_bodies_are_not_parsed_as_markup() -> Result<()> {
    let page = Page::load(INDEX_WITH_SAMPLE_STORY)?;
    assert_eq!(page.count("main")?, 1);
    assert_eq!(page.count(".scene-card")?, 2);
    page.assert_text(".navbar-brand", "Story & Art")?;
    page.assert_text("label[for=story_idea]", "What's your story about?")?;
    Ok(())
}

#[test]
fn duplicate_ids_resolve_to_the_first_element() -> Result<()> {
    let mut page = Page::load(
        r#"
        <form id="storyForm" action="/generate" method="post">
          <div class="first"><input id="story_idea" name="story_idea"></div>
          <div class="second"><input id="story_idea" name="story_idea_copy" value="filled"></div>
          <button id="go">Go</button>
        </form>
        "#,
    )?;
    page.assert_exists(".first > .example-ideas")?;
    assert_eq!(page.count(".second > .example-ideas")?, 0);

    page.click("#go")?;
    assert_eq!(page.take_alert_messages().len(), 1);
    Ok(())
}

#[test]
fn field_directly_under_form_gets_block_inside_form() -> Result<()> {
    let page = Page::load(
        r#"<form id="storyForm"><input id="story_idea" name="story_idea"><button>Go</button></form>"#,
    )?;
    let form = page.dump_dom("#storyForm")?;
    assert!(form.ends_with("</div></div></form>"));
    assert!(form.find("<button>Go</button>") < form.find("example-ideas"));
    Ok(())
}

#[test]
fn readonly_field_still_accepts_example_fill() -> Result<()> {
    let mut page = Page::load(
        r#"<form id="storyForm"><div><input id="story_idea" readonly value="locked"></div></form>"#,
    )?;
    page.type_text("#story_idea", "typed")?;
    page.assert_value("#story_idea", "locked")?;
    page.click(".example-idea")?;
    page.assert_value(
        "#story_idea",
        "A young girl finds a secret door in her grandmother's attic",
    )?;
    Ok(())
}

#[test]
fn malformed_markup_is_rejected_before_enhancing() {
    let err = Page::load("<div><!-- never closed").expect_err("unterminated comment");
    assert!(matches!(err, form_enhancer::Error::HtmlParse(_)));
}

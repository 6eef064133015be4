use crate::event::event_model::{ActionKind, RecordedEvent};

use super::generator::{Language, escape_literal};

// ============================================================================
// Playwright emitters
// ============================================================================

// Playwright's selector engine understands the `xpath=` and `text=` wrappers
// natively, so selector expressions pass through verbatim.

pub fn render(events: &[RecordedEvent], language: Language) -> String {
    match language {
        Language::Python => render_python(events),
        Language::Javascript => render_script(events, false),
        Language::Typescript => render_script(events, true),
    }
}

fn render_python(events: &[RecordedEvent]) -> String {
    let mut source = String::new();
    source.push_str("from playwright.sync_api import sync_playwright\n");
    source.push_str("\n\n");
    source.push_str("def test_recorded_flow():\n");
    source.push_str("    with sync_playwright() as p:\n");
    source.push_str("        browser = p.chromium.launch()\n");
    source.push_str("        page = browser.new_page()\n");

    for event in events {
        let selector = escape_literal(event.effective_selector());
        match event.action {
            ActionKind::Click => {
                source.push_str(&format!("        page.click(\"{}\")\n", selector));
            }
            ActionKind::Input => {
                let value = event.value.as_deref().unwrap_or("");
                source.push_str(&format!(
                    "        page.fill(\"{}\", \"{}\")\n",
                    selector,
                    escape_literal(value)
                ));
            }
            _ => {}
        }
    }

    source.push_str("        browser.close()\n");
    source
}

fn render_script(events: &[RecordedEvent], typescript: bool) -> String {
    let mut source = String::new();
    if typescript {
        source.push_str("import { chromium } from \"playwright\";\n");
    } else {
        source.push_str("const { chromium } = require(\"playwright\");\n");
    }
    source.push_str("\n");
    source.push_str("(async () => {\n");
    source.push_str("  const browser = await chromium.launch();\n");
    source.push_str("  const page = await browser.newPage();\n");

    for event in events {
        let selector = escape_literal(event.effective_selector());
        match event.action {
            ActionKind::Click => {
                source.push_str(&format!("  await page.click(\"{}\");\n", selector));
            }
            ActionKind::Input => {
                let value = event.value.as_deref().unwrap_or("");
                source.push_str(&format!(
                    "  await page.fill(\"{}\", \"{}\");\n",
                    selector,
                    escape_literal(value)
                ));
            }
            _ => {}
        }
    }

    source.push_str("  await browser.close();\n");
    source.push_str("})();\n");
    source
}

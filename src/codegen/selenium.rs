use crate::event::event_model::{ActionKind, RecordedEvent};

use super::generator::{Language, escape_literal};

// ============================================================================
// Selenium emitters
// ============================================================================

pub fn render(events: &[RecordedEvent], language: Language) -> String {
    match language {
        Language::Python => render_python(events),
        Language::Javascript => render_script(events, false),
        Language::Typescript => render_script(events, true),
    }
}

/// Element lookup expression. Selectors carrying the `xpath=` wrapper use
/// By.XPATH with the wrapper stripped; everything else is treated as CSS.
fn locator_python(selector: &str) -> String {
    match selector.strip_prefix("xpath=") {
        Some(xpath) => format!(
            "driver.find_element(By.XPATH, \"{}\")",
            escape_literal(xpath)
        ),
        None => format!(
            "driver.find_element(By.CSS_SELECTOR, \"{}\")",
            escape_literal(selector)
        ),
    }
}

fn locator_script(selector: &str) -> String {
    match selector.strip_prefix("xpath=") {
        Some(xpath) => format!("driver.findElement(By.xpath(\"{}\"))", escape_literal(xpath)),
        None => format!("driver.findElement(By.css(\"{}\"))", escape_literal(selector)),
    }
}

fn render_python(events: &[RecordedEvent]) -> String {
    let mut source = String::new();
    source.push_str("from selenium import webdriver\n");
    source.push_str("from selenium.webdriver.common.by import By\n");
    source.push_str("\n\n");
    source.push_str("def test_recorded_flow():\n");
    source.push_str("    driver = webdriver.Chrome()\n");

    for event in events {
        let selector = event.effective_selector();
        match event.action {
            ActionKind::Click => {
                source.push_str(&format!("    {}.click()\n", locator_python(selector)));
            }
            ActionKind::Input => {
                let value = event.value.as_deref().unwrap_or("");
                source.push_str(&format!(
                    "    {}.send_keys(\"{}\")\n",
                    locator_python(selector),
                    escape_literal(value)
                ));
            }
            _ => {}
        }
    }

    source.push_str("    driver.quit()\n");
    source
}

fn render_script(events: &[RecordedEvent], typescript: bool) -> String {
    let mut source = String::new();
    if typescript {
        source.push_str("import { Builder, By, WebDriver } from \"selenium-webdriver\";\n");
    } else {
        source.push_str("const { Builder, By } = require(\"selenium-webdriver\");\n");
    }
    source.push_str("\n");
    if typescript {
        source.push_str("async function testRecordedFlow(): Promise<void> {\n");
        source.push_str("  const driver: WebDriver = await new Builder().forBrowser(\"chrome\").build();\n");
    } else {
        source.push_str("async function testRecordedFlow() {\n");
        source.push_str("  const driver = await new Builder().forBrowser(\"chrome\").build();\n");
    }

    for event in events {
        let selector = event.effective_selector();
        match event.action {
            ActionKind::Click => {
                source.push_str(&format!("  await {}.click();\n", locator_script(selector)));
            }
            ActionKind::Input => {
                let value = event.value.as_deref().unwrap_or("");
                source.push_str(&format!(
                    "  await {}.sendKeys(\"{}\");\n",
                    locator_script(selector),
                    escape_literal(value)
                ));
            }
            _ => {}
        }
    }

    source.push_str("  await driver.quit();\n");
    source.push_str("}\n");
    source.push_str("\n");
    source.push_str("testRecordedFlow();\n");
    source
}

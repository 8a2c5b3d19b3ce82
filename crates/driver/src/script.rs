//! Generates the per-session Playwright program
//!
//! One step plan becomes one self-contained JS file running in one
//! browser, context and page. The program prints a JSON line per
//! completed step and one final verdict line, so the harness can
//! attribute a failure to the exact step without parsing engine
//! internals.

use std::path::Path;

use crate::config::DriverConfig;
use crate::step::Step;

pub struct ScriptBuilder<'a> {
    config: &'a DriverConfig,
}

impl<'a> ScriptBuilder<'a> {
    pub fn new(config: &'a DriverConfig) -> Self {
        Self { config }
    }

    /// Render the full program for `steps`. On failure the script captures
    /// a screenshot at `screenshot_path` before exiting nonzero.
    pub fn build(&self, steps: &[Step], screenshot_path: &Path) -> String {
        let mut script = String::new();

        script.push_str(&format!(
            r#"const {{ chromium, firefox, webkit }} = require('playwright');
const {{ expect }} = require('@playwright/test');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();
  const baseUrl = {base_url:?};
  const report = (line) => console.log(JSON.stringify(line));
  let step = 0;
  try {{
"#,
            browser = self.config.browser.as_str(),
            headless = self.config.headless,
            width = self.config.viewport.width,
            height = self.config.viewport.height,
            base_url = self.config.base_url,
        ));

        for (index, step) in steps.iter().enumerate() {
            script.push_str(&format!(
                "\n    // step {}: {}\n    step = {};\n",
                index,
                step.label(),
                index
            ));
            script.push_str(&self.step_to_js(step));
            script.push_str(&format!("\n    report({{ step: {}, ok: true }});\n", index));
        }

        script.push_str(&format!(
            r#"
    report({{ done: true, ok: true, url: page.url() }});
  }} catch (error) {{
    const timeout = !error.matcherResult && error.name === 'TimeoutError';
    report({{ step, ok: false, timeout, error: String(error.message || error), url: page.url() }});
    try {{ await page.screenshot({{ path: {screenshot:?}, fullPage: true }}); }} catch (_) {{}}
    process.exitCode = 1;
  }} finally {{
    await browser.close();
  }}
}})();
"#,
            screenshot = screenshot_path.display().to_string(),
        ));

        script
    }

    fn step_to_js(&self, step: &Step) -> String {
        let action_bound = self.config.step_timeout_ms;
        let nav_bound = self.config.navigation_timeout_ms;

        match step {
            Step::Navigate { path } => format!(
                "    await page.goto(baseUrl + {:?}, {{ timeout: {} }});",
                path, nav_bound
            ),
            Step::Fill {
                locator,
                value,
                timeout_ms,
            } => format!(
                "    await {}.fill({:?}, {{ timeout: {} }});",
                locator.js_expr(),
                value,
                timeout_ms.unwrap_or(action_bound)
            ),
            Step::Click { locator, timeout_ms } => format!(
                "    await {}.click({{ timeout: {} }});",
                locator.js_expr(),
                timeout_ms.unwrap_or(action_bound)
            ),
            Step::WaitForUrl {
                pattern,
                timeout_ms,
            } => format!(
                "    await page.waitForURL(new RegExp({:?}), {{ timeout: {} }});",
                pattern.source(),
                timeout_ms.unwrap_or(nav_bound)
            ),
            Step::ExpectVisible { locator, timeout_ms } => format!(
                "    await expect({}).toBeVisible({{ timeout: {} }});",
                locator.js_expr(),
                timeout_ms.unwrap_or(action_bound)
            ),
            Step::ExpectHidden { locator, timeout_ms } => format!(
                "    await expect({}).toBeHidden({{ timeout: {} }});",
                locator.js_expr(),
                timeout_ms.unwrap_or(action_bound)
            ),
            Step::ExpectEnabled { locator, timeout_ms } => format!(
                "    await expect({}).toBeEnabled({{ timeout: {} }});",
                locator.js_expr(),
                timeout_ms.unwrap_or(action_bound)
            ),
            Step::ExpectDisabled { locator, timeout_ms } => format!(
                "    await expect({}).toBeDisabled({{ timeout: {} }});",
                locator.js_expr(),
                timeout_ms.unwrap_or(action_bound)
            ),
            Step::ExpectCount {
                locator,
                count,
                timeout_ms,
            } => format!(
                "    await expect({}).toHaveCount({}, {{ timeout: {} }});",
                locator.js_expr(),
                count,
                timeout_ms.unwrap_or(action_bound)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Browser;
    use crate::locator::Locator;
    use crate::step::UrlPattern;

    fn sample_steps() -> Vec<Step> {
        vec![
            Step::Navigate {
                path: "/app/business-signup".to_string(),
            },
            Step::Fill {
                locator: Locator::css(r#"input[name="email"]"#),
                value: "test-0@validcompany.com".to_string(),
                timeout_ms: None,
            },
            Step::ExpectVisible {
                locator: Locator::text("Create account"),
                timeout_ms: None,
            },
        ]
    }

    #[test]
    fn scripts_launch_report_and_close() {
        let config = DriverConfig::default();
        let script = ScriptBuilder::new(&config).build(&sample_steps(), Path::new("shots/fail.png"));

        assert!(script.contains("chromium.launch({ headless: true })"));
        assert!(script.contains("report({ step: 0, ok: true });"));
        assert!(script.contains("report({ step: 2, ok: true });"));
        assert!(script.contains("await browser.close()"));
        assert!(script.contains(r#""shots/fail.png""#));
    }

    #[test]
    fn the_browser_engine_is_configurable() {
        let config = DriverConfig {
            browser: Browser::Firefox,
            headless: false,
            ..Default::default()
        };
        let script = ScriptBuilder::new(&config).build(&sample_steps(), Path::new("s.png"));
        assert!(script.contains("firefox.launch({ headless: false })"));
    }

    #[test]
    fn expectations_carry_the_default_bound() {
        let config = DriverConfig {
            step_timeout_ms: 7_000,
            ..Default::default()
        };
        let script = ScriptBuilder::new(&config).build(&sample_steps(), Path::new("s.png"));
        assert!(script.contains("toBeVisible({ timeout: 7000 })"));
    }

    #[test]
    fn per_step_overrides_win() {
        let config = DriverConfig::default();
        let steps = vec![Step::WaitForUrl {
            pattern: UrlPattern::path_suffix("/login"),
            timeout_ms: Some(20_000),
        }];
        let script = ScriptBuilder::new(&config).build(&steps, Path::new("s.png"));
        assert!(script.contains("waitForURL(new RegExp"));
        assert!(script.contains("{ timeout: 20000 }"));
    }

    #[test]
    fn failures_classify_timeouts_before_reporting() {
        let config = DriverConfig::default();
        let script = ScriptBuilder::new(&config).build(&sample_steps(), Path::new("s.png"));
        assert!(script.contains("error.name === 'TimeoutError'"));
        assert!(script.contains("process.exitCode = 1"));
    }

    #[test]
    fn selector_quotes_survive_generation() {
        let config = DriverConfig::default();
        let script = ScriptBuilder::new(&config).build(&sample_steps(), Path::new("s.png"));
        assert!(script.contains(r#"page.locator("input[name=\"email\"]").fill"#));
    }
}

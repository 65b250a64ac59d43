use serde::Deserialize;
use wasm_bindgen::prelude::*;

use mrkdwn_renderer::{Renderer, Theme};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderOptions {
    highlight_code: Option<bool>,
    language_label: Option<bool>,
    sanitized: Option<bool>,
}

impl RenderOptions {
    fn core_options(&self) -> mrkdwn_core::RenderOptions {
        let mut out = mrkdwn_core::RenderOptions::default();
        if let Some(highlight_code) = self.highlight_code {
            out.highlight_code = highlight_code;
        }
        if let Some(language_label) = self.language_label {
            out.language_label = language_label;
        }
        out
    }
}

#[wasm_bindgen]
pub fn render(source: &str) -> String {
    mrkdwn_core::render(source)
}

#[wasm_bindgen]
pub fn render_with_options(source: &str, options: JsValue) -> Result<String, JsValue> {
    let options = options_from_js(options)?;
    let core_options = options.core_options();
    Ok(if options.sanitized.unwrap_or(false) {
        mrkdwn_core::render_sanitized(source, &core_options)
    } else {
        mrkdwn_core::render_with_options(source, &core_options)
    })
}

#[wasm_bindgen]
pub fn highlight(code: &str, lang: Option<String>) -> String {
    mrkdwn_core::highlight(code, lang.as_deref())
}

#[wasm_bindgen]
pub fn has_markup_tokens(text: &str) -> bool {
    mrkdwn_core::has_markup_tokens(text)
}

/// Formats a message body's inner HTML; `undefined` when nothing changes.
#[wasm_bindgen]
pub fn format_message(html: &str) -> Option<String> {
    mrkdwn_core::format_message(html)
}

/// The canonical name of the guessed language, e.g. `"python"`.
#[wasm_bindgen]
pub fn detect_language(code: &str) -> String {
    mrkdwn_core::detect_language(code).name().to_string()
}

#[wasm_bindgen]
pub fn stylesheet(theme: Option<String>) -> Result<String, JsValue> {
    let theme = theme_from_name(theme.as_deref()).map_err(|err| JsValue::from_str(&err))?;
    Ok(Renderer::new(theme).stylesheet())
}

fn options_from_js(value: JsValue) -> Result<RenderOptions, JsValue> {
    if value.is_null() || value.is_undefined() {
        return Ok(RenderOptions::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}

fn theme_from_name(name: Option<&str>) -> Result<Theme, String> {
    match name {
        None => Ok(Theme::Auto),
        Some(name) => Theme::from_name(name)
            .ok_or_else(|| format!("unknown theme {:?}, expected auto | light | dark", name)),
    }
}

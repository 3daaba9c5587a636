//! Post-processing for model-generated text.
//!
//! Assistant answers come back with lightweight markdown artifacts that the
//! hospital front ends render as plain text, so the markers are stripped
//! before the text ever reaches a caller.

use std::sync::OnceLock;

use regex::Regex;

/// Opening fence: three backticks, optional language tag, optional newline
fn fence_open_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```[a-z]*\n?").unwrap())
}

/// Strip markdown markers from assistant output.
///
/// The replacements run in a fixed order so a later step never reintroduces
/// a marker an earlier step removed. Empty input is returned unchanged.
/// Applying the function to its own output is a no-op.
pub fn clean_response(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = text.replace("**", "");
    let text = text.replace('*', "");
    let text = text.replace("__", "");
    let text = text.replace('#', "");
    let text = fence_open_re().replace_all(&text, "");
    let text = text.replace("```", "");
    let text = text.replace("~~", "");
    let text = text.replace('|', "");
    let text = text.replace("\\n", "\n");
    text.trim().to_string()
}

/// Display variant for HTML surfaces: cleaned text with newlines rendered
/// as `<br>` tags. Layered on top of [`clean_response`], not part of it.
pub fn format_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    clean_response(text).replace('\n', "<br>")
}

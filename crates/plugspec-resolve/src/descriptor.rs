//! Plugin descriptor rendering.
//!
//! The packaging step writes the compatibility range into the plugin
//! descriptor as an `<idea-version>` element. An open range has no
//! `until-build` attribute at all.

use crate::range::CompatibilityRange;

/// Render the `<idea-version>` element for a range.
pub fn render_idea_version(range: &CompatibilityRange) -> String {
    match range.until.as_bound() {
        None => format!("<idea-version since-build=\"{}\"/>", range.since),
        Some(until) => format!(
            "<idea-version since-build=\"{}\" until-build=\"{}\"/>",
            range.since,
            escape_attr(until)
        ),
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

//! Placeholder resolution for raw field input.
//!
//! Every slot a template declares is filled with either the user's trimmed
//! input or a bracketed fallback label, so a generated prompt never carries a
//! silently blank slot.

/// Resolves raw input to the text inserted into a template.
///
/// Returns the trimmed input when it has any non-whitespace content,
/// otherwise `"[" + fallback + "]"`.
///
/// # Examples
///
/// ```rust
/// use relay_core::placeholder::resolve;
///
/// assert_eq!(resolve(Some(" hi "), "X"), "hi");
/// assert_eq!(resolve(Some("   "), "X"), "[X]");
/// assert_eq!(resolve(None, "X"), "[X]");
/// ```
pub fn resolve(raw: Option<&str>, fallback: &str) -> String {
    match raw.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => bracketed(fallback),
    }
}

/// Renders a fallback label the way an unresolved slot displays it.
pub fn bracketed(label: &str) -> String {
    format!("[{label}]")
}

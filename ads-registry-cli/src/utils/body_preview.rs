//! Compact previews of registry pages for log output
//!
//! Lookup responses are whole HTML documents. The interesting part is the
//! `<strong>` status element, so previews are centred on it.

/// Characters kept in a preview
const PREVIEW_CHARS: usize = 160;
/// Characters kept before the status element
const LEAD_CHARS: usize = 40;

const STATUS_TAG: &str = "<strong";

/// One-line preview of a response body.
///
/// Whitespace runs collapse to a single space. When the body has a status
/// element the window starts shortly before it, otherwise at the beginning.
/// Elided text on either side is marked with `...`.
pub fn body_preview(body: &str) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");

    // ASCII lowercasing keeps byte offsets intact
    let start = collapsed
        .to_ascii_lowercase()
        .find(STATUS_TAG)
        .map_or(0, |at| collapsed[..at].chars().count().saturating_sub(LEAD_CHARS));

    let total = collapsed.chars().count();
    let window: String = collapsed.chars().skip(start).take(PREVIEW_CHARS).collect();

    let mut preview = String::with_capacity(window.len() + 6);
    if start > 0 {
        preview.push_str("...");
    }
    preview.push_str(&window);
    if start + PREVIEW_CHARS < total {
        preview.push_str("...");
    }
    preview
}

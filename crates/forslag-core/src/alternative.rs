//! Extraction of the winning alternative's label from "rejected in favour of"
//! decisions, e.g. "Innstilt avvist til fordel for F12 (3-2-1)".

/// Marker character that conventionally starts an alternative's label.
pub const DEFAULT_MARKER: char = 'F';

/// Locate the label of the competing proposal in a decision text.
///
/// The label starts at the first `marker` (inclusive) and runs up to the
/// first `(`, or the first ASCII digit that follows whitespace, with
/// trailing whitespace trimmed. Without a terminator the label runs to the
/// end of the text. Returns `None` when the marker never appears or the
/// label is empty.
///
/// Digits attached to the label stay in it: "F12 (3-2-1)" yields "F12",
/// "Fellesforslag 3 (5-0-0)" yields "Fellesforslag".
pub fn extract_alternative(text: &str, marker: char) -> Option<&str> {
    let start = text.find(marker)?;
    let after = start + marker.len_utf8();

    let mut prev = marker;
    let mut end = text.len();
    for (i, c) in text[after..].char_indices() {
        if c == '(' || (c.is_ascii_digit() && prev.is_whitespace()) {
            end = after + i;
            break;
        }
        prev = c;
    }

    let label = text[start..end].trim_end();
    if label.is_empty() { None } else { Some(label) }
}

/// Detection of Unicode bidirectional control characters
///
/// Only the five embedding/override controls are considered:
/// LRE (U+202A), RLE (U+202B), PDF (U+202C), LRO (U+202D) and RLO (U+202E).
/// Isolates (U+2066..U+2069) and implicit marks (LRM/RLM) are not reported.
pub const DIRECTIONAL_CONTROLS: [char; 5] =
    ['\u{202A}', '\u{202B}', '\u{202C}', '\u{202D}', '\u{202E}'];

/// Returns true if `text` contains any directional embedding or override control.
pub fn has_directional_overrides(text: &str) -> bool {
    text.chars().any(is_directional_control)
}

/// Returns true if `c` is one of the five directional embedding/override controls.
pub fn is_directional_control(c: char) -> bool {
    DIRECTIONAL_CONTROLS.contains(&c)
}

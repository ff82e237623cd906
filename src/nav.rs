//! Guide navigation highlighting.

/// Sections count as reached this many pixels before their top scrolls into view.
pub const SCROLL_OFFSET: f64 = 100.0;

/// Id of the last section whose top has been reached at `scroll_y`.
///
/// `sections` pairs each id with its absolute top offset, in document order.
pub fn active_section<'a>(sections: &[(&'a str, f64)], scroll_y: f64) -> Option<&'a str> {
    let line = scroll_y + SCROLL_OFFSET;
    sections
        .iter()
        .rfind(|(_, top)| *top <= line)
        .map(|(id, _)| *id)
}

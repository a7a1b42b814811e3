//! Small text helpers shared by the renderers.

/// Share of `count` in `total`, in percent; an empty scope is 0%.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// [`percentage`] rendered with exactly one decimal digit.
pub fn format_percentage(count: usize, total: usize) -> String {
    format!("{:.1}", percentage(count, total))
}

/// Capitalize the first letter of every word and lower-case the rest.
///
/// A word is a run of letters, so `SCORECARD/DEP` becomes `Scorecard/Dep`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

/// Keycap emoji for a 1-based position (`1️⃣`, `2️⃣`, ...).
pub fn keycap(position: usize) -> String {
    format!("{}\u{fe0f}\u{20e3}", position)
}

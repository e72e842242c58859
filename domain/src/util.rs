//! Shared utility functions.

/// Build a single-line preview of `s` for log output.
///
/// Line breaks and runs of whitespace collapse to one space, and the result
/// is cut at `max_chars` characters with a trailing ellipsis.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut out: String = flat.chars().take(max_chars).collect();
    out.push('…');
    out
}

//! Keyword normalization.

/// Convert raw user input into the canonical lookup key.
///
/// Lower-cases, trims and applies a naive singular rule: a trailing `es` is
/// dropped, otherwise a trailing `s`. This is tuned for the category words
/// (`beaches`, `temples`) and is not a stemmer; `bus` becomes `bu`.
///
/// Returns `None` when the input is blank, in which case no search runs.
#[must_use]
pub fn normalize_keyword(raw: &str) -> Option<String> {
    let lowered = raw.to_lowercase();
    let trimmed = lowered.trim();
    if trimmed.is_empty() {
        return None;
    }

    let key = trimmed
        .strip_suffix("es")
        .or_else(|| trimmed.strip_suffix('s'))
        .unwrap_or(trimmed);

    Some(key.to_string())
}

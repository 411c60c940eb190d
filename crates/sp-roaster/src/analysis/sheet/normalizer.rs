pub(crate) fn normalize_name(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

/// Base name used for auto/manual sibling detection: the normalized name with
/// standalone "auto"/"manual" tokens removed. "Widgets - Auto" and
/// "Widgets - Manual" share the base "widgets".
pub(crate) fn sibling_base_name(value: &str) -> String {
    normalize_name(value)
        .split_whitespace()
        .filter(|token| {
            let word: String = token
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect();
            !word.is_empty() && word != "auto" && word != "manual"
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub const MEMORY_LABEL_CHARS: usize = 30;

/// First `max_chars` characters of `text` followed by an ellipsis.
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    let mut label = text.chars().take(max_chars).collect::<String>();
    label.push_str("...");
    label
}

pub fn join_tags<'a>(tags: impl IntoIterator<Item = &'a String>) -> String {
    let joined = tags
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        "(none)".to_owned()
    } else {
        joined
    }
}

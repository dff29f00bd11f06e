use std::collections::HashSet;

/// Normalize a free-text mood or ingredient label for comparison with stored
/// labels: trim surrounding whitespace, collapse inner runs of whitespace and
/// lowercase. Returns `None` when nothing is left.
pub fn normalize_label(label: &str) -> Option<String> {
    let words: Vec<&str> = label.split_whitespace().collect();
    if words.is_empty() {
        return None;
    }
    Some(words.join(" ").to_lowercase())
}

/// Normalize a list of labels, dropping blanks and repeated entries. The
/// first occurrence of each label keeps its position.
pub fn normalize_labels<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut out: Vec<String> = Vec::new();
    for label in labels {
        if let Some(label) = normalize_label(label.as_ref()) {
            if seen.insert(label.clone()) {
                out.push(label);
            }
        }
    }
    out
}

/// Shows at most half of the key, capped at eight characters.
pub(crate) fn mask_api_key(key: &str) -> String {
    if key.is_empty() {
        return "(not set)".to_string();
    }

    let visible = (key.chars().count() / 2).min(8);
    let prefix: String = key.chars().take(visible).collect();
    format!("{prefix}***")
}

pub fn fold_key(value: &str) -> String {
    value.trim().to_lowercase()
}

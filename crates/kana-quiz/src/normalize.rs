/// Trim, lowercase, and collapse whitespace runs to a single space.
///
/// Every comparison in the validator goes through this.
pub fn normalize(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

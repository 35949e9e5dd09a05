//! Identifier canonicalization.

/// Convert an identifier to its dash-free canonical form.
///
/// Block ids arrive in the dashed UUID layout (`8-4-4-4-12`); links and
/// `id` attributes use the same value with every `-` removed.
///
/// # Example
///
/// ```
/// use blockpress_model::to_no_dash_id;
///
/// assert_eq!(to_no_dash_id("abc-123-def"), "abc123def");
/// ```
#[must_use]
pub fn to_no_dash_id(id: &str) -> String {
    id.chars().filter(|&c| c != '-').collect()
}

//! Harness entry-point naming.

/// Derives the function name the execution harness calls from a problem
/// slug: `two-sum` becomes `twoSum`, `valid_parentheses` becomes
/// `validParentheses`. Returns `None` for a slug with no word characters.
#[must_use]
pub fn derive_entry_point(problem_id: &str) -> Option<String> {
    let mut words = problem_id
        .split(['-', '_'])
        .filter(|word| !word.is_empty());
    let mut name = words.next()?.to_lowercase();
    for word in words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(&chars.as_str().to_lowercase());
        }
    }
    Some(name)
}

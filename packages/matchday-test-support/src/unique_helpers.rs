//! Unique names for test leagues and clubs.
//!
//! Every integration test builds its own in-memory database, but unique names
//! keep log output readable when several tests run in one binary.

use ulid::Ulid;

/// Generate a unique string in the format `{prefix}-{ulid}`.
///
/// ```
/// use matchday_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("league");
/// let b = unique_str("league");
/// assert_ne!(a, b);
/// assert!(a.starts_with("league-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate `count` unique club names sharing a readable prefix.
///
/// ```
/// use matchday_test_support::unique_helpers::unique_club_names;
///
/// let names = unique_club_names("FC", 4);
/// assert_eq!(names.len(), 4);
/// assert!(names[0].starts_with("FC 1-"));
/// assert!(names[3].starts_with("FC 4-"));
/// ```
pub fn unique_club_names(prefix: &str, count: usize) -> Vec<String> {
    (1..=count)
        .map(|n| unique_str(&format!("{prefix} {n}")))
        .collect()
}

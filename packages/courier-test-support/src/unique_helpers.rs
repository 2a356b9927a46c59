//! ULID-based generators so tests never collide on unique columns or
//! upload filenames.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use courier_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("pkg");
/// let b = unique_str("pkg");
/// assert_ne!(a, b);
/// assert!(a.starts_with("pkg-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A unique agent username that fits the 50-character column.
///
/// ```
/// use courier_test_support::unique_helpers::unique_username;
///
/// let name = unique_username("ana");
/// assert!(name.len() <= 50);
/// ```
pub fn unique_username(prefix: &str) -> String {
    let prefix: String = prefix.chars().take(20).collect();
    format!("{}_{}", prefix, Ulid::new().to_string().to_lowercase())
}

/// A unique upload filename keeping the given extension.
///
/// ```
/// use courier_test_support::unique_helpers::unique_filename;
///
/// let name = unique_filename("jpg");
/// assert!(name.ends_with(".jpg"));
/// ```
pub fn unique_filename(extension: &str) -> String {
    format!("photo-{}.{}", Ulid::new().to_string().to_lowercase(), extension)
}

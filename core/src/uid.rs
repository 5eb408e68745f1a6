//! Creation and validation of DICOM unique identifiers (UIDs).
//!
//! New identifiers are derived from a random UUID
//! under the `2.25` root, as described in PS3.5 B.2.

use uuid::Uuid;

/// The maximum length of a UID, in characters.
pub const MAX_UID_LENGTH: usize = 64;

/// Create a new globally unique identifier
/// of the form `2.25.<decimal value of a random UUID>`.
///
/// ```
/// # use dicomize_core::uid::{generate_uid, is_valid_uid};
/// let uid = generate_uid();
/// assert!(uid.starts_with("2.25."));
/// assert!(is_valid_uid(&uid));
/// ```
pub fn generate_uid() -> String {
    format!("2.25.{}", Uuid::new_v4().as_u128())
}

/// Check whether the given string is a syntactically valid UID:
/// at most 64 characters,
/// made of dot separated numeric components
/// with no leading zeros in multi-digit components.
///
/// Trailing null padding is ignored.
pub fn is_valid_uid(uid: &str) -> bool {
    let uid = uid.trim_end_matches('\0');
    if uid.is_empty() || uid.len() > MAX_UID_LENGTH {
        return false;
    }
    uid.split('.').all(|component| {
        !component.is_empty()
            && component.bytes().all(|b| b.is_ascii_digit())
            && (component.len() == 1 || !component.starts_with('0'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_uids_are_valid_and_distinct() {
        let a = generate_uid();
        let b = generate_uid();
        assert_ne!(a, b);
        assert!(is_valid_uid(&a), "{} should be valid", a);
        assert!(a.len() <= MAX_UID_LENGTH);
    }

    #[test]
    fn uid_validation() {
        assert!(is_valid_uid("1.2.840.10008.1.2.1"));
        assert!(is_valid_uid("1.2.840.10008.1.2.4.50\0"));
        assert!(is_valid_uid("2.25.0"));
        assert!(!is_valid_uid(""));
        assert!(!is_valid_uid("1.2..3"));
        assert!(!is_valid_uid("1.02.3"));
        assert!(!is_valid_uid("1.2.3."));
        assert!(!is_valid_uid("1.2.a"));
        assert!(!is_valid_uid(&format!("1.{}", "2".repeat(64))));
    }
}

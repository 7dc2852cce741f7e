//! Input validation for names that end up in filesystem paths.

use crate::constants::{MAX_CATEGORY_NAME_LEN, MAX_PROJECT_NAME_LEN};

fn is_safe_name(name: &str, max_len: usize) -> bool {
    !name.is_empty()
        && name.len() <= max_len
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Project names become path segments; restrict to `[A-Za-z0-9_-]`.
pub fn is_valid_project_name(name: &str) -> bool {
    is_safe_name(name, MAX_PROJECT_NAME_LEN)
}

/// Category names from intent capture groups, same character set.
pub fn is_valid_category(name: &str) -> bool {
    is_safe_name(name, MAX_CATEGORY_NAME_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_path_traversal_shapes() {
        assert!(!is_valid_project_name("../etc"));
        assert!(!is_valid_project_name("a/b"));
        assert!(!is_valid_project_name(""));
        assert!(is_valid_project_name("client-notes_2"));
    }

    #[test]
    fn enforces_length_caps() {
        assert!(!is_valid_project_name(&"x".repeat(101)));
        assert!(is_valid_project_name(&"x".repeat(100)));
        assert!(!is_valid_category(&"x".repeat(51)));
    }
}

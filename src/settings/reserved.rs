//! Reserved setting keys
//!
//! A setting key may never collide with the name of a container operation,
//! and keys starting with `_` are private. Neither layer ever stores one.

/// Container operation names that can't be used as setting keys.
const RESERVED_KEYS: &[&str] = &[
    "clear",
    "clone",
    "contains",
    "copy",
    "delete",
    "extend",
    "from_parts",
    "get",
    "get_or",
    "into_iter",
    "is_empty",
    "items",
    "iter_items",
    "iter_keys",
    "iter_values",
    "keys",
    "len",
    "new",
    "origin",
    "pop",
    "pop_item",
    "profile",
    "set",
    "set_default",
    "snapshot",
    "to_value",
    "update",
    "values",
];

/// Returns true if `key` is reserved and must stay out of the visible key set
pub fn is_reserved_key(key: &str) -> bool {
    key.starts_with('_') || RESERVED_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names_reserved() {
        assert!(is_reserved_key("keys"));
        assert!(is_reserved_key("pop_item"));
        assert!(is_reserved_key("update"));
        assert!(is_reserved_key("profile"));
        assert!(is_reserved_key("to_value"));
    }

    #[test]
    fn test_private_prefix_reserved() {
        assert!(is_reserved_key("_internal"));
        assert!(is_reserved_key("__class__"));
    }

    #[test]
    fn test_ordinary_keys_allowed() {
        assert!(!is_reserved_key("test_value_1"));
        assert!(!is_reserved_key("keys_per_page"));
        assert!(!is_reserved_key("DEBUG"));
        assert!(!is_reserved_key(""));
    }
}

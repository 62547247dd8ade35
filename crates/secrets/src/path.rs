//! Slash-delimited secret path helpers
//!
//! Secret paths form a folder-like hierarchy (`infra/db/password`). These
//! helpers implement prefix normalization and the immediate-child relation
//! used for listing and grouping. All of them are pure string operations.

/// Normalize a collection prefix by stripping trailing separators.
///
/// `infra/db/` and `infra/db` name the same collection.
#[must_use]
pub fn normalize_prefix(prefix: &str) -> &str {
    prefix.trim_end_matches('/')
}

/// The child name of `path` relative to `prefix`, if `path` is an immediate
/// child of it.
///
/// Returns `None` when `path` equals the prefix, lies outside it, or is
/// nested more than one level below it.
///
/// ```
/// use passbridge_secrets::path::child_key;
///
/// assert_eq!(child_key("infra/db/password", "infra/db/"), Some("password"));
/// assert_eq!(child_key("infra/db/nested/x", "infra/db"), None);
/// assert_eq!(child_key("infra/db", "infra/db"), None);
/// ```
#[must_use]
pub fn child_key<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(normalize_prefix(prefix))?;
    let rest = rest.strip_prefix('/')?;
    if rest.is_empty() || rest.contains('/') {
        return None;
    }
    Some(rest)
}

/// Filter `paths` down to the immediate children of `prefix`, preserving
/// order. The returned entries are full paths, not relative names.
#[must_use]
pub fn immediate_children<'a, I>(paths: I, prefix: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    paths
        .into_iter()
        .filter(|path| child_key(path, prefix).is_some())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_trailing_separators() {
        assert_eq!(normalize_prefix("infra/db/"), "infra/db");
        assert_eq!(normalize_prefix("infra/db///"), "infra/db");
        assert_eq!(normalize_prefix("infra/db"), "infra/db");
        assert_eq!(normalize_prefix(""), "");
    }

    #[test]
    fn child_key_for_direct_child() {
        assert_eq!(child_key("infra/db/user", "infra/db"), Some("user"));
        assert_eq!(child_key("infra/db/user", "infra/db/"), Some("user"));
    }

    #[test]
    fn child_key_rejects_nested_paths() {
        assert_eq!(child_key("infra/db/nested/x", "infra/db"), None);
    }

    #[test]
    fn child_key_rejects_the_prefix_itself() {
        assert_eq!(child_key("infra/db", "infra/db"), None);
        assert_eq!(child_key("infra/db", "infra/db/"), None);
    }

    #[test]
    fn child_key_rejects_sibling_name_extension() {
        // "infra/database" is not under "infra/db"
        assert_eq!(child_key("infra/database", "infra/db"), None);
    }

    #[test]
    fn child_key_rejects_unrelated_paths() {
        assert_eq!(child_key("web/api/token", "infra/db"), None);
    }

    #[test]
    fn empty_prefix_has_no_children() {
        assert_eq!(child_key("alpha", ""), None);
        assert_eq!(child_key("alpha/beta", ""), None);
    }

    #[test]
    fn immediate_children_filters_and_keeps_full_paths() {
        let paths = [
            "infra/db/password",
            "infra/db/user",
            "infra/db/nested/x",
            "infra/database/password",
            "web/api/token",
        ];
        let children = immediate_children(paths, "infra/db");
        assert_eq!(children, vec!["infra/db/password", "infra/db/user"]);
    }

    #[test]
    fn immediate_children_equal_for_trailing_separator() {
        let paths = ["a/b/c", "a/b/d", "a/b/c/d"];
        assert_eq!(
            immediate_children(paths, "a/b"),
            immediate_children(paths, "a/b/")
        );
    }
}

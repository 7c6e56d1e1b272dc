//! Permission Path Group
//!
//! A semicolon-delimited set of request paths one permission grants.
//! Membership is exact string equality: no prefixes, no globs.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGroup {
    raw: String,
    paths: HashSet<String>,
}

impl PermissionGroup {
    /// Parse `"/orders;/reports"`. Blank segments are dropped.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let paths = raw
            .split(';')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        Self { raw, paths }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_membership() {
        let group = PermissionGroup::parse("/orders;/reports");
        assert!(group.contains("/orders"));
        assert!(group.contains("/reports"));
        assert!(!group.contains("/orders/1"));
        assert!(!group.contains("/order"));
        assert!(!group.contains("/billing"));
    }

    #[test]
    fn test_blank_segments_dropped() {
        let group = PermissionGroup::parse(" /a ;; ;/b;");
        assert_eq!(group.len(), 2);
        assert!(group.contains("/a"));
        assert!(!group.contains(""));
    }

    #[test]
    fn test_empty_group() {
        assert!(PermissionGroup::parse("").is_empty());
    }
}

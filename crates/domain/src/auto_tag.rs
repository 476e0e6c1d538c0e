//! The `[auto:<group>] <origin>` comment convention.
//!
//! Router routes carry no owner field; ownership is recovered from the
//! comment. Anything that does not parse is treated as untracked.

const PREFIX: &str = "[auto:";

pub const DIRECT_IP: &str = "Direct IP";
pub const DIRECT_RANGE: &str = "Direct Range";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoTag<'a> {
    pub group: &'a str,
    pub origin: &'a str,
}

impl<'a> AutoTag<'a> {
    pub fn parse(comment: &'a str) -> Option<Self> {
        let rest = comment.trim_start().strip_prefix(PREFIX)?;
        let end = rest.find(']')?;
        let group = &rest[..end];
        if group.is_empty() {
            return None;
        }
        let origin = rest[end + 1..].trim();
        Some(Self { group, origin })
    }
}

pub fn format_comment(group: &str, origin: &str) -> String {
    format!("{}{}] {}", PREFIX, group, origin)
}

/// Group owning a comment, if it carries a valid auto-tag.
pub fn group_of(comment: &str) -> Option<&str> {
    AutoTag::parse(comment).map(|tag| tag.group)
}

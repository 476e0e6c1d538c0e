use crate::errors::DomainError;
use crate::netmask;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::sync::Arc;

/// A named set of monitored domains routed out of the same interfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainGroup {
    pub id: Option<i64>,
    pub name: Arc<str>,
    /// Prefix (`24`) or dotted mask; `None` falls back to the global default.
    pub mask: Option<Arc<str>>,
    /// Comma-joined, ordered interface ids; `None` falls back to the default.
    pub interfaces: Option<Arc<str>>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl DomainGroup {
    pub fn new(
        id: Option<i64>,
        name: Arc<str>,
        mask: Option<Arc<str>>,
        interfaces: Option<Arc<str>>,
    ) -> Self {
        Self {
            id,
            name,
            mask,
            interfaces,
            created_at: None,
            updated_at: None,
        }
    }

    /// Ordered, de-duplicated egress interfaces.
    pub fn interface_list(&self, default_interface: &str) -> Vec<String> {
        let mut list: Vec<String> = Vec::new();
        if let Some(raw) = &self.interfaces {
            for iface in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                if !list.iter().any(|existing| existing == iface) {
                    list.push(iface.to_string());
                }
            }
        }
        if list.is_empty() && !default_interface.is_empty() {
            list.push(default_interface.to_string());
        }
        list
    }

    pub fn effective_mask(&self, default_mask: &str) -> Result<Ipv4Addr, DomainError> {
        match self.mask.as_deref().map(str::trim) {
            Some(mask) if !mask.is_empty() => netmask::parse_mask(mask),
            _ => netmask::parse_mask(default_mask),
        }
    }

    pub fn validate_name(name: &str) -> Result<(), String> {
        if name.trim().is_empty() {
            return Err("Group name cannot be empty".to_string());
        }
        if name.len() > 100 {
            return Err("Group name cannot exceed 100 characters".to_string());
        }
        if name.contains(']') || name.contains('[') {
            return Err("Group name cannot contain square brackets".to_string());
        }
        Ok(())
    }
}

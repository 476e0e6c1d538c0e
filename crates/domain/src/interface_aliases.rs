use std::collections::HashMap;

/// Interface as reported by the router: stable id plus human description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterInterface {
    pub id: String,
    pub description: Option<String>,
}

/// Treats an interface id and its description as synonyms.
///
/// The router may echo either form, so both sides of a comparison are
/// mapped onto the id before checking equality.
#[derive(Debug, Clone, Default)]
pub struct InterfaceAliases {
    to_id: HashMap<String, String>,
}

impl InterfaceAliases {
    pub fn new(interfaces: &[RouterInterface]) -> Self {
        let mut to_id = HashMap::with_capacity(interfaces.len() * 2);
        for iface in interfaces {
            if let Some(description) = iface.description.as_deref().filter(|d| !d.is_empty()) {
                to_id
                    .entry(description.to_string())
                    .or_insert_with(|| iface.id.clone());
            }
            to_id.insert(iface.id.clone(), iface.id.clone());
        }
        Self { to_id }
    }

    pub fn canonical(&self, name: &str) -> String {
        self.to_id
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }
}

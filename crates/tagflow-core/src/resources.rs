// crates/tagflow-core/src/resources.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::{Result, TagflowError};

/// Identifier of a string resource. Zero is reserved for "no resource".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ResourceId(pub u32);

impl ResourceId {
    pub const NONE: ResourceId = ResourceId(0);

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StringResources {
    pub entries: HashMap<ResourceId, String>,
}

impl StringResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ResourceId, text: impl Into<String>) {
        self.entries.insert(id, text.into());
    }

    pub fn get(&self, id: ResourceId) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    pub fn resolve(&self, id: ResourceId) -> Result<&str> {
        self.get(id).ok_or(TagflowError::ResourceNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_reports_missing_ids() {
        let mut resources = StringResources::new();
        resources.insert(ResourceId(7), "Tap to add tags");

        assert_eq!(resources.resolve(ResourceId(7)).unwrap(), "Tap to add tags");
        assert!(matches!(
            resources.resolve(ResourceId(8)),
            Err(TagflowError::ResourceNotFound(ResourceId(8)))
        ));
    }
}

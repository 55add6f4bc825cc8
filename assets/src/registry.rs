use std::collections::HashMap;

use crate::AssetUrl;

/// Identifier of an asset within an [`AssetRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(pub u32);

/// Kind of resource an asset holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Shader,
    Text,
}

impl AssetKind {
    /// Name used in log and error messages.
    pub fn name(self) -> &'static str {
        match self {
            AssetKind::Shader => "shader",
            AssetKind::Text => "text",
        }
    }
}

/// A registered asset and, once opened, its resource.
#[derive(Debug, Clone)]
pub struct Asset {
    id: AssetId,
    name: String,
    kind: AssetKind,
    url: AssetUrl,
    /// Opened resource, `None` until loaded.
    pub resource: Option<String>,
}

impl Asset {
    pub fn id(&self) -> AssetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    pub fn url(&self) -> &AssetUrl {
        &self.url
    }

    pub fn is_loaded(&self) -> bool {
        self.resource.is_some()
    }
}

/// Assets known to the application, by id.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    assets: HashMap<AssetId, Asset>,
    next_id: u32,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset and return its id.
    pub fn add(&mut self, name: impl Into<String>, kind: AssetKind, url: impl Into<AssetUrl>) -> AssetId {
        let id = AssetId(self.next_id);
        self.next_id += 1;
        let asset = Asset {
            id,
            name: name.into(),
            kind,
            url: url.into(),
            resource: None,
        };
        log::trace!("AssetRegistry: added {} asset '{}' as {:?}", kind.name(), asset.name, id);
        self.assets.insert(id, asset);
        id
    }

    pub fn get(&self, id: AssetId) -> Option<&Asset> {
        self.assets.get(&id)
    }

    pub fn get_mut(&mut self, id: AssetId) -> Option<&mut Asset> {
        self.assets.get_mut(&id)
    }

    /// First asset registered under `name`.
    pub fn find(&self, name: &str) -> Option<&Asset> {
        self.assets
            .values()
            .filter(|a| a.name == name)
            .min_by_key(|a| a.id)
    }

    pub fn remove(&mut self, id: AssetId) -> Option<Asset> {
        self.assets.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_find() {
        let mut registry = AssetRegistry::new();
        let a = registry.add("lit", AssetKind::Shader, "shaders/lit.vert");
        let b = registry.add("lit", AssetKind::Text, "notes/lit.txt");
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find("lit").unwrap().id(), a);
        assert!(registry.find("missing").is_none());
        assert!(!registry.get(b).unwrap().is_loaded());
    }

    #[test]
    fn remove() {
        let mut registry = AssetRegistry::new();
        let id = registry.add("readme", AssetKind::Text, "README.txt");
        assert_eq!(registry.remove(id).unwrap().url().load, "README.txt");
        assert!(registry.is_empty());
    }
}

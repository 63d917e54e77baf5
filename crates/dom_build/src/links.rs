use dom::NodeKey;
use std::collections::HashMap;
use std::collections::hash_map;
use std::ops::Index;

/// Flat registry of named nodes collected during one top-level build.
///
/// Inserting an existing name replaces the earlier node (last write wins).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Links {
    map: HashMap<String, NodeKey>,
}

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<NodeKey> {
        self.map.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeKey)> {
        self.map.iter().map(|(name, key)| (name.as_str(), *key))
    }

    /// Names in sorted order, for deterministic output.
    pub fn sorted(&self) -> Vec<(&str, NodeKey)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Register `node` under `name`, returning the node it replaced.
    pub fn insert(&mut self, name: impl Into<String>, node: NodeKey) -> Option<NodeKey> {
        let name = name.into();
        let previous = self.map.insert(name.clone(), node);
        if let Some(previous) = previous.filter(|previous| *previous != node) {
            log::debug!(
                target: "dom_build.links",
                "link {name:?} reassigned from {previous} to {node}"
            );
        }
        previous
    }

    /// Copy every entry of `other` into `self`, overwriting shared names.
    pub fn merge(&mut self, other: Links) {
        for (name, node) in other.map {
            self.insert(name, node);
        }
    }
}

impl Index<&str> for Links {
    type Output = NodeKey;

    fn index(&self, name: &str) -> &NodeKey {
        match self.map.get(name) {
            Some(key) => key,
            None => panic!("no link named {name:?}"),
        }
    }
}

impl IntoIterator for Links {
    type Item = (String, NodeKey);
    type IntoIter = hash_map::IntoIter<String, NodeKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl<S: Into<String>> FromIterator<(S, NodeKey)> for Links {
    fn from_iter<I: IntoIterator<Item = (S, NodeKey)>>(iter: I) -> Self {
        let mut links = Links::new();
        for (name, node) in iter {
            links.insert(name, node);
        }
        links
    }
}

/// A built subtree root and every link registered inside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildResult {
    pub node: NodeKey,
    pub links: Links,
}

impl BuildResult {
    pub fn link(&self, name: &str) -> Option<NodeKey> {
        self.links.get(name)
    }

    pub fn into_parts(self) -> (NodeKey, Links) {
        (self.node, self.links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_last_write_wins() {
        let mut links: Links = [("a", NodeKey(1)), ("b", NodeKey(2))].into_iter().collect();
        links.merge([("b", NodeKey(3)), ("c", NodeKey(4))].into_iter().collect());

        assert_eq!(
            links.sorted(),
            [("a", NodeKey(1)), ("b", NodeKey(3)), ("c", NodeKey(4))]
        );
    }

    #[test]
    fn insert_returns_replaced_node() {
        let mut links = Links::new();
        assert_eq!(links.insert("x", NodeKey(1)), None);
        assert_eq!(links.insert("x", NodeKey(2)), Some(NodeKey(1)));
        assert_eq!(links["x"], NodeKey(2));
    }

    #[test]
    #[should_panic(expected = "no link named")]
    fn index_panics_on_missing_name() {
        let links = Links::new();
        let _key: NodeKey = links["missing"];
    }
}

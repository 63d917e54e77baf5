//! Single-writer in-memory node graph.
//!
//! Invariants:
//! - Keys are issued once and stay resolvable for the lifetime of the document;
//!   detaching a node never frees it.
//! - A node has at most one parent. Appending a node that already has a parent
//!   moves it (re-parenting), it is never copied.
//! - Appending a fragment moves its children, in order, and leaves it empty.
//! - Only elements and fragments own children; the graph never contains cycles.
//! - Property names keep their first insertion position; re-assignment overwrites
//!   the value in place.

use crate::config::DocumentConfig;
use crate::error::DomError;
use crate::tags::validate_tag_name;
use crate::types::{NodeKey, NodeKind, PropValue};
use std::sync::Arc;

#[derive(Debug)]
struct NodeRecord {
    kind: NodeKind,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
    props: Vec<(Arc<str>, PropValue)>,
}

impl NodeRecord {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            props: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Document {
    config: DocumentConfig,
    nodes: Vec<NodeRecord>,
}

impl Document {
    pub fn new() -> Self {
        Self::with_config(DocumentConfig::default())
    }

    pub fn with_config(config: DocumentConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
        }
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// Number of nodes ever created in this document, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn create_element(&mut self, name: &str) -> Result<NodeKey, DomError> {
        let name = validate_tag_name(name, &self.config)?;
        let name: Arc<str> = Arc::from(&*name);
        let key = self.push(NodeKind::Element { name });
        log::trace!(target: "dom.graph", "create element {key}");
        Ok(key)
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeKey {
        self.push(NodeKind::Text { text: text.into() })
    }

    pub fn create_fragment(&mut self) -> NodeKey {
        self.push(NodeKind::Fragment)
    }

    fn push(&mut self, kind: NodeKind) -> NodeKey {
        let key = NodeKey::from_index(self.nodes.len());
        self.nodes.push(NodeRecord::new(kind));
        key
    }

    fn record(&self, key: NodeKey) -> Result<&NodeRecord, DomError> {
        key.index()
            .and_then(|index| self.nodes.get(index))
            .ok_or(DomError::UnknownNode(key))
    }

    fn record_mut(&mut self, key: NodeKey) -> Result<&mut NodeRecord, DomError> {
        key.index()
            .and_then(|index| self.nodes.get_mut(index))
            .ok_or(DomError::UnknownNode(key))
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.record(key).is_ok()
    }

    pub fn kind(&self, key: NodeKey) -> Option<&NodeKind> {
        self.record(key).ok().map(|record| &record.kind)
    }

    pub fn is_element(&self, key: NodeKey) -> bool {
        matches!(self.kind(key), Some(NodeKind::Element { .. }))
    }

    pub fn is_fragment(&self, key: NodeKey) -> bool {
        matches!(self.kind(key), Some(NodeKind::Fragment))
    }

    pub fn tag_name(&self, key: NodeKey) -> Option<&str> {
        match self.kind(key)? {
            NodeKind::Element { name } => Some(name),
            _ => None,
        }
    }

    pub fn text(&self, key: NodeKey) -> Option<&str> {
        match self.kind(key)? {
            NodeKind::Text { text } => Some(text),
            _ => None,
        }
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.record(key).ok().and_then(|record| record.parent)
    }

    /// Children of `key` in order; empty for leaves and unknown keys.
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.record(key)
            .map(|record| record.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn first_child(&self, key: NodeKey) -> Option<NodeKey> {
        self.children(key).first().copied()
    }

    pub fn last_child(&self, key: NodeKey) -> Option<NodeKey> {
        self.children(key).last().copied()
    }

    pub fn properties(&self, key: NodeKey) -> &[(Arc<str>, PropValue)] {
        self.record(key)
            .map(|record| record.props.as_slice())
            .unwrap_or(&[])
    }

    pub fn property(&self, key: NodeKey, name: &str) -> Option<&PropValue> {
        self.properties(key)
            .iter()
            .find(|(k, _)| &**k == name)
            .map(|(_, v)| v)
    }

    pub fn set_property(
        &mut self,
        key: NodeKey,
        name: &str,
        value: PropValue,
    ) -> Result<(), DomError> {
        let record = self.record_mut(key)?;
        if !record.kind.allows_children() {
            return Err(DomError::WrongNodeKind(key));
        }
        match record.props.iter_mut().find(|(k, _)| &**k == name) {
            Some((_, slot)) => *slot = value,
            None => record.props.push((Arc::from(name), value)),
        }
        Ok(())
    }

    /// True when `ancestor` is `node` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeKey, node: NodeKey) -> bool {
        let mut current = Some(node);
        while let Some(key) = current {
            if key == ancestor {
                return true;
            }
            current = self.parent(key);
        }
        false
    }

    /// Append `child` as the last child of `parent` and return `child`.
    ///
    /// A child that already has a parent is moved. A fragment child donates its
    /// children instead of being attached itself.
    pub fn append_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<NodeKey, DomError> {
        if !self.record(parent)?.kind.allows_children() {
            return Err(DomError::InvalidParent(parent));
        }
        let child_is_fragment = matches!(self.record(child)?.kind, NodeKind::Fragment);
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::CycleDetected { parent, child });
        }

        if child_is_fragment {
            let moved = std::mem::take(&mut self.record_mut(child)?.children);
            log::trace!(
                target: "dom.graph",
                "splice fragment {child} ({} nodes) into {parent}",
                moved.len()
            );
            for &key in &moved {
                self.record_mut(key)?.parent = Some(parent);
            }
            self.record_mut(parent)?.children.extend(moved);
            return Ok(child);
        }

        if let Some(old_parent) = self.parent(child) {
            self.unlink(old_parent, child)?;
        }
        self.record_mut(parent)?.children.push(child);
        self.record_mut(child)?.parent = Some(parent);
        log::trace!(target: "dom.graph", "append {child} to {parent}");
        Ok(child)
    }

    /// Detach `child` from `parent` and return it.
    pub fn remove_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<NodeKey, DomError> {
        self.record(child)?;
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.unlink(parent, child)?;
        log::trace!(target: "dom.graph", "remove {child} from {parent}");
        Ok(child)
    }

    fn unlink(&mut self, parent: NodeKey, child: NodeKey) -> Result<(), DomError> {
        let siblings = &mut self.record_mut(parent)?.children;
        let Some(pos) = siblings.iter().rposition(|k| *k == child) else {
            debug_assert!(false, "parent link without child entry");
            return Err(DomError::NotAChild { parent, child });
        };
        siblings.remove(pos);
        self.record_mut(child)?.parent = None;
        Ok(())
    }

    /// Concatenated text of every text node in the subtree, in tree order.
    pub fn text_content(&self, key: NodeKey) -> String {
        let mut out = String::new();
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            match self.kind(current) {
                Some(NodeKind::Text { text }) => out.push_str(text),
                Some(_) => stack.extend(self.children(current).iter().rev().copied()),
                None => {}
            }
        }
        out
    }
}

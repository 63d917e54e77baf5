//! Content items and their normalization into attachable nodes.
//!
//! Classification, first match wins:
//! - `Built`: the build's root node; its links merge into the caller's registry.
//! - `List`: each element normalized in order, links merged in encounter order.
//! - `Node`: passed through unchanged.
//! - scalars: one text node holding the string form.
//!
//! Normalization is lazy and single-pass: [`Normalized`] consumes the content
//! it was given and yields each resolved piece exactly once.

use crate::links::{BuildResult, Links};
use dom::{NodeKey, format_number};
use std::iter::FusedIterator;

#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Text(String),
    Number(f64),
    Node(NodeKey),
    Built(BuildResult),
    List(Vec<Content>),
}

impl Content {
    pub fn empty() -> Self {
        Content::List(Vec::new())
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<&String> for Content {
    fn from(text: &String) -> Self {
        Content::Text(text.clone())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<char> for Content {
    fn from(ch: char) -> Self {
        Content::Text(ch.to_string())
    }
}

impl From<f64> for Content {
    fn from(value: f64) -> Self {
        Content::Number(value)
    }
}

macro_rules! content_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Content {
                fn from(value: $ty) -> Self {
                    Content::Number(value as f64)
                }
            }
        )*
    };
}

content_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32);

impl From<NodeKey> for Content {
    fn from(key: NodeKey) -> Self {
        Content::Node(key)
    }
}

impl From<BuildResult> for Content {
    fn from(result: BuildResult) -> Self {
        Content::Built(result)
    }
}

impl<T: Into<Content>> From<Vec<T>> for Content {
    fn from(items: Vec<T>) -> Self {
        Content::List(items.into_iter().map(Into::into).collect())
    }
}

/// `None` resolves to no nodes at all.
impl<T: Into<Content>> From<Option<T>> for Content {
    fn from(item: Option<T>) -> Self {
        item.map_or_else(Content::empty, Into::into)
    }
}

/// One node-to-be produced by normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved {
    /// An existing node, attached as-is.
    Node(NodeKey),
    /// A scalar's string form; the attacher creates the text node.
    Text(String),
}

/// Start normalizing `item`. Links carried by nested builds are merged into
/// `links` as they are reached; with `None` they are dropped.
pub fn normalize(item: Content, links: Option<&mut Links>) -> Normalized<'_> {
    Normalized {
        stack: vec![vec![item].into_iter()],
        links,
    }
}

#[derive(Debug)]
pub struct Normalized<'l> {
    stack: Vec<std::vec::IntoIter<Content>>,
    links: Option<&'l mut Links>,
}

impl Iterator for Normalized<'_> {
    type Item = Resolved;

    fn next(&mut self) -> Option<Resolved> {
        loop {
            let top = self.stack.last_mut()?;
            let Some(item) = top.next() else {
                self.stack.pop();
                continue;
            };
            match item {
                Content::Built(BuildResult { node, links }) => {
                    match self.links.as_deref_mut() {
                        Some(registry) => registry.merge(links),
                        None if !links.is_empty() => {
                            log::trace!(
                                target: "dom_build.content",
                                "dropping {} links of {node}",
                                links.len()
                            );
                        }
                        None => {}
                    }
                    return Some(Resolved::Node(node));
                }
                Content::List(items) => self.stack.push(items.into_iter()),
                Content::Node(key) => return Some(Resolved::Node(key)),
                Content::Text(text) => return Some(Resolved::Text(text)),
                Content::Number(value) => return Some(Resolved::Text(format_number(value))),
            }
        }
    }
}

impl FusedIterator for Normalized<'_> {}

/// Build a `Vec<Content>` from expressions of mixed content types.
///
/// ```
/// use dom_build::{Content, content};
/// let items = content!["total: ", 3, vec!["a", "b"]];
/// assert_eq!(items.len(), 3);
/// assert_eq!(items[1], Content::Number(3.0));
/// ```
#[macro_export]
macro_rules! content {
    () => {
        ::std::vec::Vec::<$crate::Content>::new()
    };
    ($($item:expr),+ $(,)?) => {
        ::std::vec![$($crate::Content::from($item)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built(node: u32, names: &[&str]) -> BuildResult {
        BuildResult {
            node: NodeKey(node),
            links: names.iter().map(|name| (*name, NodeKey(node))).collect(),
        }
    }

    #[test]
    fn scalars_become_text() {
        let pieces: Vec<_> = normalize(Content::from(2.5), None)
            .chain(normalize(Content::from(7u8), None))
            .chain(normalize(Content::from("x"), None))
            .collect();
        assert_eq!(
            pieces,
            [
                Resolved::Text("2.5".into()),
                Resolved::Text("7".into()),
                Resolved::Text("x".into())
            ]
        );
    }

    #[test]
    fn nested_lists_flatten_in_order() {
        let item = Content::from(content![
            "a",
            content![NodeKey(4), content!["b", Content::empty()]],
            NodeKey(5),
        ]);
        let pieces: Vec<_> = normalize(item, None).collect();
        assert_eq!(
            pieces,
            [
                Resolved::Text("a".into()),
                Resolved::Node(NodeKey(4)),
                Resolved::Text("b".into()),
                Resolved::Node(NodeKey(5)),
            ]
        );
    }

    #[test]
    fn built_items_merge_links_in_encounter_order() {
        let mut links = Links::new();
        let item = Content::from(content![built(1, &["x", "first"]), built(2, &["x"])]);
        let pieces: Vec<_> = normalize(item, Some(&mut links)).collect();

        assert_eq!(pieces, [Resolved::Node(NodeKey(1)), Resolved::Node(NodeKey(2))]);
        assert_eq!(links.get("x"), Some(NodeKey(2)));
        assert_eq!(links.get("first"), Some(NodeKey(1)));
    }

    #[test]
    fn links_merge_lazily() {
        let mut links = Links::new();
        let item = Content::from(content![built(1, &["a"]), built(2, &["b"])]);
        let mut pieces = normalize(item, Some(&mut links));
        assert_eq!(pieces.next(), Some(Resolved::Node(NodeKey(1))));
        drop(pieces);
        assert!(links.contains("a"));
        assert!(!links.contains("b"));
    }

    #[test]
    fn none_resolves_to_nothing() {
        let item = Content::from(Option::<&str>::None);
        assert_eq!(normalize(item, None).count(), 0);
        let item = Content::from(Some("shown"));
        assert_eq!(normalize(item, None).count(), 1);
    }
}

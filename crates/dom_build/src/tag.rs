use crate::error::BuildError;
use dom::{Document, DomError, NodeKey, NodeKind, validate_tag_name};
use std::borrow::Cow;

/// What to create at the root of a build.
#[derive(Clone, Debug)]
pub enum Tag<'a> {
    /// Element name, validated against the document's [`dom::DocumentConfig`].
    Name(Cow<'a, str>),
    /// Zero-argument constructor returning a fresh parentless element or fragment.
    Factory(fn(&mut Document) -> NodeKey),
}

impl Tag<'static> {
    pub const FRAGMENT: Tag<'static> = Tag::Factory(Document::create_fragment);
}

impl Tag<'_> {
    fn label(&self) -> String {
        match self {
            Tag::Name(name) => name.to_string(),
            Tag::Factory(_) => "<factory>".to_string(),
        }
    }
}

impl<'a> From<&'a str> for Tag<'a> {
    fn from(name: &'a str) -> Self {
        Tag::Name(Cow::Borrowed(name))
    }
}

impl From<String> for Tag<'static> {
    fn from(name: String) -> Self {
        Tag::Name(Cow::Owned(name))
    }
}

impl From<fn(&mut Document) -> NodeKey> for Tag<'static> {
    fn from(factory: fn(&mut Document) -> NodeKey) -> Self {
        Tag::Factory(factory)
    }
}

/// Check a tag name without touching the graph. Factories are checked after
/// they run, in [`create_node`].
pub(crate) fn precheck(doc: &Document, tag: &Tag<'_>) -> Result<(), BuildError> {
    match tag {
        Tag::Name(name) => validate_tag_name(name, doc.config())
            .map(|_| ())
            .map_err(|_| BuildError::InvalidTag(name.to_string())),
        Tag::Factory(_) => Ok(()),
    }
}

pub(crate) fn create_node(doc: &mut Document, tag: &Tag<'_>) -> Result<NodeKey, BuildError> {
    match tag {
        Tag::Name(name) => doc.create_element(name).map_err(|err| match err {
            DomError::InvalidTagName(_) => BuildError::InvalidTag(name.to_string()),
            other => BuildError::Graph(other),
        }),
        Tag::Factory(factory) => {
            let key = factory(doc);
            let usable = matches!(
                doc.kind(key),
                Some(NodeKind::Element { .. } | NodeKind::Fragment)
            ) && doc.parent(key).is_none();
            if !usable {
                return Err(BuildError::InvalidTag(tag.label()));
            }
            Ok(key)
        }
    }
}

use dom::{DomError, NodeKey};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// Empty or unrecognized tag name, or a constructor that returned an unusable node.
    InvalidTag(String),
    /// Empty property name in an attribute map.
    InvalidAttributeName(String),
    /// `add` target is not an element.
    InvalidTarget(NodeKey),
    /// The node graph refused an attach (unknown key, cycle, leaf parent).
    Graph(DomError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::InvalidTag(tag) => write!(f, "invalid tag {tag:?}"),
            BuildError::InvalidAttributeName(name) => {
                write!(f, "invalid attribute name {name:?}")
            }
            BuildError::InvalidTarget(key) => write!(f, "node {key} is not an element"),
            BuildError::Graph(err) => write!(f, "node graph error: {err}"),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Graph(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DomError> for BuildError {
    fn from(err: DomError) -> Self {
        BuildError::Graph(err)
    }
}

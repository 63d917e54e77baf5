use crate::types::NodeKey;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomError {
    UnknownNode(NodeKey),
    InvalidParent(NodeKey),
    CycleDetected { parent: NodeKey, child: NodeKey },
    WrongNodeKind(NodeKey),
    NotAChild { parent: NodeKey, child: NodeKey },
    InvalidTagName(String),
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::UnknownNode(key) => write!(f, "unknown node {key}"),
            DomError::InvalidParent(key) => write!(f, "node {key} cannot have children"),
            DomError::CycleDetected { parent, child } => {
                write!(f, "appending {child} to {parent} would create a cycle")
            }
            DomError::WrongNodeKind(key) => write!(f, "operation not supported on node {key}"),
            DomError::NotAChild { parent, child } => {
                write!(f, "node {child} is not a child of {parent}")
            }
            DomError::InvalidTagName(name) => write!(f, "invalid tag name {name:?}"),
        }
    }
}

impl std::error::Error for DomError {}

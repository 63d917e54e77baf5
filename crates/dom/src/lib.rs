pub mod serialize;
pub mod snapshot;
pub mod tags;

mod config;
mod document;
mod error;
mod types;

pub use crate::config::DocumentConfig;
pub use crate::document::Document;
pub use crate::error::DomError;
pub use crate::serialize::{inner_html, outer_html};
pub use crate::tags::validate_tag_name;
pub use crate::types::{NodeKey, NodeKind, PropValue, format_number};

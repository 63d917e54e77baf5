//! Element construction over a [`dom::Document`].
//!
//! [`tag`] builds one node from a tag, an optional attribute map and a list of
//! content items, and returns it with the registry of named nodes ("links")
//! collected from the whole new subtree. [`fragment`], [`add`], [`remove`] and
//! [`clear`] are the plain attach/detach primitives.
//!
//! ```
//! use dom::Document;
//! use dom_build::{attrs, content, tag};
//!
//! let mut doc = Document::new();
//! let title = tag(&mut doc, "h1", Some(attrs! { "link" => "title" }), content!["Inbox"])?;
//! let card = tag(&mut doc, "section", Some(attrs! { "className" => "card" }), content![title, 3])?;
//!
//! assert_eq!(doc.text_content(card.node), "Inbox3");
//! assert_eq!(doc.parent(card.links["title"]), Some(card.node));
//! # Ok::<(), dom_build::BuildError>(())
//! ```

mod attrs;
mod build;
mod content;
mod error;
mod links;
mod tag;

pub use crate::attrs::{Attributes, LINK_KEY};
pub use crate::build::{add, clear, element, fragment, remove, tag};
pub use crate::content::{Content, Normalized, Resolved, normalize};
pub use crate::error::BuildError;
pub use crate::links::{BuildResult, Links};
pub use crate::tag::Tag;

use std::fmt;
use std::io;

use dom::{Document, NodeKey, PropValue};
use dom_build::{Attributes, BuildError, BuildResult, Content, Tag, tag};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TreeSpec {
    Text(String),
    Number(f64),
    List(Vec<TreeSpec>),
    Element(ElementSpec),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementSpec {
    pub tag: String,
    #[serde(default)]
    pub attrs: serde_json::Map<String, Value>,
    #[serde(default)]
    pub children: Vec<TreeSpec>,
}

#[derive(Debug)]
pub enum TreeError {
    Io(io::Error),
    Json(serde_json::Error),
    Build(BuildError),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::Io(err) => write!(f, "failed to read tree: {err}"),
            TreeError::Json(err) => write!(f, "malformed tree: {err}"),
            TreeError::Build(err) => write!(f, "failed to build tree: {err}"),
        }
    }
}

impl std::error::Error for TreeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TreeError::Io(err) => Some(err),
            TreeError::Json(err) => Some(err),
            TreeError::Build(err) => Some(err),
        }
    }
}

impl From<io::Error> for TreeError {
    fn from(err: io::Error) -> Self {
        TreeError::Io(err)
    }
}

impl From<serde_json::Error> for TreeError {
    fn from(err: serde_json::Error) -> Self {
        TreeError::Json(err)
    }
}

impl From<BuildError> for TreeError {
    fn from(err: BuildError) -> Self {
        TreeError::Build(err)
    }
}

pub fn parse(input: &str) -> Result<TreeSpec, TreeError> {
    Ok(serde_json::from_str(input)?)
}

/// Build `spec`. An element spec becomes the root; anything else is wrapped
/// in a fragment.
pub fn build(doc: &mut Document, spec: TreeSpec) -> Result<BuildResult, TreeError> {
    match spec {
        TreeSpec::Element(element) => Ok(build_element(doc, element)?),
        other => {
            let content = to_content(doc, other)?;
            Ok(tag(doc, Tag::FRAGMENT, None, [content])?)
        }
    }
}

fn build_element(doc: &mut Document, spec: ElementSpec) -> Result<BuildResult, BuildError> {
    let attributes: Attributes = spec
        .attrs
        .into_iter()
        .map(|(name, value)| (name, prop_value(value)))
        .collect();
    let mut children = Vec::with_capacity(spec.children.len());
    for child in spec.children {
        children.push(to_content(doc, child)?);
    }
    tag(doc, spec.tag, Some(attributes), children)
}

fn to_content(doc: &mut Document, spec: TreeSpec) -> Result<Content, BuildError> {
    Ok(match spec {
        TreeSpec::Text(text) => Content::Text(text),
        TreeSpec::Number(value) => Content::Number(value),
        TreeSpec::List(items) => {
            let mut content = Vec::with_capacity(items.len());
            for item in items {
                content.push(to_content(doc, item)?);
            }
            Content::List(content)
        }
        TreeSpec::Element(element) => Content::Built(build_element(doc, element)?),
    })
}

fn prop_value(value: Value) -> PropValue {
    match value {
        Value::Null => PropValue::Null,
        Value::Bool(value) => PropValue::Bool(value),
        Value::Number(number) => number
            .as_f64()
            .map_or_else(|| PropValue::Text(number.to_string()), PropValue::Number),
        Value::String(text) => PropValue::Text(text),
        other => PropValue::Text(other.to_string()),
    }
}

/// Location of `key` below `root` as `tag[index] > ...`, or `None` when the
/// node is no longer inside `root`.
pub fn node_path(doc: &Document, root: NodeKey, key: NodeKey) -> Option<String> {
    let mut segments = Vec::new();
    let mut current = key;
    while current != root {
        let parent = doc.parent(current)?;
        let index = doc.children(parent).iter().position(|k| *k == current)?;
        segments.push(format!("{}[{index}]", label(doc, current)));
        current = parent;
    }
    segments.push(label(doc, root));
    segments.reverse();
    Some(segments.join(" > "))
}

fn label(doc: &Document, key: NodeKey) -> String {
    match doc.tag_name(key) {
        Some(name) => name.to_string(),
        None if doc.is_fragment(key) => "#fragment".to_string(),
        None => "#text".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::snapshot::assert_snapshot;

    const CARD: &str = r#"{
        "tag": "article",
        "attrs": {"className": "card", "link": "card", "hidden": false},
        "children": [
            {"tag": "h2", "attrs": {"link": "title"}, "children": ["Inbox ", 3]},
            ["plain", {"tag": "button", "attrs": {"link": "open", "disabled": null}}]
        ]
    }"#;

    #[test]
    fn builds_elements_with_links() {
        let mut doc = Document::new();
        let result = build(&mut doc, parse(CARD).unwrap()).unwrap();

        assert_snapshot(
            &doc,
            result.node,
            &[
                r#"<article className="card" hidden=false>"#,
                "  <h2>",
                r#"    "Inbox ""#,
                r#"    "3""#,
                r#"  "plain""#,
                "  <button>",
            ],
        );
        assert_eq!(result.links.len(), 3);
        assert_eq!(result.link("card"), Some(result.node));
        assert_eq!(result.link("disabled"), None);
        assert_eq!(
            node_path(&doc, result.node, result.links["open"]).as_deref(),
            Some("article > button[2]")
        );
    }

    #[test]
    fn non_element_roots_become_fragments() {
        let mut doc = Document::new();
        let result = build(&mut doc, parse(r#"["a", {"tag": "br"}]"#).unwrap()).unwrap();
        assert!(doc.is_fragment(result.node));
        assert_eq!(doc.children(result.node).len(), 2);
    }

    #[test]
    fn invalid_tags_surface_as_build_errors() {
        let mut doc = Document::new();
        let err = build(&mut doc, parse(r#"{"tag": "no good"}"#).unwrap()).unwrap_err();
        assert!(matches!(err, TreeError::Build(BuildError::InvalidTag(_))));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            parse(r#"{"tag": "div", "kids": []}"#),
            Err(TreeError::Json(_))
        ));
    }

    #[test]
    fn detached_links_have_no_path() {
        let mut doc = Document::new();
        let result = build(&mut doc, parse(CARD).unwrap()).unwrap();
        let title = result.links["title"];
        assert!(dom_build::remove(&mut doc, [title]));
        assert_eq!(node_path(&doc, result.node, title), None);
    }
}

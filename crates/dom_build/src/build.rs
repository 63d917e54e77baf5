use crate::attrs::Attributes;
use crate::content::{Content, Resolved, normalize};
use crate::error::BuildError;
use crate::links::{BuildResult, Links};
use crate::tag::{Tag, create_node, precheck};
use dom::{Document, DomError, NodeKey};

/// Create a node for `tag`, apply `attributes`, attach `content` in order and
/// return the node with every link registered in the new subtree.
///
/// The tag, all attribute names and every node passed as content are
/// validated before the graph is touched. The node's own link is registered before any content is traversed, so a
/// nested build reusing the name replaces it.
pub fn tag<'t>(
    doc: &mut Document,
    tag: impl Into<Tag<'t>>,
    attributes: Option<Attributes>,
    content: impl IntoIterator<Item = Content>,
) -> Result<BuildResult, BuildError> {
    let tag = tag.into();
    precheck(doc, &tag)?;
    if let Some(attributes) = &attributes {
        attributes.validate()?;
    }
    let content: Vec<Content> = content.into_iter().collect();
    check_content(doc, None, &content)?;

    let node = create_node(doc, &tag)?;
    let mut links = Links::new();
    if let Some(attributes) = attributes {
        if let Some(name) = attributes.apply(doc, node)? {
            links.insert(name, node);
        }
    }
    attach(doc, node, content, Some(&mut links))?;

    log::trace!(
        target: "dom_build.tag",
        "built {node} ({} children, {} links)",
        doc.children(node).len(),
        links.len()
    );
    Ok(BuildResult { node, links })
}

/// [`tag`] without the link registry: returns only the node.
pub fn element<'t>(
    doc: &mut Document,
    tag: impl Into<Tag<'t>>,
    attributes: Option<Attributes>,
    content: impl IntoIterator<Item = Content>,
) -> Result<NodeKey, BuildError> {
    self::tag(doc, tag, attributes, content).map(|result| result.node)
}

/// Create a parentless fragment holding `content`.
pub fn fragment(
    doc: &mut Document,
    content: impl IntoIterator<Item = Content>,
) -> Result<NodeKey, BuildError> {
    let content: Vec<Content> = content.into_iter().collect();
    check_content(doc, None, &content)?;
    let node = doc.create_fragment();
    attach(doc, node, content, None)?;
    Ok(node)
}

/// Append `content` to the existing element `target` and return `target`.
/// Links carried by nested builds are not collected.
pub fn add(
    doc: &mut Document,
    target: NodeKey,
    content: impl IntoIterator<Item = Content>,
) -> Result<NodeKey, BuildError> {
    if !doc.is_element(target) {
        return Err(BuildError::InvalidTarget(target));
    }
    let content: Vec<Content> = content.into_iter().collect();
    check_content(doc, Some(target), &content)?;
    attach(doc, target, content, None)?;
    Ok(target)
}

/// Detach every node in `nodes` from its parent.
///
/// Returns true only when at least one node was given and all of them were
/// attached and have been detached. Parentless or unknown nodes count as
/// failures but never raise.
pub fn remove(doc: &mut Document, nodes: impl IntoIterator<Item = NodeKey>) -> bool {
    let mut given = 0usize;
    let mut removed = 0usize;
    for node in nodes {
        given += 1;
        let Some(parent) = doc.parent(node) else {
            continue;
        };
        if doc.remove_child(parent, node).is_ok_and(|detached| detached == node) {
            removed += 1;
        }
    }
    given > 0 && removed == given
}

/// Detach all children of `node`, last child first.
pub fn clear(doc: &mut Document, node: NodeKey) {
    while let Some(last) = doc.last_child(node) {
        if doc.remove_child(node, last).is_err() {
            debug_assert!(false, "child list out of sync with parent links");
            break;
        }
    }
}

/// Reject unknown node keys, and nodes that contain `target`, before anything
/// is created or moved.
fn check_content(
    doc: &Document,
    target: Option<NodeKey>,
    content: &[Content],
) -> Result<(), BuildError> {
    let mut stack: Vec<&Content> = content.iter().rev().collect();
    while let Some(item) = stack.pop() {
        let key = match item {
            Content::Node(key) => *key,
            Content::Built(result) => result.node,
            Content::List(items) => {
                stack.extend(items.iter().rev());
                continue;
            }
            Content::Text(_) | Content::Number(_) => continue,
        };
        if !doc.contains(key) {
            return Err(DomError::UnknownNode(key).into());
        }
        if let Some(parent) = target {
            if doc.is_inclusive_ancestor(key, parent) {
                return Err(DomError::CycleDetected { parent, child: key }.into());
            }
        }
    }
    Ok(())
}

fn attach(
    doc: &mut Document,
    target: NodeKey,
    content: impl IntoIterator<Item = Content>,
    mut links: Option<&mut Links>,
) -> Result<(), BuildError> {
    for item in content {
        for piece in normalize(item, links.as_deref_mut()) {
            let child = match piece {
                Resolved::Node(key) => key,
                Resolved::Text(text) => doc.create_text(text),
            };
            doc.append_child(target, child)?;
        }
    }
    Ok(())
}

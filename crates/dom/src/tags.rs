use crate::config::DocumentConfig;
use crate::error::DomError;
use std::borrow::Cow;

/// HTML element names, sorted for binary search.
const KNOWN_TAGS: &[&str] = &[
    "a", "abbr", "address", "area", "article", "aside", "audio", "b", "base", "bdi", "bdo",
    "blockquote", "body", "br", "button", "canvas", "caption", "cite", "code", "col",
    "colgroup", "data", "datalist", "dd", "del", "details", "dfn", "dialog", "div", "dl", "dt",
    "em", "embed", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4",
    "h5", "h6", "head", "header", "hgroup", "hr", "html", "i", "iframe", "img", "input", "ins",
    "kbd", "label", "legend", "li", "link", "main", "map", "mark", "menu", "meta", "meter", "nav",
    "noscript", "object", "ol", "optgroup", "option", "output", "p", "picture", "pre",
    "progress", "q", "rp", "rt", "ruby", "s", "samp", "script", "search", "section", "select",
    "slot", "small", "source", "span", "strong", "style", "sub", "summary", "sup", "table",
    "tbody", "td", "template", "textarea", "tfoot", "th", "thead", "time", "title", "tr",
    "track", "u", "ul", "var", "video", "wbr",
];

pub fn is_known_tag(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    KNOWN_TAGS.binary_search(&lower.as_str()).is_ok()
}

/// Validate an element name and return it in the form the document stores.
pub fn validate_tag_name<'a>(
    name: &'a str,
    config: &DocumentConfig,
) -> Result<Cow<'a, str>, DomError> {
    let invalid = || DomError::InvalidTagName(name.to_string());
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(invalid());
    };
    if !first.is_ascii_alphabetic() {
        return Err(invalid());
    }
    if chars.any(|ch| {
        ch.is_whitespace() || ch.is_control() || matches!(ch, '/' | '>' | '<' | '=' | '"' | '\'')
    }) {
        return Err(invalid());
    }
    if config.known_tags_only && !name.contains('-') && !is_known_tag(name) {
        return Err(invalid());
    }
    if config.lowercase_tag_names && name.bytes().any(|b| b.is_ascii_uppercase()) {
        return Ok(Cow::Owned(name.to_ascii_lowercase()));
    }
    Ok(Cow::Borrowed(name))
}

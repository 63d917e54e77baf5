use crate::error::BuildError;
use dom::{Document, NodeKey, PropValue};

/// Map key that names the built node in the link registry instead of
/// becoming a property.
pub const LINK_KEY: &str = "link";

/// Property assignments for a built node plus its optional link name.
///
/// The link name is stored apart from the properties; only [`Attributes::insert`]
/// recognizes [`LINK_KEY`], so map-shaped input can be converted in one step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes {
    link: Option<String>,
    props: Vec<(String, PropValue)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the built node under `name`.
    pub fn link(mut self, name: impl Into<String>) -> Self {
        self.link = Some(name.into());
        self
    }

    /// Builder form of [`Attributes::insert`].
    pub fn set(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add one map entry. [`LINK_KEY`] sets the link name (a null value clears
    /// it, other scalars use their string form); every other key is a property.
    /// A repeated key replaces the earlier value and keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
        let name = name.into();
        let value = value.into();
        if name == LINK_KEY {
            self.link = match value {
                PropValue::Null => None,
                PropValue::Text(text) => Some(text),
                other => Some(other.to_string()),
            };
            return;
        }
        match self.props.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.props.push((name, value)),
        }
    }

    /// Link name, if one was given and it is non-empty.
    pub fn link_name(&self) -> Option<&str> {
        self.link.as_deref().filter(|name| !name.is_empty())
    }

    pub fn props(&self) -> &[(String, PropValue)] {
        &self.props
    }

    pub fn is_empty(&self) -> bool {
        self.link.is_none() && self.props.is_empty()
    }

    pub(crate) fn validate(&self) -> Result<(), BuildError> {
        match self.props.iter().find(|(name, _)| name.is_empty()) {
            Some((name, _)) => Err(BuildError::InvalidAttributeName(name.clone())),
            None => Ok(()),
        }
    }

    /// Assign every non-null property onto `node` and hand back the link name.
    /// Callers run [`Attributes::validate`] first so nothing is assigned from an
    /// invalid map.
    pub(crate) fn apply(
        self,
        doc: &mut Document,
        node: NodeKey,
    ) -> Result<Option<String>, BuildError> {
        debug_assert!(self.validate().is_ok());
        for (name, value) in self.props {
            if value.is_null() {
                continue;
            }
            doc.set_property(node, &name, value)?;
        }
        Ok(self.link.filter(|name| !name.is_empty()))
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

impl<K: Into<String>, V: Into<PropValue>> Extend<(K, V)> for Attributes {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

/// Build [`Attributes`] from `name => value` pairs with mixed value types.
///
/// ```
/// let attrs = dom_build::attrs! { "className" => "card", "tabIndex" => 0, "link" => "card" };
/// assert_eq!(attrs.link_name(), Some("card"));
/// assert_eq!(attrs.props().len(), 2);
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::Attributes::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut attrs = $crate::Attributes::new();
        $( attrs.insert($name, $value); )+
        attrs
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_key_is_diverted() {
        let attrs: Attributes = [("id", "main"), ("link", "root")].into_iter().collect();
        assert_eq!(attrs.link_name(), Some("root"));
        assert_eq!(attrs.props(), &[("id".to_string(), PropValue::from("main"))]);
    }

    #[test]
    fn empty_or_null_link_is_absent() {
        assert_eq!(Attributes::new().link("").link_name(), None);
        let cleared = Attributes::new().link("x").set(LINK_KEY, PropValue::Null);
        assert_eq!(cleared.link_name(), None);
        assert_eq!(Attributes::new().set(LINK_KEY, 7).link_name(), Some("7"));
    }

    #[test]
    fn validate_rejects_empty_names_before_apply() {
        let attrs = Attributes::new().set("title", "ok").set("", "bad");
        assert_eq!(
            attrs.validate(),
            Err(BuildError::InvalidAttributeName(String::new()))
        );
    }

    #[test]
    fn apply_skips_null_values() {
        let mut doc = Document::new();
        let node = doc.create_element("input").unwrap();
        let link = attrs! {
            "value" => "x",
            "placeholder" => PropValue::Null,
            "disabled" => true,
            "link" => "field",
        }
        .apply(&mut doc, node)
        .unwrap();

        assert_eq!(link.as_deref(), Some("field"));
        assert_eq!(doc.properties(node).len(), 2);
        assert_eq!(doc.property(node, "placeholder"), None);
        assert_eq!(doc.property(node, "disabled"), Some(&PropValue::Bool(true)));
    }

    #[test]
    fn duplicate_names_overwrite() {
        let mut doc = Document::new();
        let node = doc.create_element("div").unwrap();
        let attrs = attrs! { "id" => "a", "id" => "b" };
        attrs.apply(&mut doc, node).unwrap();
        assert_eq!(doc.properties(node).len(), 1);
        assert_eq!(doc.property(node, "id"), Some(&PropValue::from("b")));
    }

    #[test]
    fn later_null_unsets_earlier_value() {
        let attrs = attrs! { "id" => "a", "title" => "t", "id" => PropValue::Null };
        assert_eq!(
            attrs.props(),
            &[
                ("id".to_string(), PropValue::Null),
                ("title".to_string(), PropValue::from("t")),
            ]
        );

        let mut doc = Document::new();
        let node = doc.create_element("div").unwrap();
        attrs.apply(&mut doc, node).unwrap();
        assert_eq!(doc.property(node, "id"), None);
        assert_eq!(doc.properties(node).len(), 1);
    }
}

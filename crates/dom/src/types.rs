use std::fmt;
use std::sync::Arc;

/// Opaque handle for a node owned by a [`crate::Document`].
///
/// Keys are issued sequentially starting at 1 and are never reused while the
/// document lives, so a key held after its node was detached still resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub u32);

impl NodeKey {
    /// Reserved sentinel for "unassigned/invalid" identity. Never issued.
    pub const INVALID: NodeKey = NodeKey(0);

    pub(crate) fn index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }

    /// # Panics
    ///
    /// When `index + 1` does not fit in a `u32`; a document holds at most
    /// `u32::MAX` nodes.
    pub(crate) fn from_index(index: usize) -> Self {
        match index.checked_add(1).and_then(|id| u32::try_from(id).ok()) {
            Some(id) => NodeKey(id),
            None => panic!("node key overflow: index {index} exceeds u32 key space"),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Element { name: Arc<str> },
    Text { text: String },
    /// Ownerless grouping placeholder; appending it moves its children.
    Fragment,
}

impl NodeKind {
    pub fn allows_children(&self) -> bool {
        matches!(self, NodeKind::Element { .. } | NodeKind::Fragment)
    }
}

/// Value stored in an element property slot.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl PropValue {
    pub fn is_null(&self) -> bool {
        matches!(self, PropValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Null => f.write_str("null"),
            PropValue::Bool(value) => write!(f, "{value}"),
            PropValue::Number(value) => f.write_str(&format_number(*value)),
            PropValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl<T: Into<PropValue>> From<Option<T>> for PropValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PropValue::Null, Into::into)
    }
}

macro_rules! prop_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for PropValue {
                fn from(value: $ty) -> Self {
                    PropValue::Number(value as f64)
                }
            }
        )*
    };
}

prop_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32);

/// String conversion for numeric scalars, following host number printing:
/// integral values drop the fractional part and negative zero prints as `0`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e21 {
        return format!("{value:.0}");
    }
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_drop_fraction() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-42.0), "-42");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn special_numbers() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(1.5), "1.5");
    }

    #[test]
    fn option_none_is_null() {
        let value: PropValue = Option::<&str>::None.into();
        assert!(value.is_null());
        assert_eq!(PropValue::from(Some(7)), PropValue::Number(7.0));
    }

    #[test]
    fn key_index_roundtrip_skips_invalid() {
        assert_eq!(NodeKey::INVALID.index(), None);
        assert_eq!(NodeKey::from_index(0), NodeKey(1));
        assert_eq!(NodeKey(5).index(), Some(4));
        assert_eq!(NodeKey::from_index(u32::MAX as usize - 1), NodeKey(u32::MAX));
    }

    #[test]
    #[should_panic(expected = "node key overflow")]
    fn key_space_is_bounded() {
        NodeKey::from_index(u32::MAX as usize);
    }
}

use std::collections::BTreeMap;

/// The data a template is rendered against.
///
/// With the `serde` feature enabled this deserializes from any self-describing
/// format, so a JSON document can be handed to the renderer directly.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TemplateParams {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Seq(Vec<TemplateParams>),
    Map(BTreeMap<String, TemplateParams>),
}

impl TemplateParams {
    /// An empty mapping, ready for [`TemplateParams::insert`].
    pub const fn map() -> Self {
        Self::Map(BTreeMap::new())
    }

    /// Inserts `value` under `key`, turning a non-mapping value into an empty mapping first.
    pub fn insert<K: Into<String>, V: Into<Self>>(&mut self, key: K, value: V) -> &mut Self {
        if !matches!(self, Self::Map(_)) {
            *self = Self::map();
        }
        if let Self::Map(map) = self {
            map.insert(key.into(), value.into());
        }
        self
    }

    /// Looks up a direct child of a mapping.
    pub fn get<T: AsRef<str>>(&self, key: T) -> Option<&Self> {
        match self {
            Self::Map(map) => map.get(key.as_ref()),
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) | Self::Seq(_) => None,
        }
    }

    /// Strings, numbers and booleans. These have no sub-fields.
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Bool(_) | Self::Number(_) | Self::String(_))
    }

    /// Whether a section over this value renders its content.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Seq(items) => !items.is_empty(),
            Self::Map(_) => true,
        }
    }
}

impl From<bool> for TemplateParams {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for TemplateParams {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for TemplateParams {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for TemplateParams {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for TemplateParams {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for TemplateParams {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for TemplateParams {
    fn from(value: Vec<T>) -> Self {
        Self::Seq(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for TemplateParams {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<BTreeMap<String, Self>> for TemplateParams {
    fn from(value: BTreeMap<String, Self>) -> Self {
        Self::Map(value)
    }
}

impl<K: Into<String>, V: Into<Self>> FromIterator<(K, V)> for TemplateParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A dot separated location within the template data, e.g. `user.address.city`.
///
/// Never empty: the parser rejects tags whose path has no segments.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path<'a>(Vec<&'a str>);

impl<'a> Path<'a> {
    /// Splits `raw` on `.`, dropping empty segments. Returns `None` when nothing is left.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let segments: Vec<&'a str> = raw.split('.').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            None
        } else {
            Some(Self(segments))
        }
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.0
    }
}

impl std::fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// Where a variable nested inside a section is looked up.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// Relative to the innermost enclosing section.
    #[default]
    Local,
    /// Relative to the root of the data, written `{{ @path }}`.
    Global,
}

/// Declared type of a variable tag, written `{{ path?: string | number }}`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct VarType<'a> {
    /// Deduplicated, in the order they were written. Empty means unconstrained.
    pub alternatives: Vec<&'a str>,
    pub optional: bool,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct SectionType {
    pub optional: bool,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AstNode<'a> {
    /// Literal text, emitted verbatim.
    Text { content: &'a str },
    /// `{{ name }}` (escaped) or `{{{ name }}}` (raw, `triple`).
    Variable {
        name: Path<'a>,
        triple: bool,
        var_type: Option<VarType<'a>>,
        scope: Scope,
    },
    /// `{{ . }}`, the current context itself.
    ImplicitVariable { triple: bool },
    /// `{{# name }} ... {{/ name }}`
    Section {
        name: Path<'a>,
        content: Vec<AstNode<'a>>,
        var_type: Option<SectionType>,
    },
    /// `{{^ name }} ... {{/ name }}`
    InvertedSection {
        name: Path<'a>,
        content: Vec<AstNode<'a>>,
    },
    /// `{{! ... }}`
    Comment { content: &'a str },
    /// `{{> name }}`, kept as a reference and never expanded.
    Partial { name: Path<'a> },
}

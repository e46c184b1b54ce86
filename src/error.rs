pub type MustypeResult<T> = std::result::Result<T, MustypeError>;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    UnexpectedEOF {
        /// Describes what was expected, e.g., "(expected '}}')"
        expected_what: String,
    },
    Expected {
        description: String,
    },
    /// A path made only of separators, such as `{{ .. }}`.
    EmptyPath,
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedEOF { expected_what } => {
                write!(f, "Unexpected EOF{}", expected_what)
            }
            Self::Expected { description } => {
                write!(f, "Expected {}", description)
            }
            Self::EmptyPath => write!(f, "Path has no segments"),
        }
    }
}

impl std::error::Error for ParseErrorKind {}

impl ParseErrorKind {
    pub fn unexpected_eof(expected: Option<&str>) -> Self {
        Self::UnexpectedEOF {
            expected_what: expected.map_or_else(String::new, |e| format!(" (expected '{}')", e)),
        }
    }

    pub fn expected<T: Into<String>>(description: T) -> Self {
        Self::Expected {
            description: description.into(),
        }
    }
}

/// A grammar failure, positioned at the furthest point any alternative reached.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    /// Byte offset into the template source.
    pub offset: usize,
    pub kind: ParseErrorKind,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.line, self.column, self.kind
        )
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// Two uses of the same path that no single data shape can satisfy.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeConflict {
    /// Both sides are leaves with different concrete alternatives.
    Scalar {
        path: String,
        left: String,
        right: String,
    },
    /// One side is an object (or sequence) and the other a scalar leaf.
    Shape {
        path: String,
        left: String,
        right: String,
    },
    /// A path segment that reads as a sequence index and can't name a field.
    NonKey { path: String, segment: String },
}

impl TypeConflict {
    pub fn path(&self) -> &str {
        match self {
            Self::Scalar { path, .. } | Self::Shape { path, .. } | Self::NonKey { path, .. } => {
                path
            }
        }
    }
}

impl std::fmt::Display for TypeConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar { path, left, right } => {
                write!(
                    f,
                    "Conflicting types for {}: `{}` vs `{}`",
                    path, left, right
                )
            }
            Self::Shape { path, left, right } => {
                write!(
                    f,
                    "Conflicting shapes for {}: `{}` vs `{}`",
                    path, left, right
                )
            }
            Self::NonKey { path, segment } => {
                write!(
                    f,
                    "Segment '{}' of {} looks like an index, not a field name",
                    segment, path
                )
            }
        }
    }
}

impl std::error::Error for TypeConflict {}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MustypeError {
    Parse(ParseError),
    Conflict(TypeConflict),
}

impl std::fmt::Display for MustypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(parse_error) => {
                write!(f, "{}", parse_error)
            }
            Self::Conflict(conflict) => {
                write!(f, "Type inference failed: {}", conflict)
            }
        }
    }
}

impl std::error::Error for MustypeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(parse_error) => Some(parse_error),
            Self::Conflict(conflict) => Some(conflict),
        }
    }
}

impl From<ParseError> for MustypeError {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<TypeConflict> for MustypeError {
    fn from(error: TypeConflict) -> Self {
        Self::Conflict(error)
    }
}

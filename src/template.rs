use crate::{
    ast::AstNode,
    error::{ParseError, TypeConflict},
    params::TemplateParams,
    parser::tokenize,
    render::Renderer,
    types::{self, DeclarationOptions, TypeTree},
};

/// A parsed template, borrowing from its source text.
///
/// Parsing happens once; the same template can then be rendered against any
/// number of inputs, or analysed for the shape of data it needs.
///
/// # Example
///
/// ```rust
/// use mustype::{Template, TemplateParams};
///
/// let template = Template::parse("Hello, {{ name }}!").unwrap();
///
/// let mut params = TemplateParams::map();
/// params.insert("name", "World");
///
/// assert_eq!(template.render(&params), "Hello, World!");
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'a> {
    source: &'a str,
    nodes: Vec<AstNode<'a>>,
}

impl<'a> Template<'a> {
    /// Parses `source` into a template.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] positioned at the furthest point the grammar
    /// reached, e.g. for an unclosed tag or a path with no segments.
    pub fn parse(source: &'a str) -> Result<Self, ParseError> {
        let nodes = tokenize(source)?;
        Ok(Self { source, nodes })
    }

    pub const fn source(&self) -> &'a str {
        self.source
    }

    pub fn nodes(&self) -> &[AstNode<'a>] {
        &self.nodes
    }

    /// Renders the template against `params`.
    ///
    /// Missing values render as empty strings, so rendering never fails.
    ///
    /// ```
    /// use mustype::{Template, TemplateParams};
    ///
    /// let template = Template::parse("{{#items}}[{{.}}]{{/items}}").unwrap();
    /// let mut params = TemplateParams::map();
    /// params.insert("items", vec!["<a>", "b"]);
    ///
    /// assert_eq!(template.render(&params), "[&lt;a&gt;][b]");
    /// ```
    pub fn render(&self, params: &TemplateParams) -> String {
        Renderer::new(params).render(&self.nodes)
    }

    /// The finalized shape of the data this template reads.
    ///
    /// # Errors
    ///
    /// Returns a [`TypeConflict`] when two uses of a path can't be reconciled.
    pub fn type_tree(&self) -> Result<TypeTree, TypeConflict> {
        types::infer(&self.nodes)
    }

    /// The shape of the data this template reads, as a TypeScript interface.
    ///
    /// ```
    /// use mustype::{DeclarationOptions, Template};
    ///
    /// let template = Template::parse("{{#user}}{{name: string}}{{/user}}").unwrap();
    /// let declaration = template.declaration(&DeclarationOptions::default()).unwrap();
    ///
    /// assert_eq!(
    ///     declaration,
    ///     "export interface TemplateParams {\n  user: {\n    name: string;\n  };\n}\n"
    /// );
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`TypeConflict`] when two uses of a path can't be reconciled.
    pub fn declaration(&self, options: &DeclarationOptions) -> Result<String, TypeConflict> {
        let tree = self.type_tree()?;
        Ok(types::print(&tree, options))
    }
}

//! Logic-less templates with static inference of the data they require.
//!
//! ```
//! use mustype::{TemplateParams, apply, gen_type, parse};
//!
//! let source = "Hi {{#user}}{{name}}{{/user}}\n";
//!
//! let mut user = TemplateParams::map();
//! user.insert("name", "Ann");
//! let mut params = TemplateParams::map();
//! params.insert("user", user);
//! assert_eq!(apply(source, &params), "Hi Ann");
//!
//! let declaration = gen_type(&parse(source).unwrap()).unwrap();
//! assert!(declaration.contains("name: string | boolean | number;"));
//! ```

mod ast;
mod error;
mod params;
mod parser;
mod render;
mod template;
pub mod types;

// Public exports.
pub use ast::{AstNode, Path, Scope, SectionType, VarType};
pub use error::{MustypeError, MustypeResult, ParseError, ParseErrorKind, TypeConflict};
pub use params::TemplateParams;
pub use template::Template;
pub use types::DeclarationOptions;

/// Parses `template`, keeping the structured failure.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying the reason and position of the failure.
pub fn parse(template: &str) -> Result<Template<'_>, ParseError> {
    Template::parse(template)
}

/// Renders `template` against `params`, or `""` if the template doesn't parse.
///
/// Use [`try_apply`] to find out why a template was rejected.
pub fn apply(template: &str, params: &TemplateParams) -> String {
    try_apply(template, params).unwrap_or_else(|error| {
        log::debug!("discarding render of unparseable template: {}", error);
        String::new()
    })
}

/// Renders `template` against `params`.
///
/// # Errors
///
/// Returns a [`ParseError`] if the template is malformed.
pub fn try_apply(template: &str, params: &TemplateParams) -> Result<String, ParseError> {
    Ok(Template::parse(template)?.render(params))
}

/// The data shape `template` requires, as a `TemplateParams` interface.
///
/// # Errors
///
/// Returns a [`TypeConflict`] naming the path whose uses can't be reconciled.
pub fn gen_type(template: &Template<'_>) -> Result<String, TypeConflict> {
    gen_type_with(template, &DeclarationOptions::default())
}

/// Like [`gen_type`], with control over the interface name and indentation.
///
/// # Errors
///
/// Returns a [`TypeConflict`] naming the path whose uses can't be reconciled.
pub fn gen_type_with(
    template: &Template<'_>,
    options: &DeclarationOptions,
) -> Result<String, TypeConflict> {
    template.declaration(options)
}

/// Parses `source` and infers its declaration in one step.
///
/// # Errors
///
/// Returns [`MustypeError::Parse`] or [`MustypeError::Conflict`].
pub fn infer_declaration(source: &str) -> MustypeResult<String> {
    let template = Template::parse(source)?;
    Ok(gen_type(&template)?)
}

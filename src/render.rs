use crate::{
    ast::{AstNode, Path, Scope},
    params::TemplateParams,
};

/// The outcome of looking a path up in the data.
///
/// `Missing` renders as an empty string and is never truthy.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Resolved<'p> {
    Found(&'p TemplateParams),
    Missing,
}

impl Resolved<'_> {
    fn is_truthy(self) -> bool {
        match self {
            Self::Found(value) => value.is_truthy(),
            Self::Missing => false,
        }
    }
}

/// Walks `path` from `context`.
///
/// A scalar context has no sub-fields and is returned as-is whatever the
/// remaining path. Sequences accept numeric segments as indices.
fn resolve<'p>(context: &'p TemplateParams, path: &[&str]) -> Resolved<'p> {
    let mut current = context;
    for segment in path {
        let next = match current {
            TemplateParams::Bool(_) | TemplateParams::Number(_) | TemplateParams::String(_) => {
                return Resolved::Found(current);
            }
            TemplateParams::Map(map) => map.get(*segment),
            TemplateParams::Seq(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            TemplateParams::Null => None,
        };
        match next {
            Some(value) => current = value,
            None => return Resolved::Missing,
        }
    }
    Resolved::Found(current)
}

fn escape_html(input: &str, output: &mut String) {
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            other => output.push(other),
        }
    }
}

/// Text form of a value placed by a variable tag.
fn stringify(value: &TemplateParams) -> String {
    match value {
        TemplateParams::Null | TemplateParams::Map(_) => String::new(),
        TemplateParams::Bool(b) => b.to_string(),
        TemplateParams::Number(n) => format_number(*n),
        TemplateParams::String(s) => s.clone(),
        TemplateParams::Seq(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
    }
}

/// Numbers print the way a JavaScript host would: no `-0`, `Infinity` not `inf`.
fn format_number(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        n.to_string()
    }
}

pub(crate) struct Renderer<'p> {
    /// Base for `@` (global) lookups.
    root: &'p TemplateParams,
}

impl<'p> Renderer<'p> {
    pub(crate) const fn new(root: &'p TemplateParams) -> Self {
        Self { root }
    }

    pub(crate) fn render(&self, nodes: &[AstNode<'_>]) -> String {
        let mut output = String::new();
        self.render_nodes(nodes, self.root, &mut output);
        output
    }

    fn render_nodes(&self, nodes: &[AstNode<'_>], context: &'p TemplateParams, output: &mut String) {
        for node in nodes {
            self.render_node(node, context, output);
        }
    }

    fn render_value(resolved: Resolved<'_>, triple: bool, output: &mut String) {
        let Resolved::Found(value) = resolved else {
            return;
        };
        let text = stringify(value);
        if triple {
            output.push_str(&text);
        } else {
            escape_html(&text, output);
        }
    }

    fn render_node(&self, node: &AstNode<'_>, context: &'p TemplateParams, output: &mut String) {
        match node {
            AstNode::Text { content } => output.push_str(content),
            AstNode::Variable {
                name,
                triple,
                var_type: _,
                scope,
            } => {
                let base = match scope {
                    Scope::Local => context,
                    Scope::Global => self.root,
                };
                Self::render_value(resolve(base, name.segments()), *triple, output);
            }
            AstNode::ImplicitVariable { triple } => {
                Self::render_value(Resolved::Found(context), *triple, output);
            }
            AstNode::Section {
                name,
                content,
                var_type: _,
            } => match resolve(context, name.segments()) {
                Resolved::Found(TemplateParams::Seq(items)) => {
                    for item in items {
                        self.render_nodes(content, item, output);
                    }
                }
                Resolved::Found(value) if value.is_truthy() => {
                    self.render_nodes(content, value, output);
                }
                Resolved::Found(_) | Resolved::Missing => {}
            },
            AstNode::InvertedSection { name, content } => {
                if !resolve(context, name.segments()).is_truthy() {
                    self.render_nodes(content, context, output);
                }
            }
            AstNode::Comment { .. } => {}
            AstNode::Partial { name } => render_partial(name, output),
        }
    }
}

/// Partials are never expanded; the reference is written back out.
fn render_partial(name: &Path<'_>, output: &mut String) {
    output.push_str("{{> ");
    output.push_str(&name.to_string());
    output.push_str(" }}");
}

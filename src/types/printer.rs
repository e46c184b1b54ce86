use super::{FieldKey, Leaf, TypeNode, TypeTree};

/// How [`print`] lays out the declaration.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclarationOptions {
    /// Name of the emitted interface.
    pub type_name: String,
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for DeclarationOptions {
    fn default() -> Self {
        Self {
            type_name: "TemplateParams".to_string(),
            indent: 2,
        }
    }
}

struct Printer<'o> {
    output: String,
    depth: usize,
    options: &'o DeclarationOptions,
}

/// Field names that aren't valid identifiers (`1st`) are quoted.
fn field_name(name: &str) -> String {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("\"{}\"", name)
    } else {
        name.to_string()
    }
}

fn leaf_type(leaf: &Leaf, array: bool) -> String {
    let names = leaf.names();
    let union = names.join(" | ");
    match (array, names.len()) {
        (false, _) => union,
        (true, 1) => format!("{}[]", union),
        (true, _) => format!("({})[]", union),
    }
}

impl Printer<'_> {
    fn write_indent(&mut self) {
        for _ in 0..self.depth * self.options.indent {
            self.output.push(' ');
        }
    }

    fn write_fields(&mut self, tree: &TypeTree) {
        for (key, node) in tree {
            // A required sibling already guarantees the field.
            if key.optional && tree.keys().any(|k| k.name == key.name && !k.optional) {
                continue;
            }
            self.write_field(key, node);
        }
    }

    fn write_field(&mut self, key: &FieldKey, node: &TypeNode) {
        self.write_indent();
        self.output.push_str(&field_name(&key.name));
        if key.optional {
            self.output.push('?');
        }
        self.output.push_str(": ");
        match node {
            TypeNode::Leaf(leaf) => self.output.push_str(&leaf_type(leaf, key.array)),
            TypeNode::Object(inner) => {
                self.write_object(inner);
                if key.array {
                    self.output.push_str("[]");
                }
            }
        }
        self.output.push_str(";\n");
    }

    fn write_object(&mut self, tree: &TypeTree) {
        if tree.is_empty() {
            self.output.push_str("{}");
            return;
        }
        self.output.push_str("{\n");
        self.depth += 1;
        self.write_fields(tree);
        self.depth -= 1;
        self.write_indent();
        self.output.push('}');
    }
}

/// Renders `tree` as an exported TypeScript interface.
pub fn print(tree: &TypeTree, options: &DeclarationOptions) -> String {
    let mut printer = Printer {
        output: String::new(),
        depth: 0,
        options,
    };
    printer.output.push_str("export interface ");
    printer.output.push_str(&options.type_name);
    printer.output.push(' ');
    printer.write_object(tree);
    printer.output.push('\n');
    printer.output
}

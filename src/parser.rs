use crate::{
    ast::{AstNode, Path, Scope, SectionType, VarType},
    error::{ParseError, ParseErrorKind},
};

pub(crate) type ParseResult<T> = Result<T, ParseError>;

/// One branch of the tag grammar, run from a saved cursor.
type Alternative<'a> = fn(&mut Parser<'a>) -> ParseResult<AstNode<'a>>;

/// Opening of a section's closing tag, shared by sections and inverted sections.
const CLOSE_TAG: &str = "{{/";

#[derive(Debug, Clone, Copy)]
struct Cursor {
    pos: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// The starting location of the current line
    line_start_pos: usize,
}

struct Parser<'a> {
    input: &'a str,
    cursor: Cursor,
}

impl<'a> Parser<'a> {
    const fn new(input: &'a str) -> Self {
        Parser {
            input,
            cursor: Cursor {
                pos: 0,
                line: 1,
                line_start_pos: 0,
            },
        }
    }

    #[inline]
    const fn current_column(&self) -> usize {
        self.cursor.pos - self.cursor.line_start_pos + 1
    }

    #[inline]
    const fn make_error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            line: self.cursor.line,
            column: self.current_column(),
            offset: self.cursor.pos,
            kind,
        }
    }

    /// The unconsumed remainder of the input.
    #[inline]
    fn rest(&self) -> &'a str {
        self.input.get(self.cursor.pos..).unwrap_or_default()
    }

    /// Advances past `current_char`, updating line tracking on newlines.
    #[inline]
    fn advance_by_char(&mut self, current_char: char) {
        let char_len = current_char.len_utf8();
        if current_char == '\n' {
            self.cursor.line += 1;
            self.cursor.line_start_pos = self.cursor.pos + char_len;
        }
        self.cursor.pos += char_len;
    }

    fn advance_over(&mut self, text: &str) {
        for c in text.chars() {
            self.advance_by_char(c);
        }
    }

    fn eof(&self) -> bool {
        self.cursor.pos >= self.input.len()
    }

    /// Peek if the remaining input starts with `s`
    fn peek(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    /// Consume `s` if the remaining input starts with it.
    fn consume(&mut self, s: &str) -> bool {
        if self.peek(s) {
            self.advance_over(s);
            true
        } else {
            false
        }
    }

    fn consume_whitespace(&mut self) {
        while let Some(c) = self.rest().chars().next() {
            if !c.is_ascii_whitespace() {
                break;
            }
            self.advance_by_char(c);
        }
    }

    /// Expect `s` to be the start of the remaining input, consume it or return Err.
    fn expect(&mut self, s: &str) -> ParseResult<()> {
        if self.consume(s) {
            return Ok(());
        }
        if self.eof() {
            return Err(self.make_error(ParseErrorKind::unexpected_eof(Some(s))));
        }
        let found: String = self.rest().chars().take(s.len() + 10).collect();
        Err(self.make_error(ParseErrorKind::expected(format!(
            "'{}', found '{}'",
            s, found
        ))))
    }

    /// Consume a run of `[a-zA-Z0-9_]`, plus `.` when `allow_dots` is set.
    fn consume_word(&mut self, allow_dots: bool) -> &'a str {
        let start = self.cursor.pos;
        while let Some(c) = self.rest().chars().next() {
            if c.is_ascii_alphanumeric() || c == '_' || (allow_dots && c == '.') {
                self.advance_by_char(c);
            } else {
                break;
            }
        }
        self.input.get(start..self.cursor.pos).unwrap_or_default()
    }

    fn parse_path(&mut self) -> ParseResult<Path<'a>> {
        self.consume_whitespace();
        let raw = self.consume_word(true);
        if raw.is_empty() {
            return Err(self.make_error(ParseErrorKind::expected("path")));
        }
        Path::parse(raw).ok_or_else(|| self.make_error(ParseErrorKind::EmptyPath))
    }

    /// `[@] path [?] [: type (| type)*]`, the inside of a variable tag.
    fn parse_variable_body(&mut self) -> ParseResult<(Path<'a>, Option<VarType<'a>>, Scope)> {
        self.consume_whitespace();
        let scope = if self.consume("@") {
            Scope::Global
        } else {
            Scope::Local
        };
        let name = self.parse_path()?;
        self.consume_whitespace();
        let optional = self.consume("?");
        self.consume_whitespace();

        let annotated = self.consume(":");
        let mut alternatives = Vec::new();
        if annotated {
            loop {
                self.consume_whitespace();
                let ty = self.consume_word(false);
                if ty.is_empty() {
                    return Err(self.make_error(ParseErrorKind::expected("type name")));
                }
                if !alternatives.contains(&ty) {
                    alternatives.push(ty);
                }
                self.consume_whitespace();
                if !self.consume("|") {
                    break;
                }
            }
        }
        self.consume_whitespace();

        let var_type = (optional || annotated).then_some(VarType {
            alternatives,
            optional,
        });
        Ok((name, var_type, scope))
    }

    fn parse_triple_variable(&mut self) -> ParseResult<AstNode<'a>> {
        self.expect("{{{")?;
        let (name, var_type, scope) = self.parse_variable_body()?;
        self.expect("}}}")?;
        Ok(AstNode::Variable {
            name,
            triple: true,
            var_type,
            scope,
        })
    }

    fn parse_double_variable(&mut self) -> ParseResult<AstNode<'a>> {
        self.expect("{{")?;
        let (name, var_type, scope) = self.parse_variable_body()?;
        self.expect("}}")?;
        Ok(AstNode::Variable {
            name,
            triple: false,
            var_type,
            scope,
        })
    }

    fn parse_implicit_variable(&mut self) -> ParseResult<AstNode<'a>> {
        let triple = self.consume("{{{");
        if !triple {
            self.expect("{{")?;
        }
        self.consume_whitespace();
        self.expect(".")?;
        self.consume_whitespace();
        self.expect(if triple { "}}}" } else { "}}" })?;
        Ok(AstNode::ImplicitVariable { triple })
    }

    /// `{{/ path }}`. The path is not checked against the opening tag.
    fn parse_closing_tag(&mut self) -> ParseResult<Path<'a>> {
        self.expect(CLOSE_TAG)?;
        let name = self.parse_path()?;
        self.consume_whitespace();
        // Mirrors `{{#user?}}`.
        self.consume("?");
        self.consume_whitespace();
        self.expect("}}")?;
        Ok(name)
    }

    fn parse_section(&mut self) -> ParseResult<AstNode<'a>> {
        self.expect("{{#")?;
        let name = self.parse_path()?;
        self.consume_whitespace();
        let var_type = self
            .consume("?")
            .then_some(SectionType { optional: true });
        self.consume_whitespace();
        self.expect("}}")?;
        self.consume("\n");

        let content = self.parse_nodes_until(Some(CLOSE_TAG))?;
        self.parse_closing_tag()?;
        self.consume("\n");

        Ok(AstNode::Section {
            name,
            content,
            var_type,
        })
    }

    fn parse_inverted_section(&mut self) -> ParseResult<AstNode<'a>> {
        self.expect("{{^")?;
        let name = self.parse_path()?;
        self.consume_whitespace();
        self.expect("}}")?;

        let content = self.parse_nodes_until(Some(CLOSE_TAG))?;
        self.parse_closing_tag()?;

        Ok(AstNode::InvertedSection { name, content })
    }

    fn parse_comment(&mut self) -> ParseResult<AstNode<'a>> {
        self.expect("{{!")?;
        let rest = self.rest();
        let Some(end) = rest.find("}}") else {
            self.advance_over(rest);
            return Err(self.make_error(ParseErrorKind::unexpected_eof(Some("}}"))));
        };
        let content = rest.get(..end).unwrap_or_default();
        self.advance_over(content);
        self.expect("}}")?;
        Ok(AstNode::Comment { content })
    }

    fn parse_partial(&mut self) -> ParseResult<AstNode<'a>> {
        self.expect("{{>")?;
        let name = self.parse_path()?;
        self.consume_whitespace();
        self.expect("}}")?;
        Ok(AstNode::Partial { name })
    }

    /// Constant text up to the next `{{` or the end of input. Never empty.
    fn parse_text(&mut self) -> ParseResult<AstNode<'a>> {
        let start = self.cursor.pos;
        while let Some(c) = self.rest().chars().next() {
            if self.peek("{{") {
                break;
            }
            self.advance_by_char(c);
        }
        if start == self.cursor.pos {
            return Err(self.make_error(ParseErrorKind::expected("text")));
        }
        Ok(AstNode::Text {
            content: self.input.get(start..self.cursor.pos).unwrap_or_default(),
        })
    }

    /// Tries each kind of node in priority order; the first to succeed wins.
    ///
    /// When all fail, the error that got furthest into the input is returned,
    /// since it's the one closest to what the author meant.
    fn parse_node(&mut self) -> ParseResult<AstNode<'a>> {
        // `{{{` must be tried before `{{`, it extends the shorter delimiter.
        let alternatives: [Alternative<'a>; 8] = [
            Self::parse_triple_variable,
            Self::parse_double_variable,
            Self::parse_section,
            Self::parse_inverted_section,
            Self::parse_comment,
            Self::parse_partial,
            Self::parse_implicit_variable,
            Self::parse_text,
        ];

        let start = self.cursor;
        let mut furthest = self.make_error(ParseErrorKind::expected("a tag or text"));
        for alternative in alternatives {
            match alternative(self) {
                Ok(node) => return Ok(node),
                Err(error) => {
                    if error.offset > furthest.offset {
                        furthest = error;
                    }
                    self.cursor = start;
                }
            }
        }
        Err(furthest)
    }

    /// Parse nodes until `closing` is next, or until end of input when there is none.
    fn parse_nodes_until(&mut self, closing: Option<&str>) -> ParseResult<Vec<AstNode<'a>>> {
        let mut nodes = Vec::new();
        loop {
            if self.eof() {
                if let Some(tag) = closing {
                    return Err(self.make_error(ParseErrorKind::unexpected_eof(Some(tag))));
                }
                break;
            }

            if closing.is_some_and(|tag| self.peek(tag)) {
                break;
            }

            nodes.push(self.parse_node()?);
        }
        Ok(nodes)
    }
}

pub(crate) fn tokenize(input: &str) -> ParseResult<Vec<AstNode<'_>>> {
    let mut parser = Parser::new(input);
    let nodes = parser.parse_nodes_until(None)?;
    log::trace!("parsed {} top-level nodes", nodes.len());
    Ok(nodes)
}

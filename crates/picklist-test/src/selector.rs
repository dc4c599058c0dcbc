//! CSS-like selector parsing for node queries.
//!
//! Supports:
//! - `"button"` - by element tag or component name
//! - `"#fruit"` - by `id` attribute
//! - `".select-open"` - by class
//! - `"[aria-expanded='true']"`, `"[disabled]"` - by attribute
//! - `"[key='trigger']"` - by node key
//! - `"div.select-root"` - compound
//! - `"[key='dropdown'] [role='option']"` - descendant
//! - `"[key='listbox'] > div"` - child

use picklist_core::{AttrValue, Node};

/// Parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Match by element tag or component name
    Type(String),
    /// Match by `id` attribute (e.g., `#my-id`)
    Id(String),
    /// Match by class (e.g., `.my-class`)
    Class(String),
    /// Match by node key (e.g., `[key='trigger']`)
    Key(String),
    /// Match by attribute; `None` tests presence (`[disabled]` means present and not false)
    Attribute {
        /// Attribute name
        name: String,
        /// Expected value
        value: Option<String>,
    },
    /// All parts must match the same node
    Compound(Vec<Selector>),
    /// Descendant combinator (e.g., `div button`)
    Descendant(Box<Selector>, Box<Selector>),
    /// Child combinator (e.g., `div > button`)
    Child(Box<Selector>, Box<Selector>),
}

impl Selector {
    /// Parse a selector string.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector is invalid.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        SelectorParser::new(input).parse()
    }

    /// Check if this selector matches `node`, whose ancestors are listed
    /// root first.
    #[must_use]
    pub fn matches<M>(&self, ancestors: &[&Node<M>], node: &Node<M>) -> bool {
        match self {
            Self::Type(name) => node.tag().or_else(|| node.type_name()) == Some(name.as_str()),
            Self::Id(id) => node.attr_str("id") == Some(id.as_str()),
            Self::Class(class) => node.has_class(class),
            Self::Key(key) => node.key.as_deref() == Some(key.as_str()),
            Self::Attribute { name, value } => match (node.attr_value(name), value) {
                (None, _) => false,
                (Some(attr), None) => attr != &AttrValue::Bool(false),
                (Some(attr), Some(expected)) => attr_matches(attr, expected),
            },
            Self::Compound(parts) => parts.iter().all(|p| p.matches(ancestors, node)),
            Self::Descendant(ancestor, inner) => {
                inner.matches(ancestors, node)
                    && (0..ancestors.len())
                        .any(|i| ancestor.matches(&ancestors[..i], ancestors[i]))
            }
            Self::Child(parent, inner) => {
                inner.matches(ancestors, node)
                    && ancestors
                        .split_last()
                        .is_some_and(|(p, rest)| parent.matches(rest, p))
            }
        }
    }

    /// Child-index paths of every matching node, in document order.
    #[must_use]
    pub fn find_paths<M>(&self, root: &Node<M>) -> Vec<Vec<usize>> {
        let mut results = Vec::new();
        let mut ancestors = Vec::new();
        let mut path = Vec::new();
        self.collect(root, &mut ancestors, &mut path, &mut results);
        results
    }

    fn collect<'a, M>(
        &self,
        node: &'a Node<M>,
        ancestors: &mut Vec<&'a Node<M>>,
        path: &mut Vec<usize>,
        results: &mut Vec<Vec<usize>>,
    ) {
        if self.matches(ancestors, node) {
            results.push(path.clone());
        }
        ancestors.push(node);
        for (i, child) in node.children.iter().enumerate() {
            path.push(i);
            self.collect(child, ancestors, path, results);
            path.pop();
        }
        ancestors.pop();
    }
}

fn attr_matches(attr: &AttrValue, expected: &str) -> bool {
    match attr {
        AttrValue::Str(s) => s == expected,
        AttrValue::Bool(b) => (if *b { "true" } else { "false" }) == expected,
    }
}

/// Selector parser.
pub struct SelectorParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    /// Create a new parser.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Parse the selector.
    pub fn parse(&mut self) -> Result<Selector, SelectorError> {
        self.skip_whitespace();
        if self.peek_char().is_none() {
            return Err(SelectorError::Empty);
        }

        let mut selector = self.parse_compound()?;
        loop {
            let had_space = self.skip_whitespace();
            match self.peek_char() {
                None => return Ok(selector),
                Some('>') => {
                    self.advance();
                    self.skip_whitespace();
                    let inner = self.parse_compound()?;
                    selector = Selector::Child(Box::new(selector), Box::new(inner));
                }
                Some(_) if had_space => {
                    let inner = self.parse_compound()?;
                    selector = Selector::Descendant(Box::new(selector), Box::new(inner));
                }
                Some(c) => return Err(SelectorError::UnexpectedChar(c)),
            }
        }
    }

    fn parse_compound(&mut self) -> Result<Selector, SelectorError> {
        let mut parts = vec![self.parse_simple()?];
        while matches!(self.peek_char(), Some('#' | '.' | '[')) {
            parts.push(self.parse_simple()?);
        }
        Ok(if parts.len() == 1 {
            parts.remove(0)
        } else {
            Selector::Compound(parts)
        })
    }

    fn parse_simple(&mut self) -> Result<Selector, SelectorError> {
        let first = self.peek_char().ok_or(SelectorError::Empty)?;

        match first {
            '#' => self.parse_id(),
            '.' => self.parse_class(),
            '[' => self.parse_attribute(),
            _ if first.is_alphabetic() => self.parse_type(),
            _ => Err(SelectorError::UnexpectedChar(first)),
        }
    }

    fn parse_id(&mut self) -> Result<Selector, SelectorError> {
        self.advance(); // Skip '#'
        let id = self.read_identifier()?;
        Ok(Selector::Id(id))
    }

    fn parse_class(&mut self) -> Result<Selector, SelectorError> {
        self.advance(); // Skip '.'
        let class = self.read_identifier()?;
        Ok(Selector::Class(class))
    }

    fn parse_type(&mut self) -> Result<Selector, SelectorError> {
        let name = self.read_identifier()?;
        Ok(Selector::Type(name))
    }

    fn parse_attribute(&mut self) -> Result<Selector, SelectorError> {
        self.advance(); // Skip '['

        let name = self.read_until_any(&['=', ']']);
        if name.is_empty() {
            return Err(SelectorError::InvalidAttribute);
        }

        let value = if self.peek_char() == Some('=') {
            self.advance();

            let quote = self.peek_char();
            if quote == Some('\'') || quote == Some('"') {
                self.advance();
            }

            let value = self.read_until_any(&['\'', '"', ']']);

            if self.peek_char() == Some('\'') || self.peek_char() == Some('"') {
                self.advance();
            }
            Some(value)
        } else {
            None
        };

        if self.peek_char() != Some(']') {
            return Err(SelectorError::UnclosedAttribute);
        }
        self.advance();

        Ok(match (name.as_str(), value) {
            ("key", Some(key)) => Selector::Key(key),
            (_, value) => Selector::Attribute { name, value },
        })
    }

    fn read_identifier(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        if self.pos == start {
            return Err(SelectorError::ExpectedIdentifier);
        }

        Ok(self.input[start..self.pos].to_string())
    }

    fn read_until_any(&mut self, stops: &[char]) -> String {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if stops.contains(&c) {
                break;
            }
            self.advance();
        }
        self.input[start..self.pos].to_string()
    }

    /// Returns whether any whitespace was skipped.
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
        self.pos > start
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }
}

/// Selector parsing error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// Empty selector
    Empty,
    /// Unexpected character
    UnexpectedChar(char),
    /// Expected identifier
    ExpectedIdentifier,
    /// Invalid attribute syntax
    InvalidAttribute,
    /// Unclosed attribute bracket
    UnclosedAttribute,
}

impl std::fmt::Display for SelectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty selector"),
            Self::UnexpectedChar(c) => write!(f, "unexpected character: '{c}'"),
            Self::ExpectedIdentifier => write!(f, "expected identifier"),
            Self::InvalidAttribute => write!(f, "invalid attribute syntax"),
            Self::UnclosedAttribute => write!(f, "unclosed attribute bracket"),
        }
    }
}

impl std::error::Error for SelectorError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Node<()> {
        Node::element("div")
            .key("root")
            .classes(["select-root"])
            .child(
                Node::element("button")
                    .key("trigger")
                    .attr("id", "fruit")
                    .attr("aria-expanded", "false")
                    .flag("disabled", false),
            )
            .child(
                Node::element("div").key("dropdown").child(
                    Node::component("listbox")
                        .key("listbox")
                        .child(Node::element("div").attr("role", "option"))
                        .child(Node::element("div").attr("role", "option").flag("disabled", true)),
                ),
            )
    }

    fn count(selector: &str) -> usize {
        Selector::parse(selector).unwrap().find_paths(&tree()).len()
    }

    // =========================================================================
    // Parse Tests
    // =========================================================================

    #[test]
    fn test_parse_type() {
        let sel = Selector::parse("button").unwrap();
        assert_eq!(sel, Selector::Type("button".to_string()));
    }

    #[test]
    fn test_parse_id() {
        let sel = Selector::parse("#submit-btn").unwrap();
        assert_eq!(sel, Selector::Id("submit-btn".to_string()));
    }

    #[test]
    fn test_parse_class() {
        let sel = Selector::parse(".select-open").unwrap();
        assert_eq!(sel, Selector::Class("select-open".to_string()));
    }

    #[test]
    fn test_parse_key() {
        let sel = Selector::parse("[key='trigger']").unwrap();
        assert_eq!(sel, Selector::Key("trigger".to_string()));
        let sel = Selector::parse("[key=\"trigger\"]").unwrap();
        assert_eq!(sel, Selector::Key("trigger".to_string()));
    }

    #[test]
    fn test_parse_attribute() {
        let sel = Selector::parse("[aria-expanded='true']").unwrap();
        assert_eq!(
            sel,
            Selector::Attribute {
                name: "aria-expanded".to_string(),
                value: Some("true".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_attribute_presence() {
        let sel = Selector::parse("[disabled]").unwrap();
        assert_eq!(
            sel,
            Selector::Attribute {
                name: "disabled".to_string(),
                value: None,
            }
        );
    }

    #[test]
    fn test_parse_compound() {
        let sel = Selector::parse("div.select-root[key='root']").unwrap();
        assert_eq!(
            sel,
            Selector::Compound(vec![
                Selector::Type("div".to_string()),
                Selector::Class("select-root".to_string()),
                Selector::Key("root".to_string()),
            ])
        );
    }

    #[test]
    fn test_parse_descendant_and_child() {
        let sel = Selector::parse("[key='dropdown'] > listbox div").unwrap();
        assert_eq!(
            sel,
            Selector::Descendant(
                Box::new(Selector::Child(
                    Box::new(Selector::Key("dropdown".to_string())),
                    Box::new(Selector::Type("listbox".to_string())),
                )),
                Box::new(Selector::Type("div".to_string())),
            )
        );
    }

    #[test]
    fn test_parse_whitespace() {
        let sel = Selector::parse("  button  ").unwrap();
        assert_eq!(sel, Selector::Type("button".to_string()));
    }

    // =========================================================================
    // Error Cases
    // =========================================================================

    #[test]
    fn test_parse_empty_error() {
        assert_eq!(Selector::parse(""), Err(SelectorError::Empty));
        assert_eq!(Selector::parse("   "), Err(SelectorError::Empty));
    }

    #[test]
    fn test_parse_unexpected_char() {
        assert_eq!(Selector::parse("@x"), Err(SelectorError::UnexpectedChar('@')));
        assert_eq!(Selector::parse("div@"), Err(SelectorError::UnexpectedChar('@')));
    }

    #[test]
    fn test_parse_empty_identifier() {
        assert_eq!(Selector::parse("#"), Err(SelectorError::ExpectedIdentifier));
        assert_eq!(Selector::parse("."), Err(SelectorError::ExpectedIdentifier));
    }

    #[test]
    fn test_parse_bad_attribute() {
        assert_eq!(Selector::parse("[='x']"), Err(SelectorError::InvalidAttribute));
        assert_eq!(Selector::parse("[key='x'"), Err(SelectorError::UnclosedAttribute));
    }

    #[test]
    fn test_selector_error_display() {
        assert_eq!(SelectorError::Empty.to_string(), "empty selector");
        assert_eq!(
            SelectorError::UnexpectedChar('@').to_string(),
            "unexpected character: '@'"
        );
        assert_eq!(
            SelectorError::UnclosedAttribute.to_string(),
            "unclosed attribute bracket"
        );
    }

    // =========================================================================
    // Matching Tests
    // =========================================================================

    #[test]
    fn test_match_simple() {
        assert_eq!(count("button"), 1);
        assert_eq!(count("listbox"), 1);
        assert_eq!(count("#fruit"), 1);
        assert_eq!(count(".select-root"), 1);
        assert_eq!(count("[key='listbox']"), 1);
        assert_eq!(count("[role='option']"), 2);
    }

    #[test]
    fn test_match_bool_attributes() {
        assert_eq!(count("[disabled]"), 1);
        assert_eq!(count("[disabled='false']"), 1);
        assert_eq!(count("[disabled='true']"), 1);
    }

    #[test]
    fn test_match_combinators() {
        assert_eq!(count("[key='dropdown'] [role='option']"), 2);
        assert_eq!(count("[key='dropdown'] > [role='option']"), 0);
        assert_eq!(count("listbox > [role='option']"), 2);
        assert_eq!(count("[key='trigger'] [role='option']"), 0);
    }

    proptest::proptest! {
        #[test]
        fn prop_class_and_key_selectors_parse(name in "[a-z][a-z0-9_-]{0,12}") {
            proptest::prop_assert_eq!(
                Selector::parse(&format!(".{name}")).unwrap(),
                Selector::Class(name.clone())
            );
            proptest::prop_assert_eq!(
                Selector::parse(&format!("[key='{name}']")).unwrap(),
                Selector::Key(name)
            );
        }
    }

    #[test]
    fn test_find_paths_document_order() {
        let paths = Selector::parse("div").unwrap().find_paths(&tree());
        assert_eq!(
            paths,
            vec![vec![], vec![1], vec![1, 0, 0], vec![1, 0, 1]]
        );
    }
}

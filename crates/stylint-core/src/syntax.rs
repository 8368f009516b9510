//! Syntactic classification of source text.
//!
//! Rules match textual patterns, then consult the syntax tokens a match
//! covers to tell real language constructs apart from look-alikes inside
//! strings or comments. The [`Tokenizer`] trait is the seam to whatever
//! classifier a driver plugs in; [`BasicTokenizer`] is a lexical classifier
//! for Swift-like sources that is good enough for pattern filtering.

use serde::Serialize;
use std::ops::Range;

/// Syntactic category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntaxKind {
    /// Reserved word (`else`, `func`, ...).
    Keyword,
    /// Identifier, including backtick-escaped keywords.
    Identifier,
    /// Numeric literal.
    Number,
    /// String literal.
    String,
    /// Line or block comment.
    Comment,
    /// Attribute such as `@objc`.
    Attribute,
}

impl SyntaxKind {
    /// Returns true for kinds whose text is not code (strings and comments).
    #[must_use]
    pub fn is_literal_text(self) -> bool {
        matches!(self, Self::String | Self::Comment)
    }
}

/// A classified span of source text, as byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxToken {
    /// Byte range of the token.
    pub range: Range<usize>,
    /// Category of the token.
    pub kind: SyntaxKind,
}

impl SyntaxToken {
    /// Creates a new token.
    #[must_use]
    pub fn new(range: Range<usize>, kind: SyntaxKind) -> Self {
        Self { range, kind }
    }

    /// Returns true if this token overlaps `range`.
    #[must_use]
    pub fn intersects(&self, range: &Range<usize>) -> bool {
        self.range.start < range.end && range.start < self.range.end
    }
}

/// A pattern match together with the syntax tokens it intersects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxMatch {
    /// Byte range of the whole match.
    pub range: Range<usize>,
    /// Tokens overlapping the match, in source order.
    pub tokens: Vec<SyntaxToken>,
}

impl SyntaxMatch {
    /// Returns the kinds of the intersecting tokens, in source order.
    #[must_use]
    pub fn kinds(&self) -> Vec<SyntaxKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }

    /// Returns true if the first token in the match has the given kind.
    #[must_use]
    pub fn starts_with(&self, kind: SyntaxKind) -> bool {
        self.tokens.first().is_some_and(|t| t.kind == kind)
    }

    /// Returns the first token of the given kind.
    #[must_use]
    pub fn first_of(&self, kind: SyntaxKind) -> Option<&SyntaxToken> {
        self.tokens.iter().find(|t| t.kind == kind)
    }
}

/// Classifies source text into syntax tokens.
///
/// Implementations must return tokens ordered by start offset and must not
/// return overlapping tokens. Text that is neither of the [`SyntaxKind`]s
/// (whitespace, punctuation, operators) produces no token.
pub trait Tokenizer: Send + Sync {
    /// Tokenizes the given text.
    fn tokenize(&self, text: &str) -> Vec<SyntaxToken>;
}

/// Reserved words of the Swift-like language.
const KEYWORDS: &[&str] = &[
    "as",
    "associatedtype",
    "break",
    "case",
    "catch",
    "class",
    "continue",
    "default",
    "defer",
    "deinit",
    "do",
    "else",
    "enum",
    "extension",
    "fallthrough",
    "false",
    "fileprivate",
    "for",
    "func",
    "guard",
    "if",
    "import",
    "in",
    "init",
    "inout",
    "internal",
    "is",
    "let",
    "nil",
    "open",
    "operator",
    "private",
    "protocol",
    "public",
    "repeat",
    "rethrows",
    "return",
    "self",
    "Self",
    "static",
    "struct",
    "subscript",
    "super",
    "switch",
    "throw",
    "throws",
    "true",
    "try",
    "typealias",
    "var",
    "where",
    "while",
];

/// Lexical classifier for Swift-like source text.
///
/// Recognizes `//` and nested `/* */` comments, string literals (escapes,
/// `"""` multi-line and `#"..."#` raw forms), numbers, attributes, keywords,
/// and identifiers. A backtick-escaped keyword is an identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicTokenizer;

impl Tokenizer for BasicTokenizer {
    fn tokenize(&self, text: &str) -> Vec<SyntaxToken> {
        Lexer::new(text).run()
    }
}

struct Lexer<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    tokens: Vec<SyntaxToken>,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<SyntaxToken> {
        while let Some(c) = self.peek_char() {
            let start = self.pos;
            if self.text[start..].starts_with("//") {
                self.skip_line();
                self.push(start, SyntaxKind::Comment);
            } else if self.text[start..].starts_with("/*") {
                self.skip_block_comment();
                self.push(start, SyntaxKind::Comment);
            } else if c == '"' || (c == '#' && self.raw_string_ahead()) {
                self.skip_string();
                self.push(start, SyntaxKind::String);
            } else if c == '`' {
                self.skip_escaped_identifier();
                self.push(start, SyntaxKind::Identifier);
            } else if c == '@' && self.char_after(start + 1).is_some_and(is_ident_start) {
                self.pos += 1;
                self.skip_while(is_ident_continue);
                self.push(start, SyntaxKind::Attribute);
            } else if c.is_ascii_digit() {
                self.skip_number();
                self.push(start, SyntaxKind::Number);
            } else if is_ident_start(c) {
                self.skip_while(is_ident_continue);
                let kind = if KEYWORDS.contains(&&self.text[start..self.pos]) {
                    SyntaxKind::Keyword
                } else {
                    SyntaxKind::Identifier
                };
                self.push(start, kind);
            } else {
                self.pos += c.len_utf8();
            }
        }
        self.tokens
    }

    fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn char_after(&self, offset: usize) -> Option<char> {
        self.text.get(offset..).and_then(|s| s.chars().next())
    }

    fn push(&mut self, start: usize, kind: SyntaxKind) {
        self.tokens.push(SyntaxToken::new(start..self.pos, kind));
    }

    fn skip_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek_char() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn skip_line(&mut self) {
        self.skip_while(|c| c != '\n');
    }

    fn skip_block_comment(&mut self) {
        let mut depth = 0usize;
        while self.pos < self.bytes.len() {
            let rest = &self.text[self.pos..];
            if rest.starts_with("/*") {
                depth += 1;
                self.pos += 2;
            } else if rest.starts_with("*/") {
                depth -= 1;
                self.pos += 2;
                if depth == 0 {
                    return;
                }
            } else {
                self.pos += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    /// Whether the `#` at the cursor opens a raw string (`#"`, `##"`, ...).
    fn raw_string_ahead(&self) -> bool {
        let hashes = self.bytes[self.pos..].iter().take_while(|&&b| b == b'#').count();
        self.bytes.get(self.pos + hashes) == Some(&b'"')
    }

    /// Skips a string literal, raw (`#"..."#`) or multi-line (`"""`)
    /// included.
    ///
    /// An unterminated single-line string ends at the newline; an
    /// unterminated multi-line string runs to the end of the text.
    fn skip_string(&mut self) {
        let hashes = self.bytes[self.pos..].iter().take_while(|&&b| b == b'#').count();
        self.pos += hashes;
        let multiline = self.text[self.pos..].starts_with("\"\"\"");
        let quotes = if multiline { 3 } else { 1 };
        self.pos += quotes;

        let delimiter = format!("{}{}", "\"".repeat(quotes), "#".repeat(hashes));
        let escape = format!("\\{}", "#".repeat(hashes));
        while let Some(c) = self.peek_char() {
            let rest = &self.text[self.pos..];
            if rest.starts_with(&escape) {
                self.pos += escape.len();
                if let Some(escaped) = self.peek_char() {
                    if escaped != '\n' || multiline {
                        self.pos += escaped.len_utf8();
                    }
                }
            } else if rest.starts_with(&delimiter) {
                self.pos += delimiter.len();
                return;
            } else if c == '\n' && !multiline {
                return;
            } else {
                self.pos += c.len_utf8();
            }
        }
    }

    fn skip_escaped_identifier(&mut self) {
        self.pos += 1;
        self.skip_while(|c| c != '`' && c != '\n');
        if self.peek_char() == Some('`') {
            self.pos += 1;
        }
    }

    fn skip_number(&mut self) {
        loop {
            self.skip_while(|c| c.is_ascii_alphanumeric() || c == '_');
            let fraction = self.bytes.get(self.pos) == Some(&b'.')
                && self.bytes.get(self.pos + 1).is_some_and(u8::is_ascii_digit);
            if !fraction {
                return;
            }
            self.pos += 1;
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(String, SyntaxKind)> {
        BasicTokenizer
            .tokenize(text)
            .into_iter()
            .map(|t| (text[t.range].to_string(), t.kind))
            .collect()
    }

    #[test]
    fn classifies_keywords_and_identifiers() {
        assert_eq!(
            kinds("} else if foo {"),
            vec![
                ("else".to_string(), SyntaxKind::Keyword),
                ("if".to_string(), SyntaxKind::Keyword),
                ("foo".to_string(), SyntaxKind::Identifier),
            ]
        );
    }

    #[test]
    fn keyword_prefix_is_an_identifier() {
        assert_eq!(
            kinds("let catchphrase"),
            vec![
                ("let".to_string(), SyntaxKind::Keyword),
                ("catchphrase".to_string(), SyntaxKind::Identifier),
            ]
        );
    }

    #[test]
    fn backtick_keyword_is_an_identifier() {
        assert_eq!(
            kinds("`catch`: 0"),
            vec![
                ("`catch`".to_string(), SyntaxKind::Identifier),
                ("0".to_string(), SyntaxKind::Number),
            ]
        );
    }

    #[test]
    fn strings_swallow_keywords_and_escapes() {
        assert_eq!(
            kinds(r#""}else{ \" catch" x"#),
            vec![
                (r#""}else{ \" catch""#.to_string(), SyntaxKind::String),
                ("x".to_string(), SyntaxKind::Identifier),
            ]
        );
    }

    #[test]
    fn multiline_string_is_one_token() {
        let text = "let s = \"\"\"\n}\nelse \"quoted\"\n\"\"\"\nelse";
        let tokens = BasicTokenizer.tokenize(text);
        let string = &tokens[2];
        assert_eq!(string.kind, SyntaxKind::String);
        assert_eq!(&text[string.range.clone()], "\"\"\"\n}\nelse \"quoted\"\n\"\"\"");
        assert_eq!(tokens[3].kind, SyntaxKind::Keyword);
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn raw_strings_end_at_matching_hashes() {
        assert_eq!(
            kinds(r###"#"a "quoted" \ else"# ##"x"#y"## z"###),
            vec![
                (r###"#"a "quoted" \ else"#"###.to_string(), SyntaxKind::String),
                (r###"##"x"#y"##"###.to_string(), SyntaxKind::String),
                ("z".to_string(), SyntaxKind::Identifier),
            ]
        );
    }

    #[test]
    fn unterminated_multiline_string_runs_to_end() {
        let tokens = BasicTokenizer.tokenize("\"\"\"\nelse\n");
        assert_eq!(tokens, vec![SyntaxToken::new(0..9, SyntaxKind::String)]);
    }

    #[test]
    fn unterminated_string_stops_at_newline() {
        let tokens = BasicTokenizer.tokenize("\"abc\nelse");
        assert_eq!(tokens[0], SyntaxToken::new(0..4, SyntaxKind::String));
        assert_eq!(tokens[1], SyntaxToken::new(5..9, SyntaxKind::Keyword));
    }

    #[test]
    fn comments_are_single_tokens() {
        assert_eq!(
            kinds("// else\n/* a /* nested */ catch */ do"),
            vec![
                ("// else".to_string(), SyntaxKind::Comment),
                ("/* a /* nested */ catch */".to_string(), SyntaxKind::Comment),
                ("do".to_string(), SyntaxKind::Keyword),
            ]
        );
    }

    #[test]
    fn numbers_and_attributes() {
        assert_eq!(
            kinds("@objc let x = 3.14 + 0x1F"),
            vec![
                ("@objc".to_string(), SyntaxKind::Attribute),
                ("let".to_string(), SyntaxKind::Keyword),
                ("x".to_string(), SyntaxKind::Identifier),
                ("3.14".to_string(), SyntaxKind::Number),
                ("0x1F".to_string(), SyntaxKind::Number),
            ]
        );
    }

    #[test]
    fn non_ascii_text_keeps_byte_offsets() {
        let text = "let é = \"ü\"";
        let tokens = BasicTokenizer.tokenize(text);
        assert_eq!(&text[tokens[1].range.clone()], "é");
        assert_eq!(&text[tokens[2].range.clone()], "\"ü\"");
    }

    #[test]
    fn syntax_match_helpers() {
        let m = SyntaxMatch {
            range: 0..10,
            tokens: vec![
                SyntaxToken::new(2..6, SyntaxKind::Keyword),
                SyntaxToken::new(7..9, SyntaxKind::Identifier),
            ],
        };
        assert!(m.starts_with(SyntaxKind::Keyword));
        assert_eq!(m.kinds(), vec![SyntaxKind::Keyword, SyntaxKind::Identifier]);
        assert_eq!(
            m.first_of(SyntaxKind::Identifier).map(|t| t.range.clone()),
            Some(7..9)
        );
        assert!(m.tokens[0].intersects(&(5..8)));
        assert!(!m.tokens[0].intersects(&(6..8)));
    }
}

//! XML Tokenizer - State machine for XML token extraction
//!
//! Implements a pull-parser style tokenizer that extracts XML tokens:
//! - Element start/end tags
//! - Text content (raw, references not yet expanded)
//! - CDATA sections
//! - Comments
//! - Processing instructions
//! - DOCTYPE declarations (parsed into `DtdDeclarations`)
//!
//! The tokenizer knows nothing about nesting or entities; that is the
//! reader's job.

use super::dtd::{self, DtdDeclarations};
use super::scanner::Scanner;
use crate::error::{ParseError, Position, Result};

/// Type of XML token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Element start tag: <element>
    StartTag,
    /// Element end tag: </element>
    EndTag,
    /// Empty element: <element/>
    EmptyTag,
    /// Text content
    Text,
    /// CDATA section: <![CDATA[...]]>
    CData,
    /// Comment: <!--...-->
    Comment,
    /// Processing instruction: <?target ...?>
    ProcessingInstruction,
    /// XML declaration: <?xml ...?>
    XmlDeclaration,
    /// DOCTYPE declaration
    DocType,
    /// End of input
    Eof,
}

/// A token borrowed from the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Byte span in input (start, end)
    pub span: (usize, usize),
    /// For tags and PIs: the name or target
    pub name: Option<&'a str>,
    /// For start tags: the raw attribute section. For text, CDATA and
    /// comments: the raw content.
    pub content: Option<&'a str>,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, span: (usize, usize)) -> Self {
        Token {
            kind,
            span,
            name: None,
            content: None,
        }
    }

    fn with_name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    fn with_content(mut self, content: &'a str) -> Self {
        self.content = Some(content);
        self
    }
}

/// XML tokenizer implementing a pull-parser pattern
pub struct Tokenizer<'a> {
    input: &'a str,
    scanner: Scanner<'a>,
    done: bool,
    /// Declarations from the most recent DOCTYPE token, until taken
    declarations: Option<DtdDeclarations>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            input,
            scanner: Scanner::new(input.as_bytes()),
            done: false,
            declarations: None,
        }
    }

    /// Take the declarations parsed from the DOCTYPE token just returned
    pub fn take_declarations(&mut self) -> Option<DtdDeclarations> {
        self.declarations.take()
    }

    /// Get the next token; `Eof` is returned once, then `None`
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        if self.done {
            return Ok(None);
        }

        let start = self.scanner.position();
        let token = match self.scanner.peek() {
            None => {
                self.done = true;
                Token::new(TokenKind::Eof, (start, start))
            }
            Some(b'<') => self.parse_markup(start)?,
            Some(_) => self.parse_text(start),
        };
        Ok(Some(token))
    }

    /// Parse markup starting with '<'
    fn parse_markup(&mut self, start: usize) -> Result<Token<'a>> {
        let rest = self.scanner.remaining();
        if rest.starts_with(b"</") {
            self.parse_end_tag(start)
        } else if rest.starts_with(b"<!--") {
            self.parse_delimited(start, 4, b"-->", TokenKind::Comment, "unterminated comment")
        } else if rest.starts_with(b"<![CDATA[") {
            self.parse_delimited(start, 9, b"]]>", TokenKind::CData, "unterminated CDATA section")
        } else if rest.starts_with(b"<!DOCTYPE") {
            self.parse_doctype(start)
        } else if rest.starts_with(b"<?") {
            self.parse_pi(start)
        } else if rest.starts_with(b"<!") {
            Err(self.error_at("invalid declaration: expected comment, CDATA, or DOCTYPE", start))
        } else {
            self.parse_start_tag(start)
        }
    }

    /// Parse a start tag or empty element tag
    fn parse_start_tag(&mut self, start: usize) -> Result<Token<'a>> {
        self.scanner.advance(1);
        let name = self.read_name(start, "invalid element name: must start with letter, underscore, or colon")?;
        let attrs_start = self.scanner.position();

        let end = self
            .scanner
            .find_tag_end_quoted()
            .ok_or_else(|| self.error_at(format!("unterminated start tag <{name}>"), start))?;

        let is_empty = end > attrs_start && self.input.as_bytes()[end - 1] == b'/';
        let attrs_end = if is_empty { end - 1 } else { end };
        self.scanner.set_position(end + 1);

        let kind = if is_empty { TokenKind::EmptyTag } else { TokenKind::StartTag };
        Ok(Token::new(kind, (start, end + 1))
            .with_name(name)
            .with_content(&self.input[attrs_start..attrs_end]))
    }

    /// Parse an end tag
    fn parse_end_tag(&mut self, start: usize) -> Result<Token<'a>> {
        self.scanner.advance(2);
        let name = self.read_name(start, "invalid element name in end tag")?;
        self.scanner.skip_whitespace();

        if self.scanner.peek() != Some(b'>') {
            return Err(self.error_at(format!("malformed end tag </{name}>"), start).with_name(name));
        }
        self.scanner.advance(1);
        Ok(Token::new(TokenKind::EndTag, (start, self.scanner.position())).with_name(name))
    }

    /// Parse a construct with fixed opener length and terminator (comment, CDATA)
    fn parse_delimited(
        &mut self,
        start: usize,
        opener: usize,
        terminator: &[u8],
        kind: TokenKind,
        message: &str,
    ) -> Result<Token<'a>> {
        self.scanner.advance(opener);
        let content_start = self.scanner.position();
        let content_end = self
            .scanner
            .find_seq(terminator)
            .ok_or_else(|| self.error_at(message, start))?;
        self.scanner.set_position(content_end + terminator.len());

        Ok(Token::new(kind, (start, self.scanner.position()))
            .with_content(&self.input[content_start..content_end]))
    }

    fn parse_doctype(&mut self, start: usize) -> Result<Token<'a>> {
        let (declarations, end) = dtd::parse_doctype(self.input.as_bytes(), start)?;
        self.scanner.set_position(end);
        self.declarations = Some(declarations);

        // parse_doctype already checked that a name follows the keyword
        let mut names = Scanner::at(self.input.as_bytes(), start + b"<!DOCTYPE".len());
        names.skip_whitespace();
        let name_start = names.position();
        let name_len = names.read_name().map_or(0, <[u8]>::len);

        Ok(Token::new(TokenKind::DocType, (start, end)).with_name(&self.input[name_start..name_start + name_len]))
    }

    /// Parse a processing instruction or XML declaration
    fn parse_pi(&mut self, start: usize) -> Result<Token<'a>> {
        self.scanner.advance(2);
        let target = self.read_name(start, "processing instruction requires a target")?;
        let content_start = self.scanner.position();
        let content_end = self
            .scanner
            .find_seq(b"?>")
            .ok_or_else(|| self.error_at("unterminated processing instruction", start))?;
        self.scanner.set_position(content_end + 2);

        let kind = if target == "xml" {
            if start != 0 {
                return Err(self.error_at("XML declaration must be at the very start of the document", start));
            }
            TokenKind::XmlDeclaration
        } else {
            TokenKind::ProcessingInstruction
        };
        Ok(Token::new(kind, (start, self.scanner.position()))
            .with_name(target)
            .with_content(&self.input[content_start..content_end]))
    }

    /// Parse text content up to the next '<'
    fn parse_text(&mut self, start: usize) -> Token<'a> {
        let end = self.scanner.find_tag_start().unwrap_or(self.input.len());
        self.scanner.set_position(end);
        Token::new(TokenKind::Text, (start, end)).with_content(&self.input[start..end])
    }

    fn read_name(&mut self, start: usize, message: &str) -> Result<&'a str> {
        let name_start = self.scanner.position();
        match self.scanner.read_name() {
            Some(name) => Ok(&self.input[name_start..name_start + name.len()]),
            None => Err(self.error_at(message, start)),
        }
    }

    fn error_at(&self, message: impl Into<String>, offset: usize) -> ParseError {
        ParseError::malformed(message).at(Position::locate(self.input.as_bytes(), offset))
    }
}

/// Iterator adapter for tokenizer; stops at `Eof`
impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(Some(token)) if token.kind == TokenKind::Eof => None,
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => None,
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Tokenizer::new(input).map(|t| t.unwrap().kind).collect()
    }

    #[test]
    fn test_simple_element() {
        let mut tok = Tokenizer::new("<keb>content</keb>");

        let t1 = tok.next_token().unwrap().unwrap();
        assert_eq!(t1.kind, TokenKind::StartTag);
        assert_eq!(t1.name, Some("keb"));

        let t2 = tok.next_token().unwrap().unwrap();
        assert_eq!(t2.kind, TokenKind::Text);
        assert_eq!(t2.content, Some("content"));

        let t3 = tok.next_token().unwrap().unwrap();
        assert_eq!(t3.kind, TokenKind::EndTag);
        assert_eq!(t3.name, Some("keb"));

        assert_eq!(tok.next_token().unwrap().unwrap().kind, TokenKind::Eof);
        assert!(tok.next_token().unwrap().is_none());
    }

    #[test]
    fn test_empty_element_with_attributes() {
        let mut tok = Tokenizer::new(r#"<gloss g_type="lit" xml:lang="ger"/>"#);
        let t = tok.next_token().unwrap().unwrap();
        assert_eq!(t.kind, TokenKind::EmptyTag);
        assert_eq!(t.name, Some("gloss"));
        assert_eq!(t.content, Some(r#" g_type="lit" xml:lang="ger""#));
    }

    #[test]
    fn test_quoted_gt_in_attribute() {
        let mut tok = Tokenizer::new(r#"<a v="1>2">x</a>"#);
        let t = tok.next_token().unwrap().unwrap();
        assert_eq!(t.content, Some(r#" v="1>2""#));
    }

    #[test]
    fn test_cdata_and_comment() {
        let mut tok = Tokenizer::new("<![CDATA[<b>&x;</b>]]><!-- note -->");
        let t = tok.next_token().unwrap().unwrap();
        assert_eq!(t.kind, TokenKind::CData);
        assert_eq!(t.content, Some("<b>&x;</b>"));
        let t = tok.next_token().unwrap().unwrap();
        assert_eq!(t.kind, TokenKind::Comment);
        assert_eq!(t.content, Some(" note "));
    }

    #[test]
    fn test_prolog() {
        let input = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE JMdict [\n<!ENTITY n \"noun\">\n]>\n<JMdict/>";
        assert_eq!(
            kinds(input),
            vec![
                TokenKind::XmlDeclaration,
                TokenKind::Text,
                TokenKind::DocType,
                TokenKind::Text,
                TokenKind::EmptyTag,
            ]
        );

        let mut tok = Tokenizer::new(input);
        tok.next_token().unwrap();
        tok.next_token().unwrap();
        let doctype = tok.next_token().unwrap().unwrap();
        assert_eq!(doctype.name, Some("JMdict"));
        let decls = tok.take_declarations().unwrap();
        assert!(decls.entities.contains_key("n"));
    }

    #[test]
    fn test_late_xml_declaration_rejected() {
        let err = Tokenizer::new(" <?xml version=\"1.0\"?><a/>")
            .find_map(|t| t.err())
            .unwrap();
        assert_eq!(err.kind, ErrorKind::MalformedDocument);
    }

    #[test]
    fn test_unterminated_constructs() {
        for input in ["<entry", "<!-- open", "<![CDATA[ open", "<?pi open", "</entry", "<!ELEMENT x>", "< a>"] {
            let err = Tokenizer::new(input).find_map(|t| t.err());
            assert!(err.is_some(), "input: {input}");
        }
    }

    #[test]
    fn test_error_position() {
        let err = Tokenizer::new("<a>\n<b\n").find_map(|t| t.err()).unwrap();
        let pos = err.position.unwrap();
        assert_eq!((pos.line, pos.column), (2, 1));
    }
}

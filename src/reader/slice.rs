//! Event Reader over a UTF-8 Buffer
//!
//! Turns tokenizer output into `XmlEvent`s, enforcing well-formedness (tag
//! nesting, a single root, no stray text outside it) and expanding entity
//! references through the document's own DTD declarations. Element names and
//! unexpanded text are borrowed from the input.

use std::borrow::Cow;

use super::events::{EndElement, StartElement, XmlEvent};
use crate::core::attributes::parse_attributes;
use crate::core::entities::EntityResolver;
use crate::core::tokenizer::{Tokenizer, TokenKind};
use crate::error::{ParseError, Position, Result};

/// Pull reader producing expanded XML events from a string slice
pub struct EventReader<'a> {
    input: &'a str,
    tokenizer: Tokenizer<'a>,
    resolver: EntityResolver,
    /// Names of the currently open elements
    stack: Vec<&'a str>,
    seen_root: bool,
    /// End event owed for an empty element tag
    pending_end: Option<&'a str>,
    /// Start offset of the token behind the last event
    offset: usize,
}

impl<'a> EventReader<'a> {
    /// Create a reader whose entity substitutions may produce at most
    /// `max_entity_expansion` characters in total
    pub fn new(input: &'a str, max_entity_expansion: usize) -> Self {
        EventReader {
            input,
            tokenizer: Tokenizer::new(input),
            resolver: EntityResolver::new(max_entity_expansion),
            stack: Vec::new(),
            seen_root: false,
            pending_end: None,
            offset: 0,
        }
    }

    /// Location of the token behind the most recent event
    pub fn position(&self) -> Position {
        Position::locate(self.input.as_bytes(), self.offset)
    }

    /// The entity resolver, for its declarations and expansion count
    pub fn resolver(&self) -> &EntityResolver {
        &self.resolver
    }

    /// Get the next XML event; `EndDocument` repeats once input is exhausted
    pub fn next_event(&mut self) -> Result<XmlEvent<'a>> {
        self.read_event().map_err(|err| err.at(self.position()))
    }

    fn read_event(&mut self) -> Result<XmlEvent<'a>> {
        if let Some(name) = self.pending_end.take() {
            self.stack.pop();
            return Ok(XmlEvent::EndElement(EndElement { name }));
        }

        loop {
            let Some(token) = self.tokenizer.next_token()? else {
                return Ok(XmlEvent::EndDocument);
            };
            self.offset = token.span.0;

            match token.kind {
                TokenKind::StartTag | TokenKind::EmptyTag => {
                    let name = token.name.unwrap_or_default();
                    if self.stack.is_empty() {
                        if self.seen_root {
                            return Err(ParseError::malformed(format!(
                                "element <{name}> follows the root element"
                            ))
                            .with_name(name));
                        }
                        self.seen_root = true;
                    }

                    let attributes = parse_attributes(token.content.unwrap_or_default(), &mut self.resolver)?;
                    self.stack.push(name);
                    if token.kind == TokenKind::EmptyTag {
                        self.pending_end = Some(name);
                    }
                    return Ok(XmlEvent::StartElement(StartElement::new(name, attributes)));
                }

                TokenKind::EndTag => {
                    let name = token.name.unwrap_or_default();
                    return match self.stack.pop() {
                        Some(open) if open == name => Ok(XmlEvent::EndElement(EndElement { name })),
                        Some(open) => Err(ParseError::malformed(format!(
                            "mismatched end tag: expected </{open}>, found </{name}>"
                        ))
                        .with_name(name)),
                        None => Err(ParseError::malformed(format!("unexpected end tag </{name}>")).with_name(name)),
                    };
                }

                TokenKind::Text => {
                    let content = token.content.unwrap_or_default();
                    if self.stack.is_empty() {
                        if !content.bytes().all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r')) {
                            return Err(ParseError::malformed("text outside the root element"));
                        }
                        continue;
                    }
                    return Ok(XmlEvent::Text(self.resolver.expand(content)?));
                }

                TokenKind::CData => {
                    if self.stack.is_empty() {
                        return Err(ParseError::malformed("CDATA section outside the root element"));
                    }
                    return Ok(XmlEvent::Text(Cow::Borrowed(token.content.unwrap_or_default())));
                }

                TokenKind::DocType => {
                    if self.seen_root {
                        return Err(ParseError::malformed("DOCTYPE must precede the root element"));
                    }
                    if let Some(declarations) = self.tokenizer.take_declarations() {
                        self.resolver.set_declarations(declarations);
                    }
                }

                TokenKind::Comment | TokenKind::ProcessingInstruction | TokenKind::XmlDeclaration => {}

                TokenKind::Eof => {
                    if let Some(open) = self.stack.last() {
                        let open = *open;
                        return Err(ParseError::malformed(format!("unterminated element <{open}>")).with_name(open));
                    }
                    if !self.seen_root {
                        return Err(ParseError::malformed("document has no root element"));
                    }
                    return Ok(XmlEvent::EndDocument);
                }
            }
        }
    }
}

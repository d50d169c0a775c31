//! DOCTYPE and Internal Subset Declarations
//!
//! Collects general entity declarations from the internal DTD subset and
//! validates them before any content is expanded. Element, attribute-list and
//! notation declarations are skipped: the dictionaries are not validated
//! against their DTD. Nothing is ever fetched for external identifiers.

use std::collections::{HashMap, HashSet};

use super::scanner::Scanner;
use crate::error::{ErrorKind, ParseError, Position, Result};

/// Collected declarations from a DOCTYPE
#[derive(Debug, Default, Clone)]
pub struct DtdDeclarations {
    /// Root element name given in the DOCTYPE
    pub root_name: Option<String>,
    /// General entities: name -> definition
    pub entities: HashMap<String, EntityDecl>,
    /// Parameter entity names; they are recorded but can never be referenced
    pub parameter_entities: HashSet<String>,
    /// True when the DOCTYPE names an external subset (SYSTEM or PUBLIC id)
    pub has_external_subset: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityValue {
    /// Replacement text, entity references still unexpanded
    Internal(String),
    /// SYSTEM/PUBLIC entity, parsed or unparsed (NDATA)
    External { system_id: String, public_id: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDecl {
    pub value: EntityValue,
    /// Entities referenced in the replacement text
    pub references: Vec<String>,
}

impl EntityDecl {
    pub fn internal(value: impl Into<String>) -> Self {
        let value = value.into();
        let references = extract_entity_references(&value);
        EntityDecl { value: EntityValue::Internal(value), references }
    }
}

impl DtdDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a general entity declaration. The first declaration of a name is binding.
    pub fn add_entity(&mut self, name: String, decl: EntityDecl) {
        self.entities.entry(name).or_insert(decl);
    }

    /// Validate all declarations (before content is parsed)
    pub fn validate(&self) -> Result<()> {
        self.check_entity_recursion()
    }

    /// Check for circular entity references
    ///
    /// One depth-first walk over the reference graph: reaching an entity
    /// that is still being walked closes a cycle.
    fn check_entity_recursion(&self) -> Result<()> {
        let mut marks: HashMap<&str, Mark> = HashMap::with_capacity(self.entities.len());

        for (root, decl) in &self.entities {
            if marks.contains_key(root.as_str()) {
                continue;
            }
            marks.insert(root.as_str(), Mark::Open);
            let mut stack = vec![(root.as_str(), decl.references.iter())];

            while let Some((current, references)) = stack.last_mut() {
                let Some(next) = references.next() else {
                    marks.insert(*current, Mark::Done);
                    stack.pop();
                    continue;
                };
                let Some(next_decl) = self.entities.get(next) else {
                    continue;
                };
                match marks.get(next.as_str()) {
                    Some(Mark::Open) => {
                        return Err(ParseError::new(
                            ErrorKind::CyclicEntityDeclaration,
                            format!("entity '{next}' references itself (directly or indirectly)"),
                        )
                        .with_name(next.as_str()));
                    }
                    Some(Mark::Done) => {}
                    None => {
                        marks.insert(next.as_str(), Mark::Open);
                        stack.push((next.as_str(), next_decl.references.iter()));
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Open,
    Done,
}

/// Extract the general entity references (not character references) in a value
pub fn extract_entity_references(value: &str) -> Vec<String> {
    let bytes = value.as_bytes();
    let mut refs = Vec::new();
    let mut pos = 0;

    while let Some(offset) = memchr::memchr(b'&', &bytes[pos..]) {
        let start = pos + offset + 1;
        if bytes.get(start) == Some(&b'#') {
            pos = start;
            continue;
        }
        match memchr::memchr(b';', &bytes[start..]) {
            Some(len) => {
                refs.push(value[start..start + len].to_string());
                pos = start + len + 1;
            }
            None => break,
        }
    }

    refs
}

/// Parse a `<!DOCTYPE ...>` declaration starting at `start` (the '<').
///
/// Returns the declarations and the offset just past the closing '>'.
pub fn parse_doctype(input: &[u8], start: usize) -> Result<(DtdDeclarations, usize)> {
    let mut parser = DoctypeParser {
        input,
        scanner: Scanner::at(input, start),
        decls: DtdDeclarations::new(),
    };
    parser.parse()?;
    Ok((parser.decls, parser.scanner.position()))
}

struct DoctypeParser<'a> {
    input: &'a [u8],
    scanner: Scanner<'a>,
    decls: DtdDeclarations,
}

impl<'a> DoctypeParser<'a> {
    fn parse(&mut self) -> Result<()> {
        self.expect(b"<!DOCTYPE")?;
        self.require_whitespace("DOCTYPE")?;

        let name = self.read_name("DOCTYPE declaration requires a name")?;
        self.decls.root_name = Some(name.to_string());
        self.scanner.skip_whitespace();

        if self.scanner.starts_with(b"SYSTEM") || self.scanner.starts_with(b"PUBLIC") {
            self.read_external_id()?;
            self.decls.has_external_subset = true;
            self.scanner.skip_whitespace();
        }

        if self.scanner.peek() == Some(b'[') {
            self.scanner.advance(1);
            self.parse_internal_subset()?;
            self.scanner.skip_whitespace();
        }

        self.expect(b">")?;
        self.decls.validate()
    }

    fn parse_internal_subset(&mut self) -> Result<()> {
        loop {
            self.scanner.skip_whitespace();
            let here = self.scanner.position();

            if self.scanner.starts_with(b"]") {
                self.scanner.advance(1);
                return Ok(());
            } else if self.scanner.starts_with(b"<!ENTITY") {
                self.parse_entity_decl()?;
            } else if self.scanner.starts_with(b"<!--") {
                self.skip_past(b"-->", "unterminated comment in DTD")?;
            } else if self.scanner.starts_with(b"<?") {
                self.skip_past(b"?>", "unterminated processing instruction in DTD")?;
            } else if self.scanner.starts_with(b"<!") {
                // ELEMENT, ATTLIST, NOTATION: not needed for mapping
                let end = self
                    .scanner
                    .find_tag_end_quoted()
                    .ok_or_else(|| self.malformed_at("unterminated markup declaration", here))?;
                self.scanner.set_position(end + 1);
            } else if self.scanner.starts_with(b"%") {
                return Err(self.parameter_reference_error(here));
            } else if self.scanner.is_eof() {
                return Err(self.malformed_at("unterminated DOCTYPE internal subset", here));
            } else {
                return Err(self.malformed_at("unexpected content in DOCTYPE internal subset", here));
            }
        }
    }

    fn parse_entity_decl(&mut self) -> Result<()> {
        self.scanner.advance(b"<!ENTITY".len());
        self.require_whitespace("ENTITY")?;

        let is_parameter = self.scanner.peek() == Some(b'%');
        if is_parameter {
            self.scanner.advance(1);
            self.require_whitespace("'%'")?;
        }

        let name = self.read_name("entity declaration requires a name")?.to_string();
        self.require_whitespace("entity name")?;

        let here = self.scanner.position();
        let decl = match self.scanner.peek() {
            Some(b'"' | b'\'') => {
                let raw = self
                    .scanner
                    .read_quoted()
                    .ok_or_else(|| self.malformed_at("unterminated entity value", here))?;
                if memchr::memchr(b'%', raw).is_some() {
                    return Err(self.parameter_reference_error(here));
                }
                EntityDecl::internal(self.utf8(raw, here)?)
            }
            _ => {
                let (system_id, public_id) = self.read_external_id()?;
                self.scanner.skip_whitespace();
                if self.scanner.starts_with(b"NDATA") {
                    self.scanner.advance(b"NDATA".len());
                    self.require_whitespace("NDATA")?;
                    self.read_name("NDATA requires a notation name")?;
                }
                EntityDecl {
                    value: EntityValue::External { system_id, public_id },
                    references: Vec::new(),
                }
            }
        };

        self.scanner.skip_whitespace();
        self.expect(b">")?;

        if is_parameter {
            self.decls.parameter_entities.insert(name);
        } else {
            self.decls.add_entity(name, decl);
        }
        Ok(())
    }

    /// Read `SYSTEM "uri"` or `PUBLIC "pubid" "uri"`
    fn read_external_id(&mut self) -> Result<(String, Option<String>)> {
        let here = self.scanner.position();
        let public = if self.scanner.starts_with(b"SYSTEM") {
            false
        } else if self.scanner.starts_with(b"PUBLIC") {
            true
        } else {
            return Err(self.malformed_at("expected quoted literal, SYSTEM or PUBLIC", here));
        };
        self.scanner.advance(6);
        self.require_whitespace(if public { "PUBLIC" } else { "SYSTEM" })?;

        let public_id = if public {
            let id = self.read_literal()?;
            self.require_whitespace("public identifier")?;
            Some(id)
        } else {
            None
        };
        let system_id = self.read_literal()?;
        Ok((system_id, public_id))
    }

    fn read_literal(&mut self) -> Result<String> {
        let here = self.scanner.position();
        let raw = self
            .scanner
            .read_quoted()
            .ok_or_else(|| self.malformed_at("expected quoted literal", here))?;
        Ok(self.utf8(raw, here)?.to_string())
    }

    fn read_name(&mut self, message: &str) -> Result<&'a str> {
        let here = self.scanner.position();
        let name = self.scanner.read_name().ok_or_else(|| self.malformed_at(message, here))?;
        self.utf8(name, here)
    }

    fn require_whitespace(&mut self, after: &str) -> Result<()> {
        if self.scanner.skip_whitespace() == 0 {
            let here = self.scanner.position();
            return Err(self.malformed_at(&format!("whitespace required after {after}"), here));
        }
        Ok(())
    }

    fn expect(&mut self, literal: &[u8]) -> Result<()> {
        if !self.scanner.starts_with(literal) {
            let here = self.scanner.position();
            let message = format!("expected '{}' in DOCTYPE", String::from_utf8_lossy(literal));
            return Err(self.malformed_at(&message, here));
        }
        self.scanner.advance(literal.len());
        Ok(())
    }

    fn skip_past(&mut self, terminator: &[u8], message: &str) -> Result<()> {
        let here = self.scanner.position();
        let end = self
            .scanner
            .find_seq(terminator)
            .ok_or_else(|| self.malformed_at(message, here))?;
        self.scanner.set_position(end + terminator.len());
        Ok(())
    }

    fn utf8(&self, bytes: &'a [u8], at: usize) -> Result<&'a str> {
        std::str::from_utf8(bytes).map_err(|_| self.malformed_at("invalid UTF-8 in DOCTYPE", at))
    }

    fn parameter_reference_error(&self, at: usize) -> ParseError {
        ParseError::new(
            ErrorKind::ExternalEntityDisallowed,
            "parameter entity references are not expanded",
        )
        .at(Position::locate(self.input, at))
    }

    fn malformed_at(&self, message: &str, at: usize) -> ParseError {
        ParseError::malformed(message).at(Position::locate(self.input, at))
    }
}

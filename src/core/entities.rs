//! Entity Expansion
//!
//! Expands references in character content and attribute values:
//! - Predefined entities: &lt; &gt; &amp; &quot; &apos;
//! - Numeric character references: &#123; &#x7B;
//! - General entities declared in the internal DTD subset, recursively
//!
//! Every character written while inside a declared entity is charged to a
//! per-parse budget. Passing the ceiling aborts with
//! `EntityExpansionExceeded`, which is what defeats "billion laughs" DTDs.
//! Uses Cow so text without references is never copied.

use memchr::memchr;
use std::borrow::Cow;
use std::collections::HashSet;

use super::dtd::{DtdDeclarations, EntityValue};
use super::scanner::is_name_char;
use crate::error::{ErrorKind, ParseError, Result};

/// Resolves entity references for one parse
#[derive(Debug)]
pub struct EntityResolver {
    declarations: DtdDeclarations,
    state: ExpansionState,
}

/// Mutable part of the resolver: the budget counter
#[derive(Debug)]
struct ExpansionState {
    limit: usize,
    used: usize,
}

/// Replacement text being scanned, and the entity it belongs to
#[derive(Debug, Clone, Copy)]
struct Frame<'a> {
    entity: Option<&'a str>,
    text: &'a str,
    pos: usize,
}

impl EntityResolver {
    /// Resolver with no declarations (predefined and character references only)
    pub fn new(limit: usize) -> Self {
        Self::with_declarations(DtdDeclarations::new(), limit)
    }

    pub fn with_declarations(declarations: DtdDeclarations, limit: usize) -> Self {
        EntityResolver {
            declarations,
            state: ExpansionState { limit, used: 0 },
        }
    }

    pub fn set_declarations(&mut self, declarations: DtdDeclarations) {
        self.declarations = declarations;
    }

    pub fn declarations(&self) -> &DtdDeclarations {
        &self.declarations
    }

    /// Characters produced by declared-entity substitution so far
    pub fn expanded_chars(&self) -> usize {
        self.state.used
    }

    /// Expand all references in `input`
    ///
    /// Returns Borrowed if no references are present (zero-copy).
    #[inline]
    pub fn expand<'t>(&mut self, input: &'t str) -> Result<Cow<'t, str>> {
        if memchr(b'&', input.as_bytes()).is_none() {
            return Ok(Cow::Borrowed(input));
        }
        let mut out = String::with_capacity(input.len());
        self.state.expand_into(&self.declarations, input, &mut out)?;
        Ok(Cow::Owned(out))
    }
}

impl ExpansionState {
    /// Expand `input`; open entities live on an explicit frame stack
    fn expand_into<'a>(&mut self, decls: &'a DtdDeclarations, input: &'a str, out: &mut String) -> Result<()> {
        let mut stack = vec![Frame { entity: None, text: input, pos: 0 }];
        let mut active: HashSet<&'a str> = HashSet::new();

        while let Some(&Frame { text, pos, .. }) = stack.last() {
            let outermost = stack.get(1).and_then(|frame| frame.entity);
            let bytes = text.as_bytes();

            let Some(offset) = memchr(b'&', &bytes[pos..]) else {
                self.emit(outermost, &text[pos..], out)?;
                if let Some(Frame { entity: Some(name), .. }) = stack.pop() {
                    active.remove(name);
                }
                continue;
            };

            let amp = pos + offset;
            self.emit(outermost, &text[pos..amp], out)?;
            let semi = memchr(b';', &bytes[amp..])
                .map(|len| amp + len)
                .ok_or_else(|| ParseError::malformed("unterminated entity reference"))?;
            if let Some(top) = stack.last_mut() {
                top.pos = semi + 1;
            }

            let name = &text[amp + 1..semi];
            if let Some(value) = self.expand_reference(decls, name, outermost, out)? {
                if !active.insert(name) {
                    return Err(ParseError::new(
                        ErrorKind::CyclicEntityDeclaration,
                        format!("entity '{name}' references itself (directly or indirectly)"),
                    )
                    .with_name(name));
                }
                stack.push(Frame { entity: Some(name), text: value, pos: 0 });
            }
        }
        Ok(())
    }

    /// Emit a character or predefined reference directly; for a declared
    /// entity, return its replacement text for the caller to expand
    fn expand_reference<'a>(
        &mut self,
        decls: &'a DtdDeclarations,
        name: &str,
        outermost: Option<&str>,
        out: &mut String,
    ) -> Result<Option<&'a str>> {
        if let Some(digits) = name.strip_prefix('#') {
            let c = decode_char_ref(digits).ok_or_else(|| {
                ParseError::malformed(format!("invalid character reference '&{name};'")).with_name(name)
            })?;
            self.emit(outermost, c.encode_utf8(&mut [0u8; 4]), out)?;
            return Ok(None);
        }

        if name.is_empty() || !name.bytes().all(is_name_char) {
            return Err(ParseError::malformed(format!("invalid entity reference '&{name};'")));
        }

        if let Some(c) = predefined(name) {
            self.emit(outermost, c, out)?;
            return Ok(None);
        }

        match decls.entities.get(name).map(|decl| &decl.value) {
            Some(EntityValue::Internal(value)) => Ok(Some(value.as_str())),
            Some(EntityValue::External { system_id, .. }) => Err(ParseError::new(
                ErrorKind::ExternalEntityDisallowed,
                format!("entity '{name}' refers to external resource '{system_id}'"),
            )
            .with_name(name)),
            None if decls.has_external_subset => Err(ParseError::new(
                ErrorKind::ExternalEntityDisallowed,
                format!("entity '{name}' is not declared internally and the external subset is never read"),
            )
            .with_name(name)),
            None => Err(ParseError::malformed(format!("undeclared entity '{name}'")).with_name(name)),
        }
    }

    /// Append text, charging the budget when inside a declared entity
    fn emit(&mut self, outermost: Option<&str>, text: &str, out: &mut String) -> Result<()> {
        if let Some(outermost) = outermost {
            self.used += text.chars().count();
            if self.used > self.limit {
                return Err(ParseError::new(
                    ErrorKind::EntityExpansionExceeded,
                    format!("entity expansion exceeded the limit of {} characters", self.limit),
                )
                .with_name(outermost));
            }
        }
        out.push_str(text);
        Ok(())
    }
}

fn predefined(name: &str) -> Option<&'static str> {
    match name {
        "lt" => Some("<"),
        "gt" => Some(">"),
        "amp" => Some("&"),
        "quot" => Some("\""),
        "apos" => Some("'"),
        _ => None,
    }
}

/// Decode the digits of a numeric character reference (after '#')
fn decode_char_ref(digits: &str) -> Option<char> {
    let codepoint = match digits.strip_prefix('x') {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };

    if !is_valid_xml_char(codepoint) {
        return None;
    }
    char::from_u32(codepoint)
}

/// Check if a code point is a valid XML 1.0 Char
/// Char ::= #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
#[inline]
pub fn is_valid_xml_char(codepoint: u32) -> bool {
    matches!(codepoint,
        0x9 | 0xA | 0xD |
        0x20..=0xD7FF |
        0xE000..=0xFFFD |
        0x10000..=0x10FFFF
    )
}

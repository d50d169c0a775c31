//! XML Attribute Parsing
//!
//! Parses the attribute section of a start tag. Values are whitespace
//! normalized and then expanded through the document's entity resolver.

use memchr::memchr;
use std::borrow::Cow;

use super::entities::EntityResolver;
use super::scanner::{is_name_char, is_name_start_char, is_whitespace};
use crate::error::{ParseError, Result};

/// A parsed XML attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Attribute name (may include namespace prefix)
    pub name: &'a str,
    /// Local name (after colon, if prefixed)
    pub local_name: &'a str,
    /// Attribute value (entities expanded)
    pub value: Cow<'a, str>,
}

impl<'a> Attribute<'a> {
    pub fn new(name: &'a str, value: Cow<'a, str>) -> Self {
        Attribute {
            name,
            local_name: split_name(name).1,
            value,
        }
    }
}

/// Split a name into prefix and local name at the colon
pub fn split_name(name: &str) -> (Option<&str>, &str) {
    match memchr(b':', name.as_bytes()) {
        Some(colon) => (Some(&name[..colon]), &name[colon + 1..]),
        None => (None, name),
    }
}

/// Parse attributes from raw tag content (between the element name and '>' or '/>')
pub fn parse_attributes<'a>(input: &'a str, resolver: &mut EntityResolver) -> Result<Vec<Attribute<'a>>> {
    let bytes = input.as_bytes();
    let mut attrs: Vec<Attribute<'a>> = Vec::new();
    let mut pos = 0;

    loop {
        let before_ws = pos;
        while pos < bytes.len() && is_whitespace(bytes[pos]) {
            pos += 1;
        }
        if pos >= bytes.len() {
            break;
        }
        if pos == before_ws && !attrs.is_empty() {
            return Err(ParseError::malformed("whitespace required between attributes"));
        }

        if !is_name_start_char(bytes[pos]) {
            return Err(ParseError::malformed(
                "attribute name must start with letter, underscore, or colon",
            ));
        }
        let name_start = pos;
        while pos < bytes.len() && is_name_char(bytes[pos]) {
            pos += 1;
        }
        let name = &input[name_start..pos];

        while pos < bytes.len() && is_whitespace(bytes[pos]) {
            pos += 1;
        }
        if bytes.get(pos) != Some(&b'=') {
            return Err(ParseError::malformed(format!("attribute '{name}' has no value")).with_name(name));
        }
        pos += 1;
        while pos < bytes.len() && is_whitespace(bytes[pos]) {
            pos += 1;
        }

        let quote = match bytes.get(pos) {
            Some(&q @ (b'"' | b'\'')) => q,
            _ => {
                return Err(ParseError::malformed(format!("value of attribute '{name}' must be quoted"))
                    .with_name(name));
            }
        };
        pos += 1;
        let value_end = memchr(quote, &bytes[pos..])
            .map(|len| pos + len)
            .ok_or_else(|| ParseError::malformed(format!("unterminated value for attribute '{name}'")))?;
        let raw = &input[pos..value_end];
        pos = value_end + 1;

        if memchr(b'<', raw.as_bytes()).is_some() {
            return Err(ParseError::malformed(format!("value of attribute '{name}' contains '<'")).with_name(name));
        }
        if attrs.iter().any(|a| a.name == name) {
            return Err(ParseError::malformed(format!("duplicate attribute '{name}'")).with_name(name));
        }

        let value = expand_value(raw, resolver)?;
        attrs.push(Attribute::new(name, value));
    }

    Ok(attrs)
}

/// Normalize literal whitespace to spaces, then expand references
fn expand_value<'a>(raw: &'a str, resolver: &mut EntityResolver) -> Result<Cow<'a, str>> {
    if !raw.bytes().any(|b| matches!(b, b'\t' | b'\n' | b'\r')) {
        return resolver.expand(raw);
    }
    let normalized: String = raw
        .chars()
        .map(|c| if matches!(c, '\t' | '\n' | '\r') { ' ' } else { c })
        .collect();
    Ok(Cow::Owned(resolver.expand(&normalized)?.into_owned()))
}

//! Structural Mapper
//!
//! Walks an [`EventReader`] under a [`NodeSchema`] and assembles a generic
//! [`Record`] tree. The mapper keeps a stack of frames, one per open element:
//!
//! - `Node`: an element with its own schema, collecting fields into a record
//! - `Leaf`: a scalar child, collecting text until its end tag
//! - `Skip`: an element the schema does not know, discarded with its subtree
//!
//! When a frame closes its value is attached to the parent record, appended
//! for sequence fields and stored (or rejected in strict mode) for scalars.
//! The typed model is built from the finished record tree.

use tracing::{trace, warn};

use crate::core::attributes::Attribute;
use crate::error::{ErrorKind, ParseError, Result};
use crate::options::{ParseOptions, UnknownPolicy};
use crate::reader::{EventReader, StartElement, XmlEvent};
use crate::schema::{FieldDef, FieldKind, NodeSchema};

/// One converted field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Text(String),
    Integer(u32),
    Flag,
    Record(Record),
}

/// Slot for one field of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Unset,
    One(Item),
    Many(Vec<Item>),
}

/// Fields collected for one element, indexed like its schema's fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    schema: &'static NodeSchema,
    values: Vec<Value>,
}

impl Record {
    pub fn new(schema: &'static NodeSchema) -> Self {
        Record {
            schema,
            values: vec![Value::Unset; schema.fields.len()],
        }
    }

    /// Value of the named field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.schema.field_index(field).map(|i| &self.values[i])
    }

    /// Store `item` into field `index`
    fn set(&mut self, index: usize, item: Item, strict: bool) -> Result<()> {
        let def = &self.schema.fields[index];
        let slot = &mut self.values[index];

        if def.repeated {
            match slot {
                Value::Many(items) => items.push(item),
                _ => *slot = Value::Many(vec![item]),
            }
            return Ok(());
        }

        if strict && matches!(slot, Value::One(_)) {
            return Err(ParseError::new(
                ErrorKind::UnexpectedRepetition,
                format!("<{}> appears more than once in <{}>", def.source_name(), self.schema.name),
            )
            .with_name(def.source_name()));
        }
        *slot = Value::One(item);
        Ok(())
    }

    /// Apply attribute defaults and turn unset sequences into empty ones
    fn finish(mut self) -> Self {
        for (def, slot) in self.schema.fields.iter().zip(self.values.iter_mut()) {
            if !matches!(slot, Value::Unset) {
                continue;
            }
            if def.repeated {
                *slot = Value::Many(Vec::new());
            } else if let Some(default) = def.default {
                *slot = Value::One(Item::Text(default.to_string()));
            }
        }
        self
    }

    fn take(&mut self, field: &str) -> Value {
        match self.schema.field_index(field) {
            Some(i) => std::mem::replace(&mut self.values[i], Value::Unset),
            None => Value::Unset,
        }
    }

    fn take_one(&mut self, field: &str) -> Option<Item> {
        match self.take(field) {
            Value::One(item) => Some(item),
            Value::Many(items) => items.into_iter().next_back(),
            Value::Unset => None,
        }
    }

    fn take_many(&mut self, field: &str) -> Vec<Item> {
        match self.take(field) {
            Value::Many(items) => items,
            Value::One(item) => vec![item],
            Value::Unset => Vec::new(),
        }
    }

    pub fn take_text(&mut self, field: &str) -> Option<String> {
        match self.take_one(field)? {
            Item::Text(text) => Some(text),
            Item::Integer(n) => Some(n.to_string()),
            Item::Flag | Item::Record(_) => None,
        }
    }

    pub fn take_integer(&mut self, field: &str) -> Option<u32> {
        match self.take_one(field)? {
            Item::Integer(n) => Some(n),
            _ => None,
        }
    }

    /// True when a presence-only child was seen
    pub fn take_flag(&mut self, field: &str) -> bool {
        self.take_one(field).is_some()
    }

    pub fn take_record(&mut self, field: &str) -> Option<Record> {
        match self.take_one(field)? {
            Item::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn take_texts(&mut self, field: &str) -> Vec<String> {
        self.take_many(field)
            .into_iter()
            .filter_map(|item| match item {
                Item::Text(text) => Some(text),
                Item::Integer(n) => Some(n.to_string()),
                Item::Flag | Item::Record(_) => None,
            })
            .collect()
    }

    pub fn take_integers(&mut self, field: &str) -> Vec<u32> {
        self.take_many(field)
            .into_iter()
            .filter_map(|item| match item {
                Item::Integer(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn take_records(&mut self, field: &str) -> Vec<Record> {
        self.take_many(field)
            .into_iter()
            .filter_map(|item| match item {
                Item::Record(record) => Some(record),
                _ => None,
            })
            .collect()
    }
}

enum Frame {
    Node {
        record: Record,
        /// Field of the parent record this node fills; `None` for the root
        slot: Option<usize>,
        text: String,
    },
    Leaf {
        def: &'static FieldDef,
        slot: usize,
        text: String,
    },
    Skip {
        depth: usize,
    },
}

/// Schema-driven tree builder for one parse
pub struct Mapper<'o> {
    options: &'o ParseOptions,
}

impl<'o> Mapper<'o> {
    pub fn new(options: &'o ParseOptions) -> Self {
        Mapper { options }
    }

    /// Map the element opened by `root` (already read from `reader`) and
    /// everything below it, returning once its end tag is consumed
    pub fn map<'a>(
        &self,
        reader: &mut EventReader<'a>,
        root: StartElement<'a>,
        schema: &'static NodeSchema,
    ) -> Result<Record> {
        let mut record = Record::new(schema);
        self.apply_attributes(&mut record, &root.attributes)?;
        let mut stack = vec![Frame::Node {
            record,
            slot: None,
            text: String::new(),
        }];

        loop {
            let step = match reader.next_event()? {
                XmlEvent::StartElement(start) => self.open(&mut stack, start).map(|()| None),
                XmlEvent::Text(content) => {
                    collect_text(&mut stack, &content);
                    Ok(None)
                }
                XmlEvent::EndElement(_) => self.close(&mut stack),
                XmlEvent::EndDocument => Err(ParseError::malformed(format!(
                    "document ended inside <{}>",
                    schema.name
                ))),
            };
            if let Some(record) = step.map_err(|err| err.at(reader.position()))? {
                return Ok(record);
            }
        }
    }

    fn open(&self, stack: &mut Vec<Frame>, start: StartElement<'_>) -> Result<()> {
        let frame = match stack.last_mut() {
            Some(Frame::Skip { depth }) => {
                *depth += 1;
                return Ok(());
            }
            Some(Frame::Leaf { def, .. }) => {
                self.unknown("element", start.name, def.source_name());
                Frame::Skip { depth: 0 }
            }
            Some(Frame::Node { record, .. }) => match record.schema.child(start.name) {
                Some((slot, def)) => match def.kind {
                    FieldKind::Node(schema) => {
                        let mut child = Record::new(schema);
                        self.apply_attributes(&mut child, &start.attributes)?;
                        Frame::Node {
                            record: child,
                            slot: Some(slot),
                            text: String::new(),
                        }
                    }
                    _ => {
                        for attribute in &start.attributes {
                            self.unknown("attribute", attribute.name, start.name);
                        }
                        Frame::Leaf {
                            def,
                            slot,
                            text: String::new(),
                        }
                    }
                },
                None => {
                    self.unknown("element", start.name, record.schema.name);
                    Frame::Skip { depth: 0 }
                }
            },
            None => return Err(ParseError::malformed("element outside the mapped root")),
        };
        stack.push(frame);
        Ok(())
    }

    /// Close the innermost frame; returns the root record once it closes
    fn close(&self, stack: &mut Vec<Frame>) -> Result<Option<Record>> {
        let (slot, item) = match stack.pop() {
            Some(Frame::Skip { depth }) => {
                if depth > 0 {
                    stack.push(Frame::Skip { depth: depth - 1 });
                }
                return Ok(None);
            }
            Some(Frame::Leaf { def, slot, text }) => (slot, convert(def, text)?),
            Some(Frame::Node { mut record, slot, text }) => {
                if let Some((index, def)) = record.schema.text_field() {
                    if !text.trim().is_empty() {
                        let item = convert(def, text)?;
                        record.set(index, item, self.options.strict)?;
                    }
                }
                let record = record.finish();
                match slot {
                    Some(slot) => (slot, Item::Record(record)),
                    None => return Ok(Some(record)),
                }
            }
            None => return Err(ParseError::malformed("end tag outside the mapped root")),
        };

        match stack.last_mut() {
            Some(Frame::Node { record, .. }) => record.set(slot, item, self.options.strict)?,
            _ => return Err(ParseError::malformed("mapped value has no parent element")),
        }
        Ok(None)
    }

    fn apply_attributes(&self, record: &mut Record, attributes: &[Attribute<'_>]) -> Result<()> {
        for attribute in attributes {
            match record.schema.attribute(attribute.local_name) {
                Some((slot, def)) => {
                    let item = convert(def, attribute.value.to_string())?;
                    record.set(slot, item, self.options.strict)?;
                }
                // Namespace declarations are never data
                None if attribute.name == "xmlns" || attribute.name.starts_with("xmlns:") => {}
                None => self.unknown("attribute", attribute.name, record.schema.name),
            }
        }
        Ok(())
    }

    fn unknown(&self, what: &str, name: &str, parent: &str) {
        match self.options.unknown {
            UnknownPolicy::Ignore => trace!(what, name, parent, "skipping unknown {what}"),
            UnknownPolicy::Warn => warn!(what, name, parent, "skipping unknown {what}"),
        }
    }
}

/// Route character data to the innermost frame that keeps text
fn collect_text(stack: &mut [Frame], content: &str) {
    match stack.last_mut() {
        Some(Frame::Leaf { text, .. }) => text.push_str(content),
        Some(Frame::Node { record, text, .. }) if record.schema.text_field().is_some() => text.push_str(content),
        _ => {}
    }
}

/// Convert raw text to the representation declared for `def`
fn convert(def: &FieldDef, text: String) -> Result<Item> {
    match def.kind {
        FieldKind::Text => Ok(Item::Text(text)),
        FieldKind::Flag => Ok(Item::Flag),
        FieldKind::Integer { min, max } => text
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| (min..=max).contains(n))
            .map(Item::Integer)
            .ok_or_else(|| mismatch(def, &text, &format!("an integer in {min}..={max}"))),
        FieldKind::Choice(codes) => {
            if codes.contains(&text.as_str()) {
                Ok(Item::Text(text))
            } else {
                Err(mismatch(def, &text, &format!("one of {}", codes.join(", "))))
            }
        }
        FieldKind::Node(schema) => Err(mismatch(def, &text, &format!("a <{}> element", schema.name))),
    }
}

fn mismatch(def: &FieldDef, text: &str, expected: &str) -> ParseError {
    ParseError::new(
        ErrorKind::FieldTypeMismatch,
        format!(
            "field '{}' (from {}) expects {expected}, found '{text}'",
            def.name,
            def.source_name()
        ),
    )
    .with_name(def.name)
}

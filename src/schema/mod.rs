//! Schema Definitions
//!
//! Data-only descriptions of the three dictionary formats. A [`NodeSchema`]
//! lists, for one element type, which child elements, attributes and direct
//! text feed which named fields, and whether each field holds one value or
//! an ordered sequence. The mapper walks documents using nothing but these
//! tables; the format differences live entirely in the submodules.

pub mod jmdict;
pub mod jmnedict;
pub mod kanjidic;

use crate::model::DocumentKind;

/// Shape of one element type
#[derive(Debug, PartialEq, Eq)]
pub struct NodeSchema {
    /// Element name, used in diagnostics
    pub name: &'static str,
    pub fields: &'static [FieldDef],
}

/// Where a field's value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// A child element with this name
    Child(&'static str),
    /// An attribute with this local name
    Attribute(&'static str),
    /// The element's own character data
    Text,
}

/// How a field's raw text is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Base-10 integer within `min..=max`
    Integer { min: u32, max: u32 },
    /// One of a fixed set of codes
    Choice(&'static [&'static str]),
    /// Presence-only marker, content ignored
    Flag,
    /// Nested element with its own schema
    Node(&'static NodeSchema),
}

/// One named field of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub source: Source,
    pub kind: FieldKind,
    /// Ordered sequence rather than a single value
    pub repeated: bool,
    /// Value used when an attribute is absent
    pub default: Option<&'static str>,
}

impl FieldDef {
    const fn new(name: &'static str, source: Source) -> Self {
        FieldDef {
            name,
            source,
            kind: FieldKind::Text,
            repeated: false,
            default: None,
        }
    }

    /// Field fed by child elements named `element`
    pub const fn child(name: &'static str, element: &'static str) -> Self {
        Self::new(name, Source::Child(element))
    }

    /// Field fed by the attribute whose local name is `attribute`
    pub const fn attribute(name: &'static str, attribute: &'static str) -> Self {
        Self::new(name, Source::Attribute(attribute))
    }

    /// Field fed by the element's own text
    pub const fn text(name: &'static str) -> Self {
        Self::new(name, Source::Text)
    }

    pub const fn many(self) -> Self {
        FieldDef { repeated: true, ..self }
    }

    pub const fn integer(self, min: u32, max: u32) -> Self {
        FieldDef {
            kind: FieldKind::Integer { min, max },
            ..self
        }
    }

    pub const fn choice(self, codes: &'static [&'static str]) -> Self {
        FieldDef {
            kind: FieldKind::Choice(codes),
            ..self
        }
    }

    pub const fn flag(self) -> Self {
        FieldDef {
            kind: FieldKind::Flag,
            ..self
        }
    }

    pub const fn node(self, schema: &'static NodeSchema) -> Self {
        FieldDef {
            kind: FieldKind::Node(schema),
            ..self
        }
    }

    pub const fn default_value(self, value: &'static str) -> Self {
        FieldDef {
            default: Some(value),
            ..self
        }
    }

    /// Name of the element or attribute feeding this field, for diagnostics
    pub fn source_name(&self) -> &'static str {
        match self.source {
            Source::Child(name) | Source::Attribute(name) => name,
            Source::Text => "#text",
        }
    }
}

impl NodeSchema {
    /// Index of the field with this name
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Field fed by child element `element`
    pub fn child(&self, element: &str) -> Option<(usize, &'static FieldDef)> {
        self.find(|source| matches!(source, Source::Child(name) if name == element))
    }

    /// Field fed by the attribute with local name `local_name`
    pub fn attribute(&self, local_name: &str) -> Option<(usize, &'static FieldDef)> {
        self.find(|source| matches!(source, Source::Attribute(name) if name == local_name))
    }

    /// Field receiving the element's own text, if the node has one
    pub fn text_field(&self) -> Option<(usize, &'static FieldDef)> {
        self.find(|source| source == Source::Text)
    }

    fn find(&self, matches: impl Fn(Source) -> bool) -> Option<(usize, &'static FieldDef)> {
        let fields: &'static [FieldDef] = self.fields;
        fields.iter().enumerate().find(|(_, f)| matches(f.source))
    }
}

/// Root schema for a document kind
pub fn for_kind(kind: DocumentKind) -> &'static NodeSchema {
    match kind {
        DocumentKind::Lexicon => &jmdict::JMDICT,
        DocumentKind::NamedEntity => &jmnedict::JMNEDICT,
        DocumentKind::Kanji => &kanjidic::KANJIDIC,
    }
}

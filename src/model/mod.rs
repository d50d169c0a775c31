//! Typed Dictionary Documents
//!
//! The three document shapes and the closed union over them. Every value is
//! built from a finished mapper [`Record`] through [`FromRecord`]; sequences
//! are always present (possibly empty), never `Option`.

pub mod jmdict;
pub mod jmnedict;
pub mod kanjidic;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::mapper::Record;

pub use jmdict::{
    Entry, Example, ExampleSentence, Gloss, GlossType, KanjiForm, LexiconDocument, LoanSource, Reading, Sense,
};
pub use jmnedict::{NamedEntity, NamedEntityDocument, Translation};
pub use kanjidic::{
    Character, Codepoint, DictionaryReference, Header, KanjiDocument, KanjiReading, Meaning, Misc, QueryCode,
    Radical, ReadingMeaningGroup, Variant,
};

/// Build a typed value from a finished record
pub trait FromRecord: Sized {
    fn from_record(record: Record) -> Self;
}

/// Convert every record of a sequence field
pub(crate) fn take_all<T: FromRecord>(record: &mut Record, field: &str) -> Vec<T> {
    record.take_records(field).into_iter().map(T::from_record).collect()
}

/// Which of the three dictionary formats a document is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum DocumentKind {
    /// JMdict
    Lexicon,
    /// JMnedict
    NamedEntity,
    /// KANJIDIC2
    Kanji,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [DocumentKind::Lexicon, DocumentKind::NamedEntity, DocumentKind::Kanji];

    /// Name of the document's outermost element
    pub fn root_name(&self) -> &'static str {
        match self {
            DocumentKind::Lexicon => "JMdict",
            DocumentKind::NamedEntity => "JMnedict",
            DocumentKind::Kanji => "kanjidic2",
        }
    }

    pub fn from_root_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.root_name() == name)
    }
}

/// A fully parsed dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DictionaryDocument {
    Lexicon(LexiconDocument),
    NamedEntity(NamedEntityDocument),
    Kanji(KanjiDocument),
}

impl DictionaryDocument {
    /// Build the variant for `kind` from the root record
    pub fn from_record(kind: DocumentKind, record: Record) -> Self {
        match kind {
            DocumentKind::Lexicon => DictionaryDocument::Lexicon(LexiconDocument::from_record(record)),
            DocumentKind::NamedEntity => DictionaryDocument::NamedEntity(NamedEntityDocument::from_record(record)),
            DocumentKind::Kanji => DictionaryDocument::Kanji(KanjiDocument::from_record(record)),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            DictionaryDocument::Lexicon(_) => DocumentKind::Lexicon,
            DictionaryDocument::NamedEntity(_) => DocumentKind::NamedEntity,
            DictionaryDocument::Kanji(_) => DocumentKind::Kanji,
        }
    }

    /// Number of entries (or characters for KANJIDIC2)
    pub fn len(&self) -> usize {
        match self {
            DictionaryDocument::Lexicon(doc) => doc.entries.len(),
            DictionaryDocument::NamedEntity(doc) => doc.entries.len(),
            DictionaryDocument::Kanji(doc) => doc.characters.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_lexicon(&self) -> Option<&LexiconDocument> {
        match self {
            DictionaryDocument::Lexicon(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_named_entities(&self) -> Option<&NamedEntityDocument> {
        match self {
            DictionaryDocument::NamedEntity(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_kanji(&self) -> Option<&KanjiDocument> {
        match self {
            DictionaryDocument::Kanji(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn into_lexicon(self) -> Option<LexiconDocument> {
        match self {
            DictionaryDocument::Lexicon(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn into_named_entities(self) -> Option<NamedEntityDocument> {
        match self {
            DictionaryDocument::NamedEntity(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn into_kanji(self) -> Option<KanjiDocument> {
        match self {
            DictionaryDocument::Kanji(doc) => Some(doc),
            _ => None,
        }
    }
}

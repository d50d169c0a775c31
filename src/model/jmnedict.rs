//! Models the JMnedict (Japanese proper names) file.
//!
//! Kanji forms and readings have the same shape as in JMdict.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::jmdict::{KanjiForm, Reading};
use super::{take_all, FromRecord};
use crate::mapper::Record;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NamedEntityDocument {
    pub entries: Vec<NamedEntity>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NamedEntity {
    pub sequence_number: u32,
    pub kanji_forms: Vec<KanjiForm>,
    pub readings: Vec<Reading>,
    pub translations: Vec<Translation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Translation {
    /// e.g. "surname", "place", "company"
    pub name_types: Vec<String>,
    pub cross_references: Vec<String>,
    pub translated_forms: Vec<String>,
    pub language: String,
}

impl FromRecord for NamedEntityDocument {
    fn from_record(mut record: Record) -> Self {
        NamedEntityDocument {
            entries: take_all(&mut record, "entries"),
        }
    }
}

impl FromRecord for NamedEntity {
    fn from_record(mut record: Record) -> Self {
        NamedEntity {
            sequence_number: record.take_integer("sequence_number").unwrap_or_default(),
            kanji_forms: take_all(&mut record, "kanji_forms"),
            readings: take_all(&mut record, "readings"),
            translations: take_all(&mut record, "translations"),
        }
    }
}

impl FromRecord for Translation {
    fn from_record(mut record: Record) -> Self {
        Translation {
            name_types: record.take_texts("name_types"),
            cross_references: record.take_texts("cross_references"),
            translated_forms: record.take_texts("translated_forms"),
            language: record.take_text("language").unwrap_or_default(),
        }
    }
}

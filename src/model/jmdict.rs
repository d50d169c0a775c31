//! Models the JMdict file.
//! See <https://www.edrdg.org/wiki/index.php/JMdict-EDICT_Dictionary_Project>

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{take_all, FromRecord};
use crate::mapper::Record;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LexiconDocument {
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entry {
    /// `ent_seq`; 0 if the element is missing
    pub sequence_number: u32,
    pub kanji_forms: Vec<KanjiForm>,
    pub readings: Vec<Reading>,
    pub senses: Vec<Sense>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KanjiForm {
    pub expression: String,
    pub info_tags: Vec<String>,
    pub priority_tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    pub reading: String,
    /// The reading is not a true reading of the kanji forms
    pub no_kanji: bool,
    /// Kanji form expressions this reading applies to; empty means all
    pub restricted_to: Vec<String>,
    pub info_tags: Vec<String>,
    pub priority_tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sense {
    pub restricted_to_kanji: Vec<String>,
    pub restricted_to_readings: Vec<String>,
    pub cross_references: Vec<String>,
    pub antonyms: Vec<String>,
    pub parts_of_speech: Vec<String>,
    pub fields: Vec<String>,
    pub misc: Vec<String>,
    pub dialects: Vec<String>,
    pub notes: Vec<String>,
    pub source_languages: Vec<LoanSource>,
    pub glosses: Vec<Gloss>,
    pub examples: Vec<Example>,
}

/// Source language of a loanword (`lsource`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoanSource {
    /// Source word, often empty
    pub text: String,
    pub language: String,
    /// `ls_type="part"`: the source word covers only part of the entry
    pub partial: bool,
    /// `ls_wasei="y"`: constructed in Japanese from foreign words
    pub wasei_constructed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gloss {
    pub text: String,
    pub language: String,
    pub grammatical_gender: Option<String>,
    pub gloss_type: Option<GlossType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum GlossType {
    Literal,
    Figurative,
    Explanatory,
    Trademark,
}

impl GlossType {
    /// Parse a `g_type` attribute value
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "lit" => Some(GlossType::Literal),
            "fig" => Some(GlossType::Figurative),
            "expl" => Some(GlossType::Explanatory),
            "tm" => Some(GlossType::Trademark),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            GlossType::Literal => "lit",
            GlossType::Figurative => "fig",
            GlossType::Explanatory => "expl",
            GlossType::Trademark => "tm",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Example {
    /// Sentence id in the source corpus (`ex_srce`)
    pub source_id: Option<String>,
    /// Corpus the sentence comes from (`exsrc_type`), e.g. "tat"
    pub source_kind: Option<String>,
    /// Form of the headword used in the sentence (`ex_text`)
    pub headword: Option<String>,
    pub sentences: Vec<ExampleSentence>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExampleSentence {
    pub language: String,
    pub text: String,
}

impl FromRecord for LexiconDocument {
    fn from_record(mut record: Record) -> Self {
        LexiconDocument {
            entries: take_all(&mut record, "entries"),
        }
    }
}

impl FromRecord for Entry {
    fn from_record(mut record: Record) -> Self {
        Entry {
            sequence_number: record.take_integer("sequence_number").unwrap_or_default(),
            kanji_forms: take_all(&mut record, "kanji_forms"),
            readings: take_all(&mut record, "readings"),
            senses: take_all(&mut record, "senses"),
        }
    }
}

impl FromRecord for KanjiForm {
    fn from_record(mut record: Record) -> Self {
        KanjiForm {
            expression: record.take_text("expression").unwrap_or_default(),
            info_tags: record.take_texts("info_tags"),
            priority_tags: record.take_texts("priority_tags"),
        }
    }
}

impl FromRecord for Reading {
    fn from_record(mut record: Record) -> Self {
        Reading {
            reading: record.take_text("reading").unwrap_or_default(),
            no_kanji: record.take_flag("no_kanji"),
            restricted_to: record.take_texts("restricted_to"),
            info_tags: record.take_texts("info_tags"),
            priority_tags: record.take_texts("priority_tags"),
        }
    }
}

impl FromRecord for Sense {
    fn from_record(mut record: Record) -> Self {
        Sense {
            restricted_to_kanji: record.take_texts("restricted_to_kanji"),
            restricted_to_readings: record.take_texts("restricted_to_readings"),
            cross_references: record.take_texts("cross_references"),
            antonyms: record.take_texts("antonyms"),
            parts_of_speech: record.take_texts("parts_of_speech"),
            fields: record.take_texts("fields"),
            misc: record.take_texts("misc"),
            dialects: record.take_texts("dialects"),
            notes: record.take_texts("notes"),
            source_languages: take_all(&mut record, "source_languages"),
            glosses: take_all(&mut record, "glosses"),
            examples: take_all(&mut record, "examples"),
        }
    }
}

impl FromRecord for LoanSource {
    fn from_record(mut record: Record) -> Self {
        LoanSource {
            text: record.take_text("text").unwrap_or_default(),
            language: record.take_text("language").unwrap_or_default(),
            partial: record.take_text("kind").as_deref() == Some("part"),
            wasei_constructed: record.take_text("wasei").as_deref() == Some("y"),
        }
    }
}

impl FromRecord for Gloss {
    fn from_record(mut record: Record) -> Self {
        Gloss {
            text: record.take_text("text").unwrap_or_default(),
            language: record.take_text("language").unwrap_or_default(),
            grammatical_gender: record.take_text("gender"),
            gloss_type: record.take_text("gloss_type").as_deref().and_then(GlossType::from_code),
        }
    }
}

impl FromRecord for Example {
    fn from_record(mut record: Record) -> Self {
        let mut source = record.take_record("source");
        Example {
            source_id: source.as_mut().and_then(|s| s.take_text("id")),
            source_kind: source.as_mut().and_then(|s| s.take_text("kind")),
            headword: record.take_text("headword"),
            sentences: take_all(&mut record, "sentences"),
        }
    }
}

impl FromRecord for ExampleSentence {
    fn from_record(mut record: Record) -> Self {
        ExampleSentence {
            language: record.take_text("language").unwrap_or_default(),
            text: record.take_text("text").unwrap_or_default(),
        }
    }
}

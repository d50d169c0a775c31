//! Models the KANJIDIC2 file.
//! See <https://www.edrdg.org/wiki/index.php/KANJIDIC_Project>
//!
//! The wrapper elements of the file (`codepoint`, `radical`, `dic_number`,
//! `query_code`, `reading_meaning`) do not appear here: their contents are
//! flattened into [`Character`] in document order.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{take_all, FromRecord};
use crate::mapper::Record;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KanjiDocument {
    pub header: Option<Header>,
    pub characters: Vec<Character>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Header {
    pub file_version: String,
    pub database_version: String,
    pub creation_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Character {
    pub literal: String,
    pub codepoints: Vec<Codepoint>,
    pub radicals: Vec<Radical>,
    pub misc: Misc,
    pub dictionary_references: Vec<DictionaryReference>,
    pub query_codes: Vec<QueryCode>,
    pub reading_meaning_groups: Vec<ReadingMeaningGroup>,
    /// Readings used only in names
    pub nanori: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Codepoint {
    /// `cp_type`, e.g. "ucs" or "jis208"
    pub standard: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Radical {
    /// `rad_type`: "classical" or "nelson_c"
    pub classification: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Misc {
    pub grade: Option<String>,
    /// The first count is the accepted one; the rest are common miscounts
    pub stroke_counts: Vec<u32>,
    pub variants: Vec<Variant>,
    pub frequency_rank: Option<u32>,
    pub radical_names: Vec<String>,
    pub jlpt_level: Option<u32>,
}

impl Misc {
    /// Accepted stroke count
    pub fn stroke_count(&self) -> Option<u32> {
        self.stroke_counts.first().copied()
    }

    /// Stroke counts that are recorded as common mistakes
    pub fn miscounts(&self) -> &[u32] {
        self.stroke_counts.get(1..).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Variant {
    /// `var_type`: the coding system of `value`
    pub kind: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DictionaryReference {
    /// `dr_type`, e.g. "nelson_c" or "moro"
    pub kind: String,
    pub value: String,
    /// Morohashi volume
    pub volume: Option<String>,
    /// Morohashi page
    pub page: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QueryCode {
    /// `qc_type`, e.g. "skip" or "four_corner"
    pub kind: String,
    pub value: String,
    /// `skip_misclass` for SKIP codes recorded as mistakes
    pub misclassification: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReadingMeaningGroup {
    pub readings: Vec<KanjiReading>,
    pub meanings: Vec<Meaning>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KanjiReading {
    /// `r_type`, e.g. "ja_on", "ja_kun" or "pinyin"
    pub kind: String,
    pub value: String,
    pub on_type: Option<String>,
    pub jouyou_status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Meaning {
    pub language: String,
    pub text: String,
}

impl FromRecord for KanjiDocument {
    fn from_record(mut record: Record) -> Self {
        KanjiDocument {
            header: record.take_record("header").map(Header::from_record),
            characters: take_all(&mut record, "characters"),
        }
    }
}

impl FromRecord for Header {
    fn from_record(mut record: Record) -> Self {
        Header {
            file_version: record.take_text("file_version").unwrap_or_default(),
            database_version: record.take_text("database_version").unwrap_or_default(),
            creation_date: record.take_text("creation_date").unwrap_or_default(),
        }
    }
}

/// Concatenate the `inner` sequences of every wrapper record in `wrappers`
fn flatten<T: FromRecord>(record: &mut Record, wrappers: &str, inner: &str) -> Vec<T> {
    record
        .take_records(wrappers)
        .into_iter()
        .flat_map(|mut wrapper| take_all(&mut wrapper, inner))
        .collect()
}

impl FromRecord for Character {
    fn from_record(mut record: Record) -> Self {
        let mut reading_meaning_groups = Vec::new();
        let mut nanori = Vec::new();
        for mut wrapper in record.take_records("reading_meanings") {
            reading_meaning_groups.extend(take_all(&mut wrapper, "groups"));
            nanori.extend(wrapper.take_texts("nanori"));
        }

        Character {
            literal: record.take_text("literal").unwrap_or_default(),
            codepoints: flatten(&mut record, "codepoints", "values"),
            radicals: flatten(&mut record, "radicals", "values"),
            misc: record.take_record("misc").map(Misc::from_record).unwrap_or_default(),
            dictionary_references: flatten(&mut record, "dictionary_numbers", "references"),
            query_codes: flatten(&mut record, "query_codes", "codes"),
            reading_meaning_groups,
            nanori,
        }
    }
}

impl FromRecord for Codepoint {
    fn from_record(mut record: Record) -> Self {
        Codepoint {
            standard: record.take_text("standard").unwrap_or_default(),
            value: record.take_text("value").unwrap_or_default(),
        }
    }
}

impl FromRecord for Radical {
    fn from_record(mut record: Record) -> Self {
        Radical {
            classification: record.take_text("classification").unwrap_or_default(),
            value: record.take_text("value").unwrap_or_default(),
        }
    }
}

impl FromRecord for Misc {
    fn from_record(mut record: Record) -> Self {
        Misc {
            grade: record.take_text("grade"),
            stroke_counts: record.take_integers("stroke_counts"),
            variants: take_all(&mut record, "variants"),
            frequency_rank: record.take_integer("frequency_rank"),
            radical_names: record.take_texts("radical_names"),
            jlpt_level: record.take_integer("jlpt_level"),
        }
    }
}

impl FromRecord for Variant {
    fn from_record(mut record: Record) -> Self {
        Variant {
            kind: record.take_text("kind").unwrap_or_default(),
            value: record.take_text("value").unwrap_or_default(),
        }
    }
}

impl FromRecord for DictionaryReference {
    fn from_record(mut record: Record) -> Self {
        DictionaryReference {
            kind: record.take_text("kind").unwrap_or_default(),
            value: record.take_text("value").unwrap_or_default(),
            volume: record.take_text("volume"),
            page: record.take_text("page"),
        }
    }
}

impl FromRecord for QueryCode {
    fn from_record(mut record: Record) -> Self {
        QueryCode {
            kind: record.take_text("kind").unwrap_or_default(),
            value: record.take_text("value").unwrap_or_default(),
            misclassification: record.take_text("misclassification"),
        }
    }
}

impl FromRecord for ReadingMeaningGroup {
    fn from_record(mut record: Record) -> Self {
        ReadingMeaningGroup {
            readings: take_all(&mut record, "readings"),
            meanings: take_all(&mut record, "meanings"),
        }
    }
}

impl FromRecord for KanjiReading {
    fn from_record(mut record: Record) -> Self {
        KanjiReading {
            kind: record.take_text("kind").unwrap_or_default(),
            value: record.take_text("value").unwrap_or_default(),
            on_type: record.take_text("on_type"),
            jouyou_status: record.take_text("jouyou_status"),
        }
    }
}

impl FromRecord for Meaning {
    fn from_record(mut record: Record) -> Self {
        Meaning {
            language: record.take_text("language").unwrap_or_default(),
            text: record.take_text("text").unwrap_or_default(),
        }
    }
}

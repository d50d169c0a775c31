//! KANJIDIC2 (kanji character) schema
//!
//! `codepoint`, `radical`, `dic_number`, `query_code` and `reading_meaning`
//! are pure wrappers; the model flattens them into the character.

use super::{FieldDef, NodeSchema};

/// Highest `freq` rank in the file (2,500 most used kanji plus ties)
pub const MAX_FREQUENCY_RANK: u32 = 2501;

/// Old four-level JLPT scale
pub const MAX_JLPT_LEVEL: u32 = 4;

pub static KANJIDIC: NodeSchema = NodeSchema {
    name: "kanjidic2",
    fields: &[
        FieldDef::child("header", "header").node(&HEADER),
        FieldDef::child("characters", "character").node(&CHARACTER).many(),
    ],
};

pub static HEADER: NodeSchema = NodeSchema {
    name: "header",
    fields: &[
        FieldDef::child("file_version", "file_version"),
        FieldDef::child("database_version", "database_version"),
        FieldDef::child("creation_date", "date_of_creation"),
    ],
};

pub static CHARACTER: NodeSchema = NodeSchema {
    name: "character",
    fields: &[
        FieldDef::child("literal", "literal"),
        FieldDef::child("codepoints", "codepoint").node(&CODEPOINT).many(),
        FieldDef::child("radicals", "radical").node(&RADICAL).many(),
        FieldDef::child("misc", "misc").node(&MISC),
        FieldDef::child("dictionary_numbers", "dic_number").node(&DIC_NUMBER).many(),
        FieldDef::child("query_codes", "query_code").node(&QUERY_CODE).many(),
        FieldDef::child("reading_meanings", "reading_meaning").node(&READING_MEANING).many(),
    ],
};

pub static CODEPOINT: NodeSchema = NodeSchema {
    name: "codepoint",
    fields: &[FieldDef::child("values", "cp_value").node(&CP_VALUE).many()],
};

pub static CP_VALUE: NodeSchema = NodeSchema {
    name: "cp_value",
    fields: &[FieldDef::text("value"), FieldDef::attribute("standard", "cp_type")],
};

pub static RADICAL: NodeSchema = NodeSchema {
    name: "radical",
    fields: &[FieldDef::child("values", "rad_value").node(&RAD_VALUE).many()],
};

pub static RAD_VALUE: NodeSchema = NodeSchema {
    name: "rad_value",
    fields: &[FieldDef::text("value"), FieldDef::attribute("classification", "rad_type")],
};

pub static MISC: NodeSchema = NodeSchema {
    name: "misc",
    fields: &[
        FieldDef::child("grade", "grade"),
        FieldDef::child("stroke_counts", "stroke_count").integer(1, u32::MAX).many(),
        FieldDef::child("variants", "variant").node(&VARIANT).many(),
        FieldDef::child("frequency_rank", "freq").integer(1, MAX_FREQUENCY_RANK),
        FieldDef::child("radical_names", "rad_name").many(),
        FieldDef::child("jlpt_level", "jlpt").integer(1, MAX_JLPT_LEVEL),
    ],
};

pub static VARIANT: NodeSchema = NodeSchema {
    name: "variant",
    fields: &[FieldDef::text("value"), FieldDef::attribute("kind", "var_type")],
};

pub static DIC_NUMBER: NodeSchema = NodeSchema {
    name: "dic_number",
    fields: &[FieldDef::child("references", "dic_ref").node(&DIC_REF).many()],
};

pub static DIC_REF: NodeSchema = NodeSchema {
    name: "dic_ref",
    fields: &[
        FieldDef::text("value"),
        FieldDef::attribute("kind", "dr_type"),
        FieldDef::attribute("volume", "m_vol"),
        FieldDef::attribute("page", "m_page"),
    ],
};

pub static QUERY_CODE: NodeSchema = NodeSchema {
    name: "query_code",
    fields: &[FieldDef::child("codes", "q_code").node(&Q_CODE).many()],
};

pub static Q_CODE: NodeSchema = NodeSchema {
    name: "q_code",
    fields: &[
        FieldDef::text("value"),
        FieldDef::attribute("kind", "qc_type"),
        FieldDef::attribute("misclassification", "skip_misclass"),
    ],
};

pub static READING_MEANING: NodeSchema = NodeSchema {
    name: "reading_meaning",
    fields: &[
        FieldDef::child("groups", "rmgroup").node(&RMGROUP).many(),
        FieldDef::child("nanori", "nanori").many(),
    ],
};

pub static RMGROUP: NodeSchema = NodeSchema {
    name: "rmgroup",
    fields: &[
        FieldDef::child("readings", "reading").node(&READING).many(),
        FieldDef::child("meanings", "meaning").node(&MEANING).many(),
    ],
};

pub static READING: NodeSchema = NodeSchema {
    name: "reading",
    fields: &[
        FieldDef::text("value"),
        FieldDef::attribute("kind", "r_type"),
        FieldDef::attribute("on_type", "on_type"),
        FieldDef::attribute("jouyou_status", "r_status"),
    ],
};

pub static MEANING: NodeSchema = NodeSchema {
    name: "meaning",
    fields: &[
        FieldDef::text("text"),
        FieldDef::attribute("language", "m_lang").default_value("en"),
    ],
};

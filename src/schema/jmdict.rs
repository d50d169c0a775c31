//! JMdict (general lexicon) schema
//!
//! ```text
//! JMdict > entry* > ent_seq, k_ele*, r_ele*, sense*
//! ```
//!
//! `k_ele` and `r_ele` are shared with JMnedict.

use super::{FieldDef, NodeSchema};

/// `g_type` codes: literal, figurative, explanatory, trademark
pub const GLOSS_TYPES: &[&str] = &["lit", "fig", "expl", "tm"];

/// `ls_type` codes
pub const LOAN_SOURCE_TYPES: &[&str] = &["full", "part"];

pub static JMDICT: NodeSchema = NodeSchema {
    name: "JMdict",
    fields: &[FieldDef::child("entries", "entry").node(&ENTRY).many()],
};

pub static ENTRY: NodeSchema = NodeSchema {
    name: "entry",
    fields: &[
        FieldDef::child("sequence_number", "ent_seq").integer(0, u32::MAX),
        FieldDef::child("kanji_forms", "k_ele").node(&K_ELE).many(),
        FieldDef::child("readings", "r_ele").node(&R_ELE).many(),
        FieldDef::child("senses", "sense").node(&SENSE).many(),
    ],
};

pub static K_ELE: NodeSchema = NodeSchema {
    name: "k_ele",
    fields: &[
        FieldDef::child("expression", "keb"),
        FieldDef::child("info_tags", "ke_inf").many(),
        FieldDef::child("priority_tags", "ke_pri").many(),
    ],
};

pub static R_ELE: NodeSchema = NodeSchema {
    name: "r_ele",
    fields: &[
        FieldDef::child("reading", "reb"),
        FieldDef::child("no_kanji", "re_nokanji").flag(),
        FieldDef::child("restricted_to", "re_restr").many(),
        FieldDef::child("info_tags", "re_inf").many(),
        FieldDef::child("priority_tags", "re_pri").many(),
    ],
};

pub static SENSE: NodeSchema = NodeSchema {
    name: "sense",
    fields: &[
        FieldDef::child("restricted_to_kanji", "stagk").many(),
        FieldDef::child("restricted_to_readings", "stagr").many(),
        FieldDef::child("parts_of_speech", "pos").many(),
        FieldDef::child("cross_references", "xref").many(),
        FieldDef::child("antonyms", "ant").many(),
        FieldDef::child("fields", "field").many(),
        FieldDef::child("misc", "misc").many(),
        FieldDef::child("notes", "s_inf").many(),
        FieldDef::child("source_languages", "lsource").node(&LSOURCE).many(),
        FieldDef::child("dialects", "dial").many(),
        FieldDef::child("glosses", "gloss").node(&GLOSS).many(),
        FieldDef::child("examples", "example").node(&EXAMPLE).many(),
    ],
};

pub static LSOURCE: NodeSchema = NodeSchema {
    name: "lsource",
    fields: &[
        FieldDef::text("text"),
        FieldDef::attribute("language", "lang").default_value("eng"),
        FieldDef::attribute("kind", "ls_type").choice(LOAN_SOURCE_TYPES).default_value("full"),
        FieldDef::attribute("wasei", "ls_wasei"),
    ],
};

pub static GLOSS: NodeSchema = NodeSchema {
    name: "gloss",
    fields: &[
        FieldDef::text("text"),
        FieldDef::attribute("language", "lang").default_value("eng"),
        FieldDef::attribute("gender", "g_gend"),
        FieldDef::attribute("gloss_type", "g_type").choice(GLOSS_TYPES),
    ],
};

pub static EXAMPLE: NodeSchema = NodeSchema {
    name: "example",
    fields: &[
        FieldDef::child("source", "ex_srce").node(&EX_SRCE),
        FieldDef::child("headword", "ex_text"),
        FieldDef::child("sentences", "ex_sent").node(&EX_SENT).many(),
    ],
};

pub static EX_SRCE: NodeSchema = NodeSchema {
    name: "ex_srce",
    fields: &[FieldDef::text("id"), FieldDef::attribute("kind", "exsrc_type")],
};

pub static EX_SENT: NodeSchema = NodeSchema {
    name: "ex_sent",
    fields: &[
        FieldDef::text("text"),
        FieldDef::attribute("language", "lang").default_value("eng"),
    ],
};

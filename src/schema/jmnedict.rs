//! JMnedict (named entity) schema
//!
//! Entries share `k_ele`/`r_ele` with JMdict; `trans` takes the place of
//! `sense`.

use super::jmdict::{K_ELE, R_ELE};
use super::{FieldDef, NodeSchema};

pub static JMNEDICT: NodeSchema = NodeSchema {
    name: "JMnedict",
    fields: &[FieldDef::child("entries", "entry").node(&ENTRY).many()],
};

pub static ENTRY: NodeSchema = NodeSchema {
    name: "entry",
    fields: &[
        FieldDef::child("sequence_number", "ent_seq").integer(0, u32::MAX),
        FieldDef::child("kanji_forms", "k_ele").node(&K_ELE).many(),
        FieldDef::child("readings", "r_ele").node(&R_ELE).many(),
        FieldDef::child("translations", "trans").node(&TRANS).many(),
    ],
};

pub static TRANS: NodeSchema = NodeSchema {
    name: "trans",
    fields: &[
        FieldDef::child("name_types", "name_type").many(),
        FieldDef::child("cross_references", "xref").many(),
        FieldDef::child("translated_forms", "trans_det").many(),
        FieldDef::attribute("language", "lang").default_value("eng"),
    ],
};

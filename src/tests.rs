//! End-to-end tests over small but realistic dictionary files

use std::io::{self, Cursor, Write};
use std::sync::{Arc, Mutex};

use indoc::indoc;

use crate::model::{GlossType, Misc};
use crate::{DictionaryDocument, DocumentKind, ErrorKind, ParseOptions, Parser, UnknownPolicy};

const JMDICT: &str = indoc! {r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <!DOCTYPE JMdict [
    <!ELEMENT JMdict (entry*)>
    <!ELEMENT entry (ent_seq, k_ele*, r_ele+, sense+)>
    <!ATTLIST gloss xml:lang CDATA "eng" g_type CDATA #IMPLIED>
    <!ENTITY n "noun (common) (futsuumeishi)">
    <!ENTITY adv "adverb (fukushi)">
    <!ENTITY uk "word usually written using kana alone">
    <!ENTITY ateji "ateji (phonetic) reading">
    ]>
    <!-- JMdict created: 2024-01-01 -->
    <JMdict>
    <entry>
    <ent_seq>1000220</ent_seq>
    <k_ele>
    <keb>明日</keb>
    <ke_pri>ichi1</ke_pri>
    <ke_pri>news1</ke_pri>
    </k_ele>
    <r_ele>
    <reb>あした</reb>
    <re_pri>ichi1</re_pri>
    </r_ele>
    <r_ele>
    <reb>あす</reb>
    </r_ele>
    <r_ele>
    <reb>みょうにち</reb>
    <re_restr>明日</re_restr>
    </r_ele>
    <sense>
    <pos>&n;</pos>
    <pos>&adv;</pos>
    <gloss>tomorrow</gloss>
    <gloss xml:lang="fre">demain</gloss>
    <gloss xml:lang="ger" g_gend="masc">Morgen</gloss>
    </sense>
    <sense>
    <stagk>明日</stagk>
    <gloss g_type="fig">the near future</gloss>
    <example>
    <ex_srce exsrc_type="tat">76076</ex_srce>
    <ex_text>明日</ex_text>
    <ex_sent xml:lang="jpn">明日は雨だ。</ex_sent>
    <ex_sent xml:lang="eng">It will rain tomorrow.</ex_sent>
    </example>
    </sense>
    </entry>
    <entry>
    <ent_seq>1000320</ent_seq>
    <r_ele>
    <reb>あそこ</reb>
    <re_nokanji/>
    </r_ele>
    <sense>
    <pos>&n;</pos>
    <misc>&uk;</misc>
    <xref>何処</xref>
    <ant>ここ</ant>
    <lsource xml:lang="dut" ls_type="part" ls_wasei="y">achter</lsource>
    <gloss>there (place physically distant)</gloss>
    </sense>
    </entry>
    <entry>
    <ent_seq>2829697</ent_seq>
    <k_ele>
    <keb>麻雀</keb>
    <ke_inf>&ateji;</ke_inf>
    </k_ele>
    <r_ele>
    <reb>マージャン</reb>
    </r_ele>
    <sense>
    <lsource xml:lang="chi">ma2 que4</lsource>
    <lsource/>
    <gloss>mahjong</gloss>
    </sense>
    </entry>
    </JMdict>
"#};

const JMNEDICT: &str = indoc! {r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <!DOCTYPE JMnedict [
    <!ENTITY surname "family or surname">
    <!ENTITY place "place name">
    ]>
    <JMnedict>
    <entry>
    <ent_seq>5000000</ent_seq>
    <k_ele>
    <keb>ゝ泉</keb>
    </k_ele>
    <r_ele>
    <reb>こいずみ</reb>
    </r_ele>
    <trans>
    <name_type>&surname;</name_type>
    <trans_det>Koizumi</trans_det>
    </trans>
    </entry>
    <entry>
    <ent_seq>5000001</ent_seq>
    <r_ele>
    <reb>あいあいがさ</reb>
    </r_ele>
    <trans xml:lang="ger">
    <name_type>&place;</name_type>
    <name_type>&surname;</name_type>
    <xref>相合傘</xref>
    <trans_det>Aiaigasa</trans_det>
    <trans_det>Aiaigasa (Ort)</trans_det>
    </trans>
    </entry>
    </JMnedict>
"#};

const KANJIDIC: &str = indoc! {r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <!DOCTYPE kanjidic2 [
    <!ELEMENT kanjidic2 (header,character*)>
    ]>
    <kanjidic2>
    <header>
    <file_version>4</file_version>
    <database_version>2024-001</database_version>
    <date_of_creation>2024-01-01</date_of_creation>
    </header>
    <character>
    <literal>水</literal>
    <codepoint>
    <cp_value cp_type="ucs">6c34</cp_value>
    <cp_value cp_type="jis208">1-31-69</cp_value>
    </codepoint>
    <radical>
    <rad_value rad_type="classical">85</rad_value>
    </radical>
    <misc>
    <grade>1</grade>
    <stroke_count>4</stroke_count>
    <stroke_count>3</stroke_count>
    <variant var_type="jis212">1-21-64</variant>
    <freq>223</freq>
    <jlpt>4</jlpt>
    </misc>
    <dic_number>
    <dic_ref dr_type="nelson_c">2482</dic_ref>
    <dic_ref dr_type="moro" m_vol="6" m_page="0001">17062</dic_ref>
    </dic_number>
    <query_code>
    <q_code qc_type="skip">4-4-0</q_code>
    <q_code qc_type="skip" skip_misclass="posn">1-1-3</q_code>
    </query_code>
    <reading_meaning>
    <rmgroup>
    <reading r_type="pinyin">shui3</reading>
    <reading r_type="ja_on">スイ</reading>
    <reading r_type="ja_kun">みず</reading>
    <meaning>water</meaning>
    <meaning m_lang="fr">eau</meaning>
    </rmgroup>
    <nanori>み</nanori>
    <nanori>ゆ</nanori>
    </reading_meaning>
    </character>
    <character>
    <literal>𠀋</literal>
    <misc>
    <stroke_count>6</stroke_count>
    </misc>
    </character>
    </kanjidic2>
"#};

fn parse(input: &str) -> crate::Result<DictionaryDocument> {
    Parser::new().parse_str(input)
}

fn kanji_with_freq(freq: &str) -> String {
    format!("<kanjidic2><character><literal>日</literal><misc><freq>{freq}</freq></misc></character></kanjidic2>")
}

/// Doubling entity chain: `&e{depth};` expands to 2^depth characters
fn doubling_bomb(depth: usize) -> String {
    let mut doc = String::from("<!DOCTYPE JMdict [\n<!ENTITY e0 \"x\">\n");
    for i in 1..=depth {
        doc.push_str(&format!("<!ENTITY e{i} \"&e{prev};&e{prev};\">\n", prev = i - 1));
    }
    doc.push_str(&format!(
        "]>\n<JMdict><entry><ent_seq>1</ent_seq><r_ele><reb>&e{depth};</reb></r_ele></entry></JMdict>"
    ));
    doc
}

#[test]
fn test_lexicon_entries_in_file_order() {
    let doc = parse(JMDICT).unwrap();
    assert_eq!(doc.kind(), DocumentKind::Lexicon);
    assert_eq!(doc.len(), 3);

    let lexicon = doc.as_lexicon().unwrap();
    let sequence: Vec<u32> = lexicon.entries.iter().map(|e| e.sequence_number).collect();
    assert_eq!(sequence, [1000220, 1000320, 2829697]);
}

#[test]
fn test_readings_sequence_and_empty_kanji_forms() {
    let lexicon = parse(JMDICT).unwrap().into_lexicon().unwrap();

    let ashita = &lexicon.entries[0];
    let readings: Vec<&str> = ashita.readings.iter().map(|r| r.reading.as_str()).collect();
    assert_eq!(readings, ["あした", "あす", "みょうにち"]);
    assert_eq!(ashita.readings[2].restricted_to, ["明日"]);
    assert!(ashita.readings[1].restricted_to.is_empty());
    assert_eq!(ashita.kanji_forms[0].priority_tags, ["ichi1", "news1"]);

    let asoko = &lexicon.entries[1];
    assert!(asoko.kanji_forms.is_empty());
    assert!(asoko.readings[0].no_kanji);
    assert!(!ashita.readings[0].no_kanji);
}

#[test]
fn test_entities_expanded_into_fields() {
    let lexicon = parse(JMDICT).unwrap().into_lexicon().unwrap();
    let sense = &lexicon.entries[0].senses[0];
    assert_eq!(sense.parts_of_speech, ["noun (common) (futsuumeishi)", "adverb (fukushi)"]);
    assert_eq!(lexicon.entries[1].senses[0].misc, ["word usually written using kana alone"]);
    assert_eq!(lexicon.entries[2].kanji_forms[0].info_tags, ["ateji (phonetic) reading"]);
}

#[test]
fn test_gloss_language_default_and_override() {
    let lexicon = parse(JMDICT).unwrap().into_lexicon().unwrap();
    let glosses = &lexicon.entries[0].senses[0].glosses;

    assert_eq!(glosses[0].text, "tomorrow");
    assert_eq!(glosses[0].language, "eng");
    assert_eq!(glosses[1].language, "fre");
    assert_eq!(glosses[1].text, "demain");
    assert_eq!(glosses[2].grammatical_gender.as_deref(), Some("masc"));
    assert_eq!(glosses[0].gloss_type, None);

    let figurative = &lexicon.entries[0].senses[1].glosses[0];
    assert_eq!(figurative.gloss_type, Some(GlossType::Figurative));
}

#[test]
fn test_sense_details() {
    let lexicon = parse(JMDICT).unwrap().into_lexicon().unwrap();

    let sense = &lexicon.entries[0].senses[1];
    assert_eq!(sense.restricted_to_kanji, ["明日"]);
    let example = &sense.examples[0];
    assert_eq!(example.source_id.as_deref(), Some("76076"));
    assert_eq!(example.source_kind.as_deref(), Some("tat"));
    assert_eq!(example.headword.as_deref(), Some("明日"));
    assert_eq!(example.sentences.len(), 2);
    assert_eq!(example.sentences[1].language, "eng");
    assert_eq!(example.sentences[1].text, "It will rain tomorrow.");

    let sense = &lexicon.entries[1].senses[0];
    assert_eq!(sense.cross_references, ["何処"]);
    assert_eq!(sense.antonyms, ["ここ"]);
    let loan = &sense.source_languages[0];
    assert_eq!((loan.language.as_str(), loan.text.as_str()), ("dut", "achter"));
    assert!(loan.partial);
    assert!(loan.wasei_constructed);

    let sources = &lexicon.entries[2].senses[0].source_languages;
    assert_eq!(sources.len(), 2);
    assert!(!sources[0].partial && !sources[0].wasei_constructed);
    assert_eq!(sources[1].language, "eng");
    assert_eq!(sources[1].text, "");
}

#[test]
fn test_named_entities() {
    let doc = parse(JMNEDICT).unwrap();
    assert_eq!(doc.kind(), DocumentKind::NamedEntity);

    let names = doc.as_named_entities().unwrap();
    assert_eq!(names.entries.len(), 2);

    let koizumi = &names.entries[0];
    assert_eq!(koizumi.kanji_forms[0].expression, "ゝ泉");
    assert_eq!(koizumi.translations[0].name_types, ["family or surname"]);
    assert_eq!(koizumi.translations[0].language, "eng");

    let trans = &names.entries[1].translations[0];
    assert!(names.entries[1].kanji_forms.is_empty());
    assert_eq!(trans.language, "ger");
    assert_eq!(trans.name_types, ["place name", "family or surname"]);
    assert_eq!(trans.cross_references, ["相合傘"]);
    assert_eq!(trans.translated_forms, ["Aiaigasa", "Aiaigasa (Ort)"]);
}

#[test]
fn test_kanji_characters() {
    let doc = parse(KANJIDIC).unwrap();
    assert_eq!(doc.len(), 2);
    let kanji = doc.into_kanji().unwrap();

    let header = kanji.header.as_ref().unwrap();
    assert_eq!(header.file_version, "4");
    assert_eq!(header.database_version, "2024-001");
    assert_eq!(header.creation_date, "2024-01-01");

    let water = &kanji.characters[0];
    assert_eq!(water.literal, "水");
    assert_eq!(water.codepoints.len(), 2);
    assert_eq!(water.codepoints[0].standard, "ucs");
    assert_eq!(water.codepoints[0].value, "6c34");
    assert_eq!(water.radicals[0].classification, "classical");
    assert_eq!(water.radicals[0].value, "85");

    assert_eq!(water.misc.grade.as_deref(), Some("1"));
    assert_eq!(water.misc.stroke_count(), Some(4));
    assert_eq!(water.misc.miscounts(), &[3]);
    assert_eq!(water.misc.variants[0].kind, "jis212");
    assert_eq!(water.misc.frequency_rank, Some(223));
    assert_eq!(water.misc.jlpt_level, Some(4));
    assert!(water.misc.radical_names.is_empty());

    let moro = &water.dictionary_references[1];
    assert_eq!(moro.kind, "moro");
    assert_eq!(moro.volume.as_deref(), Some("6"));
    assert_eq!(moro.page.as_deref(), Some("0001"));
    assert_eq!(water.dictionary_references[0].volume, None);

    assert_eq!(water.query_codes[1].misclassification.as_deref(), Some("posn"));
    assert_eq!(water.query_codes[0].misclassification, None);

    let group = &water.reading_meaning_groups[0];
    let readings: Vec<(&str, &str)> = group.readings.iter().map(|r| (r.kind.as_str(), r.value.as_str())).collect();
    assert_eq!(readings, [("pinyin", "shui3"), ("ja_on", "スイ"), ("ja_kun", "みず")]);
    assert_eq!(group.meanings[0].language, "en");
    assert_eq!(group.meanings[1].language, "fr");
    assert_eq!(water.nanori, ["み", "ゆ"]);
}

#[test]
fn test_sparse_character_has_empty_sequences() {
    let kanji = parse(KANJIDIC).unwrap().into_kanji().unwrap();
    let rare = &kanji.characters[1];
    assert_eq!(rare.literal, "𠀋");
    assert!(rare.codepoints.is_empty());
    assert!(rare.dictionary_references.is_empty());
    assert!(rare.reading_meaning_groups.is_empty());
    assert!(rare.nanori.is_empty());
    assert_eq!(rare.misc.frequency_rank, None);
    assert_eq!(rare.misc.stroke_counts, [6]);
}

#[test]
fn test_missing_misc_defaults() {
    let kanji = parse("<kanjidic2><character><literal>一</literal></character></kanjidic2>")
        .unwrap()
        .into_kanji()
        .unwrap();
    assert!(kanji.header.is_none());
    assert_eq!(kanji.characters[0].misc, Misc::default());
}

#[test]
fn test_frequency_rank_parsing() {
    let kanji = parse(&kanji_with_freq("2500")).unwrap().into_kanji().unwrap();
    assert_eq!(kanji.characters[0].misc.frequency_rank, Some(2500));

    let kanji = parse(&kanji_with_freq("1")).unwrap().into_kanji().unwrap();
    assert_eq!(kanji.characters[0].misc.frequency_rank, Some(1));
}

#[test]
fn test_non_numeric_frequency_rank() {
    let err = parse(&kanji_with_freq("often")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::FieldTypeMismatch);
    assert_eq!(err.name.as_deref(), Some("frequency_rank"));
    assert!(err.message.contains("often"));
    assert!(err.position.is_some());

    for bad in ["0", "2502", "-1", ""] {
        let err = parse(&kanji_with_freq(bad)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::FieldTypeMismatch, "freq {bad:?}");
    }
}

#[test]
fn test_non_numeric_sequence_number() {
    let err = parse("<JMdict><entry><ent_seq>10x</ent_seq></entry></JMdict>").unwrap_err();
    assert_eq!(err.kind, ErrorKind::FieldTypeMismatch);
    assert_eq!(err.name.as_deref(), Some("sequence_number"));
}

#[test]
fn test_billion_laughs_rejected() {
    // 2^30 characters from a few hundred bytes of DTD
    let bomb = doubling_bomb(30);
    assert!(bomb.len() < 2048);
    let err = parse(&bomb).unwrap_err();
    assert_eq!(err.kind, ErrorKind::EntityExpansionExceeded);
    assert_eq!(err.name.as_deref(), Some("e30"));
}

#[test]
fn test_expansion_ceiling_is_configurable() {
    // 2^10 = 1024 characters
    let doc = doubling_bomb(10);
    assert!(parse(&doc).is_ok());

    let tight = Parser::with_options(ParseOptions::new().with_max_entity_expansion(1000));
    let err = tight.parse_str(&doc).unwrap_err();
    assert_eq!(err.kind, ErrorKind::EntityExpansionExceeded);

    let roomy = Parser::with_options(ParseOptions::new().with_max_entity_expansion(1024));
    let lexicon = roomy.parse_str(&doc).unwrap().into_lexicon().unwrap();
    assert_eq!(lexicon.entries[0].readings[0].reading.len(), 1024);
}

#[test]
fn test_budget_shared_across_references() {
    // Each reference alone fits, together they do not
    let doc = indoc! {r#"
        <!DOCTYPE JMdict [<!ENTITY big "0123456789">]>
        <JMdict><entry><sense><pos>&big;</pos><pos>&big;</pos><pos>&big;</pos></sense></entry></JMdict>
    "#};
    let parser = Parser::with_options(ParseOptions::new().with_max_entity_expansion(25));
    assert_eq!(parser.parse_str(doc).unwrap_err().kind, ErrorKind::EntityExpansionExceeded);
}

#[test]
fn test_external_entities_disallowed() {
    let doc = indoc! {r#"
        <!DOCTYPE JMdict [<!ENTITY xxe SYSTEM "file:///etc/passwd">]>
        <JMdict><entry><sense><gloss>&xxe;</gloss></sense></entry></JMdict>
    "#};
    let err = parse(doc).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ExternalEntityDisallowed);
    assert_eq!(err.name.as_deref(), Some("xxe"));

    let doc = indoc! {r#"
        <!DOCTYPE JMdict SYSTEM "JMdict.dtd">
        <JMdict><entry><sense><pos>&n;</pos></sense></entry></JMdict>
    "#};
    assert_eq!(parse(doc).unwrap_err().kind, ErrorKind::ExternalEntityDisallowed);

    let doc = "<!DOCTYPE JMdict [<!ENTITY % dtd SYSTEM \"http://evil/x.dtd\"> %dtd;]><JMdict/>";
    assert_eq!(parse(doc).unwrap_err().kind, ErrorKind::ExternalEntityDisallowed);
}

#[test]
fn test_cyclic_entities_rejected() {
    let doc = indoc! {r#"
        <!DOCTYPE JMdict [
        <!ENTITY a "&b;">
        <!ENTITY b "&a;">
        ]>
        <JMdict/>
    "#};
    assert_eq!(parse(doc).unwrap_err().kind, ErrorKind::CyclicEntityDeclaration);
}

/// Linear entity chain: `&e0;` refers through `links` entities to "x"
fn entity_chain(links: usize) -> String {
    let mut doc = String::from("<!DOCTYPE JMdict [\n");
    for i in 0..links {
        doc.push_str(&format!("<!ENTITY e{i} \"&e{};\">\n", i + 1));
    }
    doc.push_str(&format!(
        "<!ENTITY e{links} \"x\">\n]>\n<JMdict><entry><ent_seq>1</ent_seq><r_ele><reb>&e0;</reb></r_ele></entry></JMdict>"
    ));
    doc
}

#[test]
fn test_deep_entity_chain_expands() {
    let lexicon = parse(&entity_chain(10_000)).unwrap().into_lexicon().unwrap();
    assert_eq!(lexicon.entries[0].readings[0].reading, "x");
}

#[test]
fn test_unknown_root_performs_no_mapping() {
    // The body would fail mapping if it were ever walked
    let err = parse("<dictionary><freq>often</freq></dictionary>").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownDocumentType);
    assert_eq!(err.name.as_deref(), Some("dictionary"));
}

#[test]
fn test_root_name_mismatch() {
    let err = Parser::new().parse_kanji(Cursor::new(JMDICT)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::RootNameMismatch);

    let err = crate::parse(Cursor::new(KANJIDIC), Some(DocumentKind::Lexicon)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::RootNameMismatch);
    assert_eq!(err.name.as_deref(), Some("kanjidic2"));
}

#[test]
fn test_typed_entry_points() {
    let parser = Parser::new();
    assert_eq!(parser.parse_lexicon(JMDICT.as_bytes()).unwrap().entries.len(), 3);
    assert_eq!(parser.parse_named_entities(JMNEDICT.as_bytes()).unwrap().entries.len(), 2);
    assert_eq!(parser.parse_kanji(KANJIDIC.as_bytes()).unwrap().characters.len(), 2);
}

#[test]
fn test_parsing_is_idempotent() {
    for input in [JMDICT, JMNEDICT, KANJIDIC] {
        let first = parse(input).unwrap();
        let second = parse(input).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_malformed_markup_located() {
    let doc = "<JMdict>\n<entry>\n<ent_seq>1</ent_seq>\n</sense>\n</JMdict>";
    let err = parse(doc).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedDocument);
    let position = err.position.unwrap();
    assert_eq!((position.line, position.column), (4, 1));

    let err = parse("<JMdict><entry><ent_seq>1</ent_seq>").unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedDocument);

    let err = parse("<JMdict><entry><sense><gloss>&#xD800;</gloss></sense></entry></JMdict>").unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedDocument);
}

#[test]
fn test_strict_repetition() {
    let doc = "<JMdict><entry><ent_seq>1</ent_seq><ent_seq>2</ent_seq></entry></JMdict>";

    let lenient = parse(doc).unwrap().into_lexicon().unwrap();
    assert_eq!(lenient.entries[0].sequence_number, 2);

    let strict = Parser::with_options(ParseOptions::new_strict());
    let err = strict.parse_str(doc).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedRepetition);
    assert_eq!(err.name.as_deref(), Some("ent_seq"));
}

#[test]
fn test_unknown_elements_and_attributes_tolerated() {
    let doc = indoc! {r#"
        <JMdict>
        <entry status="new">
        <ent_seq>1</ent_seq>
        <r_ele><reb>て</reb><re_audio src="te.mp3"><clip/></re_audio></r_ele>
        <sense><gloss pri="1">hand<emph>!</emph></gloss></sense>
        </entry>
        </JMdict>
    "#};
    let lexicon = parse(doc).unwrap().into_lexicon().unwrap();
    let entry = &lexicon.entries[0];
    assert_eq!(entry.readings[0].reading, "て");
    assert_eq!(entry.senses[0].glosses[0].text, "hand");
}

/// Shared in-memory sink for a test subscriber
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_warn_policy_reports_unknown_elements() {
    let captured = Captured::default();
    let sink = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || sink.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    let doc = "<JMdict><entry><ent_seq>1</ent_seq><re_audio/></entry></JMdict>";
    let warn = Parser::with_options(ParseOptions::new().with_unknown(UnknownPolicy::Warn));
    tracing::subscriber::with_default(subscriber, || {
        warn.parse_str(doc).unwrap();
        Parser::new().parse_str("<JMdict><entry><ignored_quietly/></entry></JMdict>").unwrap();
    });

    let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("re_audio"), "{output}");
    assert!(!output.contains("ignored_quietly"), "{output}");
}

#[test]
fn test_utf16_input() {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in JMNEDICT.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    let doc = Parser::new().parse_bytes(&bytes).unwrap();
    assert_eq!(doc, parse(JMNEDICT).unwrap());
}

#[test]
fn test_batch_parsing_keeps_order() {
    let inputs = [JMDICT, "<html/>", KANJIDIC, JMNEDICT];
    let results = Parser::new().parse_batch(&inputs);

    assert_eq!(results.len(), 4);
    assert_eq!(results[0].as_ref().unwrap().kind(), DocumentKind::Lexicon);
    assert_eq!(results[1].as_ref().unwrap_err().kind, ErrorKind::UnknownDocumentType);
    assert_eq!(results[2].as_ref().unwrap().kind(), DocumentKind::Kanji);
    assert_eq!(results[3].as_ref().unwrap().kind(), DocumentKind::NamedEntity);
}

#[test]
fn test_parse_from_path() {
    let path = std::env::temp_dir().join(format!("jmdict-xml-{}-kanjidic2.xml", std::process::id()));
    std::fs::write(&path, KANJIDIC).unwrap();
    let result = Parser::new().parse_path(&path);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(result.unwrap().len(), 2);
}

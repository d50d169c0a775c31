//! jmdict-xml - Schema-driven parsing of the EDRDG dictionary files
//!
//! Parses JMdict, JMnedict and KANJIDIC2 XML into typed documents:
//!
//! - core: scanner, tokenizer, DTD entity declarations and bounded expansion
//! - reader: well-formed event stream with entities already expanded
//! - schema: static descriptions of the three formats
//! - mapper: generic schema-driven tree builder
//! - model: typed documents and the `DictionaryDocument` union
//! - parser: façade with root sniffing, typed and batch entry points
//!
//! ```no_run
//! use jmdict_xml::{DictionaryDocument, Parser, ParseOptions};
//!
//! let parser = Parser::with_options(ParseOptions::new().with_max_entity_expansion(50_000_000));
//! match parser.parse_path("JMdict_e.xml")? {
//!     DictionaryDocument::Lexicon(doc) => println!("{} entries", doc.entries.len()),
//!     other => println!("unexpected {:?} document", other.kind()),
//! }
//! # Ok::<(), jmdict_xml::ParseError>(())
//! ```

pub mod core;
pub mod error;
pub mod mapper;
pub mod model;
pub mod options;
pub mod parser;
pub mod reader;
pub mod schema;

#[cfg(test)]
mod tests;

pub use error::{ErrorKind, ParseError, Position, Result};
pub use model::{DictionaryDocument, DocumentKind, KanjiDocument, LexiconDocument, NamedEntityDocument};
pub use options::{ParseOptions, UnknownPolicy, DEFAULT_MAX_ENTITY_EXPANSION};
pub use parser::{parse, Parser};

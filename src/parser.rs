//! Parser Façade
//!
//! Selects the schema for a document (by its root element name, or as the
//! caller demands) and drives the mapper to completion:
//!
//! bytes → UTF-8 → `EventReader` (entities expanded) → `Mapper` → typed model
//!
//! Each call owns its reader, resolver budget and mapper stack, so one
//! `Parser` can serve many threads at once.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rayon::prelude::*;
use tracing::debug;

use crate::core::encoding;
use crate::error::{ErrorKind, ParseError, Result};
use crate::mapper::Mapper;
use crate::model::{DictionaryDocument, DocumentKind, KanjiDocument, LexiconDocument, NamedEntityDocument};
use crate::options::ParseOptions;
use crate::reader::buffered::read_document;
use crate::reader::{EventReader, XmlEvent};
use crate::schema;

/// Dictionary parser
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    /// Parser with default options (root sniffing, 500,000 character budget)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Parser { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Read a whole document from `reader` and parse it
    ///
    /// The reader is consumed and dropped before this returns, whatever the
    /// outcome.
    pub fn parse<R: Read>(&self, reader: R) -> Result<DictionaryDocument> {
        let bytes = read_document(reader)?;
        self.parse_bytes(&bytes)
    }

    /// Open and parse the file at `path`
    pub fn parse_path(&self, path: impl AsRef<Path>) -> Result<DictionaryDocument> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| ParseError::new(ErrorKind::Io, format!("{}: {e}", path.display())))?;
        self.parse(file)
    }

    /// Parse a buffered document (UTF-8, or UTF-16 with a byte order mark)
    pub fn parse_bytes(&self, input: &[u8]) -> Result<DictionaryDocument> {
        let text = encoding::decode(input)?;
        self.parse_str(&text)
    }

    pub fn parse_str(&self, input: &str) -> Result<DictionaryDocument> {
        let mut reader = EventReader::new(input, self.options.max_entity_expansion);

        let root = loop {
            match reader.next_event()? {
                XmlEvent::StartElement(start) => break start,
                XmlEvent::EndDocument => return Err(ParseError::malformed("document has no root element")),
                _ => {}
            }
        };
        let kind = self.select(root.name).map_err(|err| err.at(reader.position()))?;
        debug!(
            root = root.name,
            ?kind,
            doctype = ?reader.resolver().declarations().root_name,
            entities = reader.resolver().declarations().entities.len(),
            "selected dictionary schema"
        );

        let record = Mapper::new(&self.options).map(&mut reader, root, schema::for_kind(kind))?;
        // Only comments and PIs may follow the root; the reader rejects anything else
        while reader.next_event()? != XmlEvent::EndDocument {}

        let document = DictionaryDocument::from_record(kind, record);
        debug!(
            ?kind,
            entries = document.len(),
            expanded_chars = reader.resolver().expanded_chars(),
            "parsed dictionary"
        );
        Ok(document)
    }

    /// Parse several independent documents on the rayon pool
    ///
    /// Results are in input order; one failure does not affect the others.
    pub fn parse_batch<B>(&self, inputs: &[B]) -> Vec<Result<DictionaryDocument>>
    where
        B: AsRef<[u8]> + Sync,
    {
        inputs.par_iter().map(|input| self.parse_bytes(input.as_ref())).collect()
    }

    /// Parse a JMdict document
    pub fn parse_lexicon<R: Read>(&self, reader: R) -> Result<LexiconDocument> {
        let document = self.expecting(DocumentKind::Lexicon).parse(reader)?;
        document.into_lexicon().ok_or_else(|| mismatch(DocumentKind::Lexicon))
    }

    /// Parse a JMnedict document
    pub fn parse_named_entities<R: Read>(&self, reader: R) -> Result<NamedEntityDocument> {
        let document = self.expecting(DocumentKind::NamedEntity).parse(reader)?;
        document.into_named_entities().ok_or_else(|| mismatch(DocumentKind::NamedEntity))
    }

    /// Parse a KANJIDIC2 document
    pub fn parse_kanji<R: Read>(&self, reader: R) -> Result<KanjiDocument> {
        let document = self.expecting(DocumentKind::Kanji).parse(reader)?;
        document.into_kanji().ok_or_else(|| mismatch(DocumentKind::Kanji))
    }

    fn expecting(&self, kind: DocumentKind) -> Parser {
        Parser::with_options(self.options.clone().with_expected(kind))
    }

    /// Pick the document kind for root element `root`
    fn select(&self, root: &str) -> Result<DocumentKind> {
        match self.options.expected {
            Some(expected) if expected.root_name() == root => Ok(expected),
            Some(expected) => Err(ParseError::new(
                ErrorKind::RootNameMismatch,
                format!("expected root element <{}>, found <{root}>", expected.root_name()),
            )
            .with_name(root)),
            None => DocumentKind::from_root_name(root).ok_or_else(|| {
                ParseError::new(
                    ErrorKind::UnknownDocumentType,
                    format!("<{root}> is not a JMdict, JMnedict or KANJIDIC2 root element"),
                )
                .with_name(root)
            }),
        }
    }
}

fn mismatch(kind: DocumentKind) -> ParseError {
    ParseError::new(
        ErrorKind::RootNameMismatch,
        format!("document is not a <{}> document", kind.root_name()),
    )
}

/// Parse a document with default options, optionally requiring a variant
pub fn parse<R: Read>(reader: R, expected: Option<DocumentKind>) -> Result<DictionaryDocument> {
    let options = ParseOptions {
        expected,
        ..ParseOptions::default()
    };
    Parser::with_options(options).parse(reader)
}

//! Core XML parsing primitives
//!
//! This module contains the fundamental building blocks for XML parsing:
//! - Scanner: SIMD-accelerated delimiter detection using memchr
//! - Encoding: UTF-16 detection and conversion to UTF-8
//! - DTD: internal subset parsing and entity declaration checks
//! - Entities: reference expansion with Cow (zero-copy when possible) under
//!   a per-parse expansion budget
//! - Attributes: Attribute parsing and extraction
//! - Tokenizer: State machine for XML token extraction

pub mod attributes;
pub mod dtd;
pub mod encoding;
pub mod entities;
pub mod scanner;
pub mod tokenizer;

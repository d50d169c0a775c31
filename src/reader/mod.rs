//! XML Reader Module
//!
//! - Buffered: drains a `Read` source into one document buffer
//! - Slice: `EventReader`, the well-formed event stream over that buffer
//! - Events: XML event types for pull parsing

pub mod buffered;
pub mod events;
pub mod slice;

pub use events::{EndElement, StartElement, XmlEvent};
pub use slice::EventReader;

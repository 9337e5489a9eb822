//! Reading and writing INI configuration files.
//!
//! A [`Document`] holds named sections of string key/value pairs. Documents
//! are filled by the line parser, queried and edited through accessors, and
//! written back out with a set of independent formatting flags.

pub mod document;
pub mod error;
pub mod flags;
pub mod fs;
pub mod line;
pub mod parser;
pub mod serializer;
pub mod trim;

pub use document::{Document, Section, SectionMut, Source, DEFAULT_SECTION};
pub use error::{IniError, IniResult};
pub use flags::{ParseFlags, SaveFlags};
pub use parser::Parser;

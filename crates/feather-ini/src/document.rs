use std::any::type_name;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{IniError, IniResult};
use crate::flags::{ParseFlags, SaveFlags};
use crate::fs::atomic_write;
use crate::line::read_lines;
use crate::parser;
use crate::serializer;

/// Name of the section that collects pairs appearing before any header.
pub const DEFAULT_SECTION: &str = "";

/// Keys and values of one section.
pub type Section = BTreeMap<String, String>;

/// Where a document was loaded from and is saved to by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Memory,
}

/// An INI document: named sections, each mapping keys to string values.
///
/// Sections and keys are kept in sorted order, which is also the order they
/// are written in. Cloning produces a fully independent copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    source: Source,
    sections: BTreeMap<String, Section>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty, memory-backed document holding only the default section.
    pub fn new() -> Self {
        Self::from_source(Source::Memory)
    }

    /// Creates an empty document bound to `path`. Nothing is read until
    /// [`Document::parse`] is called.
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self::from_source(Source::File(path.into()))
    }

    fn from_source(source: Source) -> Self {
        let mut sections = BTreeMap::new();
        sections.insert(DEFAULT_SECTION.to_string(), Section::new());
        Self { source, sections }
    }

    /// Binds a document to `path` and parses it.
    pub fn open(path: impl Into<PathBuf>, flags: ParseFlags) -> IniResult<Self> {
        let mut document = Self::with_file(path);
        document.parse(flags)?;
        Ok(document)
    }

    /// Parses in-memory text into a new memory-backed document.
    pub fn parse_str(text: &str, flags: ParseFlags) -> IniResult<Self> {
        let mut document = Self::new();
        document.parse_reader(&mut text.as_bytes(), flags)?;
        Ok(document)
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            Source::File(path) => Some(path),
            Source::Memory => None,
        }
    }

    /// Reads the bound file into this document. Memory-backed documents have
    /// nothing to read and are left unchanged.
    ///
    /// On a duplicate error the pairs read so far stay in the document, which
    /// should then be discarded.
    pub fn parse(&mut self, flags: ParseFlags) -> IniResult<()> {
        let path = match &self.source {
            Source::File(path) => path.clone(),
            Source::Memory => return Ok(()),
        };

        let file = File::open(&path).map_err(|source| IniError::SourceUnavailable {
            path: Some(path.clone()),
            source,
        })?;
        let mut reader = BufReader::new(file);
        let lines = read_lines(&mut reader).map_err(|source| IniError::SourceUnavailable {
            path: Some(path.clone()),
            source,
        })?;

        parser::parse_lines(self, lines, flags)?;
        tracing::debug!("Parsed {} ({} sections)", path.display(), self.len());
        Ok(())
    }

    /// Parses lines from `reader` into this document.
    pub fn parse_reader<R: BufRead>(
        &mut self,
        reader: &mut R,
        flags: ParseFlags,
    ) -> IniResult<()> {
        let lines = read_lines(reader)
            .map_err(|source| IniError::SourceUnavailable { path: None, source })?;
        parser::parse_lines(self, lines, flags)
    }

    /// Parses already split lines into this document.
    pub fn parse_lines<I, S>(&mut self, lines: I, flags: ParseFlags) -> IniResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        parser::parse_lines(self, lines, flags)
    }

    /// Writes the document to the file it was loaded from.
    pub fn save(&self, flags: SaveFlags) -> IniResult<()> {
        match &self.source {
            Source::File(path) => self.save_as(path, flags),
            Source::Memory => Err(IniError::DestinationUnavailable {
                path: None,
                source: io::Error::new(
                    io::ErrorKind::NotFound,
                    "memory-backed document has no file to save to",
                ),
            }),
        }
    }

    /// Writes the document to `path`, replacing any existing content.
    pub fn save_as(&self, path: impl AsRef<Path>, flags: SaveFlags) -> IniResult<()> {
        let path = path.as_ref();
        atomic_write(path, self.render(flags).as_bytes()).map_err(|source| {
            IniError::DestinationUnavailable {
                path: Some(path.to_path_buf()),
                source,
            }
        })?;
        tracing::debug!("Saved {}", path.display());
        Ok(())
    }

    pub fn write_to<W: Write>(&self, writer: &mut W, flags: SaveFlags) -> IniResult<()> {
        serializer::write_document(self, writer, flags)
            .map_err(|source| IniError::DestinationUnavailable { path: None, source })
    }

    /// Renders the document as output lines, without terminators.
    pub fn to_lines(&self, flags: SaveFlags) -> Vec<String> {
        serializer::render_lines(self, flags)
    }

    /// Renders the document as text, one terminated line per output line.
    pub fn render(&self, flags: SaveFlags) -> String {
        let mut out = String::new();
        for line in self.to_lines(flags) {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    /// Returns a handle to `name`, creating the section if needed.
    pub fn select(&mut self, name: &str) -> SectionMut<'_> {
        let existed = self.sections.contains_key(name);
        let keys = self.sections.entry(name.to_string()).or_default();
        SectionMut {
            name: name.to_string(),
            keys,
            existed,
        }
    }

    /// Returns a handle to `name` only if the section already exists.
    pub fn select_existing(&mut self, name: &str) -> Option<SectionMut<'_>> {
        self.sections.get_mut(name).map(|keys| SectionMut {
            name: name.to_string(),
            keys,
            existed: true,
        })
    }

    /// Adds a new empty section. Creating the default section always succeeds
    /// and empties it.
    pub fn create(&mut self, name: &str) -> IniResult<SectionMut<'_>> {
        let (keys, existed) = match self.sections.entry(name.to_string()) {
            btree_map::Entry::Occupied(entry) if !name.is_empty() => {
                return Err(IniError::SectionExists {
                    name: entry.key().clone(),
                });
            }
            btree_map::Entry::Occupied(entry) => {
                let keys = entry.into_mut();
                keys.clear();
                (keys, true)
            }
            btree_map::Entry::Vacant(entry) => (entry.insert(Section::new()), false),
        };

        Ok(SectionMut {
            name: name.to_string(),
            keys,
            existed,
        })
    }

    /// Deletes a section with all of its pairs.
    pub fn remove(&mut self, name: &str) -> Option<Section> {
        self.sections.remove(name)
    }

    /// Drops every section, leaving an empty default section.
    pub fn clear(&mut self) {
        self.sections.clear();
        self.sections.insert(DEFAULT_SECTION.to_string(), Section::new());
    }

    pub fn get<'a>(&'a self, section: &str, key: &str, default: &'a str) -> &'a str {
        self.value(section, key).unwrap_or(default)
    }

    pub fn value(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|keys| keys.get(key))
            .map(String::as_str)
    }

    /// Parses the stored value as `T`, or returns `default` when the section
    /// or key is absent.
    pub fn get_as<T>(&self, section: &str, key: &str, default: T) -> IniResult<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.value(section, key) {
            Some(raw) => convert(section, key, raw),
            None => Ok(default),
        }
    }

    /// Stores `value` under `key`, creating the section if needed. Returns
    /// the value it replaced.
    pub fn set(
        &mut self,
        section: &str,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.section_mut(section).insert(key.into(), value.into())
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Direct access to a section's pairs, creating the section if needed.
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        self.sections.entry(name.to_string()).or_default()
    }

    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(name, keys)| (name.as_str(), keys))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Mutable handle to one section of a [`Document`].
#[derive(Debug)]
pub struct SectionMut<'a> {
    name: String,
    keys: &'a mut Section,
    existed: bool,
}

impl SectionMut<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the section was already present when the handle was taken.
    pub fn existed(&self) -> bool {
        self.existed
    }

    pub fn get<'b>(&'b self, key: &str, default: &'b str) -> &'b str {
        self.value(key).unwrap_or(default)
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.keys.get(key).map(String::as_str)
    }

    pub fn get_as<T>(&self, key: &str, default: T) -> IniResult<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.value(key) {
            Some(raw) => convert(&self.name, key, raw),
            None => Ok(default),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.keys.insert(key.into(), value.into())
    }

    pub fn remove_key(&mut self, key: &str) -> Option<String> {
        self.keys.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn as_map(&self) -> &Section {
        &*self.keys
    }

    pub fn as_map_mut(&mut self) -> &mut Section {
        &mut *self.keys
    }
}

fn convert<T>(section: &str, key: &str, raw: &str) -> IniResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse::<T>().map_err(|err| IniError::MalformedValue {
        section: section.to_string(),
        key: key.to_string(),
        value: raw.to_string(),
        expected: type_name::<T>(),
        reason: err.to_string(),
    })
}

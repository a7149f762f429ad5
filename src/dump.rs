// src/dump.rs

//! Reader for cppcheck `--dump` output
//!
//! A dump holds one `<dump>` element per preprocessor configuration. Only
//! the parts the addon check relies on are modeled: the token list and the
//! functions declared in each scope.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::fs;
use std::path::Path;

/// A token from `<tokenlist>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub id: Option<String>,
    pub text: String,
    pub line: Option<u32>,
}

/// A function from a scope's `<functionList>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub id: Option<String>,
    pub name: String,
}

/// One preprocessor configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    /// Configuration name, empty for the default configuration
    pub cfg: String,
    pub tokenlist: Vec<Token>,
    pub functions: Vec<Function>,
}

impl Configuration {
    /// Function names joined with `,`, in document order
    pub fn function_names(&self) -> String {
        self.functions
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn token_count(&self) -> usize {
        self.tokenlist.len()
    }
}

/// A parsed dump file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpFile {
    pub configurations: Vec<Configuration>,
}

impl DumpFile {
    /// The configuration addons inspect, or a parse error if there is none
    pub fn primary(&self) -> Result<&Configuration> {
        self.configurations
            .first()
            .ok_or_else(|| Error::ParseError("Dump contains no configurations".to_string()))
    }
}

fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| Error::ParseError(format!("Invalid attribute: {}", e)))?;
        if attr.key.as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|e| Error::ParseError(format!("Invalid attribute value: {}", e)))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

#[derive(Default)]
struct ParseState {
    seen_root: bool,
    current: Option<Configuration>,
    in_tokenlist: bool,
    in_function_list: bool,
}

impl ParseState {
    fn open(&mut self, element: &BytesStart<'_>, dump: &mut DumpFile, empty: bool) -> Result<()> {
        let name = element.name();
        let name = name.as_ref();

        if !self.seen_root {
            if name != b"dumps" {
                return Err(Error::ParseError(format!(
                    "Expected <dumps> root element, found <{}>",
                    String::from_utf8_lossy(name)
                )));
            }
            self.seen_root = true;
            return Ok(());
        }

        match name {
            b"dump" => {
                let config = Configuration {
                    cfg: attribute(element, b"cfg")?.unwrap_or_default(),
                    ..Default::default()
                };
                if empty {
                    dump.configurations.push(config);
                } else {
                    self.current = Some(config);
                }
            }
            b"tokenlist" if !empty => self.in_tokenlist = true,
            b"functionList" if !empty => self.in_function_list = true,
            b"token" if self.in_tokenlist => {
                if let Some(config) = self.current.as_mut() {
                    config.tokenlist.push(Token {
                        id: attribute(element, b"id")?,
                        text: attribute(element, b"str")?.unwrap_or_default(),
                        line: attribute(element, b"linenr")?.and_then(|l| l.parse().ok()),
                    });
                }
            }
            b"function" if self.in_function_list => {
                if let Some(config) = self.current.as_mut() {
                    config.functions.push(Function {
                        id: attribute(element, b"id")?,
                        name: attribute(element, b"name")?.unwrap_or_default(),
                    });
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8], dump: &mut DumpFile) {
        match name {
            b"dump" => {
                if let Some(config) = self.current.take() {
                    dump.configurations.push(config);
                }
            }
            b"tokenlist" => self.in_tokenlist = false,
            b"functionList" => self.in_function_list = false,
            _ => {}
        }
    }
}

/// Parse dump XML from a string
pub fn parse_dump(xml: &str) -> Result<DumpFile> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut dump = DumpFile::default();
    let mut state = ParseState::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => state.open(&e, &mut dump, false)?,
            Ok(Event::Empty(e)) => state.open(&e, &mut dump, true)?,
            Ok(Event::End(e)) => state.close(e.name().as_ref(), &mut dump),
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::ParseError(format!(
                    "Malformed dump at byte {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    if !state.seen_root {
        return Err(Error::ParseError("Dump is empty".to_string()));
    }
    Ok(dump)
}

/// Parse a dump file from disk
pub fn parse_dump_file(path: &Path) -> Result<DumpFile> {
    let xml = fs::read_to_string(path)
        .map_err(|e| Error::IoError(format!("Failed to read {}: {}", path.display(), e)))?;
    parse_dump(&xml)
}

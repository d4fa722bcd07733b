// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The text layout of a saved game.
//!
//! A save is a list of `[section]`s, each holding `key = value` lines. Every
//! section declares its size with a `length` key; list sections then hold
//! one entry per index from `0` to `length - 1`.
use std::io::{self, Write};

use hashbrown::HashMap;
use pest::Parser;

use crate::error::LoadError;

#[derive(Parser)]
#[grammar = "save/save.pest"]
struct SaveParser;

const LENGTH_KEY: &str = "length";

/// A parsed save file. Sections are validated when they are read.
#[derive(Debug, Default)]
pub struct Document {
    sections: HashMap<String, Vec<(String, String)>>,
}

impl Document {
    pub fn parse(text: &str) -> Result<Document, LoadError> {
        let mut pairs =
            SaveParser::parse(Rule::save, text).map_err(|err| LoadError::Syntax(err.to_string()))?;

        let save = pairs.next().expect("save rule always yields one pair");
        let mut doc = Document::default();
        for section in save.into_inner() {
            if section.as_rule() != Rule::section {
                continue;
            }

            let mut inner = section.into_inner();
            let name = inner
                .next()
                .expect("section always has a name")
                .as_str()
                .to_owned();

            let mut keys = vec![];
            for entry in inner {
                let mut kv = entry.into_inner();
                let key = kv.next().expect("entry has a key").as_str().to_owned();
                let value = kv.next().expect("entry has a value").as_str().trim().to_owned();
                keys.push((key, value));
            }

            if doc.sections.contains_key(&name) {
                return Err(LoadError::DuplicateSection(name));
            }

            doc.sections.insert(name, keys);
        }

        Ok(doc)
    }

    /// The declared length of a section.
    pub fn length(&self, name: &'static str) -> Result<usize, LoadError> {
        let keys = self
            .sections
            .get(name)
            .ok_or(LoadError::MissingSection(name))?;

        let mut lengths = keys.iter().filter(|(key, _)| key == LENGTH_KEY);
        let length = match (lengths.next(), lengths.next()) {
            (Some((_, value)), None) => value,
            _ => return Err(LoadError::InvalidLength(name)),
        };

        length
            .parse::<usize>()
            .map_err(|_| LoadError::InvalidLength(name))
    }

    /// The entries of a list section, in index order. The number of entries must match the
    /// declared length, and every index below it must be present exactly once.
    pub fn entries(&self, name: &'static str) -> Result<Vec<&str>, LoadError> {
        let length = self.length(name)?;
        let keys = &self.sections[name];

        let mut entries: HashMap<usize, &str> = HashMap::new();
        for (key, value) in keys.iter().filter(|(key, _)| key != LENGTH_KEY) {
            let index = key.parse::<usize>().map_err(|_| {
                LoadError::Syntax(format!("unexpected key {} in section [{}]", key, name))
            })?;

            if entries.insert(index, value.as_str()).is_some() {
                return Err(LoadError::Syntax(format!(
                    "entry {} appears twice in section [{}]",
                    index, name
                )));
            }
        }

        if entries.len() != length {
            return Err(LoadError::LengthMismatch {
                section: name,
                declared: length,
                actual: entries.len(),
            });
        }

        (0..length)
            .map(|idx| {
                entries
                    .get(&idx)
                    .cloned()
                    .ok_or(LoadError::MissingEntry(name, idx))
            })
            .collect()
    }
}

/// Writes a section holding only a length.
pub fn write_length<W: Write>(w: &mut W, name: &str, length: usize) -> io::Result<()> {
    writeln!(w, "[{}]", name)?;
    writeln!(w, "{} = {}", LENGTH_KEY, length)?;
    writeln!(w)
}

/// Writes a list section.
pub fn write_entries<W: Write>(w: &mut W, name: &str, entries: &[String]) -> io::Result<()> {
    writeln!(w, "[{}]", name)?;
    writeln!(w, "{} = {}", LENGTH_KEY, entries.len())?;
    for (idx, entry) in entries.iter().enumerate() {
        writeln!(w, "{} = {}", idx, entry)?;
    }

    writeln!(w)
}

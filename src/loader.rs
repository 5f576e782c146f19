//! CSV batch loading and row output.
//!
//! Two layouts are accepted, told apart by the header width:
//!
//!   base (10):     key, category, year, accused, organization, city,
//!                  province, search_result, description, source
//!   extended (14): base with verdict_punishment, verdict_date,
//!                  arrest_date, state_damage inserted after province
//!
//! Empty cells mean "absent". Any malformed row aborts the whole batch.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::category::{Category, find_by_name};
use crate::error::{Error, Result};
use crate::record::{CaseInput, CaseRecord, VerdictExtras};
use crate::vocab::Vocabulary;

const BASE_COLUMNS: &[&str] = &[
    "key",
    "category",
    "year",
    "accused",
    "organization",
    "city",
    "province",
    "search_result",
    "description",
    "source",
];

const EXTENDED_COLUMNS: &[&str] = &[
    "key",
    "category",
    "year",
    "accused",
    "organization",
    "city",
    "province",
    "verdict_punishment",
    "verdict_date",
    "arrest_date",
    "state_damage",
    "search_result",
    "description",
    "source",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    Base,
    Extended,
}

impl Schema {
    pub fn from_width(found: usize) -> Result<Self> {
        match found {
            10 => Ok(Self::Base),
            14 => Ok(Self::Extended),
            _ => Err(Error::UnsupportedSchema { found }),
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Base => BASE_COLUMNS,
            Self::Extended => EXTENDED_COLUMNS,
        }
    }

    pub fn width(&self) -> usize {
        self.columns().len()
    }
}

/// Records read from one CSV source, with the layout they came in.
#[derive(Debug)]
pub struct Batch {
    pub schema: Schema,
    pub records: Vec<CaseRecord>,
}

pub fn read_batch<R: Read>(
    reader: R,
    categories: &[Category],
    vocab: &Vocabulary,
) -> Result<Batch> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let schema = Schema::from_width(csv_reader.headers()?.len())?;
    let mut records = Vec::new();

    for row in csv_reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let input = parse_row(&row, line, schema, categories)?;
        let record = CaseRecord::new(input, vocab);
        tracing::debug!(
            key = record.key(),
            year = record.year(),
            city = record.city(),
            province = record.province(),
            "constructed record"
        );
        records.push(record);
    }

    Ok(Batch { schema, records })
}

pub fn read_batch_from_path(
    path: &Path,
    categories: &[Category],
    vocab: &Vocabulary,
) -> Result<Batch> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let batch = read_batch(file, categories, vocab)?;
    tracing::info!(
        records = batch.records.len(),
        schema = ?batch.schema,
        "read {}",
        path.display()
    );
    Ok(batch)
}

fn parse_row(
    row: &StringRecord,
    line: u64,
    schema: Schema,
    categories: &[Category],
) -> Result<CaseInput> {
    if row.len() != schema.width() {
        return Err(Error::FieldCount {
            line,
            expected: schema.width(),
            found: row.len(),
        });
    }
    let field = |i: usize| row.get(i).unwrap_or("").to_string();
    let optional = |i: usize| row.get(i).filter(|s| !s.is_empty()).map(str::to_string);

    let raw_key = field(0);
    let key = raw_key
        .trim()
        .parse::<i64>()
        .map_err(|_| Error::InvalidKey {
            line,
            value: raw_key.clone(),
        })?;

    let category = match optional(1) {
        Some(name) => Some(
            find_by_name(categories, &name)
                .cloned()
                .ok_or(Error::UnknownCategory { line, name })?,
        ),
        None => None,
    };

    // Columns after province shift by four in the extended layout
    let (extras, tail) = match schema {
        Schema::Base => (None, 7),
        Schema::Extended => (
            Some(VerdictExtras {
                punishment: optional(7),
                verdict_date: optional(8),
                arrest_date: optional(9),
                state_damage: optional(10),
            }),
            11,
        ),
    };

    Ok(CaseInput {
        key,
        category,
        year: optional(2),
        accused: field(3),
        organization: field(4),
        city: optional(5),
        province: optional(6),
        extras,
        search_result: optional(tail),
        description: field(tail + 1),
        source: field(tail + 2),
    })
}

/// Write a header line followed by one quoted line per record.
pub fn write_batch<W: Write>(out: &mut W, schema: Schema, records: &[CaseRecord]) -> io::Result<()> {
    writeln!(out, "{}", schema.columns().join(","))?;
    for record in records {
        writeln!(out, "{record}")?;
    }
    Ok(())
}

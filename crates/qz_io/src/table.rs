//! Lookup table file: a JSON object mapping decimal code strings to record lists.
//!
//! ```json
//! {
//!   "204": [
//!     { "code_1": "11-1011", "title_1": "Chief Executives", "code_2": "A", "title_2": "Management" },
//!     ["13-2011", "Accountants", "B", "Finance", "87"]
//!   ]
//! }
//! ```
//! A record is either an object or a positional array of at least four
//! strings; positions past the fourth land in `extra`.

use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use qz_core::{PreferenceCode, ResultRecord, ResultTable};

use crate::{read_to_string, IoError, IoResult};

/// Fixed fields every record carries.
const RECORD_FIELDS: usize = 4;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecord {
    Positional(Vec<String>),
    Object(ResultRecord),
}

/// Top-level entries in file order, repeated keys included.
struct RawTable(Vec<(String, Vec<RawRecord>)>);

impl<'de> Deserialize<'de> for RawTable {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping decimal codes to record lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawTable, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Vec<RawRecord>>()? {
                    entries.push(entry);
                }
                Ok(RawTable(entries))
            }
        }

        d.deserialize_map(EntriesVisitor)
    }
}

fn record_from_raw(raw: RawRecord, pointer: impl FnOnce() -> String) -> IoResult<ResultRecord> {
    match raw {
        RawRecord::Object(r) => Ok(r),
        RawRecord::Positional(fields) if fields.len() >= RECORD_FIELDS => {
            let mut it = fields.into_iter();
            let mut next = || it.next().unwrap_or_default();
            let mut rec = ResultRecord::new(next(), next(), next(), next());
            rec.extra = it.collect();
            Ok(rec)
        }
        RawRecord::Positional(fields) => Err(IoError::Json {
            pointer: pointer(),
            msg: format!("positional record needs {RECORD_FIELDS} fields, found {}", fields.len()),
        }),
    }
}

/// Parse a table; every key must be a decimal integer below `radix³`.
pub fn parse_table(text: &str, radix: u16) -> IoResult<ResultTable> {
    let RawTable(raw) = serde_json::from_str(text)?;

    let mut table = ResultTable::new();
    for (key, records) in raw {
        let value: u32 = key.trim().parse().map_err(|_| IoError::Json {
            pointer: format!("/{key}"),
            msg: "key is not a decimal code".into(),
        })?;
        let code = PreferenceCode::from_value(value, radix).map_err(|e| IoError::Json {
            pointer: format!("/{key}"),
            msg: e.to_string(),
        })?;
        if table.contains_key(&code) {
            return Err(IoError::Invalid(format!("code {code} appears under more than one key")));
        }

        let mut out = Vec::with_capacity(records.len());
        for (i, r) in records.into_iter().enumerate() {
            out.push(record_from_raw(r, || format!("/{key}/{i}"))?);
        }
        table.insert(code, out);
    }
    Ok(table)
}

pub fn load_table(path: &Path, radix: u16) -> IoResult<ResultTable> {
    parse_table(&read_to_string(path)?, radix)
}

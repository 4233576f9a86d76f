// history.rs

use std::fmt;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, error, info, warn};

use crate::error::{InvalidRecordError, LoadError, SaveError};
use crate::util::render_float;

/// Column holding the formatted records in a saved history file.
pub const HISTORY_COLUMN: &str = "calculations";

/// One completed calculation, kept as the exact text it was created or loaded from.
#[derive(Clone, Debug)]
pub struct CalculationRecord {
    text: String,
    operator: String,
    operands: (f64, f64),
    result: f64,
}

impl CalculationRecord {
    pub fn new(operator: &str, a: f64, b: f64, result: f64) -> Self {
        let text = format!(
            "{} {} {} = {}",
            operator,
            render_float(a),
            render_float(b),
            render_float(result)
        );
        Self {
            text,
            operator: operator.to_string(),
            operands: (a, b),
            result,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn operands(&self) -> (f64, f64) {
        self.operands
    }

    pub fn result(&self) -> f64 {
        self.result
    }
}

impl FromStr for CalculationRecord {
    type Err = InvalidRecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let text = line.trim();
        let parse = |token: &str| {
            token
                .parse::<f64>()
                .map_err(|_| InvalidRecordError::new(line, "non-numeric field"))
        };
        match text.split_whitespace().collect::<Vec<&str>>().as_slice() {
            [op, a, b, "=", result] => Ok(Self {
                text: text.to_string(),
                operator: op.to_string(),
                operands: (parse(a)?, parse(b)?),
                result: parse(result)?,
            }),
            [] => Err(InvalidRecordError::new(line, "empty record")),
            _ => Err(InvalidRecordError::new(
                line,
                "expected `<op> <a> <b> = <result>`",
            )),
        }
    }
}

impl fmt::Display for CalculationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// Records compare by their text so NaN results still round-trip as equal.
impl PartialEq for CalculationRecord {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for CalculationRecord {}

/// Ordered, session-scoped log of completed calculations.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<CalculationRecord>,
}

impl History {
    pub fn new() -> Self {
        debug!("Initialized history");
        Self { entries: Vec::new() }
    }

    pub fn append(&mut self, record: CalculationRecord) {
        debug!(record = %record, "Added calculation");
        self.entries.push(record);
    }

    /// Parses `line` as a record before appending it.
    pub fn append_line(&mut self, line: &str) -> Result<(), InvalidRecordError> {
        let record = line.parse()?;
        self.append(record);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        debug!("Cleared all history");
    }

    /// Removes the newest record. `None` means the log was already empty.
    pub fn undo_last(&mut self) -> Option<CalculationRecord> {
        match self.entries.pop() {
            Some(removed) => {
                debug!(record = %removed, "Removed last calculation");
                Some(removed)
            }
            None => {
                warn!("Attempted to undo, but history is already empty");
                None
            }
        }
    }

    pub fn snapshot(&self) -> Vec<CalculationRecord> {
        debug!("History accessed");
        self.entries.clone()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CalculationRecord> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overwrites `path` with a one-column CSV table, header row always included.
    pub fn save(&self, path: &Path) -> Result<(), SaveError> {
        let csv_err = |source| SaveError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
        writer.write_record([HISTORY_COLUMN]).map_err(csv_err)?;
        for record in &self.entries {
            writer.write_record([record.as_str()]).map_err(csv_err)?;
        }
        writer.flush().map_err(|source| SaveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), records = self.entries.len(), "History saved");
        Ok(())
    }

    /// Replaces the log with the records stored at `path`.
    ///
    /// On any error the current entries are left as they were. Blank cells
    /// and cells that do not parse as a record are skipped.
    pub fn load(&mut self, path: &Path) -> Result<usize, LoadError> {
        let loaded = read_records(path).map_err(|err| {
            error!(path = %path.display(), "{}", err);
            err
        })?;
        let count = loaded.len();
        self.entries = loaded;
        info!(path = %path.display(), records = count, "History loaded");
        Ok(count)
    }
}

fn read_records(path: &Path) -> Result<Vec<CalculationRecord>, LoadError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let malformed = |reason: String| LoadError::Malformed {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);
    let headers = reader
        .byte_headers()
        .map_err(|err| malformed(err.to_string()))?
        .iter()
        .map(std::str::from_utf8)
        .collect::<Result<Vec<&str>, _>>()
        .map_err(|err| malformed(format!("header row is not valid UTF-8: {}", err)))?;
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(LoadError::Empty(path.to_path_buf()));
    }
    let column = headers
        .iter()
        .position(|h| h.trim() == HISTORY_COLUMN)
        .ok_or_else(|| LoadError::MissingColumn {
            path: path.to_path_buf(),
            column: HISTORY_COLUMN,
        })?;

    // Only the designated column is decoded; other columns may hold any bytes.
    let mut records = Vec::new();
    for row in reader.byte_records() {
        let row = row.map_err(|err| malformed(err.to_string()))?;
        let Some(raw) = row.get(column) else {
            continue;
        };
        let cell = match std::str::from_utf8(raw) {
            Ok(cell) => cell.trim(),
            Err(err) => {
                warn!(path = %path.display(), "Skipping row with undecodable cell: {}", err);
                continue;
            }
        };
        if cell.is_empty() {
            continue;
        }
        match cell.parse::<CalculationRecord>() {
            Ok(record) => records.push(record),
            Err(err) => warn!(path = %path.display(), "Skipping row: {}", err),
        }
    }
    Ok(records)
}

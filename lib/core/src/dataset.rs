//! CSV loading and inclusion filtering
//!
//! Columns are located by header name, so extra columns and column order in
//! the source file do not matter. Rows that fail [`Record::is_included`] are
//! dropped while loading; the count read before filtering is kept for
//! reporting.

use crate::record::Record;
use crate::{Error, Result};
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

pub const COL_ORGANISM: &str = "Organism";
pub const COL_GRAVITY_CONDITION: &str = "Gravity_Condition";
pub const COL_EXPERIMENTAL_TYPE: &str = "Experimental_Type";
pub const COL_ABSTRACT: &str = "Abstract";
pub const COL_TITLE: &str = "Title";
pub const COL_LINK: &str = "Link";

/// Header positions of the columns the loader reads
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    organism: usize,
    gravity_condition: usize,
    experimental_type: usize,
    abstract_text: usize,
    title: Option<usize>,
    link: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| find(name).ok_or_else(|| Error::MissingColumn(name.to_string()));

        Ok(Self {
            organism: require(COL_ORGANISM)?,
            gravity_condition: require(COL_GRAVITY_CONDITION)?,
            experimental_type: require(COL_EXPERIMENTAL_TYPE)?,
            abstract_text: require(COL_ABSTRACT)?,
            title: find(COL_TITLE),
            link: find(COL_LINK),
        })
    }

    fn record(&self, row: usize, fields: &StringRecord) -> Record {
        let cell = |idx: usize| {
            fields
                .get(idx)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Record {
            row,
            organism: cell(self.organism),
            gravity_condition: cell(self.gravity_condition),
            experimental_type: cell(self.experimental_type),
            abstract_text: cell(self.abstract_text).unwrap_or_default(),
            title: self.title.and_then(cell),
            link: self.link.and_then(cell),
        }
    }
}

/// The filtered, ordered set of records for one invocation
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    rows_read: usize,
}

impl Dataset {
    /// Build a dataset by applying the inclusion predicate to `records`
    pub fn from_records(records: Vec<Record>) -> Self {
        let rows_read = records.len();
        let records = records.into_iter().filter(Record::is_included).collect();
        Self { records, rows_read }
    }

    /// Load and filter a CSV file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading dataset from {:?}", path);
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load and filter CSV data from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?;
        let width = headers.len();
        let columns = ColumnMap::from_headers(headers)?;
        debug!("Resolved columns: {:?}", columns);

        let mut records = Vec::new();
        let mut rows_read = 0usize;
        for (row, result) in csv_reader.records().enumerate() {
            let fields = result?;
            // short rows leave the trailing cells absent, long rows are rejected
            if fields.len() > width {
                return Err(Error::MalformedRow {
                    row,
                    expected: width,
                    found: fields.len(),
                });
            }
            rows_read += 1;
            let record = columns.record(row, &fields);
            if record.is_included() {
                records.push(record);
            }
        }

        info!("Loaded {} rows", rows_read);
        info!("Filtered dataset to {} rows", records.len());

        Ok(Self { records, rows_read })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of data rows seen before filtering
    #[inline]
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    #[inline]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Abstracts in dataset order, one per record
    pub fn abstracts(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.abstract_text.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

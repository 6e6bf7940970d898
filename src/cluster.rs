use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Open a cluster file and auto-detect gzip compression, returning a boxed BufRead
///
/// bgzip output is multi-member gzip, so `.bgz` goes through the same decoder.
pub fn open_cluster_input<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open cluster file {}", path.display()))?;

    // Check by file extension (faster than reading magic bytes)
    let is_compressed = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz" || ext == "bgz")
        .unwrap_or(false);

    if is_compressed {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// One tab-delimited line of a cluster file
///
/// Rows are never padded: any column past the end reads as empty, so the
/// configured column indices put no bound on memory per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterRow<'a> {
    fields: Vec<&'a str>,
}

impl<'a> ClusterRow<'a> {
    /// Split a raw line on tabs.
    ///
    /// Only the line terminator is removed: leading tabs keep their columns.
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim_end_matches(&['\n', '\r'][..]);
        ClusterRow {
            fields: line.split('\t').collect(),
        }
    }

    /// Column `idx`, or the empty string past the end of the row
    pub fn field(&self, idx: usize) -> &'a str {
        self.fields.get(idx).copied().unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// True for lines carrying no data at all (blank or whitespace only)
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

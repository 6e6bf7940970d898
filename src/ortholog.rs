//! Fixed-column ortholog extraction from YGOB cluster rows.
//!
//! YGOB groups the paralogs from the whole genome duplication on the same
//! line but keeps them in separate columns, so each line can carry up to two
//! S. cerevisiae / C. glabrata pairs (the A copy and the B copy).

use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use crate::cluster::{is_blank, ClusterRow};

/// C. glabrata A copy
pub const CGLAB_A_IDX: usize = 7;
/// C. glabrata B copy
pub const CGLAB_B_IDX: usize = 25;
/// S. cerevisiae A copy
pub const SCER_A_IDX: usize = 11;
/// S. cerevisiae B copy
pub const SCER_B_IDX: usize = 21;

/// Source identifier -> target identifier, iterated in ordinal key order
pub type OrthologMap = BTreeMap<String, String>;

/// Zero-based column indices holding one (source, target) identifier pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPair {
    pub source: usize,
    pub target: usize,
}

impl ColumnPair {
    pub const fn new(source: usize, target: usize) -> Self {
        ColumnPair { source, target }
    }
}

impl fmt::Display for ColumnPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.target)
    }
}

/// Parse "SRC:TGT", e.g. "11:7"
impl FromStr for ColumnPair {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((source, target)) = s.split_once(':') else {
            bail!("Expected SRC:TGT column pair, got '{s}'");
        };
        let source = source
            .trim()
            .parse()
            .with_context(|| format!("Invalid source column in '{s}'"))?;
        let target = target
            .trim()
            .parse()
            .with_context(|| format!("Invalid target column in '{s}'"))?;
        Ok(ColumnPair { source, target })
    }
}

/// Which columns to read and which identifiers to admit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrthologLayout {
    /// Processed in order; a later pair on the same line wins on key collision
    pub pairs: Vec<ColumnPair>,
    pub source_prefixes: Vec<String>,
    pub target_prefixes: Vec<String>,
}

impl OrthologLayout {
    /// S. cerevisiae (S*/Y*) -> C. glabrata (C*), A copy then B copy
    pub fn ygob() -> Self {
        OrthologLayout {
            pairs: vec![
                ColumnPair::new(SCER_A_IDX, CGLAB_A_IDX),
                ColumnPair::new(SCER_B_IDX, CGLAB_B_IDX),
            ],
            source_prefixes: vec!["S".to_string(), "Y".to_string()],
            target_prefixes: vec!["C".to_string()],
        }
    }

    /// Accept only if both (already trimmed) identifiers carry a known prefix
    pub fn is_admissible(&self, source: &str, target: &str) -> bool {
        if source.is_empty() || target.is_empty() {
            return false;
        }
        self.source_prefixes
            .iter()
            .any(|p| source.starts_with(p.as_str()))
            && self
                .target_prefixes
                .iter()
                .any(|p| target.starts_with(p.as_str()))
    }

    /// Trimmed (source, target) for `pair` on `row`, if admissible
    pub fn extract_pair<'a>(
        &self,
        row: &ClusterRow<'a>,
        pair: ColumnPair,
    ) -> Option<(&'a str, &'a str)> {
        let source = row.field(pair.source).trim();
        let target = row.field(pair.target).trim();
        self.is_admissible(source, target).then_some((source, target))
    }
}

impl Default for OrthologLayout {
    fn default() -> Self {
        Self::ygob()
    }
}

/// Aggregate counters for one extraction run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub rows: usize,
    pub blank_rows: usize,
    pub pairs_examined: usize,
    pub pairs_accepted: usize,
    /// Accepted pairs that replaced a different target for an existing source
    pub overwritten: usize,
}

/// Accumulates admissible pairs line by line
pub struct OrthologExtractor<'l> {
    layout: &'l OrthologLayout,
    orthologs: OrthologMap,
    stats: ExtractStats,
}

impl<'l> OrthologExtractor<'l> {
    pub fn new(layout: &'l OrthologLayout) -> Self {
        OrthologExtractor {
            layout,
            orthologs: OrthologMap::new(),
            stats: ExtractStats::default(),
        }
    }

    pub fn push_line(&mut self, line: &str) {
        if is_blank(line) {
            self.stats.blank_rows += 1;
            return;
        }
        self.stats.rows += 1;

        let row = ClusterRow::parse(line);
        for &pair in &self.layout.pairs {
            self.stats.pairs_examined += 1;
            if let Some((source, target)) = self.layout.extract_pair(&row, pair) {
                self.assign(source, target);
            }
        }
    }

    fn assign(&mut self, source: &str, target: &str) {
        self.stats.pairs_accepted += 1;
        if let Some(previous) = self
            .orthologs
            .insert(source.to_string(), target.to_string())
        {
            if previous != target {
                self.stats.overwritten += 1;
                log::debug!("{source}: {previous} replaced by {target}");
            }
        }
    }

    pub fn finish(self) -> (OrthologMap, ExtractStats) {
        (self.orthologs, self.stats)
    }
}

/// Extract all admissible pairs from `lines`; never fails on malformed rows
pub fn extract_orthologs<I, S>(lines: I, layout: &OrthologLayout) -> OrthologMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut extractor = OrthologExtractor::new(layout);
    for line in lines {
        extractor.push_line(line.as_ref());
    }
    extractor.finish().0
}

/// Same as [`extract_orthologs`] over a reader; only read errors propagate
pub fn extract_orthologs_from_reader<R: BufRead>(
    mut reader: R,
    layout: &OrthologLayout,
) -> Result<(OrthologMap, ExtractStats)> {
    let mut extractor = OrthologExtractor::new(layout);
    let mut line = String::new();
    let mut line_no = 0usize;
    loop {
        line.clear();
        line_no += 1;
        let n = reader
            .read_line(&mut line)
            .with_context(|| format!("Failed to read cluster line {line_no}"))?;
        if n == 0 {
            break;
        }
        extractor.push_line(&line);
    }
    Ok(extractor.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ygob_line(scer_a: &str, cglab_a: &str, scer_b: &str, cglab_b: &str) -> String {
        let mut cols = vec![""; 26];
        cols[SCER_A_IDX] = scer_a;
        cols[CGLAB_A_IDX] = cglab_a;
        cols[SCER_B_IDX] = scer_b;
        cols[CGLAB_B_IDX] = cglab_b;
        cols.join("\t")
    }

    #[test]
    fn test_empty_layout_extracts_nothing() {
        let layout = OrthologLayout {
            pairs: vec![],
            ..OrthologLayout::ygob()
        };
        let line = ygob_line("YAL001C", "CAGL0A00110g", "", "");
        assert!(extract_orthologs([line], &layout).is_empty());
    }

    #[test]
    fn test_huge_column_index_reads_empty() {
        let layout = OrthologLayout {
            pairs: vec![
                ColumnPair::new(0, 1),
                ColumnPair::new(100_000_000_000, 1),
                ColumnPair::new(usize::MAX, usize::MAX),
            ],
            ..OrthologLayout::ygob()
        };
        let map = extract_orthologs(["YAL001C\tCAGL0A00110g"], &layout);
        assert_eq!(map.len(), 1);
        assert_eq!(map["YAL001C"], "CAGL0A00110g");
    }

    #[test]
    fn test_admissible_prefixes() {
        let layout = OrthologLayout::ygob();
        assert!(layout.is_admissible("YAL001C", "CAGL0A00110g"));
        assert!(layout.is_admissible("SNR17A", "CAGL0B01234r"));
        assert!(!layout.is_admissible("X123", "C456"));
        assert!(!layout.is_admissible("YAL001C", "KLLA0A00110g"));
        assert!(!layout.is_admissible("yal001c", "CAGL0A00110g"));
        assert!(!layout.is_admissible("", "C456"));
        assert!(!layout.is_admissible("YAL001C", ""));
    }

    #[test]
    fn test_column_pair_parse() {
        assert_eq!("11:7".parse::<ColumnPair>().unwrap(), ColumnPair::new(11, 7));
        assert_eq!(" 1 : 2 ".parse::<ColumnPair>().unwrap(), ColumnPair::new(1, 2));
        assert!("11".parse::<ColumnPair>().is_err());
        assert!("a:7".parse::<ColumnPair>().is_err());
        assert!("-1:7".parse::<ColumnPair>().is_err());
        assert_eq!(ColumnPair::new(21, 25).to_string(), "21:25");
    }

    #[test]
    fn test_both_copies_extracted() {
        let line = ygob_line("YAL001C", "CAGL0A00110g", "YBR001C", "CAGL0B00220g");
        let map = extract_orthologs([line], &OrthologLayout::ygob());
        assert_eq!(map.len(), 2);
        assert_eq!(map["YAL001C"], "CAGL0A00110g");
        assert_eq!(map["YBR001C"], "CAGL0B00220g");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let line = ygob_line(" YAL001C ", "CAGL0A00110g  ", "", "");
        let map = extract_orthologs([line], &OrthologLayout::ygob());
        assert_eq!(map.get("YAL001C").map(String::as_str), Some("CAGL0A00110g"));
    }

    #[test]
    fn test_short_line_skips_missing_pair() {
        // Only the A copy columns exist
        let line = "\t\t\t\t\t\t\tCAGL0A00110g\t\t\t\tYAL001C";
        let map = extract_orthologs([line], &OrthologLayout::ygob());
        assert_eq!(map.len(), 1);
        assert_eq!(map["YAL001C"], "CAGL0A00110g");
    }

    #[test]
    fn test_later_pair_on_same_line_wins() {
        let line = ygob_line("YAL001C", "CAGL0A00110g", "YAL001C", "CAGL0B00220g");
        let map = extract_orthologs([line], &OrthologLayout::ygob());
        assert_eq!(map["YAL001C"], "CAGL0B00220g");
    }

    #[test]
    fn test_stats_count_rows_and_overwrites() {
        let lines = vec![
            ygob_line("YAL001C", "CAGL0A00110g", "X1", "C1"),
            String::new(),
            ygob_line("YAL001C", "CAGL0Z99999g", "", ""),
            ygob_line("YAL001C", "CAGL0Z99999g", "", ""),
        ];
        let layout = OrthologLayout::ygob();
        let mut extractor = OrthologExtractor::new(&layout);
        for line in &lines {
            extractor.push_line(line);
        }
        let (map, stats) = extractor.finish();
        assert_eq!(map["YAL001C"], "CAGL0Z99999g");
        assert_eq!(
            stats,
            ExtractStats {
                rows: 3,
                blank_rows: 1,
                pairs_examined: 6,
                pairs_accepted: 3,
                overwritten: 1,
            }
        );
    }

    #[test]
    fn test_reader_rejects_invalid_utf8() {
        let bytes: &[u8] = b"YAL001C\t\xff\xfe\n";
        let err = extract_orthologs_from_reader(bytes, &OrthologLayout::ygob()).unwrap_err();
        assert!(format!("{err:#}").contains("line 1"));
    }
}

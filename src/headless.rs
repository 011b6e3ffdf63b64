//! Headless mode: rank the workspace against one query and print the results,
//! without starting the TUI.

use clap::ValueEnum;
use seek_core::{CaseMode, Matcher, RankedResult, SearchIndex, SkimMatcher};
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `label<TAB>category<TAB>path` line per result.
    #[default]
    Text,
    /// A JSON array of `{ item, score }` objects.
    Json,
}

#[derive(Debug, Clone)]
pub struct HeadlessQuery {
    pub query: String,
    pub format: OutputFormat,
    pub case: CaseMode,
    /// `0` means unlimited.
    pub limit: usize,
}

impl HeadlessQuery {
    pub fn search(&self, index: &SearchIndex) -> Vec<RankedResult> {
        SkimMatcher::new(self.case)
            .with_limit(self.limit)
            .search(index, &self.query)
    }
}

/// Search `index` and write the results to `out`. Returns how many were
/// written.
pub fn run(query: &HeadlessQuery, index: &SearchIndex, out: &mut impl Write) -> anyhow::Result<usize> {
    let results = query.search(index);
    tracing::debug!(query = %query.query, results = results.len(), "headless search");

    match query.format {
        OutputFormat::Text => {
            for r in &results {
                writeln!(out, "{}\t{}\t{}", r.item.label, r.item.category, r.item.path)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &results)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(results.len())
}

//! One run: read clusters -> build mapping -> write mapping -> run log.

use anyhow::Result;
use std::path::PathBuf;

use crate::cluster::open_cluster_input;
use crate::config::RunOptions;
use crate::ortholog::{extract_orthologs_from_reader, ExtractStats};
use crate::run_log::RunLog;
use crate::writer::write_mapping_file;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("YGOB clusters file does not exist: {}", .0.display())]
    InputMissing(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub pairs: usize,
    pub output: PathBuf,
    pub stats: ExtractStats,
}

/// Extract orthologs from `opts.input` and write them to `opts.output`.
///
/// Nothing is written, and an existing output is left untouched, unless the
/// whole input was read successfully.
pub fn run(opts: &RunOptions) -> Result<RunSummary> {
    if !opts.input.exists() {
        return Err(PipelineError::InputMissing(opts.input.clone()).into());
    }

    log::info!("Reading YGOB clusters from {}", opts.input.display());
    let reader = open_cluster_input(&opts.input)?;
    let (orthologs, stats) = extract_orthologs_from_reader(reader, &opts.layout)?;
    log::info!("Found {} C. glabrata orthologs", orthologs.len());
    log::debug!(
        "{} rows ({} blank), {} pairs examined, {} accepted, {} overwritten",
        stats.rows,
        stats.blank_rows,
        stats.pairs_examined,
        stats.pairs_accepted,
        stats.overwritten
    );

    write_mapping_file(&opts.output, &orthologs)?;
    log::info!("Output written to {}", opts.output.display());

    Ok(RunSummary {
        pairs: orthologs.len(),
        output: opts.output.clone(),
        stats,
    })
}

/// [`run`], recording the outcome in the run log at `opts.log_file`.
///
/// A run log that cannot be written is only warned about.
pub fn run_logged(opts: &RunOptions, program: &str) -> Result<RunSummary> {
    let mut run_log = RunLog::start(program);
    run_log.input(&opts.input);

    let result = run(opts);
    match &result {
        Ok(summary) => run_log.created(&summary.output, summary.pairs),
        Err(e) => run_log.error(&format!("{e:#}")),
    }

    match run_log.finish(&opts.log_file) {
        Ok(()) => log::info!("Log written to {}", opts.log_file.display()),
        Err(e) => log::warn!("{e:#}"),
    }
    result
}

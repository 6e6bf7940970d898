use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use ygob_orthologs::config::{Config, RunOptions};
use ygob_orthologs::ortholog::{ColumnPair, OrthologLayout};
use ygob_orthologs::pipeline::run_logged;

const PROGRAM: &str = env!("CARGO_PKG_NAME");

/// Parse a "SRC:TGT" pair of zero-based column indices
fn parse_column_pair(s: &str) -> Result<ColumnPair, String> {
    s.parse::<ColumnPair>().map_err(|e| format!("{e:#}"))
}

/// Identifier prefixes must be non-empty: "" would admit every identifier
fn parse_prefix(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("Prefix must not be empty".to_string());
    }
    Ok(s.to_string())
}

/// ygob-orthologs - C. glabrata orthologs from YGOB cluster data
///
/// Reads S. cerevisiae / C. glabrata pairs from the A and B copy columns of a
/// YGOB cluster file and writes them as "cglab<TAB>scer" lines sorted by the
/// S. cerevisiae identifier.
///
/// DATA_DIR and LOG_DIR set the default output and log locations.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// YGOB clusters file (tab-delimited, optionally .gz)
    #[clap(value_name = "CLUSTERS")]
    clusters: PathBuf,

    /// Output file [default: $DATA_DIR/CGOB/cglab_orthologs.txt]
    #[clap(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Run log file [default: $LOG_DIR/getCglab.log]
    #[clap(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Source:target column pair to read; repeat for several copies [default: 11:7 21:25]
    #[clap(long = "pair", value_name = "SRC:TGT", value_parser = parse_column_pair)]
    pairs: Vec<ColumnPair>,

    /// Accepted source identifier prefix; repeatable [default: S, Y]
    #[clap(long = "source-prefix", value_name = "PREFIX", value_parser = parse_prefix)]
    source_prefixes: Vec<String>,

    /// Required target identifier prefix; repeatable [default: C]
    #[clap(long = "target-prefix", value_name = "PREFIX", value_parser = parse_prefix)]
    target_prefixes: Vec<String>,

    /// Enable debug output
    #[clap(short = 'd', long = "debug")]
    debug: bool,

    /// Quiet mode (no summary line)
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,
}

impl Args {
    fn layout(&self) -> OrthologLayout {
        let mut layout = OrthologLayout::ygob();
        if !self.pairs.is_empty() {
            layout.pairs = self.pairs.clone();
        }
        if !self.source_prefixes.is_empty() {
            layout.source_prefixes = self.source_prefixes.clone();
        }
        if !self.target_prefixes.is_empty() {
            layout.target_prefixes = self.target_prefixes.clone();
        }
        layout
    }

    fn run_options(&self, config: &Config) -> RunOptions {
        let mut opts = RunOptions::new(config, &self.clusters).with_layout(self.layout());
        if let Some(ref output) = self.output {
            opts = opts.with_output(output);
        }
        if let Some(ref log_file) = self.log_file {
            opts = opts.with_log_file(log_file);
        }
        opts
    }
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    let config = Config::from_env();
    let opts = args.run_options(&config);

    match run_logged(&opts, PROGRAM) {
        Ok(summary) => {
            if !args.quiet {
                println!(
                    "Found {} ortholog pairs, wrote {}",
                    summary.pairs,
                    summary.output.display()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

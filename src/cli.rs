// CLI-specific types and structures
// This module contains the command-line interface definitions and parsing logic

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "linetally")]
#[command(about = "Single-pass parallel aggregation over very large line-oriented flat files")]
#[command(
    long_about = "Single-pass parallel aggregation over very large line-oriented flat files\n\nReads one FEC individual-contributions dump, counts lines, tallies donations per\ncalendar month, and reports the most frequent contributor first name.\n\nEXAMPLES:\n  linetally itcont.txt\n  linetally --threads 8 itcont.txt\n  linetally --probe-line 0 --probe-line 432 itcont.txt"
)]
#[command(version)]
pub struct Cli {
    /// Input file path
    pub file: String,

    /// Number of worker threads (defaults to the CPU count)
    #[arg(short = 't', long = "threads")]
    pub threads: Option<usize>,

    /// Read buffer size per worker, in bytes
    #[arg(long = "chunk-size", default_value_t = crate::parallel::DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Print the extracted name at this global line index (repeatable)
    #[arg(long = "probe-line")]
    pub probe_lines: Vec<u64>,
}

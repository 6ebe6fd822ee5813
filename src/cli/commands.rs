use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use serde::Serialize;

use pfc::{
    compress_all, compress_stream, expand_all, expand_stream, shared_prefix_length, CodecConfig,
    PfcError, Result, StreamStats, SymbolAlphabet,
};

#[derive(Parser)]
#[command(name = "pfc")]
#[command(about = "Prefix encoding compressor/expander for sorted word lists")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Compress a word list
    pfc compress words.txt words.pfc

    # Expand back to stdout
    pfc expand words.pfc

    # Use a pipe
    sort words.txt | pfc compress > words.pfc

    # Report the compression ratio
    pfc stats words.txt --format json

    # Compress several files in parallel
    pfc batch compress a.txt b.txt --out-dir compressed/

    # Use digits as length symbols (prefixes up to 9)
    pfc --first-symbol 0 --max-prefix 9 compress words.txt
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// TOML file with codec settings (max_prefix, first_symbol)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Longest shared prefix a single symbol can express
    #[arg(long, global = true)]
    pub max_prefix: Option<usize>,

    /// Symbol standing for a zero-length prefix
    #[arg(long, global = true)]
    pub first_symbol: Option<char>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compress a sorted word list, one entry per line
    Compress {
        /// Input file (stdin if omitted or "-")
        input: Option<PathBuf>,

        /// Output file (stdout if omitted or "-")
        output: Option<PathBuf>,
    },

    /// Expand a compressed word list
    Expand {
        /// Input file (stdin if omitted or "-")
        input: Option<PathBuf>,

        /// Output file (stdout if omitted or "-")
        output: Option<PathBuf>,
    },

    /// Show how well a word list compresses
    Stats {
        /// Input file (stdin if omitted or "-")
        input: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Compress or expand several files in parallel
    Batch {
        /// Operation to apply to every file
        #[arg(value_enum)]
        operation: Operation,

        /// Files to process
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory for the output files
        #[arg(long)]
        out_dir: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    Compress,
    Expand,
}

impl Operation {
    fn as_str(&self) -> &'static str {
        match self {
            Operation::Compress => "compress",
            Operation::Expand => "expand",
        }
    }
}

/// Summary printed by `pfc stats`.
#[derive(Debug, Serialize)]
pub struct CompressionReport {
    pub lines: usize,
    pub original_bytes: usize,
    pub compressed_bytes: usize,
    pub ratio: f64,
    /// Entries whose shared prefix was longer than `max_prefix`
    pub clamped: usize,
    pub max_prefix: usize,
    pub round_trip: bool,
}

/// Defaults, then the config file, then command-line flags.
pub fn resolve_alphabet(
    config: Option<&Path>,
    max_prefix: Option<usize>,
    first_symbol: Option<char>,
) -> Result<SymbolAlphabet> {
    let base = match config {
        Some(path) => CodecConfig::load(path)?,
        None => CodecConfig::default(),
    };
    base.with_overrides(max_prefix, first_symbol).alphabet()
}

pub fn compress_file(
    input: Option<&Path>,
    output: Option<&Path>,
    alphabet: SymbolAlphabet,
) -> Result<()> {
    tracing::debug!("Compressing {}", describe(input));
    ensure_distinct(input, output)?;
    let stats = compress_stream(open_input(input)?, open_output(output)?, alphabet)?;
    log_summary(Operation::Compress, &stats);
    Ok(())
}

pub fn expand_file(
    input: Option<&Path>,
    output: Option<&Path>,
    alphabet: SymbolAlphabet,
) -> Result<()> {
    tracing::debug!("Expanding {}", describe(input));
    ensure_distinct(input, output)?;
    let stats = expand_stream(open_input(input)?, open_output(output)?, alphabet)?;
    log_summary(Operation::Expand, &stats);
    Ok(())
}

pub fn show_stats(input: Option<&Path>, alphabet: SymbolAlphabet, format: &str) -> Result<()> {
    let mut text = String::new();
    open_input(input)?.read_to_string(&mut text)?;
    let report = build_report(&text, alphabet)?;

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| PfcError::Config(format!("Failed to serialize report: {}", e)))?;
            println!("{}", json);
        }
        "text" => {
            println!("Lines:            {}", report.lines);
            println!("Original bytes:   {}", report.original_bytes);
            println!("Compressed bytes: {}", report.compressed_bytes);
            println!("Ratio:            {:.1}%", report.ratio * 100.0);
            println!(
                "Clamped prefixes: {} (max prefix {})",
                report.clamped, report.max_prefix
            );
            println!(
                "Round trip:       {}",
                if report.round_trip { "ok" } else { "FAILED" }
            );
        }
        other => {
            return Err(PfcError::Config(format!(
                "Unknown format: {} (expected text or json)",
                other
            )))
        }
    }

    Ok(())
}

fn build_report(text: &str, alphabet: SymbolAlphabet) -> Result<CompressionReport> {
    let entries: Vec<&str> = text.lines().collect();
    let codes = compress_all(&entries, alphabet)?;
    let round_trip = expand_all(&codes, alphabet)? == entries;

    let clamped = std::iter::once("")
        .chain(entries.iter().copied())
        .zip(entries.iter())
        .filter(|(predictor, entry)| shared_prefix_length(entry, predictor) > alphabet.max_prefix())
        .count();

    let original_bytes: usize = entries.iter().map(|e| e.len() + 1).sum();
    let compressed_bytes: usize = codes.iter().map(|c| c.len() + 1).sum();
    let ratio = if original_bytes == 0 {
        1.0
    } else {
        compressed_bytes as f64 / original_bytes as f64
    };

    Ok(CompressionReport {
        lines: entries.len(),
        original_bytes,
        compressed_bytes,
        ratio,
        clamped,
        max_prefix: alphabet.max_prefix(),
        round_trip,
    })
}

/// Process every file independently; each gets its own predictor chain.
pub fn run_batch(
    operation: Operation,
    files: &[PathBuf],
    out_dir: &Path,
    alphabet: SymbolAlphabet,
) -> Result<()> {
    let jobs = plan_batch(operation, files, out_dir)?;
    fs::create_dir_all(out_dir)?;

    let results: Vec<(&PathBuf, Result<(PathBuf, StreamStats)>)> = jobs
        .par_iter()
        .map(|(file, target)| {
            let result = process_file(operation, file, target, alphabet);
            (*file, result.map(|stats| (target.clone(), stats)))
        })
        .collect();

    let mut failed = 0;
    for (file, result) in &results {
        match result {
            Ok((target, stats)) => {
                println!(
                    "{} -> {} ({} lines, {} -> {} bytes)",
                    file.display(),
                    target.display(),
                    stats.lines,
                    stats.bytes_in,
                    stats.bytes_out
                );
            }
            Err(e) => {
                eprintln!("Error processing {}: {}", file.display(), e);
                failed += 1;
            }
        }
    }

    tracing::info!(
        "Batch {}: {} of {} files succeeded",
        operation.as_str(),
        results.len() - failed,
        results.len()
    );

    if failed > 0 {
        return Err(PfcError::Batch {
            failed,
            total: results.len(),
        });
    }
    Ok(())
}

/// Pair every input with its output path. Two inputs may not share an output.
fn plan_batch<'a>(
    operation: Operation,
    files: &'a [PathBuf],
    out_dir: &Path,
) -> Result<Vec<(&'a PathBuf, PathBuf)>> {
    let mut claimed: HashMap<PathBuf, &PathBuf> = HashMap::new();
    let mut jobs = Vec::with_capacity(files.len());

    for file in files {
        let target = out_dir.join(batch_file_name(operation, file)?);
        if let Some(other) = claimed.insert(target.clone(), file) {
            return Err(PfcError::Config(format!(
                "{} and {} would both be written to {}",
                other.display(),
                file.display(),
                target.display()
            )));
        }
        jobs.push((file, target));
    }

    Ok(jobs)
}

fn process_file(
    operation: Operation,
    file: &Path,
    target: &Path,
    alphabet: SymbolAlphabet,
) -> Result<StreamStats> {
    ensure_distinct(Some(file), Some(target))?;
    let reader = BufReader::new(File::open(file)?);
    let writer = BufWriter::new(File::create(target)?);

    let stats = match operation {
        Operation::Compress => compress_stream(reader, writer, alphabet)?,
        Operation::Expand => expand_stream(reader, writer, alphabet)?,
    };
    tracing::debug!("{} {} -> {}", operation.as_str(), file.display(), target.display());
    Ok(stats)
}

/// `words.txt` compresses to `words.txt.pfc`; `words.txt.pfc` expands back to `words.txt`.
fn batch_file_name(operation: Operation, file: &Path) -> Result<OsString> {
    let name = file
        .file_name()
        .ok_or_else(|| PfcError::Config(format!("Not a file: {}", file.display())))?;

    let name = match operation {
        Operation::Compress => {
            let mut name = name.to_os_string();
            name.push(".pfc");
            name
        }
        Operation::Expand => {
            let path = Path::new(name);
            match (path.extension(), path.file_stem()) {
                (Some(ext), Some(stem)) if ext == "pfc" => stem.to_os_string(),
                _ => {
                    let mut name = name.to_os_string();
                    name.push(".out");
                    name
                }
            }
        }
    };
    Ok(name)
}

/// Refuse to write over the file being read; creating the output truncates it.
fn ensure_distinct(input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let (Some(input), Some(output)) = (file_arg(input), file_arg(output)) else {
        return Ok(());
    };
    let same = match (fs::canonicalize(input), fs::canonicalize(output)) {
        (Ok(a), Ok(b)) => a == b,
        _ => input == output,
    };
    if same {
        return Err(PfcError::Config(format!(
            "Input and output are the same file: {}",
            input.display()
        )));
    }
    Ok(())
}

fn file_arg(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| *p != Path::new("-"))
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match file_arg(path) {
        Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match file_arg(path) {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

fn describe(path: Option<&Path>) -> String {
    path.map_or_else(|| "stdin".to_string(), |p| p.display().to_string())
}

fn log_summary(operation: Operation, stats: &StreamStats) {
    tracing::info!(
        "{}: {} lines, {} -> {} bytes ({:.1}%)",
        operation.as_str(),
        stats.lines,
        stats.bytes_in,
        stats.bytes_out,
        stats.ratio() * 100.0
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_file_names() {
        let compress = batch_file_name(Operation::Compress, Path::new("dir/words.txt")).unwrap();
        assert_eq!(compress, "words.txt.pfc");

        let expand = batch_file_name(Operation::Expand, Path::new("words.txt.pfc")).unwrap();
        assert_eq!(expand, "words.txt");

        let expand = batch_file_name(Operation::Expand, Path::new("words.bin")).unwrap();
        assert_eq!(expand, "words.bin.out");
    }

    #[test]
    fn test_plan_batch_rejects_shared_output() {
        let files = vec![PathBuf::from("a/words.txt"), PathBuf::from("b/words.txt")];
        let err = plan_batch(Operation::Compress, &files, Path::new("out")).unwrap_err();
        assert!(matches!(err, PfcError::Config(ref msg) if msg.contains("a/words.txt")));

        let files = vec![PathBuf::from("a/words.txt"), PathBuf::from("b/other.txt")];
        let jobs = plan_batch(Operation::Compress, &files, Path::new("out")).unwrap();
        assert_eq!(jobs[1].1, Path::new("out/other.txt.pfc"));
    }

    #[test]
    fn test_ensure_distinct() {
        let p = Path::new("words.txt");
        assert!(ensure_distinct(Some(p), Some(p)).is_err());
        assert!(ensure_distinct(Some(p), Some(Path::new("words.pfc"))).is_ok());
        assert!(ensure_distinct(Some(Path::new("-")), Some(Path::new("-"))).is_ok());
        assert!(ensure_distinct(None, Some(p)).is_ok());
    }

    #[test]
    fn test_report_counts_clamped_prefixes() {
        let long = "x".repeat(30);
        let text = format!("{long}\n{long}a\nz\n");
        let report = build_report(&text, SymbolAlphabet::DEFAULT).unwrap();

        assert_eq!(report.lines, 3);
        assert_eq!(report.clamped, 1);
        assert!(report.round_trip);
    }

    #[test]
    fn test_report_empty_input() {
        let report = build_report("", SymbolAlphabet::DEFAULT).unwrap();
        assert_eq!(report.lines, 0);
        assert_eq!(report.ratio, 1.0);
    }

    #[test]
    fn test_resolve_alphabet_flags_override_defaults() {
        let alphabet = resolve_alphabet(None, Some(9), Some('0')).unwrap();
        assert_eq!(alphabet.first(), '0');
        assert_eq!(alphabet.last(), '9');
    }
}

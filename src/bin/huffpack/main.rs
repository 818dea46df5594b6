use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, WrapErr};
use console::style;
use indicatif::HumanBytes;
use huffpack::artifact::read_artifact_header;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::prelude::*;
use twox_hash::XxHash64;

mod progress;
use progress::ProgressMonitor;

/// Extension appended to compressed files
const ARTIFACT_EXTENSION: &str = "huf";

#[derive(Parser)]
#[command(version, about = "Compress and decompress files with a canonical Huffman code")]
struct Cli {
    /// Log more, can be given up to three times
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress a file, writing `<INPUT>.huf` unless an output is given
    Compress {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite the output if it exists
        #[arg(short, long)]
        force: bool,
    },
    /// Restore a compressed file
    Decompress {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite the output if it exists
        #[arg(short, long)]
        force: bool,
    },
    /// Show the header of a compressed file
    Info { input: PathBuf },
    /// Compress and decompress a file in memory and check that nothing changed
    Verify { input: PathBuf },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Compress {
            input,
            output,
            force,
        } => {
            let output = output.unwrap_or_else(|| {
                let mut name = input.clone().into_os_string();
                name.push(".");
                name.push(ARTIFACT_EXTENSION);
                PathBuf::from(name)
            });
            compress(&input, &output, force)
        }
        Command::Decompress {
            input,
            output,
            force,
        } => {
            let output = output.unwrap_or_else(|| default_decompressed_path(&input));
            decompress(&input, &output, force)
        }
        Command::Info { input } => show_info(&input),
        Command::Verify { input } => verify(&input),
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(indicatif_layer.get_stderr_writer()),
        )
        .with(indicatif_layer)
        .with(level)
        .init();
}

/// `data.txt.huf` becomes `data.txt`, anything else gets `.out` appended
fn default_decompressed_path(input: &Path) -> PathBuf {
    match input.extension() {
        Some(ext) if ext == ARTIFACT_EXTENSION => input.with_extension(""),
        _ => {
            let mut name = input.as_os_str().to_owned();
            name.push(".out");
            PathBuf::from(name)
        }
    }
}

fn read_input(path: &Path) -> color_eyre::Result<Vec<u8>> {
    let file = File::open(path).wrap_err_with(|| format!("failed to open {}", path.display()))?;
    let size = file
        .metadata()
        .wrap_err_with(|| format!("failed to stat {}", path.display()))?
        .len() as usize;
    let mut monitor = ProgressMonitor::new(file, size);
    let mut data = Vec::with_capacity(size);
    monitor
        .read_to_end(&mut data)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    Ok(data)
}

fn write_output(path: &Path, data: &[u8], force: bool) -> color_eyre::Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists, pass --force to overwrite it",
            path.display()
        );
    }
    fs::write(path, data).wrap_err_with(|| format!("failed to write {}", path.display()))
}

fn compress(input: &Path, output: &Path, force: bool) -> color_eyre::Result<()> {
    let data = read_input(input)?;
    if data.len() > u32::MAX as usize {
        bail!(
            "{} is {}, the largest input a single artifact can hold is {}",
            input.display(),
            HumanBytes(data.len() as u64),
            HumanBytes(u64::from(u32::MAX))
        );
    }
    let (artifact, stats) = huffpack::encode_with_stats(&data);
    debug!("{stats:?}");
    write_output(output, &artifact, force)?;
    info!(
        "compressed {} to {} ({:.2}% of original, {} distinct symbols)",
        HumanBytes(stats.original_length as u64),
        HumanBytes(stats.artifact_length as u64),
        stats.ratio() * 100.0,
        stats.distinct_symbols
    );
    Ok(())
}

fn decompress(input: &Path, output: &Path, force: bool) -> color_eyre::Result<()> {
    let artifact = read_input(input)?;
    let data = huffpack::decode(&artifact)
        .wrap_err_with(|| format!("{} is not a valid artifact", input.display()))?;
    write_output(output, &data, force)?;
    info!(
        "restored {} from {}",
        HumanBytes(data.len() as u64),
        HumanBytes(artifact.len() as u64)
    );
    Ok(())
}

fn show_info(input: &Path) -> color_eyre::Result<()> {
    let artifact = read_input(input)?;
    let (header, header_len) = read_artifact_header(&artifact)
        .wrap_err_with(|| format!("{} has no valid header", input.display()))?;
    let payload_len = artifact.len() - header_len;

    let mut histogram = BTreeMap::new();
    for entry in &header.symbols {
        *histogram.entry(entry.length).or_insert(0usize) += 1;
    }

    println!("{}", style(input.display()).bold());
    println!("  original length:  {}", header.original_length);
    println!("  distinct symbols: {}", header.symbols.len());
    println!("  header size:      {header_len}");
    println!("  payload size:     {payload_len}");
    if header.original_length > 0 {
        println!(
            "  ratio:            {:.2}%",
            artifact.len() as f64 / f64::from(header.original_length) * 100.0
        );
    }
    if !histogram.is_empty() {
        println!("  {}", style("code lengths").underlined());
        for (length, count) in histogram {
            println!("    {length:>2} bits: {count} symbols");
        }
    }
    Ok(())
}

fn verify(input: &Path) -> color_eyre::Result<()> {
    let data = read_input(input)?;
    let artifact = huffpack::encode(&data);
    let restored = huffpack::decode(&artifact).wrap_err("decoding a fresh artifact failed")?;

    let expected = XxHash64::oneshot(0, &data);
    let got = XxHash64::oneshot(0, &restored);
    if expected != got || data.len() != restored.len() {
        bail!(
            "round trip of {} changed the content: xxhash64 {expected:016x} became {got:016x}",
            input.display()
        );
    }
    println!(
        "{} {} round trips ({} -> {}, xxhash64 {expected:016x})",
        style("ok").green().bold(),
        input.display(),
        HumanBytes(data.len() as u64),
        HumanBytes(artifact.len() as u64)
    );
    Ok(())
}

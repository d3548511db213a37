use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bytestream::ByteReader;
use clap::{Parser, Subcommand, ValueEnum};
use codec::{Codec, CodecLimits, Value};
use glob::Pattern;
use tools::{format_registry, format_value_pretty, load_registry, registry_report, value_to_json};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "graphpack-tools",
    version,
    about = "graphpack registry inspection and stream decoding tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print discriminators and field schemas of a registry.
    Registry {
        /// Registry JSON (an array of type descriptors).
        registry: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// Decode encoded values into a readable tree.
    Decode {
        /// Path to an encoded file, or a directory of them.
        path: PathBuf,
        /// Registry JSON the stream was written with.
        #[arg(long)]
        registry: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Optional glob filter when decoding a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Decode consecutive values until the end of each file.
        #[arg(long)]
        stream: bool,
        /// Maximum nesting depth accepted while decoding.
        #[arg(long)]
        max_depth: Option<usize>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Registry { registry, format } => {
            let registry = read_registry(&registry)?;
            let report = registry_report(&registry);
            match format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&report).context("serialize json")?;
                    println!("{json}");
                }
                OutputFormat::Pretty => print!("{}", format_registry(&report)),
            }
        }
        Command::Decode {
            path,
            registry,
            format,
            glob,
            stream,
            max_depth,
        } => {
            let mut codec = Codec::from_registry(read_registry(&registry)?);
            if let Some(max_depth) = max_depth {
                codec.set_limits(CodecLimits {
                    max_depth,
                    ..CodecLimits::default()
                });
            }

            if path.is_dir() {
                for file in collect_files(&path, glob.as_deref())? {
                    println!("== {} ==", file.display());
                    decode_file(&codec, &file, format, stream)?;
                }
            } else {
                decode_file(&codec, &path, format, stream)?;
            }
        }
    }
    Ok(())
}

fn read_registry(path: &Path) -> Result<schema::TypeRegistry> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read registry {}", path.display()))?;
    load_registry(&contents).with_context(|| format!("load registry {}", path.display()))
}

fn decode_file(codec: &Codec, path: &Path, format: OutputFormat, stream: bool) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "decoding");

    let values = if stream {
        let mut reader = ByteReader::new(&bytes);
        let mut values = Vec::new();
        while !reader.is_empty() {
            let offset = reader.position();
            let value = codec
                .decode_from(&mut reader)
                .with_context(|| format!("decode value at offset {offset} of {}", path.display()))?;
            values.push(value);
        }
        values
    } else {
        vec![codec
            .decode(&bytes)
            .with_context(|| format!("decode {}", path.display()))?]
    };

    for value in &values {
        print_value(value, format)?;
    }
    Ok(())
}

fn print_value(value: &Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&value_to_json(value)).context("serialize json")?;
            println!("{json}");
        }
        OutputFormat::Pretty => print!("{}", format_value_pretty(value)),
    }
    Ok(())
}

fn collect_files(dir: &Path, glob: Option<&str>) -> Result<Vec<PathBuf>> {
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

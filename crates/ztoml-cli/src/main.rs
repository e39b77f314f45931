use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "ztoml",
    version,
    about = "Validate TOML and convert it to type-tagged JSON",
    after_help = "Examples:\n  ztoml config.toml\n  ztoml --json config.toml\n  cat config.toml | ztoml --json\n  ztoml --json -o out.json config.toml"
)]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Emit the type-tagged JSON form instead of just validating
    #[arg(long)]
    json: bool,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .without_time()
        .init();

    if let Err(err) = run() {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let root = match &args.input {
        Some(path) => {
            debug!(path = %path.display(), "parsing file");
            ztoml::parse_file(path)
                .map_err(|err| anyhow::anyhow!(err.display_with_file(&path.display().to_string())))?
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.is_empty() {
                bail!("no input provided on stdin");
            }
            ztoml::parse_str(&buffer).map_err(|err| anyhow::anyhow!("stdin:{err}"))?
        }
    };

    if args.json {
        let mut json = ztoml::to_json(&root);
        json.push('\n');
        write_output(&args.output, json.as_bytes())?;
    } else {
        write_output(&args.output, b"ok\n")?;
    }
    Ok(())
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}

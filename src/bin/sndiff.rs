use std::path::PathBuf;

use chardiff_rs::{CharDiffer, CharDifferBuilder, DiffConfig, JunkKind, TrimMode};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[path = "sndiff/json_output_formatter.rs"]
mod json_output_formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TrimChoice {
    None,
    Ends,
    All,
}

impl TrimChoice {
    fn trim_mode(self) -> TrimMode {
        match self {
            Self::None => TrimMode::None,
            Self::Ends => TrimMode::EndsOnly,
            Self::All => TrimMode::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum JunkChoice {
    None,
    Whitespace,
}

impl JunkChoice {
    fn junk_kind(self) -> JunkKind {
        match self {
            Self::None => JunkKind::None,
            Self::Whitespace => JunkKind::Whitespace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "sndiff")]
#[command(about = "Character-level diff of two strings: prints the similarity score, then the diff")]
struct Args {
    /// Reference text (the "truth").
    source: String,
    /// Text compared against the reference.
    target: String,
    /// Additional reference candidates; the best-scoring one is reported.
    #[arg(long = "alt")]
    alternatives: Vec<String>,
    #[arg(long, env = "SNDIFF_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "SNDIFF_KEEP_WIDTH")]
    keep_width: Option<usize>,
    #[arg(long, env = "SNDIFF_WIDTH")]
    width: Option<usize>,
    #[arg(long, env = "SNDIFF_TRIM", value_enum)]
    trim: Option<TrimChoice>,
    #[arg(long, env = "SNDIFF_JUNK", value_enum)]
    junk: Option<JunkChoice>,
    /// Print a JSON document instead of plain text.
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Also write the JSON document to this path.
    #[arg(long, env = "SNDIFF_JSON_OUT")]
    json_out: Option<PathBuf>,
}

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chardiff_rs=warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let differ = build_differ(&args)?;

    if !args.alternatives.is_empty() {
        let mut truths = Vec::with_capacity(args.alternatives.len() + 1);
        truths.push(args.source.clone());
        truths.extend(args.alternatives.iter().cloned());
        let best = differ.compare_candidates(&args.target, &truths);
        if args.json || args.json_out.is_some() {
            let document = json_output_formatter::CandidateDocument::new(&best);
            emit_json(&args, &document)?;
        } else {
            println!("{best}");
        }
        return Ok(());
    }

    let outcome = differ
        .compare(&args.source, &args.target)
        .map_err(|err| format!("Comparison failed: {err}"))?;
    if args.json || args.json_out.is_some() {
        let document = json_output_formatter::DiffDocument::new(&outcome);
        emit_json(&args, &document)?;
    } else {
        println!("{:?}", outcome.score);
        println!("{}", outcome.diff);
    }
    Ok(())
}

fn build_differ(args: &Args) -> Result<CharDiffer, String> {
    let mut config = match args.config.as_ref() {
        Some(path) => DiffConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => DiffConfig::default(),
    };
    if let Some(keep_width) = args.keep_width {
        config.keep_width = keep_width;
    }
    if let Some(width) = args.width {
        config.wrap_width = width;
    }
    if let Some(trim) = args.trim {
        config.trim_mode = trim.trim_mode();
    }
    if let Some(junk) = args.junk {
        config.junk = junk.junk_kind();
    }

    CharDifferBuilder::new(config)
        .build()
        .map_err(|err| format!("Failed to build CharDiffer: {err}"))
}

fn emit_json<T: serde::Serialize>(args: &Args, document: &T) -> Result<(), String> {
    if let Some(path) = args.json_out.as_ref() {
        json_output_formatter::write_document(path, document)?;
    }
    if args.json {
        let text = serde_json::to_string_pretty(document)
            .map_err(|err| format!("Failed to serialize JSON output: {err}"))?;
        println!("{text}");
    }
    Ok(())
}

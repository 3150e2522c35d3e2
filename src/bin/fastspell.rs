//! FastSpell CLI binary.
//!
//! Prints the refined language of a sentence, or of every stdin line when no
//! sentence is given.

use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fastspell::{Config, FastSpell, Mode, Result as ClassifyResult};

/// Printed for a line the classifier failed on; distinct from the `unk` verdict.
const FAILED: &str = "error";

/// Refine language identification between closely related languages
#[derive(Parser, Debug)]
#[command(name = "fastspell")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Sentence to classify; reads stdin line by line when omitted
    sentence: Option<String>,

    /// Path to config.json
    #[arg(short, long, env = "FASTSPELL_CONFIG", default_value = "resources/config.json")]
    config: PathBuf,

    /// Override the target language from the config
    #[arg(short, long)]
    lang: Option<String>,

    /// Override the mode from the config ("aggr" or "cons")
    #[arg(short, long)]
    mode: Option<String>,

    /// Verbosity level (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fastspell={}", args.log_level())));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build(args: &Args) -> anyhow::Result<FastSpell> {
    let mut config = Config::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(lang) = &args.lang {
        config.lang = lang.clone();
    }
    if let Some(mode) = &args.mode {
        config.mode = mode.parse::<Mode>()?;
    }
    let fastspell = FastSpell::from_config(&config)
        .with_context(|| format!("initializing for language '{}'", config.lang))?;
    Ok(fastspell)
}

fn run(args: &Args) -> anyhow::Result<()> {
    let fastspell = build(args)?;

    if let Some(sentence) = &args.sentence {
        println!("{}", fastspell.classify(sentence)?);
        return Ok(());
    }

    let lines = io::stdin()
        .lock()
        .lines()
        .collect::<io::Result<Vec<String>>>()
        .context("reading stdin")?;
    let mut out = BufWriter::new(io::stdout().lock());
    let failures = write_verdicts(&mut out, &lines, fastspell.classify_batch(lines.as_slice()))?;
    out.flush()?;

    if failures > 0 {
        anyhow::bail!("{failures} of {} sentence(s) could not be classified", lines.len());
    }
    Ok(())
}

/// One output line per input line; failures print [`FAILED`] and are reported
/// on stderr. Returns the number of failures.
fn write_verdicts<W: Write>(
    out: &mut W,
    lines: &[String],
    results: Vec<ClassifyResult<String>>,
) -> io::Result<usize> {
    let mut failures = 0;
    for (number, (line, result)) in lines.iter().zip(results).enumerate() {
        match result {
            Ok(language) => writeln!(out, "{language}")?,
            Err(e) => {
                failures += 1;
                eprintln!("Error: line {}: {} ({:?})", number + 1, e, line);
                writeln!(out, "{FAILED}")?;
            }
        }
    }
    Ok(failures)
}

fn main() {
    let args = Args::parse();
    init_logging(&args);

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fastspell::{FastSpellError, UNKNOWN};

    #[test]
    fn test_classifier_failure_is_not_unknown() {
        let lines: Vec<String> = ["eg er heime", "?", "x y z"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let results = vec![
            Ok("nn".to_string()),
            Err(FastSpellError::classifier("no language detected for '?'")),
            Ok(UNKNOWN.to_string()),
        ];

        let mut out = Vec::new();
        let failures = write_verdicts(&mut out, &lines, results).unwrap();
        assert_eq!(failures, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "nn\nerror\nunk\n");
        assert_ne!(FAILED, UNKNOWN);
    }
}

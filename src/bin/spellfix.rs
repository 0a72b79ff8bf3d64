use anyhow::{Context, Result};
use clap::Parser;
use spellfix::{CorrectorConfig, DEFAULT_FLOOR_PROBABILITY, SpellCorrector};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Correct misspelled words with a character-level noisy-channel model.
#[derive(Parser, Debug)]
#[command(name = "spellfix", version)]
struct Cli {
    /// Training corpus with lines of the form `word: typo1 typo2 ...`
    #[arg(long, default_value = "aspell.txt")]
    corpus: PathBuf,

    /// JSON model file; loaded if present, otherwise trained and written here
    #[arg(long)]
    model: Option<PathBuf>,

    /// Probability assigned to unseen emissions and transitions
    #[arg(long, default_value_t = DEFAULT_FLOOR_PROBABILITY)]
    floor: f64,

    /// Lower-case input before correcting it
    #[arg(long)]
    lowercase: bool,

    /// Text to correct; starts an interactive prompt when omitted
    text: Vec<String>,
}

fn build_corrector(cli: &Cli) -> Result<SpellCorrector> {
    let config = CorrectorConfig {
        floor_probability: cli.floor,
        lowercase_input: cli.lowercase,
    };

    if let Some(model) = &cli.model {
        if model.exists() {
            return SpellCorrector::load(model, config)
                .with_context(|| format!("loading model {}", model.display()));
        }
    }

    let corrector = SpellCorrector::from_corpus_file(&cli.corpus, config)
        .with_context(|| format!("training from corpus {}", cli.corpus.display()))?;
    if let Some(model) = &cli.model {
        corrector
            .save(model)
            .with_context(|| format!("saving model {}", model.display()))?;
    }
    Ok(corrector)
}

fn repl(corrector: &SpellCorrector) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut input = String::new();
    loop {
        print!("\nEnter text (or 'quit'): ");
        stdout.flush()?;
        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            break; // EOF
        }
        let line = input.trim();
        if line.eq_ignore_ascii_case("quit") {
            break;
        }
        println!("Corrected: {}", corrector.correct_text(line));
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let corrector = build_corrector(&cli)?;

    if cli.text.is_empty() {
        repl(&corrector)
    } else {
        println!("{}", corrector.correct_text(&cli.text.join(" ")));
        Ok(())
    }
}

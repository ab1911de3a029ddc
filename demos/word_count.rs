//! Word frequency demo showcasing the keyed counter and its observers.
//!
//! Run with:
//! ```bash
//! cargo run --example word_count --features demo -- --help
//! echo "the cat saw the other cat" | cargo run --example word_count --features demo
//! RUST_LOG=contachiavi=trace cargo run --example word_count --features demo -- README.md
//! ```

use std::error::Error;
use std::hash::BuildHasher;
use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use contachiavi::counters::KeyedCounter;
use contachiavi::equivalence::{AsciiCaseInsensitive, Canonical, KeyEquivalence};
use contachiavi::observers::json::JsonObserver;
use contachiavi::observers::table::{CompactSeparator, TableObserver, TableStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Output format for the word counts.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Pretty ASCII table (standard two-column format)
    Table,
    /// Compact table with multiple columns
    Compact,
    /// JSON format
    Json,
}

/// Table style selection.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum StyleChoice {
    Ascii,
    #[default]
    Rounded,
    Sharp,
    Modern,
    Markdown,
    Dots,
    Blank,
}

impl From<StyleChoice> for TableStyle {
    fn from(choice: StyleChoice) -> Self {
        match choice {
            StyleChoice::Ascii => TableStyle::Ascii,
            StyleChoice::Rounded => TableStyle::Rounded,
            StyleChoice::Sharp => TableStyle::Sharp,
            StyleChoice::Modern => TableStyle::Modern,
            StyleChoice::Markdown => TableStyle::Markdown,
            StyleChoice::Dots => TableStyle::Dots,
            StyleChoice::Blank => TableStyle::Blank,
        }
    }
}

/// Counts word frequencies in a file (or stdin) and prints the most common ones.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file; reads stdin when omitted
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Table style (for table/compact formats)
    #[arg(short, long, value_enum, default_value = "rounded")]
    style: StyleChoice,

    /// Number of columns (for compact format)
    #[arg(short, long, default_value = "3")]
    columns: usize,

    /// Number of words to show
    #[arg(short, long, default_value = "10")]
    top: usize,

    /// Drop words seen fewer than this many times
    #[arg(long, default_value = "1")]
    min_count: i64,

    /// Treat words differing only in ASCII case as the same word
    #[arg(short = 'i', long)]
    ignore_case: bool,

    /// Words to subtract once from the counts (repeatable)
    #[arg(long = "forget")]
    forget: Vec<String>,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,
}

fn read_input(args: &Args) -> std::io::Result<String> {
    match &args.input {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn normalize(word: &str) -> Option<String> {
    let word = word.trim_matches(|c: char| !c.is_alphanumeric());
    (!word.is_empty()).then(|| word.to_string())
}

fn count_words<E, S>(
    mut counter: KeyedCounter<String, i64, E, S>,
    text: &str,
    args: &Args,
) -> Result<String, Box<dyn Error>>
where
    E: KeyEquivalence<String>,
    S: BuildHasher,
{
    counter.try_extend(text.split_whitespace().filter_map(normalize))?;
    info!(distinct = counter.len(), total = counter.total()?, "counted words");

    for word in &args.forget {
        counter.subtract(word)?;
    }
    if args.min_count > 1 {
        counter.retain(|_, count| count >= args.min_count);
    }

    let output = match args.format {
        OutputFormat::Table => TableObserver::new()
            .with_style(args.style.into())
            .limit(args.top)
            .render(&counter),
        OutputFormat::Compact => TableObserver::new()
            .compact(true)
            .columns(args.columns)
            .separator(CompactSeparator::Colon)
            .with_style(args.style.into())
            .limit(args.top)
            .render(&counter),
        OutputFormat::Json => JsonObserver::new().pretty(args.pretty).to_json(&counter)?,
    };
    Ok(output)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let text = read_input(&args)?;

    let output = if args.ignore_case {
        let counter = KeyedCounter::<String, i64, AsciiCaseInsensitive>::with_equivalence(None)
            .with_name("words");
        count_words(counter, &text, &args)?
    } else {
        let counter = KeyedCounter::<String, i64, Canonical>::with_equivalence(None)
            .with_name("words");
        count_words(counter, &text, &args)?
    };

    println!("{}", output);
    Ok(())
}

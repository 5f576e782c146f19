use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use case_types::{CaseSummary, DuplicatePair, QuerySet};
use korupsi_enrich::scanner::scan_inputs;
use korupsi_enrich::{
    CaseRecord, Schema, Vocabulary, default_categories, find_duplicates, read_batch_from_path,
    write_batch,
};

#[derive(Parser)]
#[command(
    name = "korupsi",
    about = "Corruption case enrichment and deduplication"
)]
struct Cli {
    /// Province/city reference file, one "province,city" pair per line
    #[arg(long, env = "KORUPSI_VOCAB")]
    vocab: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fill category/year/location and write enriched rows
    Enrich {
        /// CSV file or directory of CSV files
        input: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Emit JSON summaries instead of CSV rows
        #[arg(long)]
        json: bool,
    },
    /// Report pairs of records describing the same case
    Dedup {
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Print the verdict/arrest/damage search queries per record
    Queries {
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Print the derived identifier of each record for a URL
    Key {
        input: PathBuf,
        #[arg(long)]
        url: String,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the data
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let vocab = Vocabulary::load(&cli.vocab)
        .with_context(|| format!("loading vocabulary {}", cli.vocab.display()))?;

    match cli.command {
        Command::Enrich {
            input,
            output,
            json,
        } => run_enrich(&input, output.as_deref(), json, &vocab),
        Command::Dedup { input, json } => run_dedup(&input, json, &vocab),
        Command::Queries { input, json } => run_queries(&input, json, &vocab),
        Command::Key { input, url } => run_key(&input, &url, &vocab),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  LOADING
// ═══════════════════════════════════════════════════════════════════════

/// Read every input and run category filling with the built-in order.
fn load_enriched(input: &Path, vocab: &Vocabulary) -> Result<(Schema, Vec<CaseRecord>)> {
    let categories = default_categories();
    let paths = scan_inputs(input)?;

    let mut schema: Option<Schema> = None;
    let mut records = Vec::new();
    for path in &paths {
        let batch = read_batch_from_path(path, &categories, vocab)
            .with_context(|| format!("reading {}", path.display()))?;
        if let Some(s) = schema
            && s != batch.schema
        {
            bail!("{} uses a different column layout than earlier inputs", path.display());
        }
        schema = Some(batch.schema);
        records.extend(batch.records);
    }

    for r in &mut records {
        r.fill_category(&categories);
    }
    let categorized = records.iter().filter(|r| r.category().is_some()).count();
    tracing::info!(
        files = paths.len(),
        records = records.len(),
        categorized,
        "enriched"
    );

    // scan_inputs never returns an empty list
    Ok((schema.unwrap_or(Schema::Base), records))
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("cannot create {}", p.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

// ═══════════════════════════════════════════════════════════════════════
//  SUBCOMMANDS
// ═══════════════════════════════════════════════════════════════════════

fn run_enrich(input: &Path, output: Option<&Path>, json: bool, vocab: &Vocabulary) -> Result<()> {
    let (schema, records) = load_enriched(input, vocab)?;
    let mut out = open_output(output)?;

    if json {
        let summaries: Vec<CaseSummary> = records.iter().map(CaseRecord::to_summary).collect();
        serde_json::to_writer_pretty(&mut out, &summaries)?;
        writeln!(out)?;
    } else {
        write_batch(&mut out, schema, &records)?;
    }
    out.flush()?;
    Ok(())
}

fn run_dedup(input: &Path, json: bool, vocab: &Vocabulary) -> Result<()> {
    let (_, records) = load_enriched(input, vocab)?;
    let pairs: Vec<DuplicatePair> = find_duplicates(&records)
        .into_iter()
        .map(|(i, j)| DuplicatePair {
            left: records[i].key(),
            right: records[j].key(),
            left_accused: records[i].accused().to_string(),
            right_accused: records[j].accused().to_string(),
            category: records[i].category().map(|c| c.name().to_string()),
        })
        .collect();
    tracing::info!(pairs = pairs.len(), "duplicate scan finished");

    let mut out = open_output(None)?;
    if json {
        serde_json::to_writer_pretty(&mut out, &pairs)?;
        writeln!(out)?;
    } else {
        for p in &pairs {
            writeln!(
                out,
                "{} ~ {}\t{} / {}\t{}",
                p.left,
                p.right,
                p.left_accused,
                p.right_accused,
                p.category.as_deref().unwrap_or("-")
            )?;
        }
    }
    out.flush()?;
    Ok(())
}

fn run_queries(input: &Path, json: bool, vocab: &Vocabulary) -> Result<()> {
    let (_, records) = load_enriched(input, vocab)?;
    let mut out = open_output(None)?;

    if json {
        let sets: Vec<QuerySet> = records.iter().map(CaseRecord::to_query_set).collect();
        serde_json::to_writer_pretty(&mut out, &sets)?;
        writeln!(out)?;
    } else {
        for r in &records {
            for q in r.search_queries() {
                writeln!(out, "{}\t{q}", r.key())?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn run_key(input: &Path, url: &str, vocab: &Vocabulary) -> Result<()> {
    if url.trim().is_empty() {
        bail!("--url must not be empty");
    }
    let (_, records) = load_enriched(input, vocab)?;
    let mut out = open_output(None)?;
    for r in &records {
        writeln!(out, "{}\t{}", r.key(), r.derived_key(url))?;
    }
    out.flush()?;
    Ok(())
}

//! Domain Forge - combinatorial and AI-assisted domain name generation
//!
//! Builds candidate names from word lists (plus optional AI suggestions) and
//! checks every candidate/TLD pair with DNS and WHOIS.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use domain_forge::{
    batch::ProgressCallback,
    domain::{get_tld_list, get_tld_list_names},
    AvailabilityStatus, BatchProgress, Candidate, Confidence, ForgeConfig, Pipeline, RecordSource,
    Registrar, Report, VerificationResult,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "domain-forge",
    version,
    about = "🔥 Generate brandable domain names and check their availability",
    after_help = "ENVIRONMENT VARIABLES:
    OPENAI_API_KEY / OPENAI_BASE_URL / OPENAI_MODEL
    ANTHROPIC_API_KEY / ANTHROPIC_MODEL
    GEMINI_API_KEY / GEMINI_MODEL
    OLLAMA_HOST / OLLAMA_MODEL
    DOMAIN_FORGE_* overrides for config file settings (e.g. DOMAIN_FORGE_TLDS)"
)]
struct Cli {
    /// Business description for AI suggestions
    description: Vec<String>,

    /// Custom words to combine (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    words: Vec<String>,

    /// Partial stems used as prefixes (comma separated)
    #[arg(long, value_delimiter = ',')]
    stems: Vec<String>,

    /// Every candidate must contain one of these (comma separated)
    #[arg(long = "require", value_delimiter = ',')]
    compulsory: Vec<String>,

    /// Endings to append instead of the built-in list (comma separated)
    #[arg(long, value_delimiter = ',')]
    endings: Option<Vec<String>>,

    /// Built-in word categories to add (data, tech, business, health, finance, education, creative)
    #[arg(short, long, value_delimiter = ',')]
    categories: Vec<String>,

    /// TLDs to check (comma separated)
    #[arg(short, long = "tld", value_delimiter = ',')]
    tlds: Vec<String>,

    /// Named TLD preset (popular, startup, enterprise, country)
    #[arg(long)]
    tld_preset: Option<String>,

    /// Add numeric suffix variants (zenly7, zenly24)
    #[arg(long)]
    numbers: bool,

    /// Add numeric prefix variants (24zenly)
    #[arg(long)]
    number_prefixes: bool,

    /// Add word+connector+word names (dataforcloud)
    #[arg(long)]
    connectors: bool,

    /// Checks in flight at once
    #[arg(long)]
    concurrency: Option<usize>,

    /// Minimum milliseconds between registry lookups
    #[arg(long)]
    whois_delay_ms: Option<u64>,

    /// Query the registry even when DNS already resolves
    #[arg(long)]
    force_whois: bool,

    /// Report Unknown instead of Available when only DNS could be consulted
    #[arg(long)]
    strict: bool,

    /// Registry record source: whois, rdap or off
    #[arg(long)]
    record_source: Option<RecordSource>,

    /// TOML configuration file
    #[arg(long, env = "DOMAIN_FORGE_CONFIG")]
    config: Option<PathBuf>,

    /// Keep at most this many candidates
    #[arg(long)]
    limit: Option<usize>,

    /// Shuffle candidates with this seed before limiting
    #[arg(long)]
    seed: Option<u64>,

    /// Skip AI suggestions
    #[arg(long)]
    no_ai: bool,

    /// AI provider (openai, anthropic, gemini, ollama)
    #[arg(long)]
    provider: Option<String>,

    /// AI model
    #[arg(long)]
    model: Option<String>,

    /// Number of names to ask the AI for
    #[arg(long)]
    ai_count: Option<usize>,

    /// Registrar for search links (godaddy, namecheap, porkbun)
    #[arg(long)]
    registrar: Option<Registrar>,

    /// Print candidates without checking availability
    #[arg(long)]
    dry_run: bool,

    /// Machine-readable output
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = domain_forge::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<domain_forge::DomainForgeError>() {
            Some(forge_error) => eprintln!("{}", forge_error.user_message()),
            None => eprintln!("❌ {:#}", e),
        }
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// File, then environment, then flags
fn load_config(cli: &Cli) -> Result<ForgeConfig> {
    let mut config = match &cli.config {
        Some(path) => ForgeConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ForgeConfig::default(),
    };
    config.apply_env()?;

    if !cli.words.is_empty() {
        config.words.custom = cli.words.clone();
    }
    if !cli.stems.is_empty() {
        config.words.stems = cli.stems.clone();
    }
    if !cli.compulsory.is_empty() {
        config.words.compulsory = cli.compulsory.clone();
    }
    if let Some(endings) = &cli.endings {
        config.words.endings = Some(endings.clone());
    }
    if !cli.categories.is_empty() {
        config.words.categories = cli.categories.clone();
    }

    if let Some(preset) = &cli.tld_preset {
        config.tlds = get_tld_list(preset).with_context(|| {
            format!(
                "unknown TLD preset '{}' (available: {})",
                preset,
                get_tld_list_names().join(", ")
            )
        })?;
    }
    if !cli.tlds.is_empty() {
        config.tlds = cli.tlds.clone();
    }

    config.rules.numeric_suffixes |= cli.numbers;
    config.rules.numeric_prefixes |= cli.number_prefixes;
    config.rules.word_connector_word |= cli.connectors;

    if let Some(concurrency) = cli.concurrency {
        config.check.concurrency = concurrency;
    }
    if let Some(delay) = cli.whois_delay_ms {
        config.check.whois_delay_ms = delay;
    }
    config.check.force_double_verification |= cli.force_whois;
    if cli.strict {
        config.check.optimistic_fallback = false;
    }
    if let Some(source) = cli.record_source {
        config.check.record_source = source;
    }

    if let Some(limit) = cli.limit {
        config.limit.max_candidates = Some(limit);
    }
    if let Some(seed) = cli.seed {
        config.limit.shuffle_seed = Some(seed);
    }

    if cli.no_ai {
        config.ai.enabled = false;
    }
    if let Some(provider) = &cli.provider {
        config.ai.provider = Some(provider.to_lowercase());
    }
    if let Some(model) = &cli.model {
        config.ai.model = Some(model.clone());
    }
    if let Some(count) = cli.ai_count {
        config.ai.count = count;
    }
    if let Some(registrar) = cli.registrar {
        config.registrar = registrar;
    }

    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let pipeline = Pipeline::from_config(&config)?;
    let description = cli.description.join(" ");
    let description = Some(description.as_str()).filter(|d| !d.trim().is_empty());

    if !cli.json {
        println!("🔥 Domain Forge - domain name generation");
        println!("═══════════════════════════════════════════");
        if let Some(description) = description {
            if let Some(provider) = pipeline.ai_provider() {
                println!("🤖 Asking {} for names: \"{}\"", provider, description);
            } else {
                println!("💡 No AI provider configured, using word combinations only");
            }
        }
        println!();
    }

    let candidates = pipeline.generate_candidates(description).await?;

    if cli.dry_run {
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&candidates)?);
        } else {
            display_candidates(&candidates);
        }
        return Ok(());
    }

    if !cli.json {
        display_candidates(&candidates);
    }

    let queries = pipeline.queries(&candidates);
    let total = queries.len();

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let bar = if cli.json {
        ProgressBar::hidden()
    } else {
        println!("🔍 Checking {} domain(s) across {} TLD(s)...", total, pipeline.tlds().len());
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("  {spinner:.green} [{bar:30.cyan/dim}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        bar
    };

    let progress_bar = bar.clone();
    let progress: ProgressCallback = Arc::new(move |p: &BatchProgress| {
        progress_bar.set_position(p.completed as u64);
        progress_bar.set_message(format!("✅ {}  ❌ {}  ⚠️ {}", p.available, p.taken, p.unknown));
    });

    let check_start = Instant::now();
    let report = pipeline.verify(queries, &cancel, Some(progress)).await;
    bar.finish_and_clear();

    if cli.json {
        print_json(&report, config.registrar)?;
    } else {
        display_report(&report, config.registrar, check_start.elapsed().as_secs_f32());
        let metrics = pipeline.checker().get_metrics_snapshot();
        if metrics.domains_checked > 0 {
            println!("   📊 Average check time: {:.1}ms", metrics.avg_check_time_ms());
        }
    }

    Ok(())
}

/// Display candidates in a compact grid
fn display_candidates(candidates: &[Candidate]) {
    println!("🎨 Candidates ({}):", candidates.len());
    println!("═══════════════════");

    for (i, candidate) in candidates.iter().enumerate() {
        let marker = match candidate.source {
            domain_forge::CandidateSource::Ai => "🤖",
            domain_forge::CandidateSource::Combined => "  ",
        };
        print!("{:3}. {}{:<18}", i + 1, marker, candidate.base_name);
        if (i + 1) % 3 == 0 {
            println!();
        }
    }
    if candidates.len() % 3 != 0 {
        println!();
    }
    println!();
}

fn display_report(report: &Report, registrar: Registrar, elapsed_secs: f32) {
    let available: Vec<&VerificationResult> = report.available().collect();
    let taken: Vec<&VerificationResult> = report.taken().collect();
    let unknown: Vec<&VerificationResult> = report.unknown().filter(|r| r.attempted()).collect();

    if !available.is_empty() {
        println!("🎉 Available Domains ({}):", available.len());
        println!("─────────────────────────");
        for result in &available {
            let note = match result.confidence() {
                Confidence::WhoisConfirmed => "confirmed by registry",
                Confidence::DnsOnly => "no DNS records, registry not confirmed",
            };
            println!("✅ {} - AVAILABLE ({})", result.full_domain(), note);
            if let Ok(url) = registrar.search_url(&result.full_domain()) {
                println!("   🔗 {}: {}", registrar, url);
            }
        }
        println!();
    }

    if !taken.is_empty() {
        println!("❌ Taken Domains ({}):", taken.len());
        println!("─────────────────────");
        for result in &taken {
            print!("❌ {} - TAKEN", result.full_domain());
            if let Some(registrar) = result.registrar() {
                print!(" ({})", registrar);
            }
            println!();
        }
        println!();
    }

    if !unknown.is_empty() {
        println!("⚠️  Checking Issues ({}):", unknown.len());
        println!("───────────────────────");
        for result in &unknown {
            println!(
                "⚠️  {} - {}",
                result.full_domain(),
                result.error_message().unwrap_or("inconclusive registry record")
            );
        }
        println!();
    }

    let summary = report.summary();
    println!("📈 Summary:");
    println!("   ✅ Available: {} ({} confirmed)", summary.available, report.actionable().count());
    println!("   ❌ Taken: {}", summary.taken);
    if summary.unknown > summary.unattempted {
        println!("   ⚠️  Unknown: {}", summary.unknown - summary.unattempted);
    }
    println!("   📊 Total checked: {}", summary.total - summary.unattempted);
    println!("   ⏱️  Total time: {:.2}s", elapsed_secs);

    if report.interrupted() {
        println!();
        println!("⏹️  Interrupted: {} domain(s) were not checked", summary.unattempted);
    } else if summary.available == 0 {
        println!();
        println!("😔 No available domains found. Try more words or another TLD!");
    }
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    domain: String,
    base_name: &'a str,
    tld: &'a str,
    source: domain_forge::CandidateSource,
    availability: AvailabilityStatus,
    confidence: Confidence,
    dns_resolved: bool,
    whois_checked: bool,
    whois_registered: Option<bool>,
    attempted: bool,
    registrar: Option<&'a str>,
    error: Option<&'a str>,
    link: Option<String>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    interrupted: bool,
    summary: domain_forge::ReportSummary,
    results: Vec<JsonEntry<'a>>,
}

fn print_json(report: &Report, registrar: Registrar) -> Result<()> {
    let results = report
        .results()
        .iter()
        .map(|r| JsonEntry {
            domain: r.full_domain(),
            base_name: &r.query().candidate.base_name,
            tld: &r.query().tld,
            source: r.query().candidate.source,
            availability: r.availability(),
            confidence: r.confidence(),
            dns_resolved: r.dns_resolved(),
            whois_checked: r.whois_checked(),
            whois_registered: r.whois_registered(),
            attempted: r.attempted(),
            registrar: r.registrar(),
            error: r.error_message(),
            link: (r.availability() == AvailabilityStatus::Available)
                .then(|| registrar.search_url(&r.full_domain()).ok())
                .flatten()
                .map(|url| url.to_string()),
        })
        .collect();

    let output = JsonReport {
        interrupted: report.interrupted(),
        summary: report.summary(),
        results,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

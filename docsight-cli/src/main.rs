use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::Path;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

// Import from docsight-core
use docsight_core::config::ModelKind;
use docsight_core::{Dashboard, DashboardConfig, FileHandle, FileKind, StepProfiler, Tab};

// Import CLI utilities
use docsight::report::{default_output_path, Report};
use docsight::{ConfigLocator, ConfigSource};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModelChoice {
    /// No embedding model; complexity reads "Model not loaded"
    None,
    /// all-MiniLM-L6-v2 (needs the fastembed-model feature)
    MiniLm,
}

impl From<ModelChoice> for ModelKind {
    fn from(choice: ModelChoice) -> Self {
        match choice {
            ModelChoice::None => ModelKind::None,
            ModelChoice::MiniLm => ModelKind::MiniLm,
        }
    }
}

#[derive(Parser)]
#[command(name = "docsight")]
#[command(about = "Analyze a PDF or image: info panel, text complexity and a narrative summary")]
struct Args {
    /// Path to the PDF or image to open
    #[arg(short, long)]
    input: Option<String>,

    /// Path to custom config file (YAML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Generate a summary after analyzing a PDF
    #[arg(short, long)]
    summary: bool,

    /// Embedding model used for text complexity (overrides config)
    #[arg(short, long, value_enum)]
    model: Option<ModelChoice>,

    /// Output file path (if not specified, auto-generated based on input)
    #[arg(short, long)]
    output: Option<String>,

    /// Time each step
    #[arg(long)]
    profile: bool,

    /// Show available config options and exit
    #[arg(long)]
    show_configs: bool,

    /// Debug-level logging (RUST_LOG still takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    println!("🔎 Docsight Document Inspector");

    if args.show_configs {
        show_help();
        return Ok(());
    }

    let Some(input) = args.input.as_deref() else {
        println!("⚠️  No input given. Use --input <file> (see --show-configs).");
        return Ok(());
    };

    // Check if input file exists
    if !Path::new(input).exists() {
        println!("⚠️  Input file not found at: {}", input);
        println!("   Please check the file path.");
        return Ok(());
    }

    let source = ConfigLocator::new().resolve(args.config.as_deref());
    let config_path = source.path().map(|p| p.to_string_lossy().to_string());
    let mut config = DashboardConfig::load_with_fallback(config_path.as_deref());
    match &source {
        ConfigSource::Defaults => println!("📋 Using default config"),
        other => println!("📋 Loaded config from: {}", other.path().map(|p| p.display().to_string()).unwrap_or_default()),
    }

    if let Some(model) = args.model {
        config.model.kind = model.into();
        debug!("Model overridden from command line: {:?}", config.model.kind);
    }

    let mut profiler = StepProfiler::new(args.profile);
    let mut dashboard = Dashboard::from_config(&config)?;

    let file = FileHandle::from_path(Path::new(input))?;
    println!("📄 Opening: {} ({})", file.name(), file.mime_type());

    let kind = file.kind();
    dashboard.switch_tab(match kind {
        FileKind::Pdf => Tab::Document,
        _ => Tab::Image,
    });
    let routed = profiler.time_step("Open file", || dashboard.open(file));
    if !routed {
        error!("❌ Unsupported file type for '{}': only PDFs and images can be opened", input);
        std::process::exit(1);
    }

    print_info_panel(&dashboard);

    if kind == FileKind::Pdf {
        match dashboard.analysis() {
            Some(analysis) => {
                println!("✅ Successfully analyzed document");
                println!("📊 Document analysis:");
                println!("   - Pages: {}", analysis.page_count);
                println!("   - Size: {}", analysis.file_size);
                if !analysis.creation_date.is_empty() {
                    println!("   - Created: {}", analysis.creation_date);
                }
                println!("   - Complexity: {}", analysis.text_complexity);
                println!("   - Words: {}", analysis.word_count);
                println!("   - Average word length: {:.2}", analysis.average_word_length);
            }
            None => println!("⚠️  Document could not be analyzed"),
        }

        if args.summary {
            dashboard.switch_tab(Tab::Summary);
            let summary = profiler.time_step("Generate summary", || dashboard.generate_summary().to_string());
            println!("\n📝 Summary:\n{}", summary);
        }
    }

    dashboard.switch_tab(Tab::Voice);
    println!("\n🔊 Voice description:\n   {}", dashboard.file_description());

    let output_path = args.output.clone().unwrap_or_else(|| default_output_path(input));
    let report = Report::new(input, source.path(), dashboard.snapshot()).with_timings(&profiler);
    report.save(&output_path)?;
    println!("💾 Report saved to: {}", output_path);

    profiler.print_summary();
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();
}

fn print_info_panel(dashboard: &Dashboard) {
    let info = dashboard.info();
    if info.is_empty() {
        return;
    }
    println!("🗂️  File information:");
    for (label, value) in info.iter() {
        println!("   - {}: {}", label, value);
    }
}

fn show_help() {
    println!("\n📋 Available Configuration Options:");
    println!("  --input <path>          PDF or image to open");
    println!("  --config <path>         Load custom config file (else $DOCSIGHT_CONFIG, else ~/.config/docsight/config.yaml)");
    println!("  --summary               Generate a narrative summary for PDFs");
    println!("  --model <none|mini-lm>  Embedding model for text complexity");
    println!("  --output <path>         Report path (auto-generated if not specified)");
    println!("  --profile               Time each step");
    println!("  --verbose               Debug logging");

    println!("\n📄 Config file sections (YAML):");
    println!("  complexity  - simple_below, complex_above");
    println!("  summary     - keyword_count, min_keyword_length, related_topic_count, entity_limit, preview_chars");
    println!("  inspector   - timestamp_format (chrono pattern)");
    println!("  analysis    - result_policy: latest_request | last_completed");
    println!("  model       - kind: none | mini_lm, show_download_progress");
    println!("  voice       - voice: voice1 | voice2 | voice3, speed, pitch");

    println!("\n📝 Usage Examples:");
    println!("  docsight -i report.pdf --summary");
    println!("  docsight -i photo.png -o photo.json");
    println!("  docsight -i report.pdf -m mini-lm --profile");

    #[cfg(not(feature = "fastembed-model"))]
    {
        println!("\n🧠 Embedding model:");
        println!("  This build has no embedding model. Rebuild with --features fastembed-model for mini-lm.");
    }
}

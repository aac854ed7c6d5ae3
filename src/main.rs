use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing_subscriber::EnvFilter;

use bidi_invoice::config::{config_dir, load_catalog, CONFIG_TEMPLATE, INVOICE_TEMPLATE};
use bidi_invoice::i18n::keys;
use bidi_invoice::invoice::{
    export_invoice, format_amount, format_number, load_invoice, LoadedInvoice, OutputFormat,
};
use bidi_invoice::{compute, Direction, InvoiceError, Localizer, Result};

#[derive(Parser)]
#[command(name = "bidi-invoice")]
#[command(version, about = "Direction-aware invoice rendering", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.bidi-invoice or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG wins when set
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files
    Init,

    /// Render an invoice file
    Render {
        /// Invoice file (TOML)
        invoice: PathBuf,

        /// Language tag, overrides the file and config ("ar" is right-to-left)
        #[arg(short, long)]
        lang: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Pdf)]
        format: Format,

        /// Output file (default: stdout for json/typst, output dir for pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open the written file with the system default viewer
        #[arg(long)]
        open: bool,
    },

    /// Show the computed totals of an invoice file
    Totals {
        /// Invoice file (TOML)
        invoice: PathBuf,

        /// Language tag used for the currency marker
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// List languages known to the message catalog
    Languages,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Typst,
    Pdf,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => OutputFormat::Json,
            Format::Typst => OutputFormat::Typst,
            Format::Pdf => OutputFormat::Pdf,
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Render {
            invoice,
            lang,
            format,
            output,
            open,
        } => cmd_render(&cfg_dir, &invoice, lang.as_deref(), format.into(), output, open),
        Commands::Totals { invoice, lang } => cmd_totals(&cfg_dir, &invoice, lang.as_deref()),
        Commands::Languages => cmd_languages(&cfg_dir),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(InvoiceError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    // Create directories
    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;

    // Write template files
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join("invoice.toml"), INVOICE_TEMPLATE)?;

    println!("Initialized invoice config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit your company details:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Adapt the sample invoice:   $EDITOR {}/invoice.toml",
        cfg_dir.display()
    );
    println!();
    println!("Then render it:");
    println!("  bidi-invoice render {}/invoice.toml", cfg_dir.display());

    Ok(())
}

fn cmd_render(
    cfg_dir: &Path,
    invoice: &Path,
    lang: Option<&str>,
    format: OutputFormat,
    output: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    let written = export_invoice(cfg_dir, invoice, lang, format, output)?;

    if let Some(path) = written {
        println!("Rendered {}", path.display());
        if open {
            open_path(&path)?;
        }
    }
    Ok(())
}

fn open_path(path: &Path) -> Result<()> {
    // Open with system default viewer
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(path).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(path)
            .spawn()?;
    }
    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct TotalsRow {
    #[tabled(rename = "LINE")]
    line: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

#[derive(Tabled)]
struct LanguageRow {
    #[tabled(rename = "LANGUAGE")]
    language: String,
    #[tabled(rename = "DIRECTION")]
    direction: String,
}

/// Print the four totals, rounded for display, with labels from the catalog
fn cmd_totals(cfg_dir: &Path, invoice: &Path, lang: Option<&str>) -> Result<()> {
    let LoadedInvoice { input, catalog, .. } = load_invoice(cfg_dir, invoice, lang)?;
    let t = |key: &str| catalog.message(key, &input.language);
    let marker = t(keys::CURRENCY)?;
    let totals = compute(&input.items, input.tax_pct, input.discount_pct)?;
    let money = |value| format!("{}{}", marker, format_amount(value));

    let rows = vec![
        TotalsRow {
            line: t(keys::SUBTOTAL)?.to_string(),
            amount: money(totals.subtotal),
        },
        TotalsRow {
            line: format!("{} ({}%)", t(keys::DISCOUNT)?, format_number(input.discount_pct)),
            amount: money(totals.discount_amount),
        },
        TotalsRow {
            line: format!("{} ({}%)", t(keys::TAX)?, format_number(input.tax_pct)),
            amount: money(totals.tax_amount),
        },
        TotalsRow {
            line: t(keys::TOTAL)?.to_string(),
            amount: money(totals.grand_total),
        },
    ];

    println!("Invoice {} ({} items)", input.number, input.items.len());
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// List catalog languages with the direction each one lays out in
fn cmd_languages(cfg_dir: &Path) -> Result<()> {
    let catalog = if cfg_dir.exists() {
        load_catalog(cfg_dir)?
    } else {
        bidi_invoice::Catalog::builtin()
    };

    let rows: Vec<LanguageRow> = catalog
        .languages()
        .map(|language| LanguageRow {
            language: language.to_string(),
            direction: if Direction::from_language(language).is_rtl() {
                "rtl".to_string()
            } else {
                "ltr".to_string()
            },
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

use chrono::Local;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::input::InvoiceInput;
use super::totals::{compute, Totals};
use crate::config::{load_catalog, load_config, load_invoice_file, resolve_output_dir, Config};
use crate::error::Result;
use crate::i18n::{Catalog, Direction, Localizer};
use crate::layout::{layout, Document};
use crate::pdf::{generate_pdf, to_typst};

/// What `export_invoice` writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Typst,
    Pdf,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Typst => "typ",
            OutputFormat::Pdf => "pdf",
        }
    }
}

/// Totals and the laid-out tree of one invoice
#[derive(Debug, Clone)]
pub struct RenderedInvoice {
    pub totals: Totals,
    pub document: Document,
}

/// Totals first, then layout in the direction the language selects.
pub fn render_invoice(input: &InvoiceInput, localizer: &dyn Localizer) -> Result<RenderedInvoice> {
    let totals = compute(&input.items, input.tax_pct, input.discount_pct)?;
    let direction = Direction::from_language(&input.language);
    let document = layout(input, &totals, direction, localizer)?;
    Ok(RenderedInvoice { totals, document })
}

/// An invoice file resolved against its config directory
#[derive(Debug)]
pub struct LoadedInvoice {
    pub input: InvoiceInput,
    pub catalog: Catalog,
    pub config: Config,
}

/// Load an invoice file with config defaults and message overrides applied.
/// `language` overrides both the file and config.toml.
pub fn load_invoice(
    cfg_dir: &Path,
    invoice_path: &Path,
    language: Option<&str>,
) -> Result<LoadedInvoice> {
    let config = load_config(cfg_dir)?;
    let catalog = load_catalog(cfg_dir)?;
    let file = load_invoice_file(invoice_path)?;

    let mut input = InvoiceInput::from_file(file, &config, Local::now().date_naive());
    if let Some(language) = language {
        input.language = language.to_string();
    }
    Ok(LoadedInvoice {
        input,
        catalog,
        config,
    })
}

/// Default file name for an invoice; path separators in the number are replaced
pub fn output_file_name(number: &str, format: OutputFormat) -> String {
    let stem: String = number
        .chars()
        .map(|c| if c == '/' || c == '\\' { '-' } else { c })
        .collect();
    format!("{}.{}", stem, format.extension())
}

/// Render an invoice file and write it out.
///
/// JSON and Typst go to stdout unless `output` is given; PDFs default to the
/// configured output directory. Returns the written path, if any.
pub fn export_invoice(
    cfg_dir: &Path,
    invoice_path: &Path,
    language: Option<&str>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<Option<PathBuf>> {
    let LoadedInvoice {
        input,
        catalog,
        config,
    } = load_invoice(cfg_dir, invoice_path, language)?;
    let rendered = render_invoice(&input, &catalog)?;

    let path = match (format, output) {
        (OutputFormat::Pdf, None) => {
            let output_dir = resolve_output_dir(&config.output.dir, cfg_dir);
            std::fs::create_dir_all(&output_dir)?;
            Some(output_dir.join(output_file_name(&input.number, format)))
        }
        (_, output) => output,
    };

    match format {
        OutputFormat::Pdf => {
            // Always Some for PDFs, see above
            if let Some(path) = &path {
                generate_pdf(&rendered.document, path)?;
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rendered.document)?;
            write_output(path.as_deref(), &json)?;
        }
        OutputFormat::Typst => {
            write_output(path.as_deref(), &to_typst(&rendered.document))?;
        }
    }

    tracing::info!(
        number = %input.number,
        language = %input.language,
        format = format.extension(),
        "exported invoice"
    );
    Ok(path)
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LineItem;
    use crate::layout::Role;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn input(language: &str) -> InvoiceInput {
        InvoiceInput {
            number: "INV/7".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            sender: Default::default(),
            customer: Default::default(),
            items: vec![LineItem::new("Widget", Decimal::from(3), Decimal::new(250, 2))],
            tax_pct: Decimal::from(10),
            discount_pct: Decimal::ZERO,
            privacy: None,
            notes: None,
            language: language.to_string(),
        }
    }

    #[test]
    fn render_picks_direction_from_language() {
        let catalog = Catalog::builtin();
        let ltr = render_invoice(&input("en"), &catalog).unwrap();
        let rtl = render_invoice(&input("ar"), &catalog).unwrap();

        assert_eq!(ltr.document.direction, Direction::Ltr);
        assert_eq!(rtl.document.direction, Direction::Rtl);
        assert_eq!(ltr.totals, rtl.totals);
        assert_eq!(ltr.totals.grand_total, Decimal::new(825, 2));
        assert!(rtl.document.find(Role::DiscountRow).is_none());
    }

    #[test]
    fn load_invoice_returns_the_config_it_read() {
        let cfg_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            cfg_dir.path().join("config.toml"),
            "language = \"ar\"\n[output]\ndir = \"renders\"\n",
        )
        .unwrap();
        let invoice = cfg_dir.path().join("invoice.toml");
        std::fs::write(&invoice, "number = \"A-1\"\nitems = []\n").unwrap();

        let loaded = load_invoice(cfg_dir.path(), &invoice, None).unwrap();
        assert_eq!(loaded.config.output.dir, "renders");
        assert_eq!(loaded.input.language, "ar");

        let loaded = load_invoice(cfg_dir.path(), &invoice, Some("en")).unwrap();
        assert_eq!(loaded.input.language, "en");
        assert_eq!(loaded.config.language, "ar");
    }

    #[test]
    fn render_reports_overflow_instead_of_panicking() {
        let mut big = input("en");
        let huge = Decimal::from_str_exact("100000000000000000000").unwrap();
        big.items = vec![LineItem::new("Widget", huge, huge)];

        let err = render_invoice(&big, &Catalog::builtin()).unwrap_err();
        assert!(matches!(err, crate::InvoiceError::AmountOverflow(_)));
    }

    #[test]
    fn file_names_are_path_safe() {
        assert_eq!(output_file_name("INV/7", OutputFormat::Pdf), "INV-7.pdf");
        assert_eq!(output_file_name("A-1", OutputFormat::Json), "A-1.json");
    }
}

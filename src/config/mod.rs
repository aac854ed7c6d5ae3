mod invoice_file;
mod item;
mod party;
mod settings;

pub use invoice_file::InvoiceFile;
pub use item::LineItem;
pub use party::Party;
pub use settings::{Config, InvoiceDefaults, OutputSettings};

use crate::error::{InvoiceError, Result};
use crate::i18n::Catalog;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.bidi-invoice/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "bidi-invoice") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.bidi-invoice/
    let home = dirs_home().ok_or_else(|| {
        InvoiceError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".bidi-invoice"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the output directory; relative paths are taken from the config dir
pub fn resolve_output_dir(dir: &str, config_dir: &Path) -> PathBuf {
    let expanded = expand_path(dir);
    if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(expanded)
    }
}

/// Load config.toml. A missing config directory is an error, a missing file
/// inside it is not: every setting has a default.
pub fn load_config(config_dir: &Path) -> Result<Config> {
    if !config_dir.exists() {
        return Err(InvoiceError::ConfigNotFound(config_dir.to_path_buf()));
    }
    let path = config_dir.join("config.toml");
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config.toml, using defaults");
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| InvoiceError::ConfigParse { path, source: e })
}

/// Load an invoice snapshot file
pub fn load_invoice_file(path: &Path) -> Result<InvoiceFile> {
    if !path.exists() {
        return Err(InvoiceError::InvoiceFileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| InvoiceError::InvalidInput {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Built-in catalog extended with messages.toml from the config dir, if any
pub fn load_catalog(config_dir: &Path) -> Result<Catalog> {
    let mut catalog = Catalog::builtin();
    let path = config_dir.join("messages.toml");
    if path.exists() {
        let content = fs::read_to_string(&path)?;
        let overrides = Catalog::from_toml_str(&content)
            .map_err(|e| InvoiceError::ConfigParse { path: path.clone(), source: e })?;
        tracing::debug!(path = %path.display(), "merging message overrides");
        catalog.merge(overrides);
    }
    Ok(catalog)
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"# Language used when an invoice does not set one ("ar" renders right-to-left)
language = "en"

[sender]
name = "Your Company Name"
phone = "+1-555-123-4567"
email = "billing@yourcompany.com"
address = "123 Business Street, San Francisco"
# logo = "~/logo.png"          # optional

[defaults]
tax = 0        # percent, e.g. 15
discount = 0   # percent
# privacy = "Payment due within 30 days."
# notes = ""

[output]
dir = "output"   # relative to this directory
"#;

/// Template content for a sample invoice.toml
pub const INVOICE_TEMPLATE: &str = r#"# Render with:
#   bidi-invoice render invoice.toml --format pdf
number = "INV-0001"
# date = "2026-01-31"          # optional, defaults to today
# language = "ar"              # optional, defaults to config.toml
tax = 10
discount = 5
notes = """
Thank you for the quick turnaround.
Second line is kept as written."""

[customer]
name = "Example Client Inc."
email = "jane@example.com"
address = "456 Client Avenue, Los Angeles"

[[items]]
name = "Technical Consulting"
description = "Architecture review"
quantity = 2
price = "50.00"

[[items]]
name = "Project Setup"
quantity = 1
price = "19.99"
"#;

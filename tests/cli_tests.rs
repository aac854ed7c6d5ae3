use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn invoice_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("bidi-invoice"))
}

/// Run `init` into a fresh temp dir and return (guard, config path)
fn init_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("invoice-config");

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();

    (temp_dir, config_path)
}

fn sample_invoice(config_path: &Path) -> String {
    config_path.join("invoice.toml").to_str().unwrap().to_string()
}

#[test]
fn test_help() {
    invoice_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Direction-aware invoice rendering"));
}

#[test]
fn test_version() {
    invoice_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bidi-invoice"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("invoice-config");

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized invoice config"));

    // Check files were created
    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("invoice.toml").exists());
    assert!(config_path.join("output").is_dir());
}

#[test]
fn test_init_fails_if_exists() {
    let (_temp_dir, config_path) = init_config();

    // Second init should fail
    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_render_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");
    let invoice = temp_dir.path().join("invoice.toml");
    fs::write(&invoice, "number = \"A\"\nitems = []\n").unwrap();

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "render"])
        .arg(&invoice)
        .args(["--format", "json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_render_json_to_stdout() {
    let (_temp_dir, config_path) = init_config();

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "render"])
        .arg(sample_invoice(&config_path))
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"direction\": \"ltr\""))
        .stdout(predicate::str::contains("\"role\": \"grand_total_row\""))
        .stdout(predicate::str::contains("\"125.99\""))
        .stdout(predicate::str::contains("Your Company Name"));
}

#[test]
fn test_render_rtl_language_override() {
    let (_temp_dir, config_path) = init_config();

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "render"])
        .arg(sample_invoice(&config_path))
        .args(["--format", "json", "--lang", "ar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"direction\": \"rtl\""))
        .stdout(predicate::str::contains("\"row-reverse\""))
        .stdout(predicate::str::contains("فاتورة"));
}

#[test]
fn test_render_typst_to_file() {
    let (temp_dir, config_path) = init_config();
    let output = temp_dir.path().join("invoice.typ");

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "render"])
        .arg(sample_invoice(&config_path))
        .args(["--format", "typst", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered"));

    let source = fs::read_to_string(&output).unwrap();
    assert!(source.contains("#set page("));
    assert!(source.contains("#\"Thank you for your business!\""));
    assert!(source.contains("#\"125.99\""));
}

#[test]
fn test_render_unknown_language_fails_closed() {
    let (_temp_dir, config_path) = init_config();

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "render"])
        .arg(sample_invoice(&config_path))
        .args(["--format", "json", "--lang", "fr"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Missing message"))
        .stderr(predicate::str::contains("'fr'"));
}

#[test]
fn test_render_message_overrides() {
    let (_temp_dir, config_path) = init_config();
    fs::write(
        config_path.join("messages.toml"),
        "[fr]\n\"pdf.currency\" = \"€\"\n",
    )
    .unwrap();

    // Still incomplete: the first missing label aborts the render
    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "render"])
        .arg(sample_invoice(&config_path))
        .args(["--format", "json", "--lang", "fr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing message 'date.format'"));

    // Totals only need the summary labels and the marker
    fs::write(
        config_path.join("messages.toml"),
        r#"[fr]
"pdf.currency" = "€"
"pdf.subtotal" = "Sous-total"
"pdf.discount" = "Remise"
"pdf.tax" = "TVA"
"pdf.total" = "Total TTC"
"#,
    )
    .unwrap();

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "totals"])
        .arg(sample_invoice(&config_path))
        .args(["--lang", "fr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sous-total"))
        .stdout(predicate::str::contains("Remise (5%)"))
        .stdout(predicate::str::contains("TVA (10%)"))
        .stdout(predicate::str::contains("€125.99"));
}

#[test]
fn test_render_missing_items_is_rejected() {
    let (temp_dir, config_path) = init_config();
    let invoice = temp_dir.path().join("broken.toml");
    fs::write(&invoice, "number = \"INV-9\"\n").unwrap();

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "render"])
        .arg(&invoice)
        .args(["--format", "json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid invoice input"))
        .stderr(predicate::str::contains("items"));
}

#[test]
fn test_render_non_numeric_quantity_is_rejected() {
    let (temp_dir, config_path) = init_config();
    let invoice = temp_dir.path().join("broken.toml");
    fs::write(
        &invoice,
        "number = \"INV-9\"\n[[items]]\nquantity = \"lots\"\nprice = 1\n",
    )
    .unwrap();

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "render"])
        .arg(&invoice)
        .args(["--format", "json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid invoice input"));
}

#[test]
fn test_render_missing_invoice_file() {
    let (_temp_dir, config_path) = init_config();

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "render", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invoice file not found"));
}

#[test]
fn test_totals() {
    let (_temp_dir, config_path) = init_config();

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "totals"])
        .arg(sample_invoice(&config_path))
        .assert()
        .success()
        .stdout(predicate::str::contains("INV-0001"))
        .stdout(predicate::str::contains("$119.99"))
        .stdout(predicate::str::contains("Discount (5%)"))
        .stdout(predicate::str::contains("$6.00"))
        .stdout(predicate::str::contains("$12.00"))
        .stdout(predicate::str::contains("$125.99"));
}

#[test]
fn test_totals_labels_follow_language() {
    let (_temp_dir, config_path) = init_config();

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "totals"])
        .arg(sample_invoice(&config_path))
        .args(["--lang", "ar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("المجموع الفرعي"))
        .stdout(predicate::str::contains("الخصم (5%)"))
        .stdout(predicate::str::contains("الضريبة (10%)"))
        .stdout(predicate::str::contains("الإجمالي"))
        .stdout(predicate::str::contains("Subtotal").not());
}

#[test]
fn test_totals_without_label_fails_closed() {
    let (_temp_dir, config_path) = init_config();

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "totals"])
        .arg(sample_invoice(&config_path))
        .args(["--lang", "fr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing message 'pdf.currency'"));
}

#[test]
fn test_oversized_amounts_are_reported() {
    let (temp_dir, config_path) = init_config();
    let line_overflow = temp_dir.path().join("line.toml");
    fs::write(
        &line_overflow,
        r#"number = "BIG-1"
[[items]]
quantity = "100000000000000000000"
price = "100000000000000000000"
"#,
    )
    .unwrap();
    let tax_overflow = temp_dir.path().join("tax.toml");
    fs::write(
        &tax_overflow,
        r#"number = "BIG-2"
tax = 100
[[items]]
quantity = "1000000000000000000000000000"
price = 1
"#,
    )
    .unwrap();

    for (invoice, what) in [(&line_overflow, "line total"), (&tax_overflow, "tax")] {
        for command in ["totals", "render"] {
            invoice_cmd()
                .args(["-C", config_path.to_str().unwrap(), command])
                .arg(invoice)
                .args(if command == "render" {
                    vec!["--format", "json"]
                } else {
                    vec![]
                })
                .assert()
                .failure()
                .code(1)
                .stderr(predicate::str::contains(format!(
                    "Amount out of range while computing the {what}"
                )))
                .stderr(predicate::str::contains("panicked").not());
        }
    }
}

#[test]
fn test_totals_keep_zero_rates() {
    let (temp_dir, config_path) = init_config();
    let invoice = temp_dir.path().join("empty.toml");
    fs::write(&invoice, "number = \"E-1\"\ntax = 0\ndiscount = 0\nitems = []\n").unwrap();

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "totals"])
        .arg(&invoice)
        .assert()
        .success()
        .stdout(predicate::str::contains("Discount (0%)"))
        .stdout(predicate::str::contains("Tax (0%)"))
        .stdout(predicate::str::contains("$0.00"));
}

#[test]
fn test_languages_list() {
    let (_temp_dir, config_path) = init_config();

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "languages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ar"))
        .stdout(predicate::str::contains("rtl"))
        .stdout(predicate::str::contains("en"))
        .stdout(predicate::str::contains("ltr"));
}

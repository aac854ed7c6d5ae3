use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::expand_path;
use crate::error::{InvoiceError, Result};
use crate::i18n::Direction;
use crate::layout::{
    AlignSelf, Document, Edges, FlexDirection, FontWeight, Justify, Length, Node, Page, Role,
    Style, TextAlign,
};

/// Fonts tried after the document's own family
const FALLBACK_FONTS: [&str; 2] = ["Noto Naskh Arabic", "Helvetica"];

/// Convert the document tree to Typst markup, keeping image references as-is.
pub fn to_typst(document: &Document) -> String {
    to_typst_with(document, &|src| Some(src.to_string()))
}

/// Convert the document tree to Typst markup.
///
/// Page content is laid out with a fixed left-to-right base so the tree's
/// physical alignments and row order are applied verbatim; each text run
/// carries the document direction for shaping. `resolve_image` maps an image
/// reference to a path Typst can read, or `None` to leave the image out.
pub fn to_typst_with(document: &Document, resolve_image: &dyn Fn(&str) -> Option<String>) -> String {
    let emitter = Emitter {
        direction: document.direction,
        resolve_image,
    };
    let mut out = String::from("// Generated invoice\n");
    for (index, page) in document.pages.iter().enumerate() {
        if index > 0 {
            out.push_str("#pagebreak()\n");
        }
        emitter.page(&mut out, page);
    }
    out
}

struct Emitter<'a> {
    direction: Direction,
    resolve_image: &'a dyn Fn(&str) -> Option<String>,
}

impl Emitter<'_> {
    fn page(&self, out: &mut String, page: &Page) {
        let margin = page.style.padding.unwrap_or(Edges::all(40.0));
        let family = page.style.font_family.unwrap_or("Helvetica");
        let size = page.style.font_size.unwrap_or(12.0);

        let mut footer = String::new();
        self.node(&mut footer, &page.footer, &page.style);

        let _ = writeln!(
            out,
            "#set page(paper: \"a4\", margin: {}, footer: [{}])",
            edges(&margin),
            footer
        );
        let _ = writeln!(
            out,
            "#set text(font: ({:?}, {:?}, {:?}), size: {}pt, dir: ltr)",
            family, FALLBACK_FONTS[0], FALLBACK_FONTS[1], size
        );
        for node in &page.body {
            self.node(out, node, &page.style);
            out.push('\n');
        }
    }

    /// `inherited` carries the text properties of the enclosing blocks
    fn node(&self, out: &mut String, node: &Node, inherited: &Style) {
        let style = inherit(inherited, node.style());
        match node {
            Node::Text(text) => {
                let content: Vec<String> = text
                    .spans
                    .iter()
                    .map(|span| string_content(&span.text))
                    .collect();
                let mut body = format!("#text({})[{}]", text_args(&style, self.direction), content.concat());
                if let Some(line_height) = style.line_height {
                    body = format!("#set par(leading: {:.2}em)\n{}", (line_height - 1.0).max(0.0), body);
                }
                self.boxed(out, node.style(), &body, align(style.text_align));
            }
            Node::Image(image) => match (self.resolve_image)(&image.src) {
                Some(path) => {
                    let body = format!(
                        "#image({:?}{}{}, fit: \"contain\")",
                        path,
                        length_arg("width", image.style.width),
                        length_arg("height", image.style.height)
                    );
                    self.boxed(out, &image.style, &body, "center");
                }
                None => tracing::warn!(src = %image.src, "skipping unreadable image"),
            },
            Node::Block(block) => {
                let mut body = String::new();
                match block.style.flex_direction {
                    Some(flow) => self.row(&mut body, &block.children, flow, &block.style, &style),
                    None => {
                        for child in &block.children {
                            self.node(&mut body, child, &style);
                            body.push('\n');
                        }
                    }
                }
                self.boxed(out, &block.style, &body, align(style.text_align));
            }
        }
    }

    /// Children become grid cells in visual order
    fn row(&self, out: &mut String, children: &[Node], flow: FlexDirection, own: &Style, style: &Style) {
        let mut cells: Vec<&Node> = children.iter().collect();
        if flow == FlexDirection::RowReverse {
            cells.reverse();
        }
        let spread = own.justify == Some(Justify::SpaceBetween);
        let columns: Vec<String> = cells
            .iter()
            .map(|child| column_width(child.style(), spread))
            .collect();

        let _ = write!(
            out,
            "#grid(columns: ({},), column-gutter: {}pt",
            columns.join(", "),
            own.gap.unwrap_or(0.0)
        );
        for cell in cells {
            let mut content = String::new();
            self.node(&mut content, cell, style);
            let _ = write!(out, ", [{}]", content);
        }
        out.push(')');
    }

    /// Wrap content in a block carrying the box properties of `own`
    fn boxed(&self, out: &mut String, own: &Style, content: &str, text_align: &str) {
        let mut args = Vec::new();
        if let Some(Length::Pt(width)) = own.width {
            args.push(format!("width: {}pt", width));
        }
        if let Some(padding) = own.padding {
            args.push(format!("inset: {}", edges(&padding)));
        }
        if let Some(margin) = own.margin {
            args.push(format!("above: {}pt, below: {}pt", margin.top, margin.bottom));
        }
        if let Some(fill) = own.background {
            args.push(format!("fill: rgb({:?})", fill.0));
        }
        let mut strokes = Vec::new();
        if let Some(border) = own.border_top {
            strokes.push(format!("top: {}pt + rgb({:?})", border.width, border.color.0));
        }
        if let Some(border) = own.border_bottom {
            strokes.push(format!("bottom: {}pt + rgb({:?})", border.width, border.color.0));
        }
        if !strokes.is_empty() {
            args.push(format!("stroke: ({})", strokes.join(", ")));
        }

        let mut block = format!("#block({})[#align({})[{}]]", args.join(", "), text_align, content);
        if let Some(margin) = own.margin.filter(|m| m.left > 0.0 || m.right > 0.0) {
            block = format!("#pad(left: {}pt, right: {}pt)[{}]", margin.left, margin.right, block);
        }
        match own.align_self {
            Some(anchor) => {
                let _ = write!(out, "#align({})[{}]", anchor_align(anchor), block);
            }
            None => out.push_str(&block),
        }
    }
}

/// Text properties flow from parents to children; box properties do not.
fn inherit(parent: &Style, own: &Style) -> Style {
    Style {
        direction: parent.direction,
        font_family: parent.font_family,
        text_align: parent.text_align,
        font_size: parent.font_size,
        font_weight: parent.font_weight,
        line_height: parent.line_height,
        color: parent.color,
        ..Style::default()
    }
    .merge(own)
}

fn text_args(style: &Style, direction: Direction) -> String {
    let mut args = vec![format!(
        "dir: {}",
        match direction {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    )];
    if let Some(size) = style.font_size {
        args.push(format!("size: {}pt", size));
    }
    if style.font_weight == Some(FontWeight::Bold) {
        args.push("weight: \"bold\"".to_string());
    }
    if let Some(color) = style.color {
        args.push(format!("fill: rgb({:?})", color.0));
    }
    args.join(", ")
}

fn column_width(style: &Style, spread: bool) -> String {
    match (style.width, style.flex) {
        (Some(Length::Percent(p)), _) => format!("{}%", p),
        (Some(Length::Pt(pt)), _) => format!("{}pt", pt),
        (None, Some(flex)) => format!("{}fr", flex),
        (None, None) if spread => "1fr".to_string(),
        (None, None) => "auto".to_string(),
    }
}

fn length_arg(name: &str, length: Option<Length>) -> String {
    match length {
        Some(Length::Pt(pt)) => format!(", {}: {}pt", name, pt),
        Some(Length::Percent(p)) => format!(", {}: {}%", name, p),
        None => String::new(),
    }
}

fn edges(e: &Edges) -> String {
    format!(
        "(top: {}pt, right: {}pt, bottom: {}pt, left: {}pt)",
        e.top, e.right, e.bottom, e.left
    )
}

fn align(text_align: Option<TextAlign>) -> &'static str {
    match text_align {
        Some(TextAlign::Right) => "right",
        Some(TextAlign::Center) => "center",
        Some(TextAlign::Left) | None => "left",
    }
}

fn anchor_align(anchor: AlignSelf) -> &'static str {
    match anchor {
        AlignSelf::FlexStart => "left",
        AlignSelf::Center => "center",
        AlignSelf::FlexEnd => "right",
    }
}

/// Escaped string literals joined by explicit line breaks
fn string_content(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("#\"{}\"", escape(line)))
        .collect::<Vec<_>>()
        .join("#linebreak()")
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Generate a PDF with the Typst CLI.
///
/// Local logo files are copied next to the generated source; references that
/// are not readable files are left out of the PDF.
pub fn generate_pdf(document: &Document, output_path: &Path) -> Result<()> {
    generate_pdf_in(document, output_path, &std::env::temp_dir())
}

/// Same as [`generate_pdf`], with the scratch directory created under `temp_root`.
/// The scratch directory is removed on every exit path.
fn generate_pdf_in(document: &Document, output_path: &Path, temp_root: &Path) -> Result<()> {
    // Check if typst is available
    let typst_check = Command::new("typst").arg("--version").output();

    if typst_check.is_err() {
        return Err(InvoiceError::TypstNotFound);
    }

    let work_dir = tempfile::Builder::new()
        .prefix("bidi-invoice-")
        .tempdir_in(temp_root)?;
    let work_path = work_dir.path();

    let images = stage_images(document, work_path)?;
    let source = to_typst_with(document, &|src| images.get(src).cloned());
    let source_path = work_path.join("invoice.typ");
    std::fs::write(&source_path, source)?;

    let output = Command::new("typst")
        .arg("compile")
        .arg("--root")
        .arg(work_path)
        .arg(&source_path)
        .arg(output_path)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(InvoiceError::PdfGeneration(stderr.to_string()));
    }

    tracing::debug!(path = %output_path.display(), "typst compile finished");
    Ok(())
}

/// Copy readable image files into `dir`, keyed by their original reference
fn stage_images(document: &Document, dir: &Path) -> Result<HashMap<String, String>> {
    let mut staged = HashMap::new();
    for (index, node) in document.find_all(Role::Logo).into_iter().enumerate() {
        let Node::Image(image) = node else { continue };
        let source: PathBuf = expand_path(&image.src);
        if !source.is_file() {
            continue;
        }
        let extension = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("png");
        let name = format!("image-{index}.{extension}");
        std::fs::copy(&source, dir.join(&name))?;
        staged.insert(image.src.clone(), name);
    }
    Ok(staged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LineItem, Party};
    use crate::i18n::Catalog;
    use crate::invoice::{render_invoice, InvoiceInput};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn document(language: &str, logo: Option<&str>) -> Document {
        let input = InvoiceInput {
            number: "INV-1".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 2, 3).unwrap(),
            sender: Party {
                name: Some("Say \"hi\"".to_string()),
                logo: logo.map(str::to_string),
                ..Party::default()
            },
            customer: Party::default(),
            items: vec![LineItem::new("Widget", Decimal::ONE, Decimal::from(5))],
            tax_pct: Decimal::ZERO,
            discount_pct: Decimal::ZERO,
            privacy: Some("first\nsecond".to_string()),
            notes: None,
            language: language.to_string(),
        };
        render_invoice(&input, &Catalog::builtin()).unwrap().document
    }

    #[test]
    fn strings_are_escaped_and_breaks_kept() {
        assert_eq!(string_content("a \"b\" \\"), "#\"a \\\"b\\\" \\\\\"");
        assert_eq!(string_content("x\ny"), "#\"x\"#linebreak()#\"y\"");

        let source = to_typst(&document("en", None));
        assert!(source.contains("#\"Say \\\"hi\\\"\""));
        assert!(source.contains("#\"first\"#linebreak()#\"second\""));
    }

    #[test]
    fn footer_goes_into_the_page_footer() {
        let source = to_typst(&document("en", None));
        let page_line = source.lines().find(|l| l.starts_with("#set page(")).unwrap();
        assert!(page_line.contains("Thank you for your business!"));
    }

    #[test]
    fn rtl_rows_are_emitted_in_visual_order() {
        let ltr = to_typst(&document("en", None));
        let rtl = to_typst(&document("ar", None));

        assert!(ltr.contains("#grid(columns: (40%, 20%, 20%, 20%,)"));
        assert!(rtl.contains("#grid(columns: (20%, 20%, 20%, 40%,)"));
        assert!(rtl.contains("dir: rtl"));
        assert!(!ltr.contains("dir: rtl"));
    }

    #[test]
    fn failed_compile_leaves_no_scratch_dir() {
        let temp_root = tempfile::tempdir().unwrap();
        // A directory cannot be overwritten by the PDF, so compiling fails
        let output_dir = tempfile::tempdir().unwrap();

        let result = generate_pdf_in(&document("en", None), output_dir.path(), temp_root.path());

        assert!(result.is_err());
        assert_eq!(std::fs::read_dir(temp_root.path()).unwrap().count(), 0);
    }

    #[test]
    fn unresolved_images_are_skipped() {
        let doc = document("en", Some("missing.png"));
        assert!(to_typst(&doc).contains("#image(\"missing.png\""));
        assert!(!to_typst_with(&doc, &|_| None).contains("#image("));
    }
}

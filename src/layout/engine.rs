//! Bidirectional layout: input snapshot + totals -> document tree.
//!
//! Every block takes its styles from one [`StyleSet`] computed up front, so
//! flipping the direction flips the whole document at once. Labels come from
//! the [`Localizer`]; the first unresolved message aborts the call and no
//! partial tree is returned.

use rust_decimal::Decimal;

use super::style::{style_for, Style, StyleSet};
use super::tree::{Block, Document, Node, Page, PageSize, Role, Span, SpanKind};
use crate::config::{LineItem, Party};
use crate::error::Result;
use crate::i18n::{format_date, keys, Direction, Localizer};
use crate::invoice::{format_amount, format_number, InvoiceInput, Totals};

/// Shown for every missing party or item field
pub const PLACEHOLDER: &str = "N/A";

/// The one place optional party/item fields are resolved. Blank counts as missing.
pub fn or_placeholder(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => PLACEHOLDER,
    }
}

/// Currency marker followed by the rounded amount, as two adjacent spans.
/// The pair keeps this order in both directions.
pub fn format_money(marker: &str, amount: Decimal) -> Vec<Span> {
    vec![
        Span {
            kind: SpanKind::CurrencyMarker,
            text: marker.to_string(),
        },
        Span {
            kind: SpanKind::Amount,
            text: format_amount(amount),
        },
    ]
}

struct Context<'a> {
    input: &'a InvoiceInput,
    totals: &'a Totals,
    styles: StyleSet,
    localizer: &'a dyn Localizer,
    currency: &'a str,
}

impl<'a> Context<'a> {
    fn t(&self, key: &str) -> Result<&'a str> {
        self.localizer.message(key, &self.input.language)
    }

    fn label(&self, key: &str) -> Result<Vec<Span>> {
        Ok(vec![Span::plain(format!("{}:", self.t(key)?))])
    }

    fn money(&self, role: Role, style: Style, amount: Decimal) -> Node {
        Node::text(role, style, format_money(self.currency, amount))
    }
}

/// Lay out one invoice. Pure: nothing is cached between calls.
pub fn layout(
    input: &InvoiceInput,
    totals: &Totals,
    direction: Direction,
    localizer: &dyn Localizer,
) -> Result<Document> {
    let currency = localizer.message(keys::CURRENCY, &input.language)?;
    let ctx = Context {
        input,
        totals,
        styles: style_for(direction),
        localizer,
        currency,
    };

    let body = vec![
        header(&ctx)?,
        parties(&ctx)?,
        item_table(&ctx)?,
        summary(&ctx)?,
        free_text(&ctx)?,
    ];
    let footer = Node::Block(Block {
        role: Role::Footer,
        style: ctx.styles.footer,
        fixed: true,
        children: vec![Node::text(
            Role::ClosingMessage,
            Style::default(),
            vec![Span::plain(ctx.t(keys::THANK_YOU)?)],
        )],
    });

    tracing::debug!(
        number = %input.number,
        ?direction,
        rows = input.items.len(),
        "laid out invoice"
    );

    Ok(Document {
        language: input.language.clone(),
        direction,
        pages: vec![Page {
            size: PageSize::A4,
            style: ctx.styles.page,
            body,
            footer,
        }],
    })
}

fn header(ctx: &Context) -> Result<Node> {
    let s = &ctx.styles;
    let date = format_date(ctx.localizer, &ctx.input.language, ctx.input.date)?;

    let mut children = vec![Node::text(
        Role::Title,
        s.title,
        vec![Span::plain(ctx.t(keys::INVOICE)?)],
    )];
    if let Some(logo) = ctx.input.sender.logo() {
        children.push(Node::Image(super::tree::Image {
            role: Role::Logo,
            style: s.logo,
            src: logo.to_string(),
        }));
    }
    children.push(Node::block(
        Role::HeaderMeta,
        s.header_meta,
        vec![
            meta_line(s, ctx.t(keys::DATE)?, date),
            meta_line(s, ctx.t(keys::INVOICE_NUMBER)?, ctx.input.number.clone()),
        ],
    ));

    Ok(Node::block(Role::Header, s.header, children))
}

fn meta_line(s: &StyleSet, label: &str, value: String) -> Node {
    Node::text(
        Role::MetaLine,
        s.header_text,
        vec![Span::plain(format!("{label}: ")), Span::plain(value)],
    )
}

fn parties(ctx: &Context) -> Result<Node> {
    let s = &ctx.styles;
    Ok(Node::block(
        Role::Parties,
        s.parties,
        vec![
            party_column(ctx, keys::FROM, &ctx.input.sender)?,
            party_column(ctx, keys::BILL_TO, &ctx.input.customer)?,
        ],
    ))
}

fn party_column(ctx: &Context, label_key: &str, party: &Party) -> Result<Node> {
    let s = &ctx.styles;
    let fields = party
        .contact_fields()
        .into_iter()
        .map(|field| {
            Node::text(
                Role::PartyField,
                s.text,
                vec![Span::plain(or_placeholder(field))],
            )
        })
        .collect();

    Ok(Node::block(
        Role::PartyColumn,
        s.column,
        vec![Node::block(
            Role::PartySection,
            s.section,
            vec![
                Node::text(Role::PartyLabel, s.section_title, ctx.label(label_key)?),
                Node::block(Role::ContactInfo, s.contact_info, fields),
            ],
        )],
    ))
}

fn item_table(ctx: &Context) -> Result<Node> {
    let s = &ctx.styles;
    let header_cell = |style: &Style, key: &str| -> Result<Node> {
        Ok(Node::text(
            Role::HeaderCell,
            s.header_cell.merge(style),
            vec![Span::plain(ctx.t(key)?)],
        ))
    };

    let header = Node::Block(Block {
        role: Role::TableHeader,
        style: s.table_header,
        fixed: true,
        children: vec![
            header_cell(&s.name, keys::PRODUCT_NAME)?,
            header_cell(&s.quantity, keys::QUANTITY)?,
            header_cell(&s.price, keys::PRICE)?,
            header_cell(&s.total, keys::TOTAL)?,
        ],
    });

    let mut children = Vec::with_capacity(ctx.input.items.len() + 1);
    children.push(header);
    for (index, item) in ctx.input.items.iter().enumerate() {
        children.push(item_row(ctx, index, item)?);
    }

    Ok(Node::block(Role::ItemTable, s.table, children))
}

/// Odd 0-indexed rows get the alternate background
fn item_row(ctx: &Context, index: usize, item: &LineItem) -> Result<Node> {
    let s = &ctx.styles;
    let row_style = if index % 2 == 1 {
        s.table_row.merge(&s.table_row_alt)
    } else {
        s.table_row
    };

    let mut name_cell = vec![Node::text(
        Role::ItemName,
        s.cell,
        vec![Span::plain(or_placeholder(item.name.as_deref()))],
    )];
    if let Some(description) = item.description.as_deref().filter(|d| !d.trim().is_empty()) {
        name_cell.push(Node::text(
            Role::ItemDescription,
            s.description,
            vec![Span::plain(description)],
        ));
    }

    Ok(Node::block(
        Role::ItemRow,
        row_style,
        vec![
            Node::block(Role::NameCell, s.name, name_cell),
            Node::text(
                Role::QuantityCell,
                s.cell.merge(&s.quantity),
                vec![Span::plain(format_number(item.quantity))],
            ),
            ctx.money(Role::PriceCell, s.cell.merge(&s.price), item.price),
            ctx.money(Role::TotalCell, s.cell.merge(&s.total), item.line_total()?),
        ],
    ))
}

fn summary(ctx: &Context) -> Result<Node> {
    let s = &ctx.styles;
    let totals = ctx.totals;
    let row = |role: Role, label: String, amount: Decimal| {
        Node::block(
            role,
            s.summary_row,
            vec![
                Node::text(Role::SummaryLabel, s.summary_label, vec![Span::plain(label)]),
                ctx.money(Role::SummaryValue, s.summary_value, amount),
            ],
        )
    };
    let rate_label = |key: &str, pct: Decimal| -> Result<String> {
        Ok(format!("{} ({}%)", ctx.t(key)?, format_number(pct)))
    };

    let mut rows = vec![row(
        Role::SubtotalRow,
        ctx.t(keys::SUBTOTAL)?.to_string(),
        totals.subtotal,
    )];
    // Suppressing a row is display-only; the totals always carry all four figures.
    if ctx.input.discount_pct > Decimal::ZERO {
        rows.push(row(
            Role::DiscountRow,
            rate_label(keys::DISCOUNT, ctx.input.discount_pct)?,
            totals.discount_amount,
        ));
    }
    if ctx.input.tax_pct > Decimal::ZERO {
        rows.push(row(
            Role::TaxRow,
            rate_label(keys::TAX, ctx.input.tax_pct)?,
            totals.tax_amount,
        ));
    }
    rows.push(Node::block(
        Role::GrandTotalRow,
        s.grand_total_row,
        vec![
            Node::text(
                Role::SummaryLabel,
                s.grand_total_label,
                vec![Span::plain(ctx.t(keys::TOTAL)?)],
            ),
            ctx.money(Role::SummaryValue, s.grand_total_value, totals.grand_total),
        ],
    ));

    Ok(Node::block(Role::Summary, s.summary, rows))
}

fn free_text(ctx: &Context) -> Result<Node> {
    let s = &ctx.styles;
    let section = |role: Role, key: &str, body: Option<&str>| -> Result<Node> {
        let body = body.map(|text| text.replace("\r\n", "\n")).unwrap_or_default();
        let spans = if body.is_empty() {
            Vec::new()
        } else {
            vec![Span::plain(body)]
        };
        Ok(Node::block(
            role,
            s.free_text_container,
            vec![
                Node::text(Role::FreeTextLabel, s.free_text_label, ctx.label(key)?),
                Node::text(Role::FreeTextBody, s.free_text_body, spans),
            ],
        ))
    };

    Ok(Node::block(
        Role::FreeText,
        s.free_text,
        vec![
            section(
                Role::TermsBlock,
                keys::TERMS_AND_PRIVACY,
                ctx.input.privacy.as_deref(),
            )?,
            section(Role::NotesBlock, keys::NOTES, ctx.input.notes.as_deref())?,
        ],
    ))
}

//! Renderer-agnostic document tree.

use serde::Serialize;

use super::style::Style;
use crate::i18n::Direction;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub language: String,
    pub direction: Direction,
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageSize {
    A4,
}

/// One page template. The body flows and may be broken across physical
/// pages by the renderer; the footer is repeated at the bottom of each one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub size: PageSize,
    pub style: Style,
    pub body: Vec<Node>,
    pub footer: Node,
}

/// Structural purpose of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Header,
    Title,
    Logo,
    HeaderMeta,
    MetaLine,
    Parties,
    PartyColumn,
    PartySection,
    PartyLabel,
    ContactInfo,
    PartyField,
    ItemTable,
    TableHeader,
    HeaderCell,
    ItemRow,
    NameCell,
    ItemName,
    ItemDescription,
    QuantityCell,
    PriceCell,
    TotalCell,
    Summary,
    SubtotalRow,
    DiscountRow,
    TaxRow,
    GrandTotalRow,
    SummaryLabel,
    SummaryValue,
    FreeText,
    TermsBlock,
    NotesBlock,
    FreeTextLabel,
    FreeTextBody,
    Footer,
    ClosingMessage,
}

impl Role {
    /// Nodes that keep the same placement in both directions
    pub fn mirroring_exempt(self) -> bool {
        matches!(self, Role::Logo | Role::HeaderMeta | Role::MetaLine)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Block(Block),
    Text(Text),
    Image(Image),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub role: Role,
    pub style: Style,
    /// Repeated on every page the block's parent spans
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fixed: bool,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub role: Role,
    pub style: Style,
    pub spans: Vec<Span>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    Plain,
    CurrencyMarker,
    Amount,
}

/// A run of text. May contain `\n`, which renderers must keep as a line break.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Span {
    pub kind: SpanKind,
    pub text: String,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Plain,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub role: Role,
    pub style: Style,
    pub src: String,
}

impl Node {
    pub fn block(role: Role, style: Style, children: Vec<Node>) -> Self {
        Node::Block(Block {
            role,
            style,
            fixed: false,
            children,
        })
    }

    pub fn text(role: Role, style: Style, spans: Vec<Span>) -> Self {
        Node::Text(Text { role, style, spans })
    }

    pub fn role(&self) -> Role {
        match self {
            Node::Block(b) => b.role,
            Node::Text(t) => t.role,
            Node::Image(i) => i.role,
        }
    }

    pub fn style(&self) -> &Style {
        match self {
            Node::Block(b) => &b.style,
            Node::Text(t) => &t.style,
            Node::Image(i) => &i.style,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Block(b) => &b.children,
            Node::Text(_) | Node::Image(_) => &[],
        }
    }

    /// Depth-first, parents before children
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }

    pub fn find_all(&self, role: Role) -> Vec<&Node> {
        let mut found = Vec::new();
        self.walk(&mut |node| {
            if node.role() == role {
                found.push(node);
            }
        });
        found
    }

    pub fn find(&self, role: Role) -> Option<&Node> {
        self.find_all(role).into_iter().next()
    }

    /// Concatenated span text; block children are separated by a space
    pub fn plain_text(&self) -> String {
        match self {
            Node::Text(t) => t.spans.iter().map(|s| s.text.as_str()).collect(),
            Node::Image(_) => String::new(),
            Node::Block(b) => b
                .children
                .iter()
                .map(Node::plain_text)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl Document {
    /// Every node of every page, footer included
    pub fn find_all(&self, role: Role) -> Vec<&Node> {
        self.pages
            .iter()
            .flat_map(|page| page.body.iter().chain(std::iter::once(&page.footer)))
            .flat_map(|node| node.find_all(role))
            .collect()
    }

    pub fn find(&self, role: Role) -> Option<&Node> {
        self.find_all(role).into_iter().next()
    }
}

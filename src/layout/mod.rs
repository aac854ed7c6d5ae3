mod engine;
mod style;
mod tree;

pub use engine::{format_money, layout, or_placeholder, PLACEHOLDER};
pub use style::{
    style_for, AlignSelf, Border, Color, Edges, FlexDirection, FontWeight, Justify, Length,
    Position, Style, StyleSet, TextAlign, WordBreak,
};
pub use tree::{Block, Document, Image, Node, Page, PageSize, Role, Span, SpanKind, Text};

//! Style records and the direction-dependent style set.
//!
//! Axes are physical: `FlexStart` and `Left` always mean the left page edge,
//! so mirroring a layout is a matter of swapping those values, never of
//! asking the renderer to reinterpret them.

use serde::Serialize;

use crate::i18n::Direction;

/// Children stack vertically when a block sets no flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlexDirection {
    Row,
    RowReverse,
}

impl FlexDirection {
    pub fn mirrored(self) -> Self {
        match self {
            FlexDirection::Row => FlexDirection::RowReverse,
            FlexDirection::RowReverse => FlexDirection::Row,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn mirrored(self) -> Self {
        match self {
            TextAlign::Left => TextAlign::Right,
            TextAlign::Right => TextAlign::Left,
            TextAlign::Center => TextAlign::Center,
        }
    }
}

/// Cross-axis placement of a block inside its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignSelf {
    FlexStart,
    Center,
    FlexEnd,
}

impl AlignSelf {
    pub fn mirrored(self) -> Self {
        match self {
            AlignSelf::FlexStart => AlignSelf::FlexEnd,
            AlignSelf::FlexEnd => AlignSelf::FlexStart,
            AlignSelf::Center => AlignSelf::Center,
        }
    }
}

/// Main-axis distribution; relative to the flow, so it never mirrors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Justify {
    SpaceBetween,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WordBreak {
    BreakWord,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    Pt(f32),
    Percent(f32),
}

/// Hex color such as `#e5e7eb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color(pub &'static str);

impl Color {
    pub const RULE: Color = Color("#e5e7eb");
    pub const MUTED: Color = Color("#6B7280");
    pub const BODY_GRAY: Color = Color("#666666");
    pub const HEADER_FILL: Color = Color("#f3f4f6");
    pub const ROW_FILL: Color = Color("#f9fafb");
}

/// Padding or margin quadruple, in points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub const ZERO: Edges = Edges {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn top(value: f32) -> Self {
        Self { top: value, ..Self::ZERO }
    }

    pub fn bottom(value: f32) -> Self {
        Self {
            bottom: value,
            ..Self::ZERO
        }
    }

    pub fn horizontal(value: f32) -> Self {
        Self {
            left: value,
            right: value,
            ..Self::ZERO
        }
    }

    pub fn mirrored(self) -> Self {
        Self {
            left: self.right,
            right: self.left,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

/// Out-of-flow placement relative to the page box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Position {
    pub fn mirrored(self) -> Self {
        Self {
            left: self.right,
            right: self.left,
            ..self
        }
    }
}

/// A style fragment. Unset fields inherit from whatever it is merged over.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_direction: Option<FlexDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify: Option<Justify>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_self: Option<AlignSelf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Edges>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Edges>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_top: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_break: Option<WordBreak>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

macro_rules! override_fields {
    ($base:expr, $over:expr; $($field:ident),+ $(,)?) => {
        Style {
            $($field: $over.$field.or($base.$field)),+
        }
    };
}

impl Style {
    /// Field-level override: every field set in `over` replaces ours.
    pub fn merge(&self, over: &Style) -> Style {
        override_fields!(self, over;
            direction,
            font_family,
            flex_direction,
            justify,
            align_self,
            text_align,
            width,
            height,
            flex,
            gap,
            padding,
            margin,
            font_size,
            font_weight,
            line_height,
            color,
            background,
            border_top,
            border_bottom,
            word_break,
            position,
        )
    }

    /// The same record reflected across the vertical axis.
    pub fn mirrored(&self) -> Style {
        Style {
            direction: self.direction.map(Direction::flipped),
            flex_direction: self.flex_direction.map(FlexDirection::mirrored),
            align_self: self.align_self.map(AlignSelf::mirrored),
            text_align: self.text_align.map(TextAlign::mirrored),
            padding: self.padding.map(Edges::mirrored),
            margin: self.margin.map(Edges::mirrored),
            position: self.position.map(Position::mirrored),
            ..*self
        }
    }
}

/// Every named style the layout engine uses, resolved for one direction.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSet {
    pub direction: Direction,
    pub page: Style,
    pub header: Style,
    pub title: Style,
    /// Date and invoice number; pinned to the right edge in both directions
    pub header_meta: Style,
    pub header_text: Style,
    /// Always centered, never mirrored
    pub logo: Style,
    pub parties: Style,
    pub column: Style,
    pub section: Style,
    pub section_title: Style,
    pub text: Style,
    pub contact_info: Style,
    pub table: Style,
    pub table_header: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub name: Style,
    pub description: Style,
    pub quantity: Style,
    pub price: Style,
    pub total: Style,
    pub header_cell: Style,
    pub cell: Style,
    pub summary: Style,
    pub summary_row: Style,
    pub summary_label: Style,
    pub summary_value: Style,
    pub grand_total_row: Style,
    pub grand_total_label: Style,
    pub grand_total_value: Style,
    pub free_text: Style,
    pub free_text_container: Style,
    pub free_text_label: Style,
    pub free_text_body: Style,
    pub footer: Style,
}

impl StyleSet {
    /// Named styles paired with their field names, for exhaustive checks
    pub fn named(&self) -> [(&'static str, &Style); 35] {
        [
            ("page", &self.page),
            ("header", &self.header),
            ("title", &self.title),
            ("header_meta", &self.header_meta),
            ("header_text", &self.header_text),
            ("logo", &self.logo),
            ("parties", &self.parties),
            ("column", &self.column),
            ("section", &self.section),
            ("section_title", &self.section_title),
            ("text", &self.text),
            ("contact_info", &self.contact_info),
            ("table", &self.table),
            ("table_header", &self.table_header),
            ("table_row", &self.table_row),
            ("table_row_alt", &self.table_row_alt),
            ("name", &self.name),
            ("description", &self.description),
            ("quantity", &self.quantity),
            ("price", &self.price),
            ("total", &self.total),
            ("header_cell", &self.header_cell),
            ("cell", &self.cell),
            ("summary", &self.summary),
            ("summary_row", &self.summary_row),
            ("summary_label", &self.summary_label),
            ("summary_value", &self.summary_value),
            ("grand_total_row", &self.grand_total_row),
            ("grand_total_label", &self.grand_total_label),
            ("grand_total_value", &self.grand_total_value),
            ("free_text", &self.free_text),
            ("free_text_container", &self.free_text_container),
            ("free_text_label", &self.free_text_label),
            ("free_text_body", &self.free_text_body),
            ("footer", &self.footer),
        ]
    }
}

fn row(direction: Direction) -> FlexDirection {
    match direction {
        Direction::Ltr => FlexDirection::Row,
        Direction::Rtl => FlexDirection::RowReverse,
    }
}

fn leading(direction: Direction) -> TextAlign {
    match direction {
        Direction::Ltr => TextAlign::Left,
        Direction::Rtl => TextAlign::Right,
    }
}

fn trailing(direction: Direction) -> TextAlign {
    leading(direction).mirrored()
}

fn end_anchor(direction: Direction) -> AlignSelf {
    match direction {
        Direction::Ltr => AlignSelf::FlexEnd,
        Direction::Rtl => AlignSelf::FlexStart,
    }
}

/// Gap on the side facing the next cell in reading order
fn cell_padding(direction: Direction, gap: f32) -> Edges {
    match direction {
        Direction::Ltr => Edges {
            right: gap,
            ..Edges::ZERO
        },
        Direction::Rtl => Edges {
            left: gap,
            ..Edges::ZERO
        },
    }
}

const FONT_FAMILY: &str = "Cairo";
const CELL_GAP: f32 = 8.0;

/// Build the style set for one render. Pure; callers pass the result down.
pub fn style_for(direction: Direction) -> StyleSet {
    let rule = |width| Border {
        width,
        color: Color::RULE,
    };

    let section_title = Style {
        font_size: Some(14.0),
        font_weight: Some(FontWeight::Bold),
        margin: Some(Edges::bottom(8.0)),
        font_family: Some(FONT_FAMILY),
        ..Style::default()
    };
    let section = Style {
        margin: Some(Edges::bottom(30.0)),
        ..Style::default()
    };
    let cell_column = |percent| Style {
        width: Some(Length::Percent(percent)),
        padding: Some(cell_padding(direction, CELL_GAP)),
        text_align: Some(leading(direction)),
        ..Style::default()
    };
    let summary_row = Style {
        flex_direction: Some(row(direction)),
        justify: Some(Justify::SpaceBetween),
        margin: Some(Edges::bottom(2.0)),
        ..Style::default()
    };
    let bold = |size| Style {
        font_size: Some(size),
        font_weight: Some(FontWeight::Bold),
        ..Style::default()
    };

    StyleSet {
        direction,
        page: Style {
            padding: Some(Edges::all(40.0)),
            font_size: Some(12.0),
            direction: Some(direction),
            font_family: Some(FONT_FAMILY),
            text_align: Some(leading(direction)),
            ..Style::default()
        },
        header: Style {
            flex_direction: Some(row(direction)),
            justify: Some(Justify::SpaceBetween),
            margin: Some(Edges::bottom(40.0)),
            ..Style::default()
        },
        title: bold(24.0),
        header_meta: Style {
            text_align: Some(TextAlign::Right),
            ..Style::default()
        },
        header_text: Style {
            font_size: Some(10.0),
            margin: Some(Edges::bottom(4.0)),
            ..Style::default()
        },
        logo: Style {
            width: Some(Length::Pt(50.0)),
            height: Some(Length::Pt(50.0)),
            align_self: Some(AlignSelf::Center),
            margin: Some(Edges::horizontal(20.0)),
            ..Style::default()
        },
        parties: Style {
            flex_direction: Some(row(direction)),
            gap: Some(40.0),
            ..Style::default()
        },
        column: Style {
            flex: Some(1.0),
            ..Style::default()
        },
        section,
        section_title,
        text: Style {
            font_size: Some(10.0),
            margin: Some(Edges::bottom(4.0)),
            font_family: Some(FONT_FAMILY),
            ..Style::default()
        },
        contact_info: Style {
            margin: Some(Edges::bottom(8.0)),
            ..Style::default()
        },
        table: Style {
            margin: Some(Edges::top(20.0)),
            ..Style::default()
        },
        table_header: Style {
            flex_direction: Some(row(direction)),
            background: Some(Color::HEADER_FILL),
            padding: Some(Edges::all(8.0)),
            margin: Some(Edges::bottom(8.0)),
            ..Style::default()
        },
        table_row: Style {
            flex_direction: Some(row(direction)),
            border_bottom: Some(rule(1.0)),
            padding: Some(Edges::all(8.0)),
            ..Style::default()
        },
        table_row_alt: Style {
            background: Some(Color::ROW_FILL),
            ..Style::default()
        },
        name: cell_column(40.0),
        description: Style {
            font_size: Some(8.0),
            color: Some(Color::MUTED),
            margin: Some(Edges::top(2.0)),
            font_family: Some(FONT_FAMILY),
            ..Style::default()
        },
        quantity: cell_column(20.0),
        price: cell_column(20.0),
        total: Style {
            width: Some(Length::Percent(20.0)),
            text_align: Some(leading(direction)),
            ..Style::default()
        },
        header_cell: bold(10.0),
        cell: Style {
            font_size: Some(10.0),
            ..Style::default()
        },
        summary: Style {
            margin: Some(Edges::top(20.0)),
            border_top: Some(rule(0.5)),
            padding: Some(Edges::top(8.0)),
            width: Some(Length::Pt(200.0)),
            align_self: Some(end_anchor(direction)),
            ..Style::default()
        },
        summary_row,
        summary_label: Style {
            font_size: Some(8.0),
            color: Some(Color::MUTED),
            text_align: Some(leading(direction)),
            ..Style::default()
        },
        summary_value: Style {
            font_size: Some(8.0),
            text_align: Some(trailing(direction)),
            ..Style::default()
        },
        grand_total_row: summary_row.merge(&Style {
            margin: Some(Edges::top(4.0)),
            padding: Some(Edges::top(4.0)),
            border_top: Some(rule(0.5)),
            ..Style::default()
        }),
        grand_total_label: bold(9.0).merge(&Style {
            text_align: Some(leading(direction)),
            ..Style::default()
        }),
        grand_total_value: bold(9.0).merge(&Style {
            text_align: Some(trailing(direction)),
            ..Style::default()
        }),
        free_text: section.merge(&Style {
            margin: Some(Edges {
                top: 20.0,
                bottom: 30.0,
                ..Edges::ZERO
            }),
            ..Style::default()
        }),
        free_text_container: Style {
            margin: Some(Edges::bottom(10.0)),
            width: Some(Length::Percent(100.0)),
            ..Style::default()
        },
        free_text_label: section_title.merge(&Style {
            font_size: Some(10.0),
            ..Style::default()
        }),
        free_text_body: Style {
            font_size: Some(10.0),
            color: Some(Color::BODY_GRAY),
            font_family: Some(FONT_FAMILY),
            text_align: Some(leading(direction)),
            width: Some(Length::Percent(100.0)),
            direction: Some(direction),
            line_height: Some(1.6),
            word_break: Some(WordBreak::BreakWord),
            ..Style::default()
        },
        footer: Style {
            position: Some(Position {
                bottom: 30.0,
                left: 40.0,
                right: 40.0,
            }),
            text_align: Some(TextAlign::Center),
            font_size: Some(8.0),
            padding: Some(Edges::top(10.0)),
            border_top: Some(rule(1.0)),
            ..Style::default()
        },
    }
}

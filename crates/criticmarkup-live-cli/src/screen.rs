//! Laying decorated lines out as terminal cells.

use criticmarkup_live_engine::{
    DecorationSet, Segment, StyleClass, VisualElement, Widget, segments,
};
use ratatui::style::{Color, Modifier, Style};

use crate::buffer::Buffer;

/// One terminal cell of document text or widget output.
#[derive(Debug, Clone)]
pub struct Cell {
    pub symbol: char,
    pub style: Style,
    /// Document offset the cell stands for.
    pub offset: usize,
    /// Set when the cell is drawn by a widget rather than document text.
    pub widget: Option<Widget>,
}

/// One screen line.
#[derive(Debug, Clone)]
pub struct Row {
    pub start: usize,
    /// Offset of the line end, where a click past the last cell lands.
    pub end: usize,
    pub cells: Vec<Cell>,
}

pub fn layout(buffer: &Buffer, top_line: usize, height: usize, set: &DecorationSet) -> Vec<Row> {
    let last = buffer.line_count().min(top_line + height);
    (top_line..last)
        .map(|line| {
            let span = buffer.line_span(line);
            let text = buffer.slice(span);
            let mut cells = Vec::new();

            for segment in segments(span, set) {
                match segment {
                    Segment::Text { span: run, marks } => {
                        let local = run.start - span.start..run.end - span.start;
                        let style = marks
                            .iter()
                            .flatten()
                            .fold(Style::default(), |style, class| {
                                style.patch(class_style(*class))
                            });
                        let Some(run_text) = text.get(local) else {
                            continue;
                        };
                        cells.extend(run_text.char_indices().map(|(i, ch)| Cell {
                            symbol: printable(ch),
                            style,
                            offset: run.start + i,
                            widget: None,
                        }));
                    }
                    Segment::Widget {
                        span: hidden,
                        widget,
                    } => {
                        let mut pieces = Vec::new();
                        flatten(&widget.render(), Style::default(), &mut pieces);
                        for (piece, style) in pieces {
                            cells.extend(piece.chars().map(|ch| Cell {
                                symbol: printable(ch),
                                style,
                                offset: hidden.start,
                                widget: Some(widget.clone()),
                            }));
                        }
                    }
                }
            }

            Row {
                start: span.start,
                end: span.end,
                cells,
            }
        })
        .collect()
}

/// Screen position of document offset `pos`, relative to the text area.
pub fn cursor_position(rows: &[Row], pos: usize) -> Option<(u16, u16)> {
    rows.iter().enumerate().find_map(|(y, row)| {
        if pos < row.start || pos > row.end {
            return None;
        }
        let x = row
            .cells
            .iter()
            .position(|cell| cell.widget.is_none() && cell.offset >= pos)
            .unwrap_or(row.cells.len());
        Some((u16::try_from(x).ok()?, u16::try_from(y).ok()?))
    })
}

pub fn class_style(class: StyleClass) -> Style {
    match class {
        StyleClass::Addition => Style::default().fg(Color::Green),
        StyleClass::Deletion => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::CROSSED_OUT),
        StyleClass::Comment => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::ITALIC),
        StyleClass::Highlight => Style::default().fg(Color::Black).bg(Color::Yellow),
        StyleClass::Substitution => Style::default().fg(Color::Magenta),
        StyleClass::Marker | StyleClass::DivideSubs => Style::default().fg(Color::DarkGray),
    }
}

fn flatten(element: &VisualElement, inherited: Style, out: &mut Vec<(String, Style)>) {
    let style = element
        .classes
        .iter()
        .fold(inherited, |style, class| style.patch(class_style(*class)));
    if let Some(text) = &element.text {
        out.push((text.clone(), style));
    }
    for child in &element.children {
        flatten(child, style, out);
    }
}

fn printable(ch: char) -> char {
    if ch.is_control() { ' ' } else { ch }
}

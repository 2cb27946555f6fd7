//! Flattening a decoration set into drawable runs.
//!
//! Hosts that do not have a decoration layer of their own (the terminal
//! view, the HTML preview) walk a window of the document as a sequence of
//! segments: plain text carrying the classes of every mark over it, or a
//! widget standing in for hidden text.

use crate::decoration::{Decoration, DecorationSet};
use crate::span::Span;
use crate::style::StyleClass;
use crate::widget::Widget;

#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a> {
    /// Visible document text. `marks` holds one entry per covering mark.
    Text {
        span: Span,
        marks: Vec<Option<StyleClass>>,
    },
    /// Hidden document text drawn as a widget.
    Widget { span: Span, widget: &'a Widget },
}

impl Segment<'_> {
    pub fn span(&self) -> Span {
        match self {
            Segment::Text { span, .. } | Segment::Widget { span, .. } => *span,
        }
    }
}

/// Split `window` into segments according to `set`.
///
/// Replacements that start before the window are ignored and their text is
/// shown, so a window boundary never swallows text it cannot see the start
/// of.
pub fn segments(window: Span, set: &DecorationSet) -> Vec<Segment<'_>> {
    let mut points: Vec<usize> = set
        .iter()
        .flat_map(|d| [d.span().start, d.span().end])
        .chain([window.start, window.end])
        .filter(|&p| window.start <= p && p <= window.end)
        .collect();
    points.sort_unstable();
    points.dedup();

    let mut out = Vec::new();
    let mut hidden_until = window.start;

    for pair in points.windows(2) {
        let (at, end) = (pair[0], pair[1]);
        if at < hidden_until {
            continue;
        }

        let replacement = set.iter().find_map(|d| match d {
            Decoration::Replace { span, widget, .. } if span.start == at => Some((*span, widget)),
            _ => None,
        });
        if let Some((replaced, widget)) = replacement {
            out.push(Segment::Widget {
                span: replaced,
                widget,
            });
            hidden_until = replaced.end;
            continue;
        }

        let span = Span::new(at, end);
        let marks = set
            .iter()
            .filter_map(|d| match d {
                Decoration::Mark { span: m, class, .. } if m.contains(span) => Some(*class),
                _ => None,
            })
            .collect();
        out.push(Segment::Text { span, marks });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::Compiler;
    use crate::span::{Selection, VisibleRange};
    use crate::strategy::SplitSubstitutionStrategy;
    use pretty_assertions::assert_eq;

    fn describe(doc: &str, window: Span) -> Vec<String> {
        describe_with(&Compiler::default(), doc, window)
    }

    fn describe_with(compiler: &Compiler, doc: &str, window: Span) -> Vec<String> {
        let set = compiler.compile(
            &[VisibleRange::new(0, doc.len())],
            doc,
            &Selection::empty(),
        );
        segments(window, &set)
            .iter()
            .map(|segment| match segment {
                Segment::Text { span, marks } => {
                    let classes: Vec<&str> = marks
                        .iter()
                        .map(|m| m.map_or("-", StyleClass::as_str))
                        .collect();
                    format!("{:?} {:?}", &doc[span.start..span.end], classes)
                }
                Segment::Widget { widget, .. } => format!("<{}>", widget.render().text_content()),
            })
            .collect()
    }

    #[test]
    fn addition_hides_fences() {
        let doc = "say {++hi++}!";
        assert_eq!(
            describe(doc, Span::new(0, doc.len())),
            vec![
                r#""say " []"#,
                "<>",
                r#""hi" ["criticmarkup-addition"]"#,
                "<>",
                r#""!" []"#,
            ]
        );
    }

    #[test]
    fn separator_sits_inside_marked_substitution() {
        let doc = "{~~a~>b~~}";
        assert_eq!(
            describe(doc, Span::new(0, doc.len())),
            vec![
                "<>",
                r#""a" ["criticmarkup-substitution"]"#,
                "<🠚>",
                r#""b" ["criticmarkup-substitution"]"#,
                "<>",
            ]
        );
    }

    #[test]
    fn window_cuts_through_replacement() {
        let doc = "{++hi++}";
        // Window starts inside the opening fence, so that fence is shown raw
        assert_eq!(
            describe(doc, Span::new(1, doc.len())),
            vec![r#""++" []"#, r#""hi" ["criticmarkup-addition"]"#, "<>"]
        );
    }

    #[test]
    fn multi_line_split_substitution_draws_on_its_first_line_only() {
        let doc = "{~~a\nb~>c~~}";
        let compiler = Compiler::new(Box::new(SplitSubstitutionStrategy));
        // First line: the whole substitution as one widget
        assert_eq!(
            describe_with(&compiler, doc, Span::new(0, 4)),
            vec!["<a\nb🠚c>"]
        );
        // Second line: the widget started on the line above, so the tail is raw
        assert_eq!(
            describe_with(&compiler, doc, Span::new(5, doc.len())),
            vec![r#""b~>c~~}" []"#]
        );
    }

    #[test]
    fn empty_set_is_one_text_segment() {
        let set = DecorationSet::none();
        assert_eq!(
            segments(Span::new(0, 5), &set),
            vec![Segment::Text {
                span: Span::new(0, 5),
                marks: vec![]
            }]
        );
    }
}

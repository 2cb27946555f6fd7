//! Static HTML preview of a decorated document.

use crate::decoration::DecorationSet;
use crate::segment::{Segment, segments};
use crate::span::Span;

/// Render `doc` with `set` applied, as an HTML fragment.
///
/// Marked text is wrapped in one `<span>` per covering mark, carrying the
/// mark's class and `data-contents` attribute. Replaced text is dropped in
/// favour of the widget's markup.
pub fn render_html(doc: &str, set: &DecorationSet) -> String {
    let mut html = String::with_capacity(doc.len());

    for segment in segments(Span::new(0, doc.len()), set) {
        match segment {
            Segment::Widget { widget, .. } => html.push_str(&widget.render().to_html()),
            Segment::Text { span, marks } => {
                let Some(text) = doc.get(span.start..span.end) else {
                    continue;
                };
                for class in &marks {
                    match class {
                        Some(class) => html.push_str(&format!(
                            "<span class=\"{}\" data-contents=\"string\">",
                            class.as_str()
                        )),
                        None => html.push_str("<span data-contents=\"string\">"),
                    }
                }
                html.push_str(&html_escape::encode_text(text));
                for _ in &marks {
                    html.push_str("</span>");
                }
            }
        }
    }

    html
}

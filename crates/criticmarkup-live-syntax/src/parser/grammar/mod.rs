//! # Grammar Rules
//!
//! The whole document is a flat run of text and annotations. Annotations do
//! not nest: once an opening fence is matched, everything up to its closing
//! fence is content.
//!
//! Rules are lenient and never fail. A fence without a partner, or a divider
//! outside a substitution, is simply re-tagged as `TEXT`.

mod annotation;

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse the root document.
pub fn root(p: &mut Parser<'_, '_>) {
    let m = p.start();

    while !p.at_end() {
        annotation::annotation_or_text(p);
    }

    m.complete(p, SyntaxKind::CRITICMARKUP);
}

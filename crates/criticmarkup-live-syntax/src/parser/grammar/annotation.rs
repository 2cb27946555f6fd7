//! Annotation rules.
//!
//! | Opening | Closing | Node |
//! |---------|---------|------|
//! | `{++` | `++}` | `ADDITION` |
//! | `{--` | `--}` | `DELETION` |
//! | `{>>` | `<<}` | `COMMENT` |
//! | `{==` | `==}` | `HIGHLIGHT` |
//! | `{~~` | `~~}` | `SUBSTITUTION` |
//!
//! Inside a substitution the first `~>` is wrapped in a `DIVIDE_SUBS` node.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

struct Fence {
    open: SyntaxKind,
    close: SyntaxKind,
    node: SyntaxKind,
}

const FENCES: [Fence; 5] = [
    Fence {
        open: SyntaxKind::ADDITION_OPEN,
        close: SyntaxKind::ADDITION_CLOSE,
        node: SyntaxKind::ADDITION,
    },
    Fence {
        open: SyntaxKind::DELETION_OPEN,
        close: SyntaxKind::DELETION_CLOSE,
        node: SyntaxKind::DELETION,
    },
    Fence {
        open: SyntaxKind::COMMENT_OPEN,
        close: SyntaxKind::COMMENT_CLOSE,
        node: SyntaxKind::COMMENT,
    },
    Fence {
        open: SyntaxKind::HIGHLIGHT_OPEN,
        close: SyntaxKind::HIGHLIGHT_CLOSE,
        node: SyntaxKind::HIGHLIGHT,
    },
    Fence {
        open: SyntaxKind::SUBSTITUTION_OPEN,
        close: SyntaxKind::SUBSTITUTION_CLOSE,
        node: SyntaxKind::SUBSTITUTION,
    },
];

/// Parse one annotation if the current token opens a closed one, otherwise
/// consume a single token as text.
pub(super) fn annotation_or_text(p: &mut Parser<'_, '_>) {
    let Some(fence) = FENCES.iter().find(|f| p.at(f.open)) else {
        p.bump_remap(SyntaxKind::TEXT);
        return;
    };

    match p.find_ahead(fence.close) {
        Some(close_at) => annotation(p, fence, close_at),
        None => p.bump_remap(SyntaxKind::TEXT),
    }
}

fn annotation(p: &mut Parser<'_, '_>, fence: &Fence, close_at: usize) {
    let m = p.start();
    p.bump();

    let mut divided = false;
    for _ in 1..close_at {
        if fence.node == SyntaxKind::SUBSTITUTION
            && !divided
            && p.at(SyntaxKind::SUBSTITUTION_DIVIDER)
        {
            let divider = p.start();
            p.bump();
            divider.complete(p, SyntaxKind::DIVIDE_SUBS);
            divided = true;
        } else {
            p.bump_remap(SyntaxKind::TEXT);
        }
    }

    debug_assert!(p.at(fence.close));
    p.bump();
    m.complete(p, fence.node);
}

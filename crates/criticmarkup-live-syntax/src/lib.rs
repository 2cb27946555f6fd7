//! # criticmarkup-live-syntax
//!
//! A lossless CriticMarkup syntax tree built with [Rowan] from a [Logos]
//! token stream.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//!
//! ## Pipeline
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Events → Sink → Rowan Tree
//!               (Logos)          (Grammar)        (GreenNodeBuilder)
//! ```
//!
//! The tree keeps every byte of the input. Annotation nodes cover their
//! fences as well as their content, so a node's text range is exactly the
//! raw markup an editor would reveal when the cursor enters it:
//!
//! ```text
//! CRITICMARKUP
//!   SUBSTITUTION          {~~old~>new~~}
//!     SUBSTITUTION_OPEN   {~~
//!     TEXT                old
//!     DIVIDE_SUBS         ~>
//!     TEXT                new
//!     SUBSTITUTION_CLOSE  ~~}
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use criticmarkup_live_syntax::{parse, SyntaxKind};
//!
//! let tree = parse("Say {++hello++}");
//! assert_eq!(tree.text().to_string(), "Say {++hello++}");
//!
//! let addition = tree.children().next().unwrap();
//! assert_eq!(addition.kind(), SyntaxKind::ADDITION);
//! ```

pub mod lexer;
pub mod parser;
pub mod syntax_kind;

pub use parser::parse;
pub use syntax_kind::{CriticmarkupLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Byte width of every opening and closing fence (`{++`, `~~}`, ...).
pub const FENCE_WIDTH: usize = 3;

/// The separator between old and new text in a substitution.
pub const SUBSTITUTION_DIVIDER: &str = "~>";

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn format_tree(node: &SyntaxNode, indent: usize) -> String {
        let mut result = String::new();
        let prefix = "  ".repeat(indent);

        result.push_str(&format!(
            "{}{:?}@{:?}\n",
            prefix,
            node.kind(),
            node.text_range()
        ));

        for child in node.children_with_tokens() {
            match child {
                rowan::NodeOrToken::Node(n) => {
                    result.push_str(&format_tree(&n, indent + 1));
                }
                rowan::NodeOrToken::Token(t) => {
                    result.push_str(&format!(
                        "{}  {:?}@{:?} {:?}\n",
                        prefix,
                        t.kind(),
                        t.text_range(),
                        t.text()
                    ));
                }
            }
        }

        result
    }

    #[test]
    fn snapshot_addition() {
        let tree = parse("{++added++}");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        CRITICMARKUP@0..11
          ADDITION@0..11
            ADDITION_OPEN@0..3 "{++"
            TEXT@3..8 "added"
            ADDITION_CLOSE@8..11 "++}"
        "#);
    }

    #[test]
    fn snapshot_substitution() {
        let tree = parse("{~~old~>new~~}");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        CRITICMARKUP@0..14
          SUBSTITUTION@0..14
            SUBSTITUTION_OPEN@0..3 "{~~"
            TEXT@3..6 "old"
            DIVIDE_SUBS@6..8
              SUBSTITUTION_DIVIDER@6..8 "~>"
            TEXT@8..11 "new"
            SUBSTITUTION_CLOSE@11..14 "~~}"
        "#);
    }

    #[test]
    fn snapshot_text_around_annotations() {
        let tree = parse("a {--b--} c");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        CRITICMARKUP@0..11
          TEXT@0..2 "a "
          DELETION@2..9
            DELETION_OPEN@2..5 "{--"
            TEXT@5..6 "b"
            DELETION_CLOSE@6..9 "--}"
          TEXT@9..11 " c"
        "#);
    }

    // Half-typed markup shows up constantly while editing. The tree must stay
    // valid and lossless whatever state the text is in.
    #[test]
    fn messy_input_roundtrips() {
        let inputs = [
            "",
            "{",
            "{+",
            "{++",
            "{++ unterminated",
            "++} stray close",
            "{~~no divider~~}",
            "{~~a~>~>b~~}",
            "{>>{>>twice<<}",
            "~> -> <- => {=}",
            "{++\n++}",
            "ünïcödé {==✓==}",
        ];

        for input in inputs {
            let tree = parse(input);
            assert_eq!(
                tree.text().to_string(),
                input,
                "Roundtrip failed for: {:?}",
                input
            );
        }
    }

    #[test]
    fn annotation_ranges_cover_fences() {
        let input = "x {==y==} {>>z<<}";
        let tree = parse(input);
        let ranges: Vec<_> = tree
            .children()
            .map(|n| {
                let r = n.text_range();
                &input[usize::from(r.start())..usize::from(r.end())]
            })
            .collect();
        assert_eq!(ranges, vec!["{==y==}", "{>>z<<}"]);
    }
}

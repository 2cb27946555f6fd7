//! # Lexer
//!
//! Breaks source text into tokens with [Logos]. Every byte of the input lands
//! in exactly one token, so concatenating the token texts gives back the
//! source:
//!
//! ```
//! use criticmarkup_live_syntax::lexer::lex;
//!
//! let input = "Keep {--this--} text";
//! let rebuilt: String = lex(input).iter().map(|t| t.text).collect();
//! assert_eq!(input, rebuilt);
//! ```
//!
//! The lexer only knows about fences and the substitution divider. Whether a
//! fence actually opens an annotation is decided by the parser, which looks
//! ahead for the matching closing fence.
//!
//! [Logos]: https://docs.rs/logos

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// Kept separate from [`SyntaxKind`] because Logos has to derive on it.
/// Longest match wins, so `{++` beats the single-character `Punct` rule.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    #[token("{++")]
    AdditionOpen,

    #[token("++}")]
    AdditionClose,

    #[token("{--")]
    DeletionOpen,

    #[token("--}")]
    DeletionClose,

    #[token("{>>")]
    CommentOpen,

    #[token("<<}")]
    CommentClose,

    #[token("{==")]
    HighlightOpen,

    #[token("==}")]
    HighlightClose,

    #[token("{~~")]
    SubstitutionOpen,

    #[token("~~}")]
    SubstitutionClose,

    #[token("~>")]
    SubstitutionDivider,

    /// Runs of characters that can never start a fence
    #[regex(r"[^{}+\-<>=~]+")]
    Text,

    /// A fence character that did not form a fence
    #[regex(r"[{}+\-<>=~]")]
    Punct,
}

impl TokenKind {
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::AdditionOpen => SyntaxKind::ADDITION_OPEN,
            TokenKind::AdditionClose => SyntaxKind::ADDITION_CLOSE,
            TokenKind::DeletionOpen => SyntaxKind::DELETION_OPEN,
            TokenKind::DeletionClose => SyntaxKind::DELETION_CLOSE,
            TokenKind::CommentOpen => SyntaxKind::COMMENT_OPEN,
            TokenKind::CommentClose => SyntaxKind::COMMENT_CLOSE,
            TokenKind::HighlightOpen => SyntaxKind::HIGHLIGHT_OPEN,
            TokenKind::HighlightClose => SyntaxKind::HIGHLIGHT_CLOSE,
            TokenKind::SubstitutionOpen => SyntaxKind::SUBSTITUTION_OPEN,
            TokenKind::SubstitutionClose => SyntaxKind::SUBSTITUTION_CLOSE,
            TokenKind::SubstitutionDivider => SyntaxKind::SUBSTITUTION_DIVIDER,
            TokenKind::Text | TokenKind::Punct => SyntaxKind::TEXT,
        }
    }
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        // Unrecognised input still has to be kept, it just carries no meaning
        let kind = result.map_or(SyntaxKind::TEXT, TokenKind::to_syntax_kind);
        tokens.push(Token { kind, text });
    }

    tokens
}

//! Parser events.
//!
//! The grammar never touches Rowan directly. It emits a flat event list that
//! the [`Sink`](super::sink::Sink) replays:
//!
//! ```text
//! Start(ADDITION)
//!   Token(ADDITION_OPEN)
//!   Token(TEXT)
//!   Token(ADDITION_CLOSE)
//! Finish
//! ```

use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Open a composite node.
    Start { kind: SyntaxKind },

    /// Attach the next raw token to the open node, under `kind`.
    Token { kind: SyntaxKind },

    /// Close the most recently opened node.
    Finish,

    /// Reserved by `Parser::start` and overwritten on completion.
    Placeholder,
}

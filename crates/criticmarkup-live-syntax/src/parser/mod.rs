//! # Parser
//!
//! Turns the token stream into a syntax tree in two steps. Grammar rules emit
//! a flat list of [`Event`]s (Start, Token, Finish) and the [`Sink`] replays
//! them into a Rowan green tree.
//!
//! Nodes are built with [`Marker`]s: `p.start()` reserves a slot and the
//! marker must be completed with a kind before it is dropped.
//!
//! ```
//! use criticmarkup_live_syntax::{parse, SyntaxKind};
//!
//! let tree = parse("{==look==}");
//! assert_eq!(tree.kind(), SyntaxKind::CRITICMARKUP);
//! assert_eq!(tree.children().next().unwrap().kind(), SyntaxKind::HIGHLIGHT);
//! ```

pub mod event;
pub mod sink;

mod grammar;

use std::collections::HashMap;

use crate::lexer::{Token, lex};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// Parser state: the token stream, a position and the accumulated events.
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
    events: Vec<Event>,
    /// Ascending token indices for each kind.
    positions: HashMap<SyntaxKind, Vec<usize>>,
}

impl<'t, 'input> Parser<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        let mut positions: HashMap<SyntaxKind, Vec<usize>> = HashMap::new();
        for (i, token) in tokens.iter().enumerate() {
            positions.entry(token.kind).or_default().push(i);
        }
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
            positions,
        }
    }

    /// Parse the tokens and return a syntax tree.
    pub fn parse(mut self) -> SyntaxNode {
        grammar::root(&mut self);
        Sink::new(self.tokens, self.events).finish()
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Distance to the next token of `kind` after the current one.
    pub fn find_ahead(&self, kind: SyntaxKind) -> Option<usize> {
        let found = self.positions.get(&kind)?;
        let next = found.get(found.partition_point(|&i| i <= self.pos))?;
        Some(next - self.pos)
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) {
        if !self.at_end() {
            let kind = self.current();
            self.bump_remap(kind);
        }
    }

    /// Consume the current token, recording it under a different kind.
    pub fn bump_remap(&mut self, kind: SyntaxKind) {
        if !self.at_end() {
            self.events.push(Event::Token { kind });
            self.pos += 1;
        }
    }
}

/// A node under construction.
///
/// Dropping a marker without completing it is a grammar bug and panics.
#[must_use = "Markers must be completed, dropping them is a bug"]
pub struct Marker {
    pos: usize,
    completed: bool,
}

impl Marker {
    /// Turn the reserved placeholder into a node of the given kind.
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::Start { kind };
        p.events.push(Event::Finish);
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be completed before it is dropped");
        }
    }
}

/// Parse CriticMarkup source into a syntax tree.
///
/// Never fails: input that is not valid markup ends up as plain text.
pub fn parse(source: &str) -> SyntaxNode {
    let tokens = lex(source);
    Parser::new(&tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_empty_input() {
        let tree = parse("");
        assert_eq!(tree.kind(), SyntaxKind::CRITICMARKUP);
        assert_eq!(tree.children().count(), 0);
    }

    #[test]
    fn parse_preserves_all_text() {
        let input = "plain {++text++} here";
        assert_eq!(parse(input).text(), input);
    }

    #[test]
    fn find_ahead_skips_current_token() {
        let tokens = lex("{++a++}");
        let parser = Parser::new(&tokens);
        assert_eq!(parser.find_ahead(SyntaxKind::ADDITION_CLOSE), Some(2));
        assert_eq!(parser.find_ahead(SyntaxKind::ADDITION_OPEN), None);
    }

    #[test]
    fn find_ahead_counts_from_current_position() {
        let tokens = lex("{++a++} {++b++}");
        let mut parser = Parser::new(&tokens);
        for _ in 0..4 {
            parser.bump();
        }
        assert!(parser.at(SyntaxKind::ADDITION_OPEN));
        assert_eq!(parser.find_ahead(SyntaxKind::ADDITION_CLOSE), Some(2));
        assert_eq!(parser.find_ahead(SyntaxKind::ADDITION_OPEN), None);
    }

    #[test]
    fn many_unclosed_openers_stay_text() {
        let input = "{++".repeat(2_000);
        let tree = parse(&input);
        assert_eq!(tree.text(), input.as_str());
        assert!(tree.children().next().is_none());
    }

    #[test]
    fn find_ahead_at_end_is_none() {
        let tokens = lex("");
        let parser = Parser::new(&tokens);
        assert_eq!(parser.find_ahead(SyntaxKind::TEXT), None);
    }

    #[test]
    fn marker_must_be_completed() {
        let result = std::panic::catch_unwind(|| {
            let tokens = lex("test");
            let mut parser = Parser::new(&tokens);
            let _marker = parser.start();
        });
        assert!(result.is_err());
    }
}

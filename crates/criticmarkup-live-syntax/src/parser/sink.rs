//! Sink for converting parser events into a Rowan green tree.

use rowan::GreenNodeBuilder;

use crate::lexer::Token;
use crate::parser::event::Event;
use crate::syntax_kind::SyntaxNode;

pub struct Sink<'t, 'input> {
    builder: GreenNodeBuilder<'static>,
    tokens: &'t [Token<'input>],
    cursor: usize,
    events: Vec<Event>,
}

impl<'t, 'input> Sink<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>], events: Vec<Event>) -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
            tokens,
            cursor: 0,
            events,
        }
    }

    /// Consume the sink and build the syntax tree.
    pub fn finish(mut self) -> SyntaxNode {
        for event in std::mem::take(&mut self.events) {
            match event {
                Event::Start { kind } => self.builder.start_node(kind.into()),
                Event::Token { kind } => {
                    let text = self.tokens[self.cursor].text;
                    self.cursor += 1;
                    self.builder.token(kind.into(), text);
                }
                Event::Finish => self.builder.finish_node(),
                Event::Placeholder => {}
            }
        }

        SyntaxNode::new_root(self.builder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::syntax_kind::SyntaxKind;

    #[test]
    fn sink_builds_nested_tree() {
        let tokens = lex("{++a++}");
        let events = vec![
            Event::Start {
                kind: SyntaxKind::CRITICMARKUP,
            },
            Event::Start {
                kind: SyntaxKind::ADDITION,
            },
            Event::Token {
                kind: SyntaxKind::ADDITION_OPEN,
            },
            Event::Token {
                kind: SyntaxKind::TEXT,
            },
            Event::Token {
                kind: SyntaxKind::ADDITION_CLOSE,
            },
            Event::Finish,
            Event::Finish,
        ];

        let tree = Sink::new(&tokens, events).finish();

        assert_eq!(tree.kind(), SyntaxKind::CRITICMARKUP);
        let addition = tree.children().next().unwrap();
        assert_eq!(addition.kind(), SyntaxKind::ADDITION);
        assert_eq!(addition.text().to_string(), "{++a++}");
    }

    #[test]
    fn placeholders_are_ignored() {
        let tokens = lex("x");
        let events = vec![
            Event::Start {
                kind: SyntaxKind::CRITICMARKUP,
            },
            Event::Placeholder,
            Event::Token {
                kind: SyntaxKind::TEXT,
            },
            Event::Finish,
        ];

        let tree = Sink::new(&tokens, events).finish();
        assert_eq!(tree.text().to_string(), "x");
        assert_eq!(tree.children().count(), 0);
    }
}

//! SyntaxKind enum for all tokens and nodes in the CriticMarkup CST.
//!
//! Tokens and nodes share a single enum. Every byte in the source appears as
//! a token somewhere in the tree.

/// All syntax kinds for the CriticMarkup CST.
///
/// The `repr(u16)` keeps the kind compact inside rowan's green tree.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (lexer output) ===
    /// Anything that is not a fence or divider
    TEXT,
    /// `{++`
    ADDITION_OPEN,
    /// `++}`
    ADDITION_CLOSE,
    /// `{--`
    DELETION_OPEN,
    /// `--}`
    DELETION_CLOSE,
    /// `{>>`
    COMMENT_OPEN,
    /// `<<}`
    COMMENT_CLOSE,
    /// `{==`
    HIGHLIGHT_OPEN,
    /// `==}`
    HIGHLIGHT_CLOSE,
    /// `{~~`
    SUBSTITUTION_OPEN,
    /// `~~}`
    SUBSTITUTION_CLOSE,
    /// `~>` between the old and new text of a substitution
    SUBSTITUTION_DIVIDER,
    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root document node
    CRITICMARKUP,
    /// `{++added++}`
    ADDITION,
    /// `{--removed--}`
    DELETION,
    /// `{>>remark<<}`
    COMMENT,
    /// `{==marked==}`
    HIGHLIGHT,
    /// `{~~old~>new~~}`
    SUBSTITUTION,
    /// The `~>` separator node inside a substitution
    DIVIDE_SUBS,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token (lexer output).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true for the opening or closing fence of any annotation.
    pub fn is_fence(self) -> bool {
        matches!(
            self,
            Self::ADDITION_OPEN
                | Self::ADDITION_CLOSE
                | Self::DELETION_OPEN
                | Self::DELETION_CLOSE
                | Self::COMMENT_OPEN
                | Self::COMMENT_CLOSE
                | Self::HIGHLIGHT_OPEN
                | Self::HIGHLIGHT_CLOSE
                | Self::SUBSTITUTION_OPEN
                | Self::SUBSTITUTION_CLOSE
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CriticmarkupLang {}

impl rowan::Language for CriticmarkupLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::DIVIDE_SUBS as u16);
        // SAFETY: bounds checked above and SyntaxKind is repr(u16) with no gaps
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<CriticmarkupLang>;
pub type SyntaxToken = rowan::SyntaxToken<CriticmarkupLang>;
pub type SyntaxElement = rowan::SyntaxElement<CriticmarkupLang>;

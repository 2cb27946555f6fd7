//! # criticmarkup-live-engine
//!
//! Live-preview decorations for CriticMarkup in an editable text view.
//!
//! Raw markup such as `{++added++}` is drawn as its content with a style
//! class while the fences are hidden. As soon as a cursor or selection
//! touches an annotation, that annotation is left alone so its raw syntax
//! can be edited.
//!
//! ## Pieces
//!
//! - [`overlaps`] decides whether a range is under the selection.
//! - [`Compiler`] parses the visible ranges and turns each annotation into
//!   [`Decoration`]s through an [`AnnotationRenderStrategy`].
//! - [`LivePreviewPlugin`] owns one view's [`DecorationSet`] and decides on
//!   each update whether to recompute, keep, or clear it.
//!
//! The host plugs in through [`EditorView`] (selection, visible ranges,
//! document, hit-testing) and [`HostBindings`] (display mode and cursor
//! placement). The engine never applies decorations itself; it only hands
//! the host a sorted set.
//!
//! ```
//! use criticmarkup_live_engine::{Compiler, Selection, VisibleRange};
//!
//! let doc = "{++added++}";
//! let set = Compiler::default().compile(
//!     &[VisibleRange::new(0, doc.len())],
//!     doc,
//!     &Selection::empty(),
//! );
//! assert_eq!(
//!     set.to_string(),
//!     "Replace(0..3, fence \"added\")\n\
//!      Mark(3..8, criticmarkup-addition)\n\
//!      Replace(8..11, fence \"added\")\n"
//! );
//! ```

pub mod compiler;
pub mod decoration;
pub mod document;
pub mod html;
pub mod node;
pub mod overlap;
pub mod plugin;
pub mod segment;
pub mod span;
pub mod strategy;
pub mod style;
pub mod view;
pub mod widget;

pub use compiler::Compiler;
pub use decoration::{DATA_CONTENTS, Decoration, DecorationSet};
pub use document::DocumentText;
pub use html::render_html;
pub use node::{AnnotationNode, AnnotationParser, CriticmarkupParser, NodeKind};
pub use overlap::overlaps;
pub use plugin::{LivePreviewPlugin, PluginOptions, PluginState};
pub use segment::{Segment, segments};
pub use span::{Selection, SelectionRange, Span, VisibleRange};
pub use strategy::{
    AnnotationRenderStrategy, EmitContext, FenceMarkStrategy, SplitSubstitutionStrategy,
};
pub use style::StyleClass;
pub use view::{EditorView, HostBindings, ViewUpdate};
pub use widget::{CursorSetter, SEPARATOR_GLYPH, VisualElement, Widget, WidgetEvent, WidgetKind};

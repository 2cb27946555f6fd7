//! Per-view lifecycle of the decoration set.
//!
//! ```text
//!            create
//!              │
//!              ▼
//!  ┌────────► Active ──── update, live preview off/unknown ───► Inactive
//!  │           │  ▲                                               │
//!  │           └──┘ doc / viewport / selection changed: recompile │
//!  │                                                              │
//!  └──────── update, live preview on and something changed ───────┘
//! ```
//!
//! Any other update keeps the previous set untouched.

use crate::compiler::Compiler;
use crate::decoration::DecorationSet;
use crate::node::{AnnotationParser, CriticmarkupParser};
use crate::strategy::{AnnotationRenderStrategy, FenceMarkStrategy};
use crate::view::{EditorView, HostBindings, ViewUpdate};
use crate::widget::SEPARATOR_GLYPH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginState {
    /// Source mode: no decorations.
    Inactive,
    /// Decorations reflect the last compile.
    Active,
}

/// Construction-time choices for a [`LivePreviewPlugin`].
pub struct PluginOptions {
    pub parser: Box<dyn AnnotationParser>,
    pub strategy: Box<dyn AnnotationRenderStrategy>,
    pub separator_glyph: String,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            parser: Box::new(CriticmarkupParser),
            strategy: Box::new(FenceMarkStrategy),
            separator_glyph: SEPARATOR_GLYPH.to_string(),
        }
    }
}

/// The object a host installs into one view.
pub struct LivePreviewPlugin {
    compiler: Compiler,
    bindings: HostBindings,
    decorations: DecorationSet,
    state: PluginState,
}

impl LivePreviewPlugin {
    /// Create the plugin for `view` and compile straight away.
    pub fn create(view: &dyn EditorView, bindings: HostBindings, options: PluginOptions) -> Self {
        let compiler = Compiler::new(options.strategy)
            .with_parser(options.parser)
            .with_separator_glyph(options.separator_glyph)
            .with_cursor_setter(bindings.cursor().clone());

        let mut plugin = Self {
            compiler,
            bindings,
            decorations: DecorationSet::none(),
            state: PluginState::Active,
        };
        plugin.render(view);
        plugin
    }

    pub fn update(&mut self, update: &ViewUpdate<'_>) {
        if self.bindings.live_preview() != Some(true) {
            if self.state == PluginState::Active {
                log::debug!("live preview off, clearing decorations");
            }
            self.state = PluginState::Inactive;
            self.decorations = DecorationSet::none();
            return;
        }

        if update.affects_decorations() {
            self.state = PluginState::Active;
            self.render(update.view);
        }
    }

    pub fn decorations(&self) -> &DecorationSet {
        &self.decorations
    }

    pub fn state(&self) -> PluginState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == PluginState::Active
    }

    fn render(&mut self, view: &dyn EditorView) {
        let (ranges, doc, selection) = (view.visible_ranges(), view.doc(), view.selection());
        self.decorations = self.compiler.compile(ranges, doc, selection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentText;
    use crate::span::{Selection, VisibleRange};
    use std::cell::Cell;
    use std::rc::Rc;

    struct TestView {
        doc: String,
        visible: Vec<VisibleRange>,
        selection: Selection,
    }

    impl TestView {
        fn new(doc: &str) -> Self {
            Self {
                doc: doc.to_string(),
                visible: vec![VisibleRange::new(0, doc.len())],
                selection: Selection::empty(),
            }
        }
    }

    impl EditorView for TestView {
        fn selection(&self) -> &Selection {
            &self.selection
        }

        fn visible_ranges(&self) -> &[VisibleRange] {
            &self.visible
        }

        fn doc(&self) -> &dyn DocumentText {
            &self.doc
        }

        fn pos_at_coords(&self, _x: f64, _y: f64) -> Option<usize> {
            None
        }
    }

    fn bindings(mode: &Rc<Cell<Option<bool>>>) -> HostBindings {
        let mode = Rc::clone(mode);
        HostBindings::new(move || mode.get(), |_| {})
    }

    #[test]
    fn create_compiles_immediately() {
        let view = TestView::new("{++a++}");
        let mode = Rc::new(Cell::new(Some(true)));
        let plugin = LivePreviewPlugin::create(&view, bindings(&mode), PluginOptions::default());
        assert_eq!(plugin.state(), PluginState::Active);
        assert_eq!(plugin.decorations().len(), 3);
    }

    #[test]
    fn source_mode_clears_even_without_changes() {
        let view = TestView::new("{++a++}");
        let mode = Rc::new(Cell::new(Some(true)));
        let mut plugin =
            LivePreviewPlugin::create(&view, bindings(&mode), PluginOptions::default());

        mode.set(Some(false));
        plugin.update(&ViewUpdate::new(&view));
        assert_eq!(plugin.state(), PluginState::Inactive);
        assert!(plugin.decorations().is_empty());
    }

    #[test]
    fn unreadable_mode_fails_safe_to_inactive() {
        let view = TestView::new("{++a++}");
        let mode = Rc::new(Cell::new(Some(true)));
        let mut plugin =
            LivePreviewPlugin::create(&view, bindings(&mode), PluginOptions::default());

        mode.set(None);
        plugin.update(&ViewUpdate::new(&view).doc_changed());
        assert_eq!(plugin.state(), PluginState::Inactive);
        assert!(plugin.decorations().is_empty());
    }

    #[test]
    fn unrelated_update_keeps_previous_set() {
        let mut view = TestView::new("{++a++}");
        let mode = Rc::new(Cell::new(Some(true)));
        let mut plugin =
            LivePreviewPlugin::create(&view, bindings(&mode), PluginOptions::default());
        let before = plugin.decorations().clone();

        // The selection moved into the annotation but the host did not flag it
        view.selection = Selection::cursor(2);
        plugin.update(&ViewUpdate::new(&view));
        assert_eq!(plugin.decorations(), &before);
    }

    #[test]
    fn selection_change_recompiles() {
        let mut view = TestView::new("{++a++}");
        let mode = Rc::new(Cell::new(Some(true)));
        let mut plugin =
            LivePreviewPlugin::create(&view, bindings(&mode), PluginOptions::default());

        view.selection = Selection::cursor(2);
        plugin.update(&ViewUpdate::new(&view).selection_set());
        assert!(plugin.decorations().is_empty());
        assert_eq!(plugin.state(), PluginState::Active);
    }

    #[test]
    fn returning_to_live_preview_needs_a_change_to_recompile() {
        let view = TestView::new("{++a++}");
        let mode = Rc::new(Cell::new(Some(false)));
        let mut plugin =
            LivePreviewPlugin::create(&view, bindings(&mode), PluginOptions::default());
        plugin.update(&ViewUpdate::new(&view));
        assert_eq!(plugin.state(), PluginState::Inactive);

        mode.set(Some(true));
        plugin.update(&ViewUpdate::new(&view));
        assert!(plugin.decorations().is_empty());
        assert!(!plugin.is_active());

        plugin.update(&ViewUpdate::new(&view).viewport_changed());
        assert_eq!(plugin.state(), PluginState::Active);
        assert_eq!(plugin.decorations().len(), 3);
    }
}

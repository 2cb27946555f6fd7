use std::cell::Cell;
use std::rc::Rc;

use criticmarkup_live_config::{Config, RenderStrategyKind};
use criticmarkup_live_engine::{
    AnnotationRenderStrategy, Compiler, CriticmarkupParser, DecorationSet, EditorView,
    FenceMarkStrategy, HostBindings, LivePreviewPlugin, PluginOptions, SplitSubstitutionStrategy,
    ViewUpdate, Widget, WidgetEvent,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::buffer::Buffer;
use crate::screen::{self, Row};
use crate::view::ViewState;

pub fn strategy_for(kind: RenderStrategyKind) -> Box<dyn AnnotationRenderStrategy> {
    match kind {
        RenderStrategyKind::FenceMark => Box::new(FenceMarkStrategy),
        RenderStrategyKind::SplitSubstitution => Box::new(SplitSubstitutionStrategy),
    }
}

/// A compiler set up from `config`, for one-shot rendering.
pub fn compiler_for(config: &Config) -> Compiler {
    Compiler::new(strategy_for(config.render_strategy))
        .with_separator_glyph(config.separator_glyph.clone())
}

/// What an input event asks of the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Save,
    Quit,
}

pub struct App {
    pub view: ViewState,
    plugin: LivePreviewPlugin,
    live_preview: Rc<Cell<Option<bool>>>,
    /// Cursor position requested by a widget during event dispatch.
    pending_cursor: Rc<Cell<Option<usize>>>,
    pub dirty: bool,
}

impl App {
    pub fn new(text: &str, area: Rect, config: &Config) -> Self {
        let view = ViewState::new(Buffer::new(text), area);
        let live_preview = Rc::new(Cell::new(Some(config.start_in_live_preview)));
        let pending_cursor = Rc::new(Cell::new(None));

        let bindings = {
            let live_preview = Rc::clone(&live_preview);
            let pending_cursor = Rc::clone(&pending_cursor);
            HostBindings::new(
                move || live_preview.get(),
                move |pos| pending_cursor.set(Some(pos)),
            )
        };
        let options = PluginOptions {
            parser: Box::new(CriticmarkupParser),
            strategy: strategy_for(config.render_strategy),
            separator_glyph: config.separator_glyph.clone(),
        };
        let mut plugin = LivePreviewPlugin::create(&view, bindings, options);
        // The plugin starts out active; settle it against the configured mode
        plugin.update(&ViewUpdate::new(&view));

        let mut app = Self {
            view,
            plugin,
            live_preview,
            pending_cursor,
            dirty: false,
        };
        app.relayout();
        app
    }

    pub fn decorations(&self) -> &DecorationSet {
        self.plugin.decorations()
    }

    pub fn rows(&self) -> &[Row] {
        &self.view.rows
    }

    pub fn live_preview(&self) -> bool {
        self.live_preview.get() == Some(true)
    }

    pub fn resize(&mut self, area: Rect) {
        let viewport_changed = self.view.resize(area);
        self.notify(false, viewport_changed, false);
    }

    pub fn toggle_live_preview(&mut self) {
        let on = !self.live_preview();
        log::debug!("live preview {}", if on { "on" } else { "off" });
        self.live_preview.set(Some(on));
        // Treated as a viewport change so switching back on recompiles
        self.notify(false, true, false);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            KeyCode::Esc => return Outcome::Quit,
            KeyCode::Char('q') if ctrl => return Outcome::Quit,
            KeyCode::Char('s') if ctrl => return Outcome::Save,
            KeyCode::Tab => self.toggle_live_preview(),
            KeyCode::Left => self.move_to(self.view.buffer.prev_grapheme(self.view.head()), shift),
            KeyCode::Right => self.move_to(self.view.buffer.next_grapheme(self.view.head()), shift),
            KeyCode::Up => self.move_to(self.view.cursor_line_offset(-1), shift),
            KeyCode::Down => self.move_to(self.view.cursor_line_offset(1), shift),
            KeyCode::Home => {
                let line = self.view.buffer.line_of_offset(self.view.head());
                self.move_to(self.view.buffer.line_span(line).start, shift);
            }
            KeyCode::End => {
                let line = self.view.buffer.line_of_offset(self.view.head());
                self.move_to(self.view.buffer.line_span(line).end, shift);
            }
            KeyCode::Enter => self.insert("\n"),
            KeyCode::Char(ch) if !ctrl => self.insert(ch.encode_utf8(&mut [0; 4])),
            KeyCode::Backspace => {
                if self.view.delete_backward() {
                    self.after_edit();
                }
            }
            KeyCode::Delete => {
                if self.view.delete_forward() {
                    self.after_edit();
                }
            }
            _ => {}
        }
        Outcome::Continue
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let shift = mouse.modifiers.contains(KeyModifiers::SHIFT);
        let (x, y) = (f64::from(mouse.column), f64::from(mouse.row));

        if let Some(widget) = self.widget_at(mouse.column, mouse.row) {
            let event = WidgetEvent::PointerDown { x, y, shift };
            if widget.ignore_event(&event, &self.view) {
                log::trace!("press on widget ignored");
                return;
            }
            if let Some(pos) = self.pending_cursor.take() {
                self.move_to(pos, false);
            }
            return;
        }

        if let Some(pos) = self.view.pos_at_coords(x, y) {
            self.move_to(pos, shift);
        }
    }

    fn widget_at(&self, column: u16, row: u16) -> Option<Widget> {
        let area = self.view.area();
        let row = self.rows().get(usize::from(row.checked_sub(area.y)?))?;
        let cell = row.cells.get(usize::from(column.checked_sub(area.x)?))?;
        cell.widget.clone()
    }

    fn move_to(&mut self, pos: usize, extend: bool) {
        let selection_set = self.view.set_cursor(pos, extend);
        let viewport_changed = self.view.follow_cursor();
        self.notify(false, viewport_changed, selection_set);
    }

    fn insert(&mut self, text: &str) {
        self.view.replace_selection(text);
        self.after_edit();
    }

    fn after_edit(&mut self) {
        self.dirty = true;
        let viewport_changed = self.view.follow_cursor();
        self.notify(true, viewport_changed, true);
    }

    fn notify(&mut self, doc_changed: bool, viewport_changed: bool, selection_set: bool) {
        let mut update = ViewUpdate::new(&self.view);
        update.doc_changed = doc_changed;
        update.viewport_changed = viewport_changed;
        update.selection_set = selection_set;
        self.plugin.update(&update);
        self.relayout();
    }

    fn relayout(&mut self) {
        let height = usize::from(self.view.area().height);
        self.view.rows = screen::layout(
            &self.view.buffer,
            self.view.top_line(),
            height,
            self.plugin.decorations(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn app(text: &str) -> App {
        App::new(text, Rect::new(1, 1, 40, 5), &Config::default())
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn click(column: u16, row: u16, modifiers: KeyModifiers) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers,
        }
    }

    fn shown_line(app: &App, line: usize) -> String {
        app.rows()[line]
            .cells
            .iter()
            .map(|cell| cell.symbol)
            .collect()
    }

    #[test]
    fn cursor_at_start_reveals_first_annotation() {
        let app = app("{++a++} x");
        assert_eq!(shown_line(&app, 0), "{++a++} x");
    }

    #[test]
    fn moving_away_hides_markup() {
        let mut app = app("{++a++} x");
        app.handle_key(key(KeyCode::End, KeyModifiers::NONE));
        assert_eq!(shown_line(&app, 0), "a x");
        assert_eq!(app.decorations().len(), 3);
    }

    #[test]
    fn tab_toggles_source_mode() {
        let mut app = app("x {==y==}");
        assert!(app.live_preview());
        app.handle_key(key(KeyCode::Tab, KeyModifiers::NONE));
        assert!(!app.live_preview());
        assert!(app.decorations().is_empty());
        assert_eq!(shown_line(&app, 0), "x {==y==}");

        app.handle_key(key(KeyCode::Tab, KeyModifiers::NONE));
        assert_eq!(shown_line(&app, 0), "x y");
    }

    #[test]
    fn config_can_start_in_source_mode() {
        let config = Config {
            start_in_live_preview: false,
            ..Config::default()
        };
        let app = App::new("x {==y==}", Rect::new(1, 1, 40, 5), &config);
        assert!(app.decorations().is_empty());
    }

    #[test]
    fn typing_a_closing_fence_decorates_once_cursor_leaves() {
        let mut app = app("");
        for ch in "{++new++} ".chars() {
            app.handle_key(key(KeyCode::Char(ch), KeyModifiers::NONE));
        }
        assert!(app.dirty);
        assert_eq!(app.view.buffer.text(), "{++new++} ");
        assert_eq!(shown_line(&app, 0), "new ");
    }

    #[test]
    fn shift_click_on_separator_moves_cursor() {
        let mut app = app("x {~~a~>b~~}");
        // Leave the cursor clear of the substitution
        app.handle_key(key(KeyCode::Right, KeyModifiers::NONE));
        assert_eq!(shown_line(&app, 0), "x a🠚b");

        // Glyph is the fourth cell; the text area starts at (1, 1)
        app.handle_mouse(click(4, 1, KeyModifiers::SHIFT));
        assert_eq!(app.view.head(), 6);
        assert_eq!(shown_line(&app, 0), "x {~~a~>b~~}");
    }

    #[test]
    fn plain_click_on_separator_is_ignored() {
        let mut app = app("x {~~a~>b~~}");
        app.handle_key(key(KeyCode::Right, KeyModifiers::NONE));
        app.handle_mouse(click(4, 1, KeyModifiers::NONE));
        assert_eq!(app.view.head(), 1);
    }

    #[test]
    fn click_on_text_places_cursor() {
        let mut app = app("hello\nworld");
        app.handle_mouse(click(3, 2, KeyModifiers::NONE));
        assert_eq!(app.view.head(), 8);
    }

    #[test]
    fn ctrl_s_asks_for_save() {
        let mut app = app("x");
        assert_eq!(
            app.handle_key(key(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Outcome::Save
        );
        assert_eq!(app.view.buffer.text(), "x");
    }

    #[test]
    fn escape_quits() {
        let mut app = app("");
        assert_eq!(
            app.handle_key(key(KeyCode::Esc, KeyModifiers::NONE)),
            Outcome::Quit
        );
        assert_eq!(
            app.handle_key(key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Outcome::Quit
        );
    }
}

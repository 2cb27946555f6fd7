mod app;
mod buffer;
mod screen;
mod view;

use anyhow::{Context, Result};
use criticmarkup_live_config::Config;
use criticmarkup_live_engine::{Selection, VisibleRange, render_html};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use std::{
    env,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
};

use crate::app::{App, Outcome, compiler_for};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("criticmarkup-live-cli", String::as_str);

    let (dump, path) = match args.as_slice() {
        [_, flag, path] if flag == "--dump" => (true, PathBuf::from(path)),
        [_, path] if !path.starts_with("--") => (false, PathBuf::from(path)),
        _ => {
            eprintln!("Usage: {program} [--dump] <file>");
            process::exit(1);
        }
    };

    // Anything louder than warn would be drawn over the TUI
    env_logger::Builder::new()
        .filter_level(if dump {
            log::LevelFilter::Info
        } else {
            log::LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    let config_path = Config::config_path();
    let loaded = Config::load_from_path(&config_path).with_context(|| {
        format!("Failed to load config file at {}", config_path.display())
    })?;
    let config = loaded.unwrap_or_else(|| create_default_config(&config_path));

    if dump {
        return run_dump(&path, &config);
    }

    let text = if path.exists() {
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    } else {
        log::info!("{} does not exist yet, starting empty", path.display());
        String::new()
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (width, height) = crossterm::terminal::size()?;
    let mut app = App::new(&text, text_area(Rect::new(0, 0, width, height)), &config);

    let res = run_app(&mut terminal, &mut app, &path);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// First run: write the defaults out so there is a file to edit.
fn create_default_config(config_path: &Path) -> Config {
    let config = Config::default();
    match config.save_to_path(config_path) {
        Ok(()) => {
            log::info!(
                "Created default config file at {}",
                config_path.display()
            );
        }
        Err(e) => log::warn!("Failed to create default config file: {e}"),
    }
    config
}

/// Print the decorations for the whole document, then its HTML preview.
fn run_dump(path: &Path, config: &Config) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let set = compiler_for(config).compile(
        &[VisibleRange::new(0, text.len())],
        text.as_str(),
        &Selection::empty(),
    );
    log::info!("{} decorations for {}", set.len(), path.display());

    print!("{set}");
    println!();
    println!("{}", render_html(&text, &set));
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    path: &Path,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app, path))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match app.handle_key(key) {
                Outcome::Quit => return Ok(()),
                Outcome::Save => {
                    std::fs::write(path, app.view.buffer.text())
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    app.dirty = false;
                }
                Outcome::Continue => {}
            },
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            Event::Resize(width, height) => app.resize(text_area(Rect::new(0, 0, width, height))),
            _ => {}
        }
    }
}

fn split(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);
    (chunks[0], chunks[1])
}

/// Inner area of the document panel, in terminal coordinates.
fn text_area(area: Rect) -> Rect {
    Block::bordered().inner(split(area).0)
}

fn ui(f: &mut Frame, app: &App, path: &Path) {
    let (panel, status) = split(f.area());

    let selected = app.view.selected();
    let lines: Vec<Line> = app
        .rows()
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .cells
                .iter()
                .map(|cell| {
                    let in_selection = !selected.is_cursor()
                        && cell.widget.is_none()
                        && (selected.from..selected.to).contains(&cell.offset);
                    let style = if in_selection {
                        cell.style.add_modifier(Modifier::REVERSED)
                    } else {
                        cell.style
                    };
                    Span::styled(cell.symbol.to_string(), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let mode = if app.live_preview() {
        format!("live preview, {} decorations", app.decorations().len())
    } else {
        "source".to_string()
    };
    let title = format!(
        "{}{} [{mode}]",
        path.display(),
        if app.dirty { " *" } else { "" },
    );
    let content = Paragraph::new(lines).block(Block::bordered().title(title));
    f.render_widget(content, panel);

    let help = Line::from(vec![
        Span::raw("Esc/Ctrl-Q: Quit | "),
        Span::raw("Ctrl-S: Save | "),
        Span::raw("Tab: Toggle live preview | "),
        Span::raw("Shift+arrows: Select"),
    ]);
    f.render_widget(
        Paragraph::new(help).style(Style::default().add_modifier(Modifier::DIM)),
        status,
    );

    if let Some((x, y)) = screen::cursor_position(app.rows(), app.view.head()) {
        let area = app.view.area();
        f.set_cursor_position((area.x + x, area.y + y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn first_run_writes_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("criticmarkup-live/config.toml");

        let config = create_default_config(&config_path);

        assert_eq!(config, Config::default());
        let written = Config::load_from_path(&config_path).unwrap();
        assert_eq!(written, Some(Config::default()));
    }

    #[test]
    fn unwritable_config_path_still_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let config = create_default_config(&blocker.join("config.toml"));

        assert_eq!(config, Config::default());
    }
}

//! Weekly planner CLI.
//!
//! Runs the drag-and-drop surface in the terminal: press on a palette chip,
//! drag over the grid, release on a slot.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use tracing::info;
use tracing_subscriber::EnvFilter;

use u_weekplan::config::PlannerConfig;
use u_weekplan::surface::{render, DropOutcome, HitTarget, Surface, SurfaceLayout};

#[derive(Parser)]
#[command(name = "u-weekplan")]
#[command(about = "Drag-and-drop weekly block planner for the terminal")]
struct Cli {
    /// Planner config file (JSON)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Name used in the meeting summary
    #[arg(long)]
    owner: Option<String>,

    /// Write logs to this file (the terminal is taken by the UI)
    #[arg(long, env = "U_WEEKPLAN_LOG")]
    log_file: Option<PathBuf>,

    /// Print the initial grid to stdout and exit
    #[arg(long)]
    snapshot: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_file.as_deref(), cli.snapshot)?;

    let mut config = match &cli.config {
        Some(path) => PlannerConfig::load(path)?,
        None => PlannerConfig::default(),
    };
    if let Some(owner) = cli.owner {
        config = config.with_owner(owner);
    }
    let mut surface = Surface::from_config(&config).context("invalid planner config")?;

    if cli.snapshot {
        let layout = SurfaceLayout::compute(&surface);
        for line in render(&surface, &layout) {
            println!("{line}");
        }
        return Ok(());
    }

    info!(owner = surface.owner(), blocks = surface.catalog().len(), "planner started");
    let _guard = TerminalGuard::enter().context("failed to set up terminal")?;
    run(&mut surface)
}

/// Initialize tracing. Without a log file, interactive runs stay silent.
fn init_tracing(log_file: Option<&Path>, to_stderr: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if to_stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

/// Raw mode, alternate screen and mouse capture for the lifetime of the guard.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Continue,
    Quit,
}

fn run(surface: &mut Surface) -> Result<()> {
    let mut stdout = io::stdout();
    loop {
        let layout = SurfaceLayout::compute(surface);
        draw(&mut stdout, &render(surface, &layout))?;

        let event = event::read().context("failed to read terminal event")?;
        if handle_event(surface, &layout, &event) == Control::Quit {
            return Ok(());
        }
    }
}

fn draw(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for (row, line) in lines.iter().enumerate() {
        queue!(
            out,
            MoveTo(0, row as u16),
            Print(line),
            Clear(ClearType::UntilNewLine)
        )?;
    }
    queue!(out, MoveTo(0, lines.len() as u16), Clear(ClearType::FromCursorDown))?;
    out.flush()
}

/// Maps one terminal event onto the surface, using the layout of the last frame.
fn handle_event(surface: &mut Surface, layout: &SurfaceLayout, event: &Event) -> Control {
    match event {
        Event::Key(key) => handle_key(surface, key),
        Event::Mouse(mouse) => {
            handle_mouse(surface, layout, mouse);
            Control::Continue
        }
        _ => Control::Continue,
    }
}

fn handle_key(surface: &mut Surface, key: &KeyEvent) -> Control {
    if key.kind != KeyEventKind::Press {
        return Control::Continue;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Control::Quit,
        KeyCode::Char('q') => Control::Quit,
        KeyCode::Esc if surface.is_dragging() => {
            surface.cancel_drag();
            Control::Continue
        }
        KeyCode::Esc => Control::Quit,
        KeyCode::Char('r') => {
            surface.reset();
            Control::Continue
        }
        _ => Control::Continue,
    }
}

fn handle_mouse(surface: &mut Surface, layout: &SurfaceLayout, mouse: &MouseEvent) {
    let (x, y) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match layout.hit_test(x, y) {
            Some(HitTarget::Reset) => surface.reset(),
            Some(HitTarget::Palette(id)) => {
                surface.begin_drag(id);
            }
            Some(HitTarget::Cell(_)) | None => {}
        },
        MouseEventKind::Drag(MouseButton::Left) => {
            surface.hover(layout.slot_at(x, y));
        }
        MouseEventKind::Up(MouseButton::Left) if surface.is_dragging() => {
            surface.hover(layout.slot_at(x, y));
            if let DropOutcome::Placed(slot) = surface.release() {
                info!(day = %slot.day, start = %slot.mark, "block dropped");
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use u_weekplan::models::{TimeMark, Weekday};
    use u_weekplan::surface::Slot;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn cell_pos(layout: &SurfaceLayout, day: Weekday, h: u16, m: u16) -> (u16, u16) {
        let r = layout
            .cell_rect(Slot::new(day, TimeMark::at(h, m)))
            .unwrap();
        (r.x + 1, r.y)
    }

    #[test]
    fn test_full_mouse_drag_lifecycle() {
        let mut surface = Surface::default();
        let layout = SurfaceLayout::compute(&surface);
        let (chip_x, chip_y) = (layout.palette[0].1.x, layout.palette[0].1.y);
        let (x, y) = cell_pos(&layout, Weekday::Monday, 9, 0);

        handle_event(
            &mut surface,
            &layout,
            &mouse(MouseEventKind::Down(MouseButton::Left), chip_x, chip_y),
        );
        assert!(surface.is_dragging());

        handle_event(
            &mut surface,
            &layout,
            &mouse(MouseEventKind::Drag(MouseButton::Left), x, y),
        );
        assert_eq!(
            surface.drag().unwrap().hover,
            Some(Slot::new(Weekday::Monday, TimeMark::at(9, 0)))
        );

        handle_event(
            &mut surface,
            &layout,
            &mouse(MouseEventKind::Up(MouseButton::Left), x, y),
        );
        assert!(!surface.is_dragging());
        assert!(surface.store().is_placed(1));
    }

    #[test]
    fn test_release_outside_grid_abandons() {
        let mut surface = Surface::default();
        let layout = SurfaceLayout::compute(&surface);
        let chip = layout.palette[4].1;

        handle_event(
            &mut surface,
            &layout,
            &mouse(MouseEventKind::Down(MouseButton::Left), chip.x, chip.y),
        );
        handle_event(
            &mut surface,
            &layout,
            &mouse(MouseEventKind::Up(MouseButton::Left), 0, 1),
        );
        assert!(!surface.is_dragging());
        assert!(surface.store().is_empty());
    }

    #[test]
    fn test_reset_button_and_keys() {
        let mut surface = Surface::default();
        let layout = SurfaceLayout::compute(&surface);
        let (x, y) = cell_pos(&layout, Weekday::Friday, 8, 0);
        let chip = layout.palette[0].1;
        for ev in [
            mouse(MouseEventKind::Down(MouseButton::Left), chip.x, chip.y),
            mouse(MouseEventKind::Up(MouseButton::Left), x, y),
        ] {
            handle_event(&mut surface, &layout, &ev);
        }
        assert_eq!(surface.store().len(), 1);

        let layout = SurfaceLayout::compute(&surface);
        handle_event(
            &mut surface,
            &layout,
            &mouse(MouseEventKind::Down(MouseButton::Left), 3, 0),
        );
        assert!(surface.store().is_empty());

        assert_eq!(
            handle_event(&mut surface, &layout, &key(KeyCode::Char('r'))),
            Control::Continue
        );
        assert_eq!(
            handle_event(&mut surface, &layout, &key(KeyCode::Char('q'))),
            Control::Quit
        );
    }

    #[test]
    fn test_escape_cancels_drag_before_quitting() {
        let mut surface = Surface::default();
        let layout = SurfaceLayout::compute(&surface);
        surface.begin_drag(2);
        assert_eq!(
            handle_event(&mut surface, &layout, &key(KeyCode::Esc)),
            Control::Continue
        );
        assert!(!surface.is_dragging());
        assert_eq!(
            handle_event(&mut surface, &layout, &key(KeyCode::Esc)),
            Control::Quit
        );
    }

    #[test]
    fn test_draw_writes_every_line() {
        let surface = Surface::default();
        let lines = render(&surface, &SurfaceLayout::compute(&surface));
        let mut buf = Vec::new();
        draw(&mut buf, &lines).unwrap();
        let out = String::from_utf8_lossy(&buf);
        assert!(out.contains("Reset Schedule"));
        assert!(out.contains("18:00"));
    }
}

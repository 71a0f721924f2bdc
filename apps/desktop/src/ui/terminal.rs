//! Terminal session: raw-mode event loop, or plain line I/O when piped.

use crate::app::App;
use crate::ui::input::{InputAction, LineInput};
use crate::ui::render::Renderer;
use anyhow::Context;
use crossterm::event::{self, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::tty::IsTty;
use crossterm::{cursor, execute};
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};
use tracing::debug;

/// Redraw interval while something is animating or a toast is up.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// Poll timeout when nothing on screen changes by itself.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Where the event loop gets terminal events from.
pub trait EventSource {
    /// Wait up to `timeout` for the next event.
    fn next(&mut self, timeout: Duration) -> io::Result<Option<Event>>;
}

/// Events from the real terminal.
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            event::read().map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Run until the app quits or input ends.
pub fn run(app: &mut App) -> anyhow::Result<()> {
    if io::stdin().is_tty() && io::stdout().is_tty() {
        run_interactive(app)
    } else {
        run_piped(app)
    }
}

fn run_interactive(app: &mut App) -> anyhow::Result<()> {
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = event_loop(&mut stdout, app, Renderer::new(true), &mut TerminalEvents);

    execute!(stdout, LeaveAlternateScreen, cursor::Show)?;
    terminal::disable_raw_mode()?;
    result
}

/// Tick, redraw when something changed, and feed key presses to the app.
pub fn event_loop<W: Write>(
    out: &mut W,
    app: &mut App,
    renderer: Renderer,
    events: &mut impl EventSource,
) -> anyhow::Result<()> {
    let mut input = LineInput::default();
    let mut dirty = true;

    while app.is_running() {
        dirty |= app.tick(Instant::now());
        if dirty {
            renderer.draw(out, app, input.text())?;
            dirty = false;
        }

        let timeout = if app.is_idle() { IDLE_POLL } else { FRAME_INTERVAL };
        let Some(event) = events.next(timeout)? else {
            continue;
        };
        match event {
            Event::Key(key) => match input.handle_key(key) {
                Some(InputAction::Submit(line)) => {
                    debug!(input = %line, "submitted");
                    app.handle_line(&line);
                    dirty = true;
                }
                Some(InputAction::Edited) => dirty = true,
                Some(InputAction::Quit) => app.quit(),
                None => {}
            },
            Event::Resize(..) => dirty = true,
            _ => {}
        }
    }
    Ok(())
}

/// Line-at-a-time fallback for pipes and redirected output. Animations jump
/// to their end values before each draw.
fn run_piped(app: &mut App) -> anyhow::Result<()> {
    let renderer = Renderer::new(false);
    let mut stdout = io::stdout().lock();
    draw_settled(&mut stdout, app, renderer)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read input")?;
        app.handle_line(&line);
        if !app.is_running() {
            break;
        }
        draw_settled(&mut stdout, app, renderer)?;
    }
    Ok(())
}

fn draw_settled<W: Write>(out: &mut W, app: &mut App, renderer: Renderer) -> io::Result<()> {
    app.settle();
    app.tick(Instant::now());
    renderer.draw(out, app, "")?;
    writeln!(out)
}

use super::render::{Frame, Renderer, Style};
use super::state::{Action, Control, Playback};
use crate::error::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};
use futures::StreamExt;
use std::io::{self, Stdout, Write};
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

/// Maps a key press to a playback action.
pub fn key_action(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Action::Quit);
    }
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char(' ') => Some(Action::TogglePause),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Next),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Prev),
        KeyCode::Char('r') => Some(Action::Restart),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Faster),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Slower),
        _ => None,
    }
}

/// Raw mode and the alternate screen, undone on drop.
struct TerminalGuard {
    stdout: Stdout,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self { stdout })
    }

    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::All)
        )?;
        for (row, line) in frame.iter().enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, row as u16))?;
            for span in &line.spans {
                apply_style(&mut self.stdout, span.style)?;
                queue!(self.stdout, Print(&span.text))?;
                queue!(self.stdout, SetAttribute(Attribute::Reset), ResetColor)?;
            }
        }
        self.stdout.flush()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn apply_style(out: &mut Stdout, style: Style) -> io::Result<()> {
    if let Some(color) = style.fg {
        queue!(out, SetForegroundColor(Color::AnsiValue(color)))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

/// Runs the interactive animation until the user quits.
///
/// The tick timer is re-armed with the current speed after each tick only, so
/// key presses never delay the next frame.
pub async fn run(mut playback: Playback, renderer: Renderer) -> Result<()> {
    let mut term = TerminalGuard::enter()?;
    if let Ok((width, height)) = terminal::size() {
        playback.update(Action::Resize(width, height));
    }
    info!(days = playback.days().len(), "Starting playback");

    let mut events = EventStream::new();
    let tick = sleep(playback.speed());
    tokio::pin!(tick);

    term.draw(&renderer.render(&playback))?;

    loop {
        let action = tokio::select! {
            () = &mut tick => {
                tick.as_mut().reset(Instant::now() + playback.speed());
                Action::Tick
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => match key_action(key) {
                    Some(action) => action,
                    None => continue,
                },
                Some(Ok(Event::Resize(width, height))) => Action::Resize(width, height),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
                None => Action::Quit,
            },
        };

        debug!(?action, "playback action");
        if playback.update(action) == Control::Quit {
            break;
        }
        term.draw(&renderer.render(&playback))?;
    }

    info!(day = playback.current_index() + 1, "Playback stopped");
    Ok(())
}

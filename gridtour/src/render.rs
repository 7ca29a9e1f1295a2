//! Animated terminal output using crossterm.
//!
//! Each map cell is drawn as two blank columns with a coloured background,
//! which keeps cells roughly square in most terminal fonts.

use std::error::Error;
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridtour_core::{Color, Point};
use gridtour_plan::{Frame, Terrain};

/// Maps a [`gridtour_core::Color`] to a [`crossterm::style::Color`].
fn to_ct_color(c: Color) -> CtColor {
    let (r, g, b) = (c.r(), c.g(), c.b());
    CtColor::Rgb { r, g, b }
}

/// Background colour of a terrain cell.
pub fn terrain_color(t: Terrain) -> Color {
    match t {
        Terrain::Asphalt => Color::GRAY,
        Terrain::Dirt => Color::BROWN,
        Terrain::Grass => Color::GREEN,
        Terrain::Cobblestone => Color::WHITE,
        Terrain::Building => Color::BLUE,
    }
}

/// Colour of the cell at `p` in `frame`. Remaining targets are drawn over the
/// walker, the walker over the route and the route over the terrain.
pub fn cell_color(frame: &Frame<'_>, p: Point) -> Color {
    if let Some(t) = frame.remaining.iter().find(|t| t.position() == p) {
        return t.color();
    }
    if p == frame.position {
        return Color::YELLOW;
    }
    if frame.route.contains(&p) {
        return Color::BLACK;
    }
    frame
        .map
        .terrain_at(p)
        .map_or(Color::BLACK, terrain_color)
}

/// Whether a key event asks to stop playback.
fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Draws playback frames in the terminal's alternate screen.
pub struct TerminalPresenter {
    out: Stdout,
    hold: Duration,
}

impl TerminalPresenter {
    /// Create a presenter that keeps the last frame up for `hold`, or until
    /// a key is pressed.
    pub fn new(hold: Duration) -> Self {
        Self {
            out: io::stdout(),
            hold,
        }
    }

    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let out = &mut self.out;
        for y in 0..frame.map.height() {
            queue!(out, cursor::MoveTo(0, y as u16))?;
            for x in 0..frame.map.width() {
                let c = cell_color(frame, Point::new(x, y));
                queue!(out, SetBackgroundColor(to_ct_color(c)), Print("  "))?;
            }
            queue!(out, ResetColor)?;
        }

        let mut line = frame.map.height() as u16 + 1;
        let mut status = |out: &mut Stdout, text: &str| -> io::Result<()> {
            queue!(
                out,
                cursor::MoveTo(0, line),
                terminal::Clear(ClearType::CurrentLine),
                SetForegroundColor(to_ct_color(Color::WHITE)),
                Print(text),
                ResetColor
            )?;
            line += 1;
            Ok(())
        };
        status(out, &format!("Position: {}", frame.position))?;
        status(out, frame.message.unwrap_or(""))?;
        match frame.total_cost {
            Some(cost) => status(out, &format!("Total cost: {cost}"))?,
            None => status(out, "")?,
        }
        match frame.finished {
            Some(msg) => status(out, &format!("{msg}. Press any key to leave."))?,
            None => status(out, "Press q to stop.")?,
        }
        out.flush()
    }

    /// Wait until `hold` has passed or any key is pressed.
    fn hold_last_frame(&self) -> io::Result<()> {
        let deadline = Instant::now() + self.hold;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() || !event::poll(left)? {
                return Ok(());
            }
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }
}

impl gridtour_plan::Presenter for TerminalPresenter {
    fn init(&mut self) -> Result<(), Box<dyn Error>> {
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(())
    }

    fn present(&mut self, frame: &Frame<'_>) -> Result<(), Box<dyn Error>> {
        self.draw(frame)?;
        if frame.finished.is_some() {
            self.hold_last_frame()?;
        }
        Ok(())
    }

    fn poll_quit(&mut self) -> Result<bool, Box<dyn Error>> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if is_quit_key(&key) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn close(&mut self) {
        let _ = execute!(self.out, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

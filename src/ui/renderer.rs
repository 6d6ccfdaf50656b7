//! Hero banner renderer using crossterm
//!
//! Layout is computed separately from drawing so it can be checked without a
//! terminal:
//!
//! ```text
//!              Your Name
//!
//!          > Web Developer_
//!
//!     Building things for the web
//!
//!   15 Projects   10 Technologies   500 Commits
//!
//! t theme · q quit
//! ```

use std::io::{self, Write};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use unicode_width::UnicodeWidthStr;

use crate::config::{Color, ColorScheme};

/// Rows needed to show the typed line; smaller terminals get no hero target
pub const MIN_HERO_ROWS: u16 = 8;

const PROMPT: &str = "> ";
const CARET: &str = "_";
const HINTS: &str = "t theme · q quit";

/// Everything the hero banner shows
#[derive(Debug, Clone)]
pub struct HeroView {
    pub name: String,
    /// Whether the typed line is shown; false when the engine has no target
    pub hero: bool,
    pub typed: String,
    /// Widest phrase, so the typed line keeps a fixed left edge
    pub typed_width: usize,
    pub tagline: String,
    pub stats: Vec<(String, u64)>,
    pub scheme: ColorScheme,
}

/// What a laid-out line is, for coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Name,
    Typed,
    Tagline,
    Stats,
    Hints,
}

/// One positioned line of output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub row: u16,
    pub col: u16,
    pub text: String,
    pub role: Role,
}

/// Column that centers `width` cells in `cols`
fn centered(cols: u16, width: usize) -> u16 {
    (cols as usize).saturating_sub(width) as u16 / 2
}

fn stats_text(stats: &[(String, u64)]) -> String {
    stats
        .iter()
        .map(|(label, value)| format!("{} {}", value, label))
        .collect::<Vec<_>>()
        .join("   ")
}

/// Position the banner in a `cols` x `rows` terminal
pub fn layout(view: &HeroView, cols: u16, rows: u16) -> Vec<Line> {
    let mut lines = Vec::new();

    if rows < MIN_HERO_ROWS {
        // Too small for the full banner; only the name fits
        lines.push(Line {
            row: 0,
            col: centered(cols, view.name.width()),
            text: view.name.clone(),
            role: Role::Name,
        });
        return lines;
    }

    let mid = rows / 2;
    let top = mid.saturating_sub(3);

    lines.push(Line {
        row: top,
        col: centered(cols, view.name.width()),
        text: view.name.clone(),
        role: Role::Name,
    });

    if view.hero {
        let typed_line_width = PROMPT.width() + view.typed_width + CARET.width();
        lines.push(Line {
            row: top + 2,
            col: centered(cols, typed_line_width),
            text: format!("{}{}", PROMPT, view.typed),
            role: Role::Typed,
        });
    }

    lines.push(Line {
        row: top + 4,
        col: centered(cols, view.tagline.width()),
        text: view.tagline.clone(),
        role: Role::Tagline,
    });

    if !view.stats.is_empty() {
        let stats = stats_text(&view.stats);
        lines.push(Line {
            row: top + 6,
            col: centered(cols, stats.width()),
            text: stats,
            role: Role::Stats,
        });
    }

    lines.push(Line {
        row: rows - 1,
        col: 0,
        text: HINTS.to_string(),
        role: Role::Hints,
    });

    lines
}

/// Hero banner renderer
pub struct HeroRenderer {
    /// Whether the terminal has been initialized
    initialized: bool,
}

impl Default for HeroRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeroRenderer {
    pub fn new() -> Self {
        Self { initialized: false }
    }

    /// Initialize the terminal for rendering
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All), MoveTo(0, 0))?;
        self.initialized = true;
        Ok(())
    }

    /// Restore the terminal; safe to call more than once
    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.initialized {
            return Ok(());
        }
        self.initialized = false;

        let mut stdout = io::stdout();
        let _ = execute!(stdout, ResetColor, SetAttribute(Attribute::Reset));
        let _ = execute!(stdout, Show);
        let _ = execute!(stdout, LeaveAlternateScreen);
        let _ = stdout.flush();

        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Draw a full frame
    pub fn draw(&mut self, view: &HeroView) -> io::Result<()> {
        let (cols, rows) = Self::size()?;
        let stdout = io::stdout();
        let mut out = io::BufWriter::new(stdout.lock());
        let scheme = &view.scheme;

        write!(out, "\x1b[?2026h")?; // Begin synchronized update
        queue!(
            out,
            SetBackgroundColor(scheme.background.to_crossterm()),
            Clear(ClearType::All)
        )?;

        for line in layout(view, cols, rows) {
            queue!(
                out,
                MoveTo(line.col, line.row),
                SetForegroundColor(role_color(scheme, line.role).to_crossterm())
            )?;
            if line.role == Role::Name {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            queue!(out, Print(&line.text), SetAttribute(Attribute::Reset))?;
            // Attribute reset clears colors too
            queue!(out, SetBackgroundColor(scheme.background.to_crossterm()))?;

            if line.role == Role::Typed {
                queue!(
                    out,
                    SetForegroundColor(scheme.caret.to_crossterm()),
                    Print(CARET)
                )?;
            }
        }

        queue!(out, ResetColor)?;
        write!(out, "\x1b[?2026l")?; // End synchronized update
        out.flush()
    }

    /// Get terminal size
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }
}

impl Drop for HeroRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn role_color(scheme: &ColorScheme, role: Role) -> Color {
    match role {
        Role::Name => scheme.foreground,
        Role::Typed => scheme.accent,
        Role::Tagline => scheme.muted,
        Role::Stats => scheme.stat_value,
        Role::Hints => scheme.stat_label,
    }
}

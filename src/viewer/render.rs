//! Builds a frame of styled text from the playback state.
//!
//! Frames are plain data so they can be inspected in tests; the terminal
//! module turns them into escape sequences.

use super::state::Playback;
use crate::types::ContributorRank;
use regex::Regex;

const PROGRESS_WIDTH: usize = 60;
const CONTROLS: &str =
    "Controls: [space] pause/play │ [h/l] prev/next │ [j/k] speed │ [r] restart │ [q] quit";

/// ANSI-256 foreground plus weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<u8>,
    pub bold: bool,
}

impl Style {
    const fn fg(color: u8) -> Self {
        Self {
            fg: Some(color),
            bold: false,
        }
    }

    const fn bold(color: u8) -> Self {
        Self {
            fg: Some(color),
            bold: true,
        }
    }
}

pub const PROGRESS: Style = Style::fg(36);
pub const BAR: Style = Style::fg(82);
pub const NAME: Style = Style::fg(15);
pub const HIGHLIGHT: Style = Style::fg(165);
pub const COUNT: Style = Style::fg(226);
pub const HEADER: Style = Style::bold(86);
pub const DATE: Style = Style::bold(213);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    fn push(&mut self, text: impl Into<String>, style: Style) -> &mut Self {
        self.spans.push(Span {
            text: text.into(),
            style,
        });
        self
    }

    fn plain(text: impl Into<String>) -> Self {
        let mut line = Self::default();
        line.push(text, Style::default());
        line
    }

    fn styled(text: impl Into<String>, style: Style) -> Self {
        let mut line = Self::default();
        line.push(text, style);
        line
    }

    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

pub type Frame = Vec<Line>;

/// Plain text of a frame, one line per row.
pub fn frame_text(frame: &[Line]) -> String {
    frame.iter().map(Line::text).collect::<Vec<_>>().join("\n")
}

pub struct Renderer {
    highlight: Regex,
}

impl Renderer {
    pub fn new(highlight: Regex) -> Self {
        Self { highlight }
    }

    pub fn render(&self, playback: &Playback) -> Frame {
        let Some(stats) = playback.current() else {
            return vec![Line::plain("No data to display")];
        };
        let layout = playback.layout();
        let total_days = playback.days().len();
        let index = playback.current_index();

        let mut display_count = layout.display_rows;
        if playback.top_n() > 0 {
            display_count = display_count.min(playback.top_n());
        }
        let contributors = &stats.contributors[..stats.contributors.len().min(display_count)];
        let max_commits = contributors.first().map(|c| c.cumulative_commits).unwrap_or(1);

        let mut frame = Frame::new();

        let mut title = Line::styled("Daily Contributor Rankings", HEADER);
        if !stats.origin.is_empty() {
            title.push(format!("  {}", stats.origin), PROGRESS);
        }
        frame.push(title);
        frame.push(Line::default());

        let mut date = Line::styled(format!("Date: {}", stats.date), DATE);
        if !stats.tags.is_empty() {
            date.push(format!("  [{}]", stats.tags.join(", ")), COUNT);
        }
        frame.push(date);

        let status = if playback.is_paused() {
            "Paused"
        } else if playback.is_done() {
            "Finished"
        } else {
            "Playing"
        };
        let mut status_line = Line::default();
        status_line
            .push(status, PROGRESS)
            .push(" | Speed: ", Style::default())
            .push(format!("{:.1}s", playback.speed().as_secs_f64()), PROGRESS)
            .push(format!(" | Day {}/{}", index + 1, total_days), Style::default());
        frame.push(status_line);
        frame.push(Line::default());

        frame.push(Line::styled("Top Contributors", HEADER));
        frame.push(Line::default());

        for (i, contributor) in contributors.iter().enumerate() {
            frame.push(self.contributor_line(
                i + 1,
                contributor,
                max_commits,
                layout.name_width,
                layout.bar_width,
            ));
        }

        frame.push(Line::default());
        let progress = (index + 1) as f64 / total_days as f64 * 100.0;
        frame.push(progress_line(progress));
        frame.push(Line::default());
        frame.push(Line::styled(CONTROLS, PROGRESS));

        frame
    }

    fn contributor_line(
        &self,
        position: usize,
        contributor: &ContributorRank,
        max_commits: u64,
        name_width: usize,
        bar_width: usize,
    ) -> Line {
        let name_style = if self.highlight.is_match(&contributor.login) {
            HIGHLIGHT
        } else {
            NAME
        };

        let mut line = Line::default();
        line.push(format!("{position:>2}. "), Style::default())
            .push(fit_width(&contributor.login, name_width), name_style)
            .push(" │", Style::default())
            .push(
                "█".repeat(bar_length(contributor.cumulative_commits, max_commits, bar_width)),
                BAR,
            )
            .push(" ", Style::default())
            .push(contributor.cumulative_commits.to_string(), COUNT);
        if contributor.commits_today > 0 {
            line.push(format!(" (+{} today)", contributor.commits_today), PROGRESS);
        }
        line
    }
}

/// Scaled bar length; any non-zero count gets at least one cell.
pub fn bar_length(commits: u64, max_commits: u64, bar_width: usize) -> usize {
    let mut length = if max_commits > 0 {
        (commits as f64 / max_commits as f64 * bar_width as f64) as usize
    } else {
        0
    };
    if length < 1 && commits > 0 {
        length = 1;
    }
    length
}

fn progress_line(progress: f64) -> Line {
    let filled = ((progress / 100.0 * PROGRESS_WIDTH as f64) as usize).min(PROGRESS_WIDTH);
    let mut line = Line::default();
    line.push("[", Style::default())
        .push(
            format!("{}{}", "█".repeat(filled), "░".repeat(PROGRESS_WIDTH - filled)),
            BAR,
        )
        .push(format!("] {progress:.0}%"), Style::default());
    line
}

/// Pads with spaces or truncates with an ellipsis to exactly `width` chars.
fn fit_width(name: &str, width: usize) -> String {
    let len = name.chars().count();
    if len <= width {
        format!("{name}{}", " ".repeat(width - len))
    } else if width == 0 {
        String::new()
    } else {
        let mut truncated: String = name.chars().take(width - 1).collect();
        truncated.push('…');
        truncated
    }
}

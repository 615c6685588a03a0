//! Terminal lyric renderer.
//!
//! Highlights words by progress and scrolls so the current line sits a few
//! rows from the top. Scrolling eases toward the current line using the
//! vertical spring's natural frequency, and snaps on seeks or when springs
//! are off. Easing is frozen while the view is paused.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::constants::{render::DEFAULT_FADE_WIDTH, ui::CONTEXT_LINES_ABOVE};
use crate::lyrics::{LyricLine, Word};
use crate::sync::LyricRenderer;
use crate::types::{LineSprings, SpringParams};

/// [`LyricRenderer`] drawing into a ratatui frame.
#[derive(Debug, Clone)]
pub struct TerminalLyricView {
    lines: Vec<LyricLine>,
    current_time_ms: u64,
    paused: bool,
    fade_width: f64,
    enable_blur: bool,
    enable_spring: bool,
    springs: LineSprings,
    /// Displayed scroll position in lines; eases toward `target_line`.
    scroll: f64,
    target_line: usize,
}

impl Default for TerminalLyricView {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            current_time_ms: 0,
            paused: false,
            fade_width: DEFAULT_FADE_WIDTH,
            enable_blur: true,
            enable_spring: true,
            springs: LineSprings::default(),
            scroll: 0.0,
            target_line: 0,
        }
    }
}

impl TerminalLyricView {
    /// Create an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines currently shown.
    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    /// Last time received from the sync loop or a seek.
    pub const fn current_time_ms(&self) -> u64 {
        self.current_time_ms
    }

    /// Whether the view is paused.
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current scroll position, in lines.
    pub const fn scroll(&self) -> f64 {
        self.scroll
    }

    /// Line the scroll position is heading for.
    pub const fn target_line(&self) -> usize {
        self.target_line
    }

    fn line_index_at(&self, time_ms: u64) -> usize {
        self.lines
            .iter()
            .rposition(|l| l.start_time <= time_ms && !l.is_background_vocal)
            .unwrap_or(0)
    }

    /// Draw the visible lines into `area`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let first = (self.scroll.round().max(0.0) as usize).saturating_sub(CONTEXT_LINES_ABOVE);
        let mut rows: Vec<Line> = Vec::new();

        for line in self.lines.iter().skip(first) {
            if rows.len() >= area.height as usize {
                break;
            }
            rows.extend(self.render_line(line));
        }

        f.render_widget(Paragraph::new(rows), area);
    }

    fn render_line(&self, line: &LyricLine) -> Vec<Line<'static>> {
        let now = self.current_time_ms;
        let active = line.is_active_at(now);
        let alignment = if line.is_duet { Alignment::Right } else { Alignment::Left };

        let mut base = Style::default();
        if line.is_background_vocal {
            base = base.add_modifier(Modifier::ITALIC);
        }
        if self.enable_blur && !active {
            base = base.add_modifier(Modifier::DIM);
        }

        let spans: Vec<Span> = line.words.iter().map(|w| self.render_word(w, base)).collect();
        let mut rows = vec![Line::from(spans).alignment(alignment)];

        let sub = Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC);
        for extra in [&line.translated_text, &line.romanized_text] {
            if !extra.is_empty() {
                rows.push(Line::from(Span::styled(extra.clone(), sub)).alignment(alignment));
            }
        }
        rows
    }

    fn render_word(&self, word: &Word, base: Style) -> Span<'static> {
        let text = if word.is_obscene {
            word.text.chars().map(|c| if c.is_whitespace() { c } else { '*' }).collect()
        } else {
            word.text.clone()
        };

        // Words still inside the fade window render as "in progress".
        let progress = word.progress_at(self.current_time_ms);
        let style = if progress >= 1.0 {
            base.fg(Color::White).add_modifier(Modifier::BOLD)
        } else if progress > 0.0 || self.in_fade_window(word) {
            base.fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            base.fg(Color::DarkGray)
        };
        Span::styled(text, style)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn in_fade_window(&self, word: &Word) -> bool {
        let duration = word.end_time.saturating_sub(word.start_time) as f64;
        let lead = (duration * self.fade_width.max(0.0)) as u64;
        word.start_time.saturating_sub(lead) <= self.current_time_ms && self.current_time_ms < word.start_time
    }
}

#[allow(clippy::cast_precision_loss)]
impl LyricRenderer for TerminalLyricView {
    fn set_lyric_lines(&mut self, lines: Vec<LyricLine>) {
        self.lines = lines;
        self.target_line = self.line_index_at(self.current_time_ms);
        self.scroll = self.target_line as f64;
    }

    fn set_current_time(&mut self, time_ms: u64, is_seek: bool) {
        self.current_time_ms = time_ms;
        self.target_line = self.line_index_at(time_ms);
        if is_seek || !self.enable_spring {
            self.scroll = self.target_line as f64;
        }
    }

    fn update(&mut self, elapsed_ms: f64) {
        if self.paused {
            return;
        }
        let target = self.target_line as f64;
        if !self.enable_spring {
            self.scroll = target;
            return;
        }
        let SpringParams { mass, stiffness, .. } = self.springs.pos_y;
        let omega = (stiffness / mass.max(f64::EPSILON)).sqrt();
        let factor = 1.0 - (-omega * elapsed_ms.max(0.0) / 1000.0).exp();
        self.scroll += (target - self.scroll) * factor;
        if (target - self.scroll).abs() < 0.01 {
            self.scroll = target;
        }
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn set_word_fade_width(&mut self, width: f64) {
        self.fade_width = width;
    }

    fn set_enable_blur(&mut self, enabled: bool) {
        self.enable_blur = enabled;
    }

    fn set_enable_spring(&mut self, enabled: bool) {
        self.enable_spring = enabled;
    }

    fn set_line_pos_x_spring_params(&mut self, params: SpringParams) {
        self.springs.pos_x = params;
    }

    fn set_line_pos_y_spring_params(&mut self, params: SpringParams) {
        self.springs.pos_y = params;
    }

    fn set_line_scale_spring_params(&mut self, params: SpringParams) {
        self.springs.scale = params;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::lyrics::demo::build_line;

    fn view_with_lines() -> TerminalLyricView {
        let mut view = TerminalLyricView::new();
        view.set_lyric_lines(vec![
            build_line("a,1000", 0).unwrap(),
            build_line("b,1000", 1000).unwrap(),
            build_line("c,1000", 2000).unwrap(),
        ]);
        view
    }

    #[test]
    fn seek_snaps_scroll() {
        let mut view = view_with_lines();
        view.set_current_time(2500, true);
        assert_eq!(view.target_line(), 2);
        assert!((view.scroll() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn playback_eases_scroll() {
        let mut view = view_with_lines();
        view.set_current_time(2500, false);
        assert!(view.scroll().abs() < f64::EPSILON);
        view.update(16.0);
        assert!(view.scroll() > 0.0 && view.scroll() < 2.0);
        view.update(5_000.0);
        assert!((view.scroll() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn paused_view_holds_scroll_until_resumed() {
        let mut view = view_with_lines();
        view.pause();
        view.set_current_time(2500, false);
        view.update(5_000.0);
        assert!(view.scroll().abs() < f64::EPSILON);

        view.resume();
        view.update(5_000.0);
        assert!((view.scroll() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn springs_off_snaps() {
        let mut view = view_with_lines();
        view.set_enable_spring(false);
        view.set_current_time(1500, false);
        assert!((view.scroll() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn obscene_words_are_masked() {
        let view = TerminalLyricView::new();
        let word = Word { text: "bad word".into(), is_obscene: true, ..Word::default() };
        let span = view.render_word(&word, Style::default());
        assert_eq!(span.content, "*** ****");
    }
}

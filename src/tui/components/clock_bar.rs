//! # ClockBar Component
//!
//! Fills the space above the icon grid with the time and date.
//!
//! The bar is purely presentational: the event loop formats the time and
//! passes it in, which keeps rendering deterministic under test.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │                              │
//! │            14:05             │  ← vertically centered
//! │          Sun 18 Oct          │
//! │                              │
//! └──────────────────────────────┘
//! ```

use chrono::{DateTime, TimeZone};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub struct ClockBar {
    pub time: String,
    pub date: String,
}

impl ClockBar {
    pub fn new(time: String, date: String) -> Self {
        Self { time, date }
    }

    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self::new(
            now.format("%H:%M").to_string(),
            now.format("%a %d %b").to_string(),
        )
    }
}

impl Component for ClockBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }

        let mut lines = vec![Line::from(Span::styled(
            self.time.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        // A single row only has room for the time.
        if area.height > 1 {
            lines.push(Line::from(Span::styled(
                self.date.clone(),
                Style::default().fg(Color::DarkGray),
            )));
        }

        let height = lines.len() as u16;
        let [text_area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), text_area);
    }
}

//! Panels for the terminal interface

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph};
use ratatui::Frame;

use super::{Phase, Progress};

/// Phases that make up a successful run, in order
const STEPS: &[Phase] = &[
    Phase::Fetching,
    Phase::Decoding,
    Phase::Normalizing,
    Phase::SchemaInit,
    Phase::Loading,
];

/// Current phase plus a trail of the steps already passed
pub struct StatusPanel {
    phase: Phase,
    info: String,
}

impl StatusPanel {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            info: String::new(),
        }
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub fn set_info(&mut self, info: impl Into<String>) {
        self.info = info.into();
    }

    fn indicator(&self) -> (&'static str, Style) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        match self.phase {
            Phase::Done => ("✓", bold.fg(Color::Green)),
            Phase::Failed => ("✗", bold.fg(Color::Red)),
            Phase::Idle => ("·", bold.fg(Color::DarkGray)),
            _ => ("⚙", bold.fg(Color::Cyan)),
        }
    }

    /// One span per step: passed steps dimmed, the current one highlighted
    fn trail(&self) -> Vec<Span<'static>> {
        let current = STEPS.iter().position(|s| *s == self.phase);
        let mut spans = vec![Span::raw("   ")];
        for (i, step) in STEPS.iter().enumerate() {
            let style = match current {
                Some(c) if i == c => Style::default().fg(Color::Cyan),
                Some(c) if i < c => Style::default().fg(Color::Gray),
                None if self.phase == Phase::Done => Style::default().fg(Color::Green),
                _ => Style::default().fg(Color::DarkGray),
            };
            if i > 0 {
                spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(format!("{:?}", step), style));
        }
        spans
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let (symbol, style) = self.indicator();

        let lines = vec![
            Line::from(vec![
                Span::styled(format!(" {} ", symbol), style),
                Span::styled(self.phase.to_string(), style),
            ]),
            Line::from(self.trail()),
            Line::from(vec![
                Span::raw("   "),
                Span::styled(self.info.as_str(), Style::default().fg(Color::Gray)),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" HD2 Planets to SQLite ")
            .border_style(Style::default().fg(Color::Blue));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Gauge for the table currently being loaded
pub struct ProgressPanel {
    progress: Option<Progress>,
}

impl ProgressPanel {
    pub fn new() -> Self {
        Self { progress: None }
    }

    pub fn set_progress(&mut self, progress: Progress) {
        self.progress = Some(progress);
    }

    pub fn clear(&mut self) {
        self.progress = None;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::LEFT | Borders::RIGHT)
            .border_style(Style::default().fg(Color::Blue));

        let Some(progress) = &self.progress else {
            frame.render_widget(Paragraph::new("").block(block), area);
            return;
        };

        let label = format!(
            "{}: {}/{} rows",
            progress.label, progress.current, progress.total
        );
        let gauge = Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
            .ratio(progress.ratio().min(1.0))
            .label(label);

        frame.render_widget(gauge, area);
    }
}

/// Most recent activity messages, newest at the bottom
pub struct LogPanel {
    entries: Vec<String>,
    max_entries: usize,
}

impl LogPanel {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            max_entries: 200,
        }
    }

    pub fn add(&mut self, message: impl Into<String>) {
        self.entries.push(message.into());
        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Activity ")
            .border_style(Style::default().fg(Color::Blue));

        let visible = area.height.saturating_sub(2) as usize;
        let start = self.entries.len().saturating_sub(visible);

        let items: Vec<ListItem> = self.entries[start..]
            .iter()
            .map(|entry| {
                let style = if entry.starts_with("Failed") {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Span::styled(format!(" {}", entry), style))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}

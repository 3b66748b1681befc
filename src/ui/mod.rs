pub mod quiz_scene;

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use shape_quiz::quiz::{QuizPromptState, SessionStats};

/// Smallest terminal the quiz scene fits in.
pub const MIN_COLS: u16 = 60;
pub const MIN_ROWS: u16 = 17;

/// Main UI drawing function.
pub fn draw(frame: &mut Frame, state: &QuizPromptState, stats: &SessionStats) {
    let area = frame.size();
    if area.width < MIN_COLS || area.height < MIN_ROWS {
        render_too_small(frame, area.width, area.height);
        return;
    }
    quiz_scene::render_quiz(frame, area, state, stats);
}

/// Render a "terminal too small" message.
fn render_too_small(frame: &mut Frame, cols: u16, rows: u16) {
    let area = frame.size();
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Terminal too small",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Need: {}x{}   Have: {}x{}", MIN_COLS, MIN_ROWS, cols, rows),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Please resize your terminal.",
            Style::default().fg(Color::White),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

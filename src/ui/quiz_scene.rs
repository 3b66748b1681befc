//! Shape quiz UI rendering.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use shape_quiz::quiz::{
    match_score, Choice, Dimension, Prompt, QuizPromptState, SessionStats, ShowingAnswers,
    PROMPTS_PER_TRIAL,
};

/// Render the quiz scene.
pub fn render_quiz(frame: &mut Frame, area: Rect, state: &QuizPromptState, stats: &SessionStats) {
    frame.render_widget(Clear, area);

    // Horizontal: quiz area (left) + info panel (right)
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(24)])
        .split(area);

    // Left side: prompt (top), choices, status bar (bottom 2 lines)
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Length(2),
        ])
        .split(h_chunks[0]);

    render_prompt(frame, v_chunks[0], state.prompt);
    render_choices(frame, v_chunks[1], state);
    render_status_bar(frame, v_chunks[2], state);
    render_info_panel(frame, h_chunks[1], state, stats);

    if !state.showing_answers.is_active() {
        render_result_overlay(frame, v_chunks[1], state);
    }
}

/// Eligible variants of one dimension in words, or `None` when all are.
fn eligible_words(prompt: Prompt, dimension: Dimension) -> Option<String> {
    let names: Vec<&str> = (0..3)
        .filter(|&v| prompt.is_eligible(dimension, v))
        .map(|v| dimension.variant_name(v))
        .collect();
    if names.len() == 3 {
        None
    } else {
        Some(names.join(" or "))
    }
}

fn render_prompt(frame: &mut Frame, area: Rect, prompt: Prompt) {
    let block = Block::default()
        .title(" Find every figure that is ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = Dimension::ALL
        .iter()
        .filter_map(|&d| eligible_words(prompt, d).map(|words| (d, words)))
        .map(|(d, words)| {
            Line::from(vec![
                Span::styled(format!("{:>6}: ", d.name()), Style::default().fg(Color::DarkGray)),
                Span::styled(words, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn shape_glyph(choice: Choice) -> &'static str {
    match choice.shape() {
        0 => "\u{25CF}",
        1 => "\u{25A0}",
        _ => "\u{25B2}",
    }
}

fn figure_color(choice: Choice) -> Color {
    match choice.color() {
        0 => Color::Green,
        1 => Color::Red,
        _ => Color::Blue,
    }
}

/// One pip per dimension, filled where the figure is eligible.
fn match_pips(prompt: Prompt, choice: Choice) -> String {
    Dimension::ALL
        .iter()
        .map(|&d| {
            if prompt.is_eligible(d, choice.variant(d)) {
                "\u{25C6}"
            } else {
                "\u{25C7}"
            }
        })
        .collect()
}

fn render_choices(frame: &mut Frame, area: Rect, state: &QuizPromptState) {
    let block = Block::default()
        .title(format!(" Shape Quiz ({}/{}) ", state.progress, PROMPTS_PER_TRIAL))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let revealed = !state.showing_answers.is_active();
    let mut y = inner.y;

    for (i, &choice) in state.choices.iter().enumerate() {
        if y >= inner.y + inner.height {
            break;
        }
        let selected = state.is_selected(i);
        let full_match = match_score(state.prompt, choice) == 3;

        let mut spans = vec![
            Span::styled(format!("[{}] ", i + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(
                if selected { "(x) " } else { "( ) " },
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!("{} ", shape_glyph(choice)),
                Style::default().fg(figure_color(choice)),
            ),
            Span::styled(format!("{:<22}", choice.label()), Style::default().fg(Color::White)),
        ];

        if revealed {
            let (mark, color) = match (selected, full_match) {
                (true, true) => ("\u{2713}", Color::Green),
                (true, false) => ("\u{2717}", Color::Red),
                (false, true) => ("missed", Color::Yellow),
                (false, false) => ("", Color::DarkGray),
            };
            spans.push(Span::styled(
                format!("{} ", match_pips(state.prompt, choice)),
                Style::default().fg(Color::DarkGray),
            ));
            spans.push(Span::styled(mark, Style::default().fg(color)));
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(inner.x + 1, y, inner.width.saturating_sub(2), 1),
        );
        y += 1;
    }
}

/// Render the status bar below the choices (status + controls).
fn render_status_bar(frame: &mut Frame, area: Rect, state: &QuizPromptState) {
    if area.height < 2 {
        return;
    }

    let status = match state.showing_answers {
        ShowingAnswers::PromptActive if state.answer == 0 => {
            Span::styled("Pick the matching figures", Style::default().fg(Color::Yellow))
        }
        ShowingAnswers::PromptActive => Span::styled(
            format!("{} selected", state.answer.count_ones()),
            Style::default().fg(Color::Green),
        ),
        ShowingAnswers::Correct => Span::styled("Correct!", Style::default().fg(Color::Green)),
        ShowingAnswers::Incorrect => {
            Span::styled("Not quite", Style::default().fg(Color::LightRed))
        }
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![Span::raw(" "), status])).alignment(Alignment::Left),
        Rect::new(area.x, area.y, area.width, 1),
    );

    let controls = if state.showing_answers.is_active() {
        vec![
            Span::styled(" [1-6]", Style::default().fg(Color::White)),
            Span::styled(" Select  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[Enter]", Style::default().fg(Color::White)),
            Span::styled(" Check  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[S]", Style::default().fg(Color::White)),
            Span::styled(" Skip  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[Esc]", Style::default().fg(Color::White)),
            Span::styled(" Quit", Style::default().fg(Color::DarkGray)),
        ]
    } else {
        vec![
            Span::styled(" [Enter]", Style::default().fg(Color::White)),
            Span::styled(" Next  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[Esc]", Style::default().fg(Color::White)),
            Span::styled(" Quit", Style::default().fg(Color::DarkGray)),
        ]
    };
    frame.render_widget(
        Paragraph::new(Line::from(controls)),
        Rect::new(area.x, area.y + 1, area.width, 1),
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, state: &QuizPromptState, stats: &SessionStats) {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::DarkGray));
    let value = |text: String| Span::styled(text, Style::default().fg(Color::White));

    let lines = vec![
        Line::from(vec![
            label("Trial: "),
            value(format!("{}", stats.trials_started + 1)),
        ]),
        Line::from(vec![
            label("Progress: "),
            value(format!("{}/{}", state.progress, PROMPTS_PER_TRIAL)),
        ]),
        Line::from(vec![
            label("Correct: "),
            value(format!("{}/{}", stats.prompts_correct, stats.prompts_graded)),
        ]),
        Line::from(vec![
            label("Skipped: "),
            value(format!("{}", stats.prompts_skipped)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Marks:",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" \u{25C6} ", Style::default().fg(Color::DarkGray)),
            label("fits"),
        ]),
        Line::from(vec![
            Span::styled(" \u{25C7} ", Style::default().fg(Color::DarkGray)),
            label("does not fit"),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_result_overlay(frame: &mut Frame, area: Rect, state: &QuizPromptState) {
    let (title, color) = match state.showing_answers {
        ShowingAnswers::Correct => ("Well done!", Color::Green),
        _ => ("Look again", Color::Red),
    };

    let lines = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "[Enter] Next prompt",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let height = lines.len() as u16 + 2;
    let width = 24;
    let x = area.x + area.width.saturating_sub(width);
    let y = area.y + area.height.saturating_sub(height);
    let overlay_area = Rect::new(x, y, width.min(area.width), height.min(area.height));

    frame.render_widget(Clear, overlay_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eligible_words() {
        let prompt = Prompt::from_fields(0b011, 0b111, 0b100);
        assert_eq!(
            eligible_words(prompt, Dimension::Shape),
            Some("circle or square".to_string())
        );
        assert_eq!(eligible_words(prompt, Dimension::Color), None);
        assert_eq!(eligible_words(prompt, Dimension::Size), Some("large".to_string()));
    }

    #[test]
    fn test_match_pips() {
        let prompt = Prompt::from_fields(0b011, 0b100, 0b101);
        assert_eq!(match_pips(prompt, Choice(0)), "\u{25C6}\u{25C7}\u{25C6}");
        assert_eq!(match_pips(prompt, Choice(6)), "\u{25C6}\u{25C6}\u{25C6}");
    }

    #[test]
    fn test_figure_styles() {
        assert_eq!(shape_glyph(Choice::from_variants(2, 0, 0)), "\u{25B2}");
        assert_eq!(figure_color(Choice::from_variants(0, 1, 0)), Color::Red);
    }
}

use crate::application::{App, FormStage, Notice};
use crate::domain::{
    confirmation_entries, EmploymentStatus, Step, JOB_POSITIONS, OFFICE_ADDRESS, RECRUITING_BANNER,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(4),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_body(f, app, chunks[1]);
    render_footer(f, app, chunks[2]);

    if let Some(notice) = &app.notice {
        render_notice_popup(f, notice);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(Span::styled(
        "応募フォーム",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));

    // The progress bar is hidden on the confirmation screen.
    let progress = if app.is_confirming() {
        Line::default()
    } else {
        progress_line(app.current_step())
    };

    let header = Paragraph::new(vec![title, progress]).alignment(Alignment::Center);
    f.render_widget(header, area);
}

fn progress_line(current: u8) -> Line<'static> {
    let spans: Vec<Span> = Step::ALL
        .iter()
        .map(|step| {
            let number = step.number();
            let mut style = if number <= current {
                Style::default().fg(Color::Blue)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            if number == current {
                style = style.add_modifier(Modifier::BOLD);
            }
            Span::styled(format!(" ■ Step {number} "), style)
        })
        .collect();
    Line::from(spans)
}

fn render_body(f: &mut Frame, app: &App, area: Rect) {
    let (title, lines) = match app.stage() {
        FormStage::Question(step) => (format!("Q{}", step.number()), question_lines(app, step)),
        FormStage::Confirming => ("入力内容の確認".to_string(), confirmation_lines(app)),
    };

    let visible = area.height.saturating_sub(2);
    let max_scroll = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_sub(visible);

    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll.min(max_scroll), 0));
    f.render_widget(body, area);
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn error_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {message}"),
        Style::default().fg(Color::Red),
    ))
}

fn focus_marker(focused: bool) -> &'static str {
    if focused { "> " } else { "  " }
}

fn question_lines(app: &App, step: Step) -> Vec<Line<'static>> {
    let mut lines = vec![heading(step.question()), Line::default()];

    match step {
        Step::EmploymentStatus => {
            for (index, status) in EmploymentStatus::ALL.iter().enumerate() {
                let selected = app.draft().employment_status == Some(*status);
                let style = if selected {
                    Style::default().fg(Color::White).bg(Color::Blue)
                } else {
                    Style::default()
                };
                lines.push(Line::from(vec![
                    Span::raw(focus_marker(app.cursor == index)),
                    Span::styled(
                        format!("({}) {}", if selected { "●" } else { " " }, status.label()),
                        style,
                    ),
                ]));
            }
        }
        Step::DesiredPositions => {
            lines.push(Line::from("（複数選択可）"));
            for (index, position) in JOB_POSITIONS.iter().enumerate() {
                let checked = app.draft().has_position(position.id);
                lines.push(Line::from(format!(
                    "{}[{}] {}",
                    focus_marker(app.cursor == index),
                    if checked { "x" } else { " " },
                    position.display_name
                )));
            }
        }
        Step::Age | Step::Name | Step::Contact => {
            for (index, &field) in step.fields().iter().enumerate() {
                let focused = app.cursor == index;
                let value = app.draft().text(field).unwrap_or_default();
                let style = if focused {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                };
                let caret = if focused { "_" } else { "" };
                lines.push(Line::from(vec![
                    Span::raw(focus_marker(focused)),
                    Span::styled(format!("{}: {value}{caret}", field.placeholder()), style),
                ]));
                if let Some(message) = app.errors().get(field) {
                    lines.push(error_line(message));
                }
            }
        }
    }

    for &field in step.fields().iter().filter(|field| !field.is_text()) {
        if let Some(message) = app.errors().get(field) {
            lines.push(error_line(message));
        }
    }

    if step == Step::DesiredPositions {
        lines.push(Line::default());
        lines.push(heading("募集要項"));
        lines.push(Line::from(OFFICE_ADDRESS));
        for position in JOB_POSITIONS.iter() {
            lines.push(Line::from(Span::styled(
                position.display_name,
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!("  {}", position.compensation)));
        }
    }

    lines
}

fn confirmation_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from("ご入力内容に間違いがなければ、「送信する」からエントリーしてください。"),
        Line::default(),
    ];
    for (question, answer) in confirmation_entries(app.draft()) {
        lines.push(heading(question));
        for part in answer.lines() {
            lines.push(Line::from(format!("  {part}")));
        }
    }
    if app.is_submitting() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "送信中...",
            Style::default().fg(Color::Green),
        )));
    }
    lines
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints = if app.is_submitting() {
        "送信中...".to_string()
    } else {
        match app.stage() {
            FormStage::Confirming => "Enter: 送信する | Esc: 戻る | PgUp/PgDn: スクロール | Ctrl+C: 終了".to_string(),
            FormStage::Question(step) => {
                let next = if step == Step::Contact { "確認" } else { "次へ" };
                let back = if step.previous().is_some() { " | Esc: 戻る" } else { "" };
                format!("Enter: {next}{back} | ↑↓/Tab: 移動 | Space: 選択 | Ctrl+C: 終了")
            }
        }
    };

    let footer = Paragraph::new(vec![
        Line::from(hints),
        Line::from(Span::styled(RECRUITING_BANNER, Style::default().fg(Color::Red))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

fn render_notice_popup(f: &mut Frame, notice: &Notice) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 6,
        y: area.height / 3,
        width: area.width * 2 / 3,
        height: 7,
    }
    .intersection(area);

    f.render_widget(Clear, popup_area);

    let (title, message, color) = match notice {
        Notice::Completed => (
            "送信完了",
            "フォームが正常に送信されました。ご応募ありがとうございます。".to_string(),
            Color::Green,
        ),
        Notice::SubmissionFailed(message) => ("送信エラー", message.clone(), Color::Red),
    };

    let popup = Paragraph::new(vec![
        Line::from(message),
        Line::default(),
        Line::from("Enter / Esc: 閉じる"),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().fg(color)),
    );

    f.render_widget(popup, popup_area);
}

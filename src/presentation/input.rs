use crate::application::{App, FormStage};
use crate::domain::{EmploymentStatus, Field, FieldUpdate, Step, JOB_POSITIONS};
use crossterm::event::{KeyCode, KeyModifiers};

const PAGE: i16 = 5;

pub struct InputHandler;

impl InputHandler {
    /// Returns `true` when the key asks to leave the application.
    ///
    /// Quitting is refused while a submission is in flight so the request
    /// always runs to completion and its outcome is reported.
    pub fn is_quit(app: &App, key: KeyCode, modifiers: KeyModifiers) -> bool {
        !app.is_submitting()
            && modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key, KeyCode::Char('c') | KeyCode::Char('q'))
    }

    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if app.notice.is_some() {
            if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                app.dismiss_notice();
            }
            return;
        }

        // Buttons are disabled while a request is in flight.
        if app.is_submitting() {
            return;
        }

        match key {
            KeyCode::Enter => {
                if app.is_confirming() {
                    app.submit();
                } else {
                    app.advance();
                }
                return;
            }
            KeyCode::Esc => {
                app.retreat();
                return;
            }
            KeyCode::PageUp => {
                app.scroll_by(-PAGE);
                return;
            }
            KeyCode::PageDown => {
                app.scroll_by(PAGE);
                return;
            }
            KeyCode::Tab | KeyCode::Down => {
                app.move_cursor(true);
                return;
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.move_cursor(false);
                return;
            }
            _ => {}
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return;
        }

        match app.stage() {
            FormStage::Question(Step::EmploymentStatus) => Self::handle_employment_step(app, key),
            FormStage::Question(Step::DesiredPositions) => Self::handle_positions_step(app, key),
            FormStage::Question(step) => Self::handle_text_step(app, step, key),
            FormStage::Confirming => {}
        }
    }

    fn handle_employment_step(app: &mut App, key: KeyCode) {
        let status = match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => EmploymentStatus::Yes,
            KeyCode::Char('n') | KeyCode::Char('N') => EmploymentStatus::No,
            KeyCode::Char(' ') => EmploymentStatus::ALL[app.cursor.min(1)],
            KeyCode::Left | KeyCode::Right => {
                app.move_cursor(true);
                return;
            }
            _ => return,
        };
        app.cursor = EmploymentStatus::ALL
            .iter()
            .position(|candidate| *candidate == status)
            .unwrap_or(0);
        app.update_field(FieldUpdate::EmploymentStatus(status));
    }

    fn handle_positions_step(app: &mut App, key: KeyCode) {
        if key != KeyCode::Char(' ') {
            return;
        }
        let Some(position) = JOB_POSITIONS.get(app.cursor) else {
            return;
        };
        let checked = !app.draft().has_position(position.id);
        app.update_field(FieldUpdate::Position {
            id: position.id.to_string(),
            checked,
        });
    }

    fn handle_text_step(app: &mut App, step: Step, key: KeyCode) {
        let Some(&field) = step.fields().get(app.cursor) else {
            return;
        };
        let mut value = app.draft().text(field).unwrap_or_default().to_string();

        match key {
            KeyCode::Char(c) => {
                // Age mirrors a numeric input.
                if field == Field::Age && !c.is_ascii_digit() {
                    return;
                }
                value.push(c);
            }
            KeyCode::Backspace => {
                if value.pop().is_none() {
                    return;
                }
            }
            _ => return,
        }

        if let Some(update) = FieldUpdate::text(field, value) {
            app.update_field(update);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Notice;
    use crate::infrastructure::ConsoleTransport;
    use std::sync::Arc;
    use std::time::Duration;

    fn press(app: &mut App, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_quit_keys() {
        let app = App::default();
        assert!(InputHandler::is_quit(&app, KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(InputHandler::is_quit(&app, KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(!InputHandler::is_quit(&app, KeyCode::Char('q'), KeyModifiers::NONE));
    }

    #[test]
    fn test_quit_refused_while_submitting() {
        let mut app = App::new(Arc::new(ConsoleTransport::new(Duration::from_millis(200))));
        for step in Step::ALL {
            match step {
                Step::EmploymentStatus => press(&mut app, KeyCode::Char('y')),
                Step::DesiredPositions => press(&mut app, KeyCode::Char(' ')),
                Step::Age => type_text(&mut app, "30"),
                Step::Name => {
                    type_text(&mut app, "Taro");
                    press(&mut app, KeyCode::Tab);
                    type_text(&mut app, "taro");
                }
                Step::Contact => {
                    type_text(&mut app, "0312345678");
                    press(&mut app, KeyCode::Tab);
                    type_text(&mut app, "taro@example.com");
                }
            }
            press(&mut app, KeyCode::Enter);
        }
        assert!(app.is_confirming());

        press(&mut app, KeyCode::Enter);
        assert!(app.is_submitting());
        assert!(!InputHandler::is_quit(&app, KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!InputHandler::is_quit(&app, KeyCode::Char('q'), KeyModifiers::CONTROL));

        app.wait_for_submission();
        assert!(InputHandler::is_quit(&app, KeyCode::Char('c'), KeyModifiers::CONTROL));
    }

    #[test]
    fn test_employment_selection() {
        let mut app = App::default();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.draft().employment_status, Some(EmploymentStatus::No));

        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.draft().employment_status, Some(EmploymentStatus::Yes));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_enter_advances_and_esc_goes_back() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.current_step(), 1);
        assert!(app.errors().contains(Field::EmploymentStatus));

        press(&mut app, KeyCode::Char('y'));
        assert!(app.errors().is_empty());
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.current_step(), 2);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.current_step(), 1);
    }

    #[test]
    fn test_space_toggles_focused_position() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.draft().has_position("job_3"));

        press(&mut app, KeyCode::Char(' '));
        assert!(app.draft().desired_positions.is_empty());
    }

    #[test]
    fn test_age_accepts_digits_only() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('y'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.current_step(), 3);

        type_text(&mut app, "2a9");
        assert_eq!(app.draft().age, "29");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.draft().age, "2");
    }

    #[test]
    fn test_tab_switches_text_field() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('y'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "30");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.current_step(), 4);

        type_text(&mut app, "Yamada");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "yamada");
        assert_eq!(app.draft().name, "Yamada");
        assert_eq!(app.draft().kana, "yamada");
    }

    #[test]
    fn test_notice_swallows_keys_until_dismissed() {
        let mut app = App::default();
        app.notice = Some(Notice::Completed);

        press(&mut app, KeyCode::Char('y'));
        assert!(app.draft().employment_status.is_none());
        assert!(app.notice.is_some());

        press(&mut app, KeyCode::Enter);
        assert!(app.notice.is_none());
        assert_eq!(app.current_step(), 1);
    }

    #[test]
    fn test_page_keys_scroll_body() {
        let mut app = App::default();
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.scroll, 5);
        press(&mut app, KeyCode::PageUp);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.scroll, 0);
    }
}

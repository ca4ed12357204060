use crossterm::event::{KeyCode, KeyModifiers};
use jobapply::application::{App, FormStage, Notice, SubmissionStatus};
use jobapply::domain::{ApplicationDraft, EmploymentStatus, Step, SubmissionError, SubmissionResult};
use jobapply::infrastructure::{ConsoleTransport, SubmissionTransport};
use jobapply::presentation::InputHandler;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Keeps a copy of everything it was asked to send.
#[derive(Default)]
struct RecordingTransport {
    sent: Mutex<Vec<ApplicationDraft>>,
    fail: bool,
}

impl SubmissionTransport for RecordingTransport {
    fn submit(&self, draft: &ApplicationDraft) -> SubmissionResult {
        self.sent.lock().unwrap().push(draft.clone());
        if self.fail {
            Err(SubmissionError::Transport("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

fn press(app: &mut App, key: KeyCode) {
    InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Answers every question through the keyboard, ending on the confirmation screen.
fn fill_in_form(app: &mut App) {
    press(app, KeyCode::Char('y'));
    press(app, KeyCode::Enter);

    press(app, KeyCode::Char(' '));
    press(app, KeyCode::Down);
    press(app, KeyCode::Down);
    press(app, KeyCode::Down);
    press(app, KeyCode::Char(' '));
    press(app, KeyCode::Enter);

    type_text(app, "27");
    press(app, KeyCode::Enter);

    type_text(app, "山田花子");
    press(app, KeyCode::Tab);
    type_text(app, "ヤマダハナコ");
    press(app, KeyCode::Enter);

    type_text(app, "09012345678");
    press(app, KeyCode::Tab);
    type_text(app, "hanako@example.jp");
    press(app, KeyCode::Enter);
}

#[test]
fn test_keyboard_walkthrough_submits_and_resets() {
    let transport = Arc::new(RecordingTransport::default());
    let mut app = App::new(transport.clone());

    fill_in_form(&mut app);
    assert_eq!(app.stage(), FormStage::Confirming);

    press(&mut app, KeyCode::Enter);
    assert!(app.is_submitting());
    assert_eq!(app.wait_for_submission(), Some(SubmissionStatus::Succeeded));

    let sent = transport.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let draft = &sent[0];
    assert_eq!(draft.employment_status, Some(EmploymentStatus::Yes));
    assert!(draft.has_position("job_1"));
    assert!(draft.has_position("job_4"));
    assert_eq!(draft.age, "27");
    assert_eq!(draft.kana, "ヤマダハナコ");
    assert_eq!(draft.email, "hanako@example.jp");

    assert_eq!(app.notice, Some(Notice::Completed));
    assert_eq!(app.stage(), FormStage::Question(Step::EmploymentStatus));
    assert_eq!(app.draft(), &ApplicationDraft::default());

    press(&mut app, KeyCode::Esc);
    assert!(app.notice.is_none());
}

#[test]
fn test_failed_submission_keeps_answers_for_retry() {
    let transport = Arc::new(RecordingTransport {
        fail: true,
        ..RecordingTransport::default()
    });
    let mut app = App::new(transport.clone());

    fill_in_form(&mut app);
    press(&mut app, KeyCode::Enter);
    let status = app.wait_for_submission();
    assert!(matches!(status, Some(SubmissionStatus::Failed(SubmissionError::Transport(_)))));

    assert!(app.is_confirming());
    assert!(matches!(app.notice, Some(Notice::SubmissionFailed(_))));
    assert_eq!(app.draft().phone, "09012345678");

    // Enter only dismisses the notice; the next Enter retries.
    press(&mut app, KeyCode::Enter);
    assert!(app.notice.is_none());
    assert!(!app.is_submitting());
    press(&mut app, KeyCode::Enter);
    app.wait_for_submission();
    assert_eq!(transport.sent.lock().unwrap().len(), 2);
}

#[test]
fn test_keys_ignored_while_submitting() {
    let mut app = App::new(Arc::new(ConsoleTransport::new(Duration::from_millis(200))));
    fill_in_form(&mut app);

    press(&mut app, KeyCode::Enter);
    assert!(app.is_submitting());

    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Enter);
    assert!(app.is_confirming());
    assert!(app.is_submitting());

    assert_eq!(app.wait_for_submission(), Some(SubmissionStatus::Succeeded));
    assert!(!app.is_submitting());
}

#[test]
fn test_back_from_confirmation_keeps_answers() {
    let mut app = App::new(Arc::new(RecordingTransport::default()));
    fill_in_form(&mut app);

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.stage(), FormStage::Question(Step::Contact));
    assert!(app.errors().is_empty());
    assert_eq!(app.draft().email, "hanako@example.jp");

    press(&mut app, KeyCode::Enter);
    assert!(app.is_confirming());
}

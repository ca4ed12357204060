//! Form state and the step/validation/submit state machine.
//!
//! `App` owns the draft, the navigation position and the UI-only state the
//! terminal front end needs (focus, scroll, pending notice). Every user event
//! is turned into one of the operations below; the presentation layer then
//! redraws from scratch.

use crate::domain::{
    ApplicationDraft, Field, FieldUpdate, Step, StepValidator, SubmissionError, SubmissionResult,
    ValidationErrors, JOB_POSITIONS,
};
use crate::infrastructure::{ConsoleTransport, SubmissionTransport};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::fmt;
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info};

/// Where the user currently is in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStage {
    /// Answering one of the five questions.
    Question(Step),
    /// Reviewing all answers before sending.
    Confirming,
}

/// A blocking, one-shot message the user must dismiss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The application was accepted.
    Completed,
    /// Sending failed; the answers are kept so the user can retry.
    SubmissionFailed(String),
}

/// Result of checking on an in-flight submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    /// The transport accepted the application; the form has been reset.
    Succeeded,
    /// The transport failed; the form is still on the confirmation screen.
    Failed(SubmissionError),
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use jobapply::application::{App, FormStage};
/// use jobapply::domain::Step;
///
/// let app = App::default();
/// assert_eq!(app.stage(), FormStage::Question(Step::EmploymentStatus));
/// assert_eq!(app.current_step(), 1);
/// ```
pub struct App {
    /// Answers collected so far
    draft: ApplicationDraft,
    /// Current question or the confirmation screen
    stage: FormStage,
    /// Messages from the last failed advance or submit
    errors: ValidationErrors,
    /// Destination for finished applications
    transport: Arc<dyn SubmissionTransport>,
    /// Result channel of the in-flight submission, if any
    pending: Option<Receiver<SubmissionResult>>,
    /// Focused option or input within the current step
    pub cursor: usize,
    /// Vertical scroll offset of the form body
    pub scroll: u16,
    /// Notice waiting to be dismissed
    pub notice: Option<Notice>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("draft", &self.draft)
            .field("stage", &self.stage)
            .field("errors", &self.errors)
            .field("submitting", &self.is_submitting())
            .field("cursor", &self.cursor)
            .field("scroll", &self.scroll)
            .field("notice", &self.notice)
            .finish_non_exhaustive()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Arc::new(ConsoleTransport::default()))
    }
}

impl App {
    /// Creates an empty form on the first question that submits through `transport`.
    pub fn new(transport: Arc<dyn SubmissionTransport>) -> Self {
        Self {
            draft: ApplicationDraft::default(),
            stage: FormStage::Question(Step::EmploymentStatus),
            errors: ValidationErrors::default(),
            transport,
            pending: None,
            cursor: 0,
            scroll: 0,
            notice: None,
        }
    }

    /// The answers entered so far.
    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    /// The question being answered, or the confirmation screen.
    pub fn stage(&self) -> FormStage {
        self.stage
    }

    /// Field-level messages to show next to the inputs.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// One-based step number; stays at 5 while confirming.
    pub fn current_step(&self) -> u8 {
        match self.stage {
            FormStage::Question(step) => step.number(),
            FormStage::Confirming => Step::Contact.number(),
        }
    }

    /// Whether the user is reviewing answers before sending.
    pub fn is_confirming(&self) -> bool {
        self.stage == FormStage::Confirming
    }

    /// Whether a submission is in flight. While it is, every other
    /// operation is a no-op.
    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// Validates the current step and moves forward if it is complete.
    ///
    /// Returns `true` when the stage changed.
    pub fn advance(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        let FormStage::Question(step) = self.stage else {
            return false;
        };

        self.errors = StepValidator::validate(step, &self.draft);
        if !self.errors.is_empty() {
            let invalid: Vec<&str> = self.errors.fields().map(Field::key).collect();
            debug!(step = step.number(), ?invalid, "step incomplete");
            return false;
        }

        let next = match step.next() {
            Some(next) => FormStage::Question(next),
            None => FormStage::Confirming,
        };
        self.enter(next);
        true
    }

    /// Goes back one stage without validating anything.
    pub fn retreat(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        let previous = match self.stage {
            FormStage::Confirming => FormStage::Question(Step::Contact),
            FormStage::Question(step) => match step.previous() {
                Some(previous) => FormStage::Question(previous),
                None => return false,
            },
        };
        self.errors.clear_all();
        self.enter(previous);
        true
    }

    /// Applies an edit and clears that field's error only.
    pub fn update_field(&mut self, update: FieldUpdate) {
        if self.is_submitting() {
            return;
        }
        self.errors.clear(update.field());
        self.draft.apply(update);
    }

    /// Starts sending the application from the confirmation screen.
    ///
    /// Returns `true` if a send was issued. The contact fields are checked
    /// again first; if they no longer pass, the form goes back to step 5 with
    /// the errors shown.
    pub fn submit(&mut self) -> bool {
        if self.is_submitting() || !self.is_confirming() {
            return false;
        }

        self.errors = StepValidator::validate(Step::Contact, &self.draft);
        if !self.errors.is_empty() {
            self.enter(FormStage::Question(Step::Contact));
            return false;
        }

        info!("submitting application");
        let (tx, rx) = mpsc::channel();
        let transport = Arc::clone(&self.transport);
        let draft = self.draft.clone();
        thread::spawn(move || {
            // The receiver is gone only if the app was dropped mid-flight.
            let _ = tx.send(transport.submit(&draft));
        });
        self.pending = Some(rx);
        true
    }

    /// Checks for a finished submission without blocking.
    pub fn poll_submission(&mut self) -> Option<SubmissionStatus> {
        let result = match self.pending.as_ref()?.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(SubmissionError::Interrupted),
        };
        Some(self.finish_submission(result))
    }

    /// Blocks until the in-flight submission finishes.
    pub fn wait_for_submission(&mut self) -> Option<SubmissionStatus> {
        let result = self
            .pending
            .as_ref()?
            .recv()
            .unwrap_or(Err(SubmissionError::Interrupted));
        Some(self.finish_submission(result))
    }

    fn finish_submission(&mut self, result: SubmissionResult) -> SubmissionStatus {
        self.pending = None;
        match result {
            Ok(()) => {
                info!("application submitted");
                self.reset();
                self.notice = Some(Notice::Completed);
                SubmissionStatus::Succeeded
            }
            Err(err) => {
                error!(error = %err, "failed to submit application");
                self.notice = Some(Notice::SubmissionFailed(
                    "送信中にエラーが発生しました。しばらくしてからもう一度お試しください。"
                        .to_string(),
                ));
                SubmissionStatus::Failed(err)
            }
        }
    }

    /// Clears the draft and returns to the first question.
    pub fn reset(&mut self) {
        self.draft = ApplicationDraft::default();
        self.errors.clear_all();
        self.enter(FormStage::Question(Step::EmploymentStatus));
    }

    /// Closes the completion or failure notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Moves focus within the current step, wrapping around.
    pub fn move_cursor(&mut self, forward: bool) {
        let count = self.focus_count();
        if count == 0 {
            return;
        }
        self.cursor = if forward {
            (self.cursor + 1) % count
        } else {
            (self.cursor + count - 1) % count
        };
    }

    /// Number of focusable items on the current stage.
    pub fn focus_count(&self) -> usize {
        match self.stage {
            FormStage::Question(Step::EmploymentStatus) => 2,
            FormStage::Question(Step::DesiredPositions) => JOB_POSITIONS.len(),
            FormStage::Question(step) => step.fields().len(),
            FormStage::Confirming => 0,
        }
    }

    /// Scrolls the form body; negative values scroll up, stopping at the top.
    pub fn scroll_by(&mut self, delta: i16) {
        self.scroll = self.scroll.saturating_add_signed(delta);
    }

    /// Switches stage and resets focus and scroll to the top.
    fn enter(&mut self, stage: FormStage) {
        debug!(from = ?self.stage, to = ?stage, "stage change");
        self.stage = stage;
        self.cursor = 0;
        self.scroll = 0;
    }
}

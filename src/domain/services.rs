use crate::domain::{ApplicationDraft, Field, Step, ValidationErrors};
use lazy_static::lazy_static;
use regex::Regex;

pub const MSG_CHOOSE_ONE: &str = "選択してください";
pub const MSG_CHOOSE_POSITION: &str = "1つ以上選択してください";
pub const MSG_REQUIRED: &str = "入力してください";
pub const MSG_INVALID_PHONE: &str = "電話番号は10桁または11桁の数字で入力してください";
pub const MSG_INVALID_EMAIL: &str = "正しいメールアドレスを入力してください";

lazy_static! {
    static ref PHONE_PATTERN: Regex = Regex::new(r"^[0-9]{10,11}$").unwrap();
    static ref EMAIL_PATTERN: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Checks the required fields of a single step.
///
/// Every violation on the step is reported, not just the first one.
pub struct StepValidator;

impl StepValidator {
    pub fn validate(step: Step, draft: &ApplicationDraft) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        for &field in step.fields() {
            if let Some(message) = Self::check_field(field, draft) {
                errors.insert(field, message);
            }
        }
        errors
    }

    fn check_field(field: Field, draft: &ApplicationDraft) -> Option<&'static str> {
        match field {
            Field::EmploymentStatus => draft.employment_status.is_none().then_some(MSG_CHOOSE_ONE),
            Field::DesiredPositions => draft
                .desired_positions
                .is_empty()
                .then_some(MSG_CHOOSE_POSITION),
            Field::Age => required(&draft.age),
            Field::Name => required(&draft.name),
            Field::Kana => required(&draft.kana),
            Field::Phone => required(&draft.phone)
                .or_else(|| (!Self::is_valid_phone(&draft.phone)).then_some(MSG_INVALID_PHONE)),
            Field::Email => required(&draft.email)
                .or_else(|| (!Self::is_valid_email(&draft.email)).then_some(MSG_INVALID_EMAIL)),
        }
    }

    /// 10 or 11 ASCII digits, no separators.
    pub fn is_valid_phone(value: &str) -> bool {
        PHONE_PATTERN.is_match(value.trim())
    }

    pub fn is_valid_email(value: &str) -> bool {
        EMAIL_PATTERN.is_match(value.trim())
    }
}

fn required(value: &str) -> Option<&'static str> {
    value.trim().is_empty().then_some(MSG_REQUIRED)
}

/// Question/answer pairs shown on the confirmation screen and in text summaries.
pub fn confirmation_entries(draft: &ApplicationDraft) -> Vec<(&'static str, String)> {
    let positions: Vec<&str> = draft
        .selected_positions()
        .map(|position| position.display_name)
        .collect();

    vec![
        (
            "Q1. 現在就業していますか？",
            draft
                .employment_status
                .map(|status| status.label().to_string())
                .unwrap_or_default(),
        ),
        ("Q2. ご希望の職種", positions.join(", ")),
        ("Q3. 年齢", draft.age.clone()),
        (
            "Q4. お名前とフリガナ",
            format!("{} ({})", draft.name, draft.kana),
        ),
        (
            "Q5. ご連絡先",
            format!("電話番号: {}\nメールアドレス: {}", draft.phone, draft.email),
        ),
    ]
}

/// Plain-text rendering of the whole application.
pub fn format_summary(draft: &ApplicationDraft) -> String {
    let mut summary = String::from("応募内容\n");
    for (question, answer) in confirmation_entries(draft) {
        summary.push_str(question);
        summary.push('\n');
        for line in answer.lines() {
            summary.push_str("  ");
            summary.push_str(line);
            summary.push('\n');
        }
    }
    summary
}

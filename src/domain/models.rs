use serde::{Serialize, Serializer};
use std::collections::BTreeSet;

/// A position advertised on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobPosition {
    /// Stable identifier stored in the draft
    pub id: &'static str,
    /// Name shown on the checkbox and sent to the endpoint
    pub display_name: &'static str,
    /// Salary and trial-period text from the job listing
    pub compensation: &'static str,
}

impl JobPosition {
    /// Looks up a catalog entry by its id.
    pub fn find(id: &str) -> Option<&'static JobPosition> {
        JOB_POSITIONS.iter().find(|position| position.id == id)
    }
}

/// The fixed catalog of open positions, in display order.
pub static JOB_POSITIONS: [JobPosition; 5] = [
    JobPosition {
        id: "job_1",
        display_name: "法人営業",
        compensation: "月給30万円以上＋インセンティブ（試用期間：最大6ヶ月）",
    },
    JobPosition {
        id: "job_2",
        display_name: "SNS運用",
        compensation: "月給23万円以上（試用期間：最大6ヶ月）",
    },
    JobPosition {
        id: "job_3",
        display_name: "Webディレクター",
        compensation: "年俸500万円以上（試用期間：最大6ヶ月）",
    },
    JobPosition {
        id: "job_4",
        display_name: "Webデザイナー",
        compensation: "年俸500万円以上（試用期間：最大6ヶ月）",
    },
    JobPosition {
        id: "job_5",
        display_name: "Web広告運用者",
        compensation: "年俸560万円以上（試用期間：最大6ヶ月）",
    },
];

/// Office address shown in the job listing.
pub const OFFICE_ADDRESS: &str =
    "〒106-0047 東京都港区南麻布2-8-21 SNUG MINAMI-AZABU 1階、4階、5階";

/// Footer line shown on every screen.
pub const RECRUITING_BANNER: &str = "新卒、中途、アルバイト募集中";

/// Answer to "are you currently employed?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmploymentStatus {
    Yes,
    No,
}

impl EmploymentStatus {
    /// Both answers, in the order they are offered.
    pub const ALL: [EmploymentStatus; 2] = [EmploymentStatus::Yes, EmploymentStatus::No];

    /// Text shown to the applicant.
    pub fn label(self) -> &'static str {
        match self {
            EmploymentStatus::Yes => "はい",
            EmploymentStatus::No => "いいえ",
        }
    }
}

/// One user-editable field of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    EmploymentStatus,
    DesiredPositions,
    Age,
    Name,
    Kana,
    Phone,
    Email,
}

impl Field {
    /// The key used for this field in the submitted JSON.
    pub fn key(self) -> &'static str {
        match self {
            Field::EmploymentStatus => "employmentStatus",
            Field::DesiredPositions => "desiredPositions",
            Field::Age => "age",
            Field::Name => "name",
            Field::Kana => "kana",
            Field::Phone => "phone",
            Field::Email => "email",
        }
    }

    /// Label shown next to a text input.
    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Age => "年齢",
            Field::Name => "氏名",
            Field::Kana => "フリガナ",
            Field::Phone => "電話番号",
            Field::Email => "メールアドレス",
            Field::EmploymentStatus | Field::DesiredPositions => "",
        }
    }

    /// Whether the field is edited by typing rather than choosing.
    pub fn is_text(self) -> bool {
        !matches!(self, Field::EmploymentStatus | Field::DesiredPositions)
    }
}

/// The five questions, in the order they are asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    EmploymentStatus,
    DesiredPositions,
    Age,
    Name,
    Contact,
}

impl Step {
    /// Every step, first to last.
    pub const ALL: [Step; 5] = [
        Step::EmploymentStatus,
        Step::DesiredPositions,
        Step::Age,
        Step::Name,
        Step::Contact,
    ];

    /// One-based position of the step, as shown to the user.
    pub fn number(self) -> u8 {
        match self {
            Step::EmploymentStatus => 1,
            Step::DesiredPositions => 2,
            Step::Age => 3,
            Step::Name => 4,
            Step::Contact => 5,
        }
    }

    /// Inverse of [`Step::number`]; `None` outside 1..=5.
    pub fn from_number(number: u8) -> Option<Step> {
        Step::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    /// The following question, or `None` after the last one.
    pub fn next(self) -> Option<Step> {
        Step::from_number(self.number() + 1)
    }

    /// The preceding question, or `None` on the first one.
    pub fn previous(self) -> Option<Step> {
        Step::from_number(self.number() - 1)
    }

    /// Fields required before leaving this step.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Step::EmploymentStatus => &[Field::EmploymentStatus],
            Step::DesiredPositions => &[Field::DesiredPositions],
            Step::Age => &[Field::Age],
            Step::Name => &[Field::Name, Field::Kana],
            Step::Contact => &[Field::Phone, Field::Email],
        }
    }

    /// The question text shown at the top of the step.
    pub fn question(self) -> &'static str {
        match self {
            Step::EmploymentStatus => "現在就業していますか？",
            Step::DesiredPositions => "ご希望の職種をお選びください",
            Step::Age => "年齢を入力してください",
            Step::Name => "お名前とフリガナを教えてください",
            Step::Contact => "ご連絡先を教えてください",
        }
    }
}

/// A single edit reported by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    /// Pick an employment answer
    EmploymentStatus(EmploymentStatus),
    /// Check or uncheck one catalog position by id
    Position { id: String, checked: bool },
    /// Replace a text field's whole value
    Age(String),
    Name(String),
    Kana(String),
    Phone(String),
    Email(String),
}

impl FieldUpdate {
    /// Builds a replacement for a text field. Returns `None` for choice fields.
    pub fn text(field: Field, value: impl Into<String>) -> Option<FieldUpdate> {
        let value = value.into();
        match field {
            Field::Age => Some(FieldUpdate::Age(value)),
            Field::Name => Some(FieldUpdate::Name(value)),
            Field::Kana => Some(FieldUpdate::Kana(value)),
            Field::Phone => Some(FieldUpdate::Phone(value)),
            Field::Email => Some(FieldUpdate::Email(value)),
            Field::EmploymentStatus | Field::DesiredPositions => None,
        }
    }

    /// The field this edit touches.
    pub fn field(&self) -> Field {
        match self {
            FieldUpdate::EmploymentStatus(_) => Field::EmploymentStatus,
            FieldUpdate::Position { .. } => Field::DesiredPositions,
            FieldUpdate::Age(_) => Field::Age,
            FieldUpdate::Name(_) => Field::Name,
            FieldUpdate::Kana(_) => Field::Kana,
            FieldUpdate::Phone(_) => Field::Phone,
            FieldUpdate::Email(_) => Field::Email,
        }
    }
}

/// The in-progress application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDraft {
    /// `None` until the first question is answered
    pub employment_status: Option<EmploymentStatus>,
    /// Catalog ids; serialized as display names in catalog order
    #[serde(serialize_with = "serialize_positions")]
    pub desired_positions: BTreeSet<String>,
    /// Digits as typed, not range-checked
    pub age: String,
    pub name: String,
    pub kana: String,
    pub phone: String,
    pub email: String,
}

impl ApplicationDraft {
    /// Applies an edit. Position ids outside the catalog are ignored.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::EmploymentStatus(status) => self.employment_status = Some(status),
            FieldUpdate::Position { id, checked } => {
                if JobPosition::find(&id).is_none() {
                    return;
                }
                if checked {
                    self.desired_positions.insert(id);
                } else {
                    self.desired_positions.remove(&id);
                }
            }
            FieldUpdate::Age(value) => self.age = value,
            FieldUpdate::Name(value) => self.name = value,
            FieldUpdate::Kana(value) => self.kana = value,
            FieldUpdate::Phone(value) => self.phone = value,
            FieldUpdate::Email(value) => self.email = value,
        }
    }

    /// Current value of a text field; `None` for choice fields.
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Age => Some(&self.age),
            Field::Name => Some(&self.name),
            Field::Kana => Some(&self.kana),
            Field::Phone => Some(&self.phone),
            Field::Email => Some(&self.email),
            Field::EmploymentStatus | Field::DesiredPositions => None,
        }
    }

    /// Whether the position with this id is selected.
    pub fn has_position(&self, id: &str) -> bool {
        self.desired_positions.contains(id)
    }

    /// Selected positions in catalog order.
    pub fn selected_positions(&self) -> impl Iterator<Item = &'static JobPosition> + '_ {
        JOB_POSITIONS
            .iter()
            .filter(|position| self.desired_positions.contains(position.id))
    }
}

fn serialize_positions<S>(positions: &BTreeSet<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let names: Vec<&str> = JOB_POSITIONS
        .iter()
        .filter(|position| positions.contains(position.id))
        .map(|position| position.display_name)
        .collect();
    names.serialize(serializer)
}

//! 입력 폼 값의 범위 검증. 통과한 값만 `CalculatorInput`으로 만들어 계산기에 넘긴다.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format;
use crate::i18n::{keys, Translator};
use crate::roi::{CalculatorInput, WallboxPreset, DEFAULT_YEARS_TO_PROJECT};

/// 닫힌 구간 [min, max].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const KM_PER_YEAR: Bounds = Bounds::new(1_000.0, 100_000.0);
pub const ELECTRICITY_COST: Bounds = Bounds::new(0.10, 1.00);
pub const DEVICE_COST: Bounds = Bounds::new(500.0, 5_000.0);
pub const INSTALLATION_COST: Bounds = Bounds::new(500.0, 5_000.0);
pub const YEARS_TO_PROJECT: Bounds = Bounds::new(1.0, 50.0);

/// 검증 대상 입력 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    KmPerYear,
    ElectricityCost,
    DeviceCost,
    InstallationCost,
    YearsToProject,
}

impl Field {
    pub fn bounds(self) -> Bounds {
        match self {
            Field::KmPerYear => KM_PER_YEAR,
            Field::ElectricityCost => ELECTRICITY_COST,
            Field::DeviceCost => DEVICE_COST,
            Field::InstallationCost => INSTALLATION_COST,
            Field::YearsToProject => YEARS_TO_PROJECT,
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Field::KmPerYear => keys::LABEL_KM_PER_YEAR,
            Field::ElectricityCost => keys::LABEL_ELECTRICITY_COST,
            Field::DeviceCost => keys::LABEL_DEVICE_COST,
            Field::InstallationCost => keys::LABEL_INSTALLATION_COST,
            Field::YearsToProject => keys::LABEL_YEARS,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Field::KmPerYear => "km per year",
            Field::ElectricityCost => "electricity cost",
            Field::DeviceCost => "device cost",
            Field::InstallationCost => "installation cost",
            Field::YearsToProject => "years to project",
        }
    }
}

/// 어느 한계를 벗어났는지.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    BelowMin,
    AboveMax,
    NotANumber,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldViolation {
    pub field: Field,
    pub value: f64,
    pub violation: Violation,
}

impl FieldViolation {
    /// 화면에 표시할 번역 문구.
    pub fn message(&self, tr: &Translator) -> String {
        let bounds = self.field.bounds();
        let field = tr.t(self.field.label_key());
        let lang = tr.language();
        match self.violation {
            Violation::BelowMin => tr.tf(
                keys::VALIDATION_MIN,
                &[("field", field), ("bound", format::format_number(bounds.min, lang))],
            ),
            Violation::AboveMax => tr.tf(
                keys::VALIDATION_MAX,
                &[("field", field), ("bound", format::format_number(bounds.max, lang))],
            ),
            Violation::NotANumber => tr.tf(keys::VALIDATION_NOT_A_NUMBER, &[("field", field)]),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bounds = self.field.bounds();
        match self.violation {
            Violation::BelowMin => write!(
                f,
                "{} {} is below the minimum {}",
                self.field.name(),
                self.value,
                bounds.min
            ),
            Violation::AboveMax => write!(
                f,
                "{} {} is above the maximum {}",
                self.field.name(),
                self.value,
                bounds.max
            ),
            Violation::NotANumber => write!(f, "{} is not a finite number", self.field.name()),
        }
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// 입력 검증 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// 하나 이상의 항목이 범위를 벗어남
    #[error("invalid input: {}", join_violations(.0))]
    Invalid(Vec<FieldViolation>),
    /// 이메일 형식 오류
    #[error("invalid e-mail address: {0:?}")]
    InvalidEmail(String),
}

impl InputError {
    /// 화면 표시용 문구 목록.
    pub fn messages(&self, tr: &Translator) -> Vec<String> {
        match self {
            InputError::Invalid(violations) => violations.iter().map(|v| v.message(tr)).collect(),
            InputError::InvalidEmail(_) => vec![tr.t(keys::VALIDATION_EMAIL)],
        }
    }
}

/// 사용자가 입력하는 원시 폼 값. 프리셋을 고르면 기기/시공비 대신 카탈로그 금액을 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorForm {
    pub km_per_year: f64,
    pub electricity_cost: f64,
    pub device_cost: f64,
    pub installation_cost: f64,
    pub years_to_project: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<WallboxPreset>,
}

impl Default for CalculatorForm {
    fn default() -> Self {
        let half = WallboxPreset::Complete.cost() / 2.0;
        Self {
            km_per_year: 15_000.0,
            electricity_cost: 0.30,
            device_cost: half,
            installation_cost: half,
            years_to_project: DEFAULT_YEARS_TO_PROJECT,
            preset: None,
        }
    }
}

impl CalculatorForm {
    /// 총 투자비 [€].
    pub fn wallbox_cost(&self) -> f64 {
        match self.preset {
            Some(preset) => preset.cost(),
            None => self.device_cost + self.installation_cost,
        }
    }

    /// 범위를 벗어난 항목을 모두 모은다.
    pub fn violations(&self) -> Vec<FieldViolation> {
        let mut checks = vec![
            (Field::KmPerYear, self.km_per_year),
            (Field::ElectricityCost, self.electricity_cost),
            (Field::YearsToProject, f64::from(self.years_to_project)),
        ];
        if self.preset.is_none() {
            checks.push((Field::DeviceCost, self.device_cost));
            checks.push((Field::InstallationCost, self.installation_cost));
        }
        checks
            .into_iter()
            .filter_map(|(field, value)| check(field, value))
            .collect()
    }

    /// 검증을 통과하면 계산 입력을 만든다.
    pub fn validate(&self) -> Result<CalculatorInput, InputError> {
        let violations = self.violations();
        if !violations.is_empty() {
            return Err(InputError::Invalid(violations));
        }
        Ok(CalculatorInput::new(
            self.km_per_year,
            self.electricity_cost,
            self.wallbox_cost(),
        )
        .with_years(self.years_to_project))
    }
}

fn check(field: Field, value: f64) -> Option<FieldViolation> {
    let bounds = field.bounds();
    let violation = if !value.is_finite() {
        Violation::NotANumber
    } else if value < bounds.min {
        Violation::BelowMin
    } else if value > bounds.max {
        Violation::AboveMax
    } else {
        return None;
    };
    Some(FieldViolation {
        field,
        value,
        violation,
    })
}

/// `local@domain.tld` 형태인지 확인한다.
pub fn validate_email(email: &str) -> Result<(), InputError> {
    let invalid = || InputError::InvalidEmail(email.to_string());
    let trimmed = email.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

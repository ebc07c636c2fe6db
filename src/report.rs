//! 계산 결과를 내려받을 수 있는 문서로 만든다. 계산기로 되돌아가는 값은 없다.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use jiff::civil::Date;
use thiserror::Error;

use crate::format::{format_currency, format_decimal, format_number, format_payback};
use crate::i18n::{keys, Language, Translator};
use crate::roi::{CalculatorInput, CalculatorResult, Payback};
use crate::validation::{self, InputError};

/// 기본 보고서 파일 이름.
pub const DEFAULT_REPORT_FILE: &str = "wallbox-roi-analyse.md";
/// 첫 페이지에 들어가는 표 행 수. 넘으면 결론을 다음 페이지로 넘긴다.
pub const ROWS_PER_FIRST_PAGE: usize = 20;
/// 페이지 구분 문자(form feed).
pub const PAGE_BREAK: char = '\u{000C}';

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Input(#[from] InputError),
}

/// 보고서에 다시 적는 사용자 입력과 연락처.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportInputs {
    pub email: Option<String>,
    pub km_per_year: f64,
    pub electricity_cost: f64,
    pub wallbox_cost: f64,
}

impl ReportInputs {
    pub fn from_input(input: &CalculatorInput, email: Option<String>) -> Self {
        Self {
            email: email.filter(|e| !e.trim().is_empty()),
            km_per_year: input.km_per_year,
            electricity_cost: input.electricity_cost,
            wallbox_cost: input.wallbox_cost,
        }
    }
}

/// 렌더링 직전의 보고서 내용. 모든 문자열은 이미 번역/서식이 적용되어 있다.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub subtitle: String,
    pub created_on: String,
    pub inputs_heading: String,
    pub inputs: Vec<(String, String)>,
    pub results_heading: String,
    pub key_results: Vec<(String, String)>,
    pub table_heading: String,
    pub table_header: [String; 4],
    pub rows: Vec<[String; 4]>,
    pub conclusion_heading: String,
    pub conclusion: String,
    pub footer: String,
}

impl Report {
    pub fn build(
        result: &CalculatorResult,
        inputs: &ReportInputs,
        date: Date,
        tr: &Translator,
    ) -> Self {
        let lang = tr.language();
        let payback_text = match result.payback() {
            Payback::Years(years) => format_decimal(years, 1, lang),
            Payback::Never => tr.t(keys::RESULT_NEVER),
        };

        let mut input_lines = Vec::with_capacity(4);
        if let Some(email) = &inputs.email {
            input_lines.push((tr.t(keys::LABEL_EMAIL), email.clone()));
        }
        input_lines.push((
            tr.t(keys::LABEL_KM_PER_YEAR),
            format!("{} km", format_number(inputs.km_per_year, lang)),
        ));
        input_lines.push((
            tr.t(keys::LABEL_ELECTRICITY_COST),
            format!("{} €/kWh", format_number(inputs.electricity_cost, lang)),
        ));
        input_lines.push((
            tr.t(keys::LABEL_WALLBOX_COST),
            format_currency(inputs.wallbox_cost, lang),
        ));

        let key_results = vec![
            (
                tr.t(keys::RESULT_SAVINGS_PER_YEAR),
                format_currency(result.savings_per_year, lang),
            ),
            (
                tr.tf(
                    keys::RESULT_TOTAL_SAVINGS,
                    &[("years", result.horizon().to_string())],
                ),
                format_currency(result.total_savings, lang),
            ),
            (
                tr.t(keys::RESULT_BREAK_EVEN),
                format_payback(result.payback(), tr),
            ),
        ];

        let rows = result
            .rows()
            .map(|row| {
                [
                    row.year.to_string(),
                    format_currency(row.home_cost, lang),
                    format_currency(row.public_cost, lang),
                    format_currency(row.cumulative_savings, lang),
                ]
            })
            .collect();

        let conclusion = match result.payback() {
            Payback::Years(_) => tr.tf(keys::REPORT_CONCLUSION, &[("years", payback_text)]),
            Payback::Never => tr.t(keys::REPORT_CONCLUSION_NEVER),
        };

        Self {
            title: tr.t(keys::REPORT_TITLE),
            subtitle: tr.t(keys::REPORT_SUBTITLE),
            created_on: tr.tf(keys::REPORT_CREATED_ON, &[("date", format_date(date, lang))]),
            inputs_heading: tr.t(keys::REPORT_INPUTS_HEADING),
            inputs: input_lines,
            results_heading: tr.t(keys::REPORT_RESULTS_HEADING),
            key_results,
            table_heading: tr.t(keys::REPORT_TABLE_HEADING),
            table_header: [
                tr.t(keys::TABLE_YEAR),
                tr.t(keys::TABLE_HOME_COSTS),
                tr.t(keys::TABLE_PUBLIC_COSTS),
                tr.t(keys::TABLE_CUMULATIVE_SAVINGS),
            ],
            rows,
            conclusion_heading: tr.t(keys::REPORT_CONCLUSION_HEADING),
            conclusion,
            footer: tr.tf(keys::REPORT_FOOTER, &[("year", date.year().to_string())]),
        }
    }

    /// 결론 앞에 페이지를 나눠야 하는지.
    pub fn needs_page_break(&self) -> bool {
        self.rows.len() > ROWS_PER_FIRST_PAGE
    }

    /// Markdown 문서로 렌더링한다. 페이지는 form feed로 구분된다.
    pub fn to_markdown(&self) -> String {
        self.to_string()
    }

    /// 보고서를 파일로 저장하고 쓴 바이트 수를 돌려준다.
    pub fn write_to(&self, path: &Path) -> Result<usize, ReportError> {
        let body = self.to_markdown();
        fs::write(path, &body)?;
        tracing::info!(path = %path.display(), bytes = body.len(), "report written");
        Ok(body.len())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}\n", self.title)?;
        writeln!(f, "_{}_\n", self.subtitle)?;
        writeln!(f, "{}\n", self.created_on)?;

        writeln!(f, "## {}\n", self.inputs_heading)?;
        for (label, value) in &self.inputs {
            writeln!(f, "- {label}: {value}")?;
        }

        writeln!(f, "\n## {}\n", self.results_heading)?;
        for (label, value) in &self.key_results {
            writeln!(f, "- **{label}:** {value}")?;
        }

        writeln!(f, "\n## {}\n", self.table_heading)?;
        writeln!(f, "| {} |", self.table_header.join(" | "))?;
        writeln!(f, "|---:|---:|---:|---:|")?;
        for row in &self.rows {
            writeln!(f, "| {} |", row.join(" | "))?;
        }

        if self.needs_page_break() {
            writeln!(f, "\n{PAGE_BREAK}")?;
        }
        writeln!(f, "\n## {}\n", self.conclusion_heading)?;
        writeln!(f, "{}\n", self.conclusion)?;
        writeln!(f, "---\n")?;
        writeln!(f, "<sub>{}</sub>", self.footer)
    }
}

fn format_date(date: Date, lang: Language) -> String {
    match lang {
        Language::De => date.strftime("%d.%m.%Y").to_string(),
        Language::En => date.strftime("%Y-%m-%d").to_string(),
    }
}

/// 모의 전송 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub recipient: String,
    pub bytes: usize,
}

/// 이메일 전송 스텁. 주소만 확인하고 지연 후 성공을 돌려준다. 실제 네트워크 전송은 없다.
pub fn send_via_email(
    email: &str,
    report: &Report,
    delay: Duration,
) -> Result<Delivery, ReportError> {
    validation::validate_email(email)?;
    let body = report.to_markdown();
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
    let recipient = email.trim().to_string();
    tracing::info!(recipient = %recipient, bytes = body.len(), "report e-mail delivery simulated");
    Ok(Delivery {
        recipient,
        bytes: body.len(),
    })
}

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::i18n::{self, keys, Translator};
use crate::report::{self, Report, ReportError, ReportInputs};
use crate::roi::{CalculatorInput, CalculatorResult, WallboxPreset};
use crate::ui_cli::{self, MenuChoice};
use crate::validation::{CalculatorForm, InputError};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// 입력 검증 오류
    #[error(transparent)]
    Input(#[from] InputError),
    /// 보고서 저장/전송 오류
    #[error("report error: {0}")]
    Report(#[from] ReportError),
    /// JSON 출력 오류
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 결과 출력 형식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// 요약 + 연도별 표
    #[default]
    Table,
    /// 입력과 결과를 JSON으로
    Json,
}

/// 비대화식 한 번 실행에 필요한 값.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub form: CalculatorForm,
    pub format: OutputFormat,
    pub report_path: Option<PathBuf>,
    pub email: Option<String>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    input: &'a CalculatorInput,
    result: &'a CalculatorResult,
}

/// 폼을 검증하고 설정의 모델 상수로 계산한다.
pub fn calculate(
    config: &Config,
    form: &CalculatorForm,
) -> Result<(CalculatorInput, CalculatorResult), InputError> {
    let input = form.validate()?;
    let result = config.model.project(&input);
    tracing::info!(
        km_per_year = input.km_per_year,
        electricity_cost = input.electricity_cost,
        wallbox_cost = input.wallbox_cost,
        preset = form.preset.map(WallboxPreset::as_code),
        years = input.years(),
        savings_per_year = result.savings_per_year,
        "ROI projection computed"
    );
    Ok((input, result))
}

/// 플래그로 받은 값으로 한 번 계산하고, 요청에 따라 보고서를 저장/전송한다.
pub fn run_once(config: &Config, tr: &Translator, opts: &RunOptions) -> Result<(), AppError> {
    let (input, result) = calculate(config, &opts.form)?;
    match opts.format {
        OutputFormat::Table => ui_cli::print_result(tr, &result),
        OutputFormat::Json => println!("{}", render_json(&input, &result)?),
    }

    if opts.report_path.is_none() && opts.email.is_none() {
        return Ok(());
    }
    let report = build_report(&input, &result, opts.email.clone(), tr);
    if let Some(path) = &opts.report_path {
        report.write_to(path)?;
        println!(
            "{}",
            tr.tf(keys::REPORT_SAVED, &[("path", path.display().to_string())])
        );
    }
    if let Some(email) = &opts.email {
        let delivery = report::send_via_email(email, &report, config.delays.email())?;
        println!(
            "{}",
            tr.tf(keys::REPORT_EMAIL_SENT, &[("email", delivery.recipient)])
        );
    }
    Ok(())
}

/// `{input, result}` JSON. 유한하지 않은 값은 `null`로 쓰인다.
fn render_json(
    input: &CalculatorInput,
    result: &CalculatorResult,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput { input, result })
}

fn build_report(
    input: &CalculatorInput,
    result: &CalculatorResult,
    email: Option<String>,
    tr: &Translator,
) -> Report {
    let today = jiff::Zoned::now().date();
    Report::build(result, &ReportInputs::from_input(input, email), today, tr)
}

/// CLI 애플리케이션의 메인 루프를 표준 입력으로 실행한다.
pub fn run_interactive(
    config: &mut Config,
    config_path: &Path,
    tr: &mut Translator,
) -> Result<(), AppError> {
    run_menu(&mut io::stdin().lock(), config, config_path, tr)
}

/// 메뉴 루프. 입력이 끝나면 `UnexpectedEof`로 빠져나온다.
pub fn run_menu<R: BufRead>(
    input: &mut R,
    config: &mut Config,
    config_path: &Path,
    tr: &mut Translator,
) -> Result<(), AppError> {
    let mut form = config.defaults;
    let mut last: Option<(CalculatorInput, CalculatorResult)> = None;
    loop {
        match ui_cli::main_menu(input, tr)? {
            MenuChoice::Calculate => {
                ui_cli::read_form(input, tr, &mut form)?;
                match calculate(config, &form) {
                    Ok((input, result)) => {
                        ui_cli::print_result(tr, &result);
                        last = Some((input, result));
                    }
                    Err(err) => {
                        ui_cli::print_input_error(tr, &err);
                        last = None;
                    }
                }
            }
            MenuChoice::Preset => {
                form.preset = ui_cli::choose_preset(input, tr, form.preset)?;
                // 입력이 바뀌면 이전 결과는 더 이상 유효하지 않다.
                last = None;
            }
            MenuChoice::Report => {
                let Some((calc_input, result)) = &last else {
                    println!("{}", tr.t(keys::ERROR_NO_RESULT));
                    continue;
                };
                let request = ui_cli::read_report_request(input, tr, &config.report_file_name)?;
                let report = build_report(calc_input, result, request.email.clone(), tr);
                report.write_to(&request.path)?;
                println!(
                    "{}",
                    tr.tf(keys::REPORT_SAVED, &[("path", request.path.display().to_string())])
                );
                if let Some(email) = &request.email {
                    match report::send_via_email(email, &report, config.delays.email()) {
                        Ok(delivery) => println!(
                            "{}",
                            tr.tf(keys::REPORT_EMAIL_SENT, &[("email", delivery.recipient)])
                        ),
                        Err(ReportError::Input(err)) => ui_cli::print_input_error(tr, &err),
                        Err(err) => {
                            tracing::warn!(error = %err, "report e-mail failed");
                            println!("{}", tr.t(keys::REPORT_EMAIL_FAILED));
                        }
                    }
                }
            }
            MenuChoice::Settings => {
                ui_cli::handle_settings(input, tr, config)?;
                config.save_to(config_path)?;
                let resolved = i18n::resolve_language("auto", Some(config.language.as_str()));
                *tr = Translator::new_with_pack(&resolved, config.language_pack_dir.as_deref());
                println!("{}", tr.t(keys::SETTINGS_SAVED));
            }
            MenuChoice::Exit => {
                config.defaults = form;
                config.save_to(config_path)?;
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi::RoiModel;

    fn form(electricity_cost: f64) -> CalculatorForm {
        CalculatorForm {
            electricity_cost,
            ..CalculatorForm::default()
        }
    }

    #[test]
    fn calculate_uses_configured_model() {
        let config = Config {
            model: RoiModel::new(0.15, 0.50),
            ..Config::default()
        };
        let (input, result) = calculate(&config, &form(0.30)).unwrap();
        assert_eq!(input.wallbox_cost, 2_200.0);
        assert!((result.annual_consumption_kwh - 2_250.0).abs() < 1e-9);
        assert!((result.savings_per_year - 450.0).abs() < 1e-9);
    }

    #[test]
    fn calculate_rejects_invalid_form() {
        let err = calculate(&Config::default(), &form(2.0)).unwrap_err();
        assert!(matches!(err, InputError::Invalid(v) if v.len() == 1));
    }

    #[test]
    fn json_writes_null_for_missing_payback() {
        let (input, result) = calculate(&Config::default(), &form(0.60)).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&input, &result).unwrap()).unwrap();
        assert!(json["result"]["breakEvenYear"].is_null());
        assert_eq!(json["result"]["savingsPerYear"], 0.0);
        assert_eq!(json["input"]["electricityCost"], 0.60);
    }

    #[test]
    fn run_once_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analyse.md");
        let opts = RunOptions {
            form: form(0.30),
            format: OutputFormat::Json,
            report_path: Some(path.clone()),
            email: None,
        };
        run_once(&Config::default(), &Translator::new("de"), &opts).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.contains("6.800,00 €"));
    }

    #[test]
    fn run_once_rejects_bad_email_after_saving() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            delays: crate::config::SimulatedDelays {
                calculation_ms: 0,
                email_ms: 0,
            },
            ..Config::default()
        };
        let opts = RunOptions {
            form: form(0.30),
            format: OutputFormat::Table,
            report_path: Some(dir.path().join("r.md")),
            email: Some("nobody".into()),
        };
        let err = run_once(&config, &Translator::new("en"), &opts).unwrap_err();
        assert!(matches!(err, AppError::Report(ReportError::Input(_))));
    }

    #[test]
    fn menu_ends_with_error_on_closed_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        let mut tr = Translator::new("en");
        let mut input: &[u8] = b"";
        let err = run_menu(&mut input, &mut config, &dir.path().join("c.toml"), &mut tr)
            .unwrap_err();
        assert!(matches!(err, AppError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof));
    }

    #[test]
    fn menu_exit_stores_last_form() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.toml");
        let mut config = Config::default();
        let mut tr = Translator::new("en");
        let mut input: &[u8] = b"1\n20000\n\n\n\n5\n0\n";
        run_menu(&mut input, &mut config, &path, &mut tr).unwrap();
        assert_eq!(config.defaults.km_per_year, 20_000.0);
        assert_eq!(config.defaults.years_to_project, 5);
        let saved = crate::config::load_or_default_at(&path).unwrap();
        assert_eq!(saved, config);
    }
}

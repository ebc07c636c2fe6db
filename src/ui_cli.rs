use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::app::AppError;
use crate::config::Config;
use crate::format::{
    format_currency, format_number, format_payback, format_percentage, format_preset,
};
use crate::i18n::{keys, Translator};
use crate::roi::{CalculatorResult, Payback, WallboxPreset};
use crate::validation::{CalculatorForm, InputError};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Calculate,
    Preset,
    Report,
    Settings,
    Exit,
}

/// 보고서 저장/전송 요청.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub path: PathBuf,
    pub email: Option<String>,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu<R: BufRead>(input: &mut R, tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_CALCULATE));
    println!("{}", tr.t(keys::MAIN_MENU_PRESET));
    println!("{}", tr.t(keys::MAIN_MENU_REPORT));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(input, &tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Calculate),
            "2" => return Ok(MenuChoice::Preset),
            "3" => return Ok(MenuChoice::Report),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 폼 값을 차례로 묻는다. 빈 입력은 현재 값을 유지한다.
pub fn read_form<R: BufRead>(
    input: &mut R,
    tr: &Translator,
    form: &mut CalculatorForm,
) -> Result<(), AppError> {
    let lang = tr.language();
    form.km_per_year = read_f64_or(input, tr, keys::LABEL_KM_PER_YEAR, form.km_per_year)?;
    form.electricity_cost =
        read_f64_or(input, tr, keys::LABEL_ELECTRICITY_COST, form.electricity_cost)?;
    match form.preset {
        Some(preset) => println!(
            "{}: {} ({})",
            tr.t(keys::LABEL_PRESET),
            format_preset(Some(preset), tr),
            format_currency(preset.cost(), lang)
        ),
        None => {
            form.device_cost =
                read_f64_or(input, tr, keys::LABEL_DEVICE_COST, form.device_cost)?;
            form.installation_cost =
                read_f64_or(input, tr, keys::LABEL_INSTALLATION_COST, form.installation_cost)?;
        }
    }
    form.years_to_project = read_u32_or(input, tr, keys::LABEL_YEARS, form.years_to_project)?;
    Ok(())
}

/// 월박스 유형을 고른다. 0은 개별 입력(기기 + 시공비)이다.
pub fn choose_preset<R: BufRead>(
    input: &mut R,
    tr: &Translator,
    current: Option<WallboxPreset>,
) -> Result<Option<WallboxPreset>, AppError> {
    let lang = tr.language();
    println!("\n-- {} --", tr.t(keys::LABEL_PRESET));
    println!("0) {}", tr.t(keys::PRESET_CUSTOM));
    for (i, preset) in WallboxPreset::ALL.iter().enumerate() {
        println!(
            "{}) {} ({})",
            i + 1,
            format_preset(Some(*preset), tr),
            format_currency(preset.cost(), lang)
        );
    }
    loop {
        let sel = read_line(input, &tr.t(keys::PROMPT_SELECT))?;
        let sel = sel.trim();
        if sel.is_empty() {
            return Ok(current);
        }
        match sel.parse::<usize>() {
            Ok(0) => return Ok(None),
            Ok(n) if n <= WallboxPreset::ALL.len() => return Ok(Some(WallboxPreset::ALL[n - 1])),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 보고서 파일 경로와 (선택) 이메일을 묻는다.
pub fn read_report_request<R: BufRead>(
    input: &mut R,
    tr: &Translator,
    default_file: &str,
) -> Result<ReportRequest, AppError> {
    let prompt = tr.tf(
        keys::PROMPT_REPORT_PATH,
        &[("value", default_file.to_string())],
    );
    let path = read_line(input, &prompt)?;
    let path = match path.trim() {
        "" => PathBuf::from(default_file),
        p => PathBuf::from(p),
    };
    let email = read_line(input, &tr.t(keys::PROMPT_EMAIL_OPTIONAL))?;
    let email = Some(email.trim().to_string()).filter(|e| !e.is_empty());
    Ok(ReportRequest { path, email })
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings<R: BufRead>(
    input: &mut R,
    tr: &Translator,
    cfg: &mut Config,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{}",
        tr.tf(keys::SETTINGS_CURRENT_LANGUAGE, &[("lang", cfg.language.clone())])
    );
    println!("{}", tr.t(keys::SETTINGS_LANGUAGE_OPTIONS));
    let sel = read_line(input, &tr.t(keys::PROMPT_SELECT))?;
    match sel.trim() {
        "" => {}
        "1" => cfg.language = "auto".into(),
        "2" => cfg.language = "de-de".into(),
        "3" => cfg.language = "en-us".into(),
        _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
    }
    Ok(())
}

/// 요약 지표와 연도별 표를 출력한다.
pub fn print_result(tr: &Translator, result: &CalculatorResult) {
    let lang = tr.language();
    println!("{}", tr.t(keys::RESULT_HEADING));
    println!(
        "{}: {}",
        tr.t(keys::RESULT_SAVINGS_PER_YEAR),
        format_currency(result.savings_per_year, lang)
    );
    println!(
        "{}: {}",
        tr.t(keys::RESULT_SAVINGS_PER_MONTH),
        format_currency(result.savings_per_month, lang)
    );
    println!(
        "{}: {}",
        tr.t(keys::RESULT_BREAK_EVEN),
        format_payback(result.payback(), tr)
    );
    println!(
        "{}: {}",
        tr.tf(
            keys::RESULT_TOTAL_SAVINGS,
            &[("years", result.horizon().to_string())]
        ),
        format_currency(result.total_savings, lang)
    );
    println!(
        "{}: {}",
        tr.t(keys::RESULT_ROI_RATIO),
        format_percentage(result.roi_ratio().abs(), lang)
    );

    println!(
        "\n{:>5} | {:>16} | {:>16} | {:>16} | {:>18}",
        tr.t(keys::TABLE_YEAR),
        tr.t(keys::TABLE_HOME_PER_YEAR),
        tr.t(keys::TABLE_PUBLIC_PER_YEAR),
        tr.t(keys::TABLE_SAVINGS_PER_YEAR),
        tr.t(keys::TABLE_CUMULATIVE_SAVINGS)
    );
    for row in result.rows() {
        println!(
            "{:>5} | {:>16} | {:>16} | {:>16} | {:>18}",
            row.year,
            format_currency(result.home_cost_per_year, lang),
            format_currency(result.public_cost_per_year, lang),
            format_currency(result.savings_per_year, lang),
            format_currency(row.cumulative_savings, lang)
        );
    }

    if let Payback::Years(years) = result.payback() {
        println!();
        println!(
            "{}",
            tr.tf(
                keys::RESULT_SUMMARY_PAYBACK,
                &[
                    ("years", format_number((years * 10.0).round() / 10.0, lang)),
                    ("per_year", format_currency(result.savings_per_year, lang)),
                    ("per_month", format_currency(result.savings_per_month, lang)),
                ]
            )
        );
    }
    println!(
        "{}",
        tr.tf(
            keys::RESULT_SUMMARY_TOTAL,
            &[
                ("years", result.horizon().to_string()),
                ("total", format_currency(result.total_savings, lang)),
                ("ratio", format_percentage(result.roi_ratio().abs(), lang)),
            ]
        )
    );
}

/// 검증 오류를 번역된 문구로 출력한다.
pub fn print_input_error(tr: &Translator, err: &InputError) {
    eprintln!("{}", tr.t(keys::VALIDATION_HEADING));
    for msg in err.messages(tr) {
        eprintln!("  - {msg}");
    }
}

/// 한 줄을 읽는다. 입력이 닫혔으면(0바이트) `UnexpectedEof`.
fn read_line<R: BufRead>(input: &mut R, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Err(AppError::Io(io::ErrorKind::UnexpectedEof.into()));
    }
    Ok(buf)
}

fn keep_prompt(tr: &Translator, label_key: &str, current: f64) -> String {
    format!(
        "{} {}: ",
        tr.t(label_key),
        tr.tf(
            keys::PROMPT_KEEP_HINT,
            &[("value", format_number(current, tr.language()))]
        )
    )
}

fn read_f64_or<R: BufRead>(
    input: &mut R,
    tr: &Translator,
    label_key: &str,
    current: f64,
) -> Result<f64, AppError> {
    let prompt = keep_prompt(tr, label_key, current);
    loop {
        let s = read_line(input, &prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(current);
        }
        // 독일식 소수점(0,30)도 받는다.
        match s.replace(',', ".").parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// 정수 입력. 소수나 음수는 다시 묻는다. 0은 범위 검증에서 걸러진다.
fn read_u32_or<R: BufRead>(
    input: &mut R,
    tr: &Translator,
    label_key: &str,
    current: u32,
) -> Result<u32, AppError> {
    let prompt = keep_prompt(tr, label_key, f64::from(current));
    loop {
        let s = read_line(input, &prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(current);
        }
        match s.parse::<u32>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi::WallboxPreset;

    fn tr() -> Translator {
        Translator::new("en")
    }

    fn is_eof(err: AppError) -> bool {
        matches!(err, AppError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }

    #[test]
    fn menu_stops_when_input_closes() {
        let mut input: &[u8] = b"";
        let err = main_menu(&mut input, &tr()).unwrap_err();
        assert!(is_eof(err));
    }

    #[test]
    fn menu_retries_until_input_closes() {
        let mut input: &[u8] = b"7\nabc\n";
        let err = main_menu(&mut input, &tr()).unwrap_err();
        assert!(is_eof(err));
    }

    #[test]
    fn menu_skips_invalid_choices() {
        let mut input: &[u8] = b"9\n2\n";
        assert_eq!(main_menu(&mut input, &tr()).unwrap(), MenuChoice::Preset);
    }

    #[test]
    fn empty_answers_keep_current_values() {
        let mut form = CalculatorForm::default();
        let mut input: &[u8] = b"\n0,35\n\n\n\n";
        read_form(&mut input, &tr(), &mut form).unwrap();
        assert_eq!(form.km_per_year, 15_000.0);
        assert_eq!(form.electricity_cost, 0.35);
        assert_eq!(form.years_to_project, 10);
    }

    #[test]
    fn fractional_years_are_asked_again() {
        let mut form = CalculatorForm::default();
        let mut input: &[u8] = b"\n\n\n\n2.7\n-3\n12\n";
        read_form(&mut input, &tr(), &mut form).unwrap();
        assert_eq!(form.years_to_project, 12);
    }

    #[test]
    fn form_fails_on_truncated_input() {
        let mut form = CalculatorForm::default();
        let mut input: &[u8] = b"20000\n";
        let err = read_form(&mut input, &tr(), &mut form).unwrap_err();
        assert!(is_eof(err));
        assert_eq!(form.km_per_year, 20_000.0);
    }

    #[test]
    fn preset_form_skips_itemized_costs() {
        let mut form = CalculatorForm {
            preset: Some(WallboxPreset::Smart),
            ..CalculatorForm::default()
        };
        let mut input: &[u8] = b"\n\n5\n";
        read_form(&mut input, &tr(), &mut form).unwrap();
        assert_eq!(form.years_to_project, 5);
        assert_eq!(form.wallbox_cost(), 1_200.0);
    }

    #[test]
    fn preset_choice_by_number() {
        let mut input: &[u8] = b"5\n3\n";
        let preset = choose_preset(&mut input, &tr(), None).unwrap();
        assert_eq!(preset, Some(WallboxPreset::Premium));
        let mut input: &[u8] = b"0\n";
        assert_eq!(choose_preset(&mut input, &tr(), preset).unwrap(), None);
    }
}

//! 통화/백분율/숫자 표시 형식. 계산 결과는 반올림하지 않으므로 표시 단계에서만 자른다.

use crate::i18n::{keys, Language, Translator};
use crate::roi::{Payback, WallboxPreset};

fn separators(lang: Language) -> (char, char) {
    match lang {
        Language::De => ('.', ','),
        Language::En => (',', '.'),
    }
}

fn group_thousands(digits: &str, sep: char) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(sep);
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// 절댓값을 소수점 `decimals` 자리로 고정해 로케일 구분자를 적용한다. 부호는 붙이지 않는다.
fn localized_abs(value: f64, decimals: usize, lang: Language) -> String {
    let (group_sep, decimal_sep) = separators(lang);
    let fixed = format!("{:.*}", decimals, value.abs());
    match fixed.split_once('.') {
        Some((int, frac)) => format!("{}{decimal_sep}{frac}", group_thousands(int, group_sep)),
        None => group_thousands(&fixed, group_sep),
    }
}

/// 반올림 후 0이 되는 음수에는 부호를 붙이지 않는다.
fn sign(value: f64, decimals: usize) -> &'static str {
    let scale = 10f64.powi(decimals as i32);
    if value < 0.0 && (value.abs() * scale).round() > 0.0 {
        "-"
    } else {
        ""
    }
}

fn non_finite(value: f64) -> Option<String> {
    if value.is_nan() {
        Some("NaN".into())
    } else if value.is_infinite() {
        Some(if value > 0.0 { "∞".into() } else { "-∞".into() })
    } else {
        None
    }
}

/// 소수점 자리를 고정한 로케일 숫자.
pub fn format_decimal(value: f64, decimals: usize, lang: Language) -> String {
    if let Some(s) = non_finite(value) {
        return s;
    }
    format!("{}{}", sign(value, decimals), localized_abs(value, decimals, lang))
}

/// 유로 통화 표기. de: `1.234,56 €`, en: `€1,234.56`.
pub fn format_currency(value: f64, lang: Language) -> String {
    if let Some(s) = non_finite(value) {
        return s;
    }
    let body = localized_abs(value, 2, lang);
    let sign = sign(value, 2);
    match lang {
        Language::De => format!("{sign}{body} €"),
        Language::En => format!("{sign}€{body}"),
    }
}

/// 비율(1.0 = 100%)을 소수점 한 자리 백분율로 표기한다.
pub fn format_percentage(ratio: f64, lang: Language) -> String {
    if let Some(s) = non_finite(ratio) {
        return s;
    }
    let percent = ratio * 100.0;
    let body = format!("{}{}", sign(percent, 1), localized_abs(percent, 1, lang));
    match lang {
        Language::De => format!("{body} %"),
        Language::En => format!("{body}%"),
    }
}

/// 천 단위 구분자가 있는 숫자. 소수는 최대 세 자리까지, 뒤쪽 0은 지운다.
pub fn format_number(value: f64, lang: Language) -> String {
    if let Some(s) = non_finite(value) {
        return s;
    }
    let (_, decimal_sep) = separators(lang);
    let full = format_decimal(value, 3, lang);
    let trimmed = full.trim_end_matches('0').trim_end_matches(decimal_sep);
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// 회수기간 표기. 회수되지 않으면 번역된 안내 문구를 돌려준다.
pub fn format_payback(payback: Payback, tr: &Translator) -> String {
    match payback {
        Payback::Years(years) => format!(
            "{} {}",
            format_decimal(years, 1, tr.language()),
            tr.t(keys::RESULT_YEARS_UNIT)
        ),
        Payback::Never => tr.t(keys::RESULT_NEVER),
    }
}

/// 월박스 유형 이름. `None`은 개별 입력이다.
pub fn format_preset(preset: Option<WallboxPreset>, tr: &Translator) -> String {
    let key = match preset {
        None => keys::PRESET_CUSTOM,
        Some(WallboxPreset::Basic) => keys::PRESET_BASIC,
        Some(WallboxPreset::Smart) => keys::PRESET_SMART,
        Some(WallboxPreset::Premium) => keys::PRESET_PREMIUM,
        Some(WallboxPreset::Complete) => keys::PRESET_COMPLETE,
    };
    tr.t(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_uses_locale_separators() {
        assert_eq!(format_currency(1234.5, Language::De), "1.234,50 €");
        assert_eq!(format_currency(1234.5, Language::En), "€1,234.50");
        assert_eq!(format_currency(-1300.0, Language::De), "-1.300,00 €");
        assert_eq!(format_currency(-1300.0, Language::En), "-€1,300.00");
    }

    #[test]
    fn tiny_negative_currency_has_no_sign() {
        assert_eq!(format_currency(-0.001, Language::De), "0,00 €");
    }

    #[test]
    fn large_values_are_grouped() {
        assert_eq!(format_currency(1_234_567.891, Language::De), "1.234.567,89 €");
        assert_eq!(format_number(100_000.0, Language::De), "100.000");
        assert_eq!(format_number(0.3, Language::De), "0,3");
        assert_eq!(format_number(15_000.0, Language::En), "15,000");
    }

    #[test]
    fn percentage_has_one_decimal() {
        assert_eq!(format_percentage(3.0909, Language::De), "309,1 %");
        assert_eq!(format_percentage(3.0909, Language::En), "309.1%");
    }

    #[test]
    fn payback_text_follows_language() {
        let de = Translator::new("de");
        let en = Translator::new("en");
        assert_eq!(format_payback(Payback::Years(2.4444), &de), "2,4 Jahre");
        assert_eq!(format_payback(Payback::Years(2.4444), &en), "2.4 years");
        assert_eq!(format_payback(Payback::Never, &de), "keine Amortisation");
    }

    #[test]
    fn non_finite_values_do_not_panic() {
        assert_eq!(format_currency(f64::INFINITY, Language::De), "∞");
        assert_eq!(format_decimal(f64::NAN, 1, Language::En), "NaN");
    }
}

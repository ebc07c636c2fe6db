use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";
    pub const APP_SUBTITLE: &str = "general.app_subtitle";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_CALCULATE: &str = "main_menu.calculate";
    pub const MAIN_MENU_PRESET: &str = "main_menu.preset";
    pub const MAIN_MENU_REPORT: &str = "main_menu.report";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const PROMPT_KEEP_HINT: &str = "prompt.keep_hint";
    pub const PROMPT_EMAIL_OPTIONAL: &str = "prompt.email_optional";
    pub const PROMPT_REPORT_PATH: &str = "prompt.report_path";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_NO_RESULT: &str = "error.no_result";

    pub const LABEL_KM_PER_YEAR: &str = "label.km_per_year";
    pub const LABEL_ELECTRICITY_COST: &str = "label.electricity_cost";
    pub const LABEL_DEVICE_COST: &str = "label.device_cost";
    pub const LABEL_INSTALLATION_COST: &str = "label.installation_cost";
    pub const LABEL_WALLBOX_COST: &str = "label.wallbox_cost";
    pub const LABEL_YEARS: &str = "label.years";
    pub const LABEL_EMAIL: &str = "label.email";
    pub const LABEL_PRESET: &str = "label.preset";

    pub const PRESET_CUSTOM: &str = "preset.custom";
    pub const PRESET_BASIC: &str = "preset.basic";
    pub const PRESET_SMART: &str = "preset.smart";
    pub const PRESET_PREMIUM: &str = "preset.premium";
    pub const PRESET_COMPLETE: &str = "preset.complete";

    pub const VALIDATION_HEADING: &str = "validation.heading";
    pub const VALIDATION_MIN: &str = "validation.min";
    pub const VALIDATION_MAX: &str = "validation.max";
    pub const VALIDATION_NOT_A_NUMBER: &str = "validation.not_a_number";
    pub const VALIDATION_EMAIL: &str = "validation.email";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_SAVINGS_PER_YEAR: &str = "result.savings_per_year";
    pub const RESULT_SAVINGS_PER_MONTH: &str = "result.savings_per_month";
    pub const RESULT_BREAK_EVEN: &str = "result.break_even";
    pub const RESULT_TOTAL_SAVINGS: &str = "result.total_savings";
    pub const RESULT_ROI_RATIO: &str = "result.roi_ratio";
    pub const RESULT_YEARS_UNIT: &str = "result.years_unit";
    pub const RESULT_NEVER: &str = "result.never";
    pub const RESULT_SUMMARY_PAYBACK: &str = "result.summary_payback";
    pub const RESULT_SUMMARY_TOTAL: &str = "result.summary_total";

    pub const TABLE_YEAR: &str = "table.year";
    pub const TABLE_HOME_COSTS: &str = "table.home_costs";
    pub const TABLE_PUBLIC_COSTS: &str = "table.public_costs";
    pub const TABLE_CUMULATIVE_SAVINGS: &str = "table.cumulative_savings";
    pub const TABLE_HOME_PER_YEAR: &str = "table.home_per_year";
    pub const TABLE_PUBLIC_PER_YEAR: &str = "table.public_per_year";
    pub const TABLE_SAVINGS_PER_YEAR: &str = "table.savings_per_year";

    pub const REPORT_TITLE: &str = "report.title";
    pub const REPORT_SUBTITLE: &str = "report.subtitle";
    pub const REPORT_CREATED_ON: &str = "report.created_on";
    pub const REPORT_INPUTS_HEADING: &str = "report.inputs_heading";
    pub const REPORT_RESULTS_HEADING: &str = "report.results_heading";
    pub const REPORT_TABLE_HEADING: &str = "report.table_heading";
    pub const REPORT_CONCLUSION_HEADING: &str = "report.conclusion_heading";
    pub const REPORT_CONCLUSION: &str = "report.conclusion";
    pub const REPORT_CONCLUSION_NEVER: &str = "report.conclusion_never";
    pub const REPORT_FOOTER: &str = "report.footer";
    pub const REPORT_SAVED: &str = "report.saved";
    pub const REPORT_EMAIL_SENT: &str = "report.email_sent";
    pub const REPORT_EMAIL_FAILED: &str = "report.email_failed";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_LANGUAGE_OPTIONS: &str = "settings.language_options";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const GUI_INPUTS_HEADING: &str = "gui.inputs_heading";
    pub const GUI_CALCULATE: &str = "gui.calculate";
    pub const GUI_CALCULATING: &str = "gui.calculating";
    pub const GUI_CALC_SUCCESS: &str = "gui.calc_success";
    pub const GUI_CALC_ERROR: &str = "gui.calc_error";
    pub const GUI_RESET: &str = "gui.reset";
    pub const GUI_CHART_TITLE: &str = "gui.chart_title";
    pub const GUI_CHART_HOME: &str = "gui.chart_home";
    pub const GUI_CHART_PUBLIC: &str = "gui.chart_public";
    pub const GUI_CHART_SAVINGS: &str = "gui.chart_savings";
    pub const GUI_TABLE_TITLE: &str = "gui.table_title";
    pub const GUI_REPORT_HEADING: &str = "gui.report_heading";
    pub const GUI_SAVE_REPORT: &str = "gui.save_report";
    pub const GUI_SEND_REPORT: &str = "gui.send_report";
    pub const GUI_SENDING: &str = "gui.sending";
    pub const GUI_SETTINGS: &str = "gui.settings";
    pub const GUI_LANGUAGE: &str = "gui.language";
    pub const GUI_LANGUAGE_AUTO: &str = "gui.language_auto";
    pub const GUI_ALPHA: &str = "gui.alpha";
    pub const GUI_SAVE_SETTINGS: &str = "gui.save_settings";
    pub const GUI_EMPTY_STATE: &str = "gui.empty_state";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    De,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::De
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(de/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 de로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 영어 번역이 없으면 독일어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let builtin = match self.lang {
            Language::En => en(key).or_else(|| de(key)),
            Language::De => de(key),
        };
        builtin.unwrap_or(key).to_string()
    }

    /// `{name}` 자리표시자를 채운 번역을 가져온다.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(&self.t(key), vars)
    }
}

pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "de-de".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        "en" | "en-us" | "en-gb" | "en-uk" => Some("en-us".into()),
        "de" | "de-de" | "de-at" | "de-ch" => Some("de-de".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        other if other.starts_with("de") => Some("de-de".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "de" => Some("de-de".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LC_ALL", "LANG"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Table = toml::from_str(src).ok()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in &value {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn de(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "Fehler",
        APP_EXIT => "Programm wird beendet.",
        APP_TITLE => "Wallbox ROI-Rechner",
        APP_SUBTITLE => "Berechnen Sie, wie viel Sie mit Ihrer eigenen Wallbox im Vergleich zum öffentlichen Laden sparen können.",
        MAIN_MENU_TITLE => "\n=== Wallbox ROI-Rechner ===",
        MAIN_MENU_CALCULATE => "1) Berechnung",
        MAIN_MENU_PRESET => "2) Wallbox-Typ wählen",
        MAIN_MENU_REPORT => "3) Bericht speichern / senden",
        MAIN_MENU_SETTINGS => "4) Einstellungen",
        MAIN_MENU_EXIT => "0) Beenden",
        PROMPT_MENU_SELECT => "Menüauswahl: ",
        PROMPT_SELECT => "Auswahl: ",
        PROMPT_KEEP_HINT => "(Enter = {value})",
        PROMPT_EMAIL_OPTIONAL => "E-Mail (leer lassen zum Überspringen): ",
        PROMPT_REPORT_PATH => "Dateiname (Enter = {value}): ",
        INVALID_SELECTION_RETRY => "Ungültige Eingabe. Bitte erneut wählen.",
        ERROR_INVALID_NUMBER => "Bitte geben Sie eine Zahl ein.",
        ERROR_NO_RESULT => "Bitte führen Sie zuerst eine Berechnung durch.",
        LABEL_KM_PER_YEAR => "Jährliche Fahrleistung (km)",
        LABEL_ELECTRICITY_COST => "Stromkosten zu Hause (€/kWh)",
        LABEL_DEVICE_COST => "Wallbox-Kosten (€)",
        LABEL_INSTALLATION_COST => "Installationskosten (€)",
        LABEL_WALLBOX_COST => "Wallbox-Installationskosten",
        LABEL_YEARS => "Betrachtungszeitraum (Jahre)",
        LABEL_EMAIL => "E-Mail",
        LABEL_PRESET => "Wallbox-Typ",
        PRESET_CUSTOM => "Individuell",
        PRESET_BASIC => "Basis",
        PRESET_SMART => "Smart",
        PRESET_PREMIUM => "Premium",
        PRESET_COMPLETE => "Komplettinstallation",
        VALIDATION_HEADING => "Bitte korrigieren Sie Ihre Eingaben:",
        VALIDATION_MIN => "{field}: mindestens {bound}.",
        VALIDATION_MAX => "{field}: maximal {bound}.",
        VALIDATION_NOT_A_NUMBER => "{field}: keine gültige Zahl.",
        VALIDATION_EMAIL => "Bitte geben Sie eine gültige E-Mail-Adresse ein.",
        RESULT_HEADING => "\n-- Ihre ROI-Analyse --",
        RESULT_SAVINGS_PER_YEAR => "Jährliche Ersparnis",
        RESULT_SAVINGS_PER_MONTH => "Monatliche Ersparnis",
        RESULT_BREAK_EVEN => "Amortisationszeit",
        RESULT_TOTAL_SAVINGS => "Gesamtersparnis über {years} Jahre",
        RESULT_ROI_RATIO => "Ersparnis im Verhältnis zur Investition",
        RESULT_YEARS_UNIT => "Jahre",
        RESULT_NEVER => "keine Amortisation",
        RESULT_SUMMARY_PAYBACK => "Nach {years} Jahren haben Sie die Kosten Ihrer Wallbox-Installation wieder eingespielt und sparen danach {per_year} jährlich ({per_month} monatlich).",
        RESULT_SUMMARY_TOTAL => "Nach {years} Jahren haben Sie insgesamt {total} gespart - das entspricht {ratio} Ihrer ursprünglichen Investition.",
        TABLE_YEAR => "Jahr",
        TABLE_HOME_COSTS => "Kosten Heimladen",
        TABLE_PUBLIC_COSTS => "Kosten öffentliches Laden",
        TABLE_CUMULATIVE_SAVINGS => "Kumulative Ersparnis",
        TABLE_HOME_PER_YEAR => "Heimladen / Jahr",
        TABLE_PUBLIC_PER_YEAR => "Öffentlich / Jahr",
        TABLE_SAVINGS_PER_YEAR => "Ersparnis / Jahr",
        REPORT_TITLE => "Wallbox ROI Analyse",
        REPORT_SUBTITLE => "Persönliche Wirtschaftlichkeitsberechnung",
        REPORT_CREATED_ON => "Erstellt am: {date}",
        REPORT_INPUTS_HEADING => "Ihre Eingaben:",
        REPORT_RESULTS_HEADING => "Wichtigste Ergebnisse:",
        REPORT_TABLE_HEADING => "Detaillierte Kosteneinsparungen:",
        REPORT_CONCLUSION_HEADING => "Fazit:",
        REPORT_CONCLUSION => "Mit Ihrer eigenen Wallbox sparen Sie nicht nur Geld, sondern genießen auch den Komfort des Heimladens und schützen Ihr Fahrzeug vor den Risiken öffentlicher Ladestationen. Die Investition zahlt sich bereits nach {years} Jahren aus und bringt Ihnen langfristig erhebliche Einsparungen.",
        REPORT_CONCLUSION_NEVER => "Mit den angegebenen Strompreisen ist das Heimladen nicht günstiger als das öffentliche Laden. Die Investition amortisiert sich daher nicht.",
        REPORT_FOOTER => "Wallbox ROI Kalkulator | © {year}",
        REPORT_SAVED => "Bericht gespeichert: {path}",
        REPORT_EMAIL_SENT => "Bericht wurde per E-Mail an {email} verschickt.",
        REPORT_EMAIL_FAILED => "Fehler beim Versenden der E-Mail.",
        SETTINGS_HEADING => "\n-- Einstellungen --",
        SETTINGS_CURRENT_LANGUAGE => "Aktuelle Sprache: {lang}",
        SETTINGS_LANGUAGE_OPTIONS => "1) Automatisch  2) Deutsch  3) English",
        SETTINGS_SAVED => "Einstellungen gespeichert.",
        GUI_INPUTS_HEADING => "Ihre Angaben",
        GUI_CALCULATE => "Ersparnis berechnen",
        GUI_CALCULATING => "Wird berechnet...",
        GUI_CALC_SUCCESS => "Berechnung erfolgreich. Ihre persönliche ROI-Analyse ist jetzt verfügbar.",
        GUI_CALC_ERROR => "Fehler bei der Berechnung.",
        GUI_RESET => "Zurücksetzen",
        GUI_CHART_TITLE => "Kostenvergleich über die Jahre",
        GUI_CHART_HOME => "Heimladen",
        GUI_CHART_PUBLIC => "Öffentliches Laden",
        GUI_CHART_SAVINGS => "Kumulative Ersparnis",
        GUI_TABLE_TITLE => "Jährliche Übersicht",
        GUI_REPORT_HEADING => "Erhalten Sie Ihre Analyse",
        GUI_SAVE_REPORT => "Bericht herunterladen",
        GUI_SEND_REPORT => "Bericht senden",
        GUI_SENDING => "Wird gesendet...",
        GUI_SETTINGS => "Einstellungen",
        GUI_LANGUAGE => "Sprache",
        GUI_LANGUAGE_AUTO => "System",
        GUI_ALPHA => "Fenstertransparenz",
        GUI_SAVE_SETTINGS => "Einstellungen speichern",
        GUI_EMPTY_STATE => "Geben Sie Ihre Daten ein und starten Sie die Berechnung.",
        _ => return None,
    };
    Some(s)
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        APP_TITLE => "Wallbox ROI Calculator",
        APP_SUBTITLE => "Find out how much you save with your own wallbox compared to public charging.",
        MAIN_MENU_TITLE => "\n=== Wallbox ROI Calculator ===",
        MAIN_MENU_CALCULATE => "1) Calculate",
        MAIN_MENU_PRESET => "2) Choose wallbox type",
        MAIN_MENU_REPORT => "3) Save / send report",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        PROMPT_KEEP_HINT => "(Enter = {value})",
        PROMPT_EMAIL_OPTIONAL => "E-mail (leave empty to skip): ",
        PROMPT_REPORT_PATH => "File name (Enter = {value}): ",
        INVALID_SELECTION_RETRY => "Invalid input. Please choose again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_NO_RESULT => "Please run a calculation first.",
        LABEL_KM_PER_YEAR => "Annual mileage (km)",
        LABEL_ELECTRICITY_COST => "Home electricity price (€/kWh)",
        LABEL_DEVICE_COST => "Wallbox price (€)",
        LABEL_INSTALLATION_COST => "Installation cost (€)",
        LABEL_WALLBOX_COST => "Wallbox installation cost",
        LABEL_YEARS => "Projection horizon (years)",
        LABEL_EMAIL => "E-mail",
        LABEL_PRESET => "Wallbox type",
        PRESET_CUSTOM => "Custom",
        PRESET_BASIC => "Basic",
        PRESET_SMART => "Smart",
        PRESET_PREMIUM => "Premium",
        PRESET_COMPLETE => "Complete installation",
        VALIDATION_HEADING => "Please correct your input:",
        VALIDATION_MIN => "{field}: at least {bound}.",
        VALIDATION_MAX => "{field}: at most {bound}.",
        VALIDATION_NOT_A_NUMBER => "{field}: not a valid number.",
        VALIDATION_EMAIL => "Please enter a valid e-mail address.",
        RESULT_HEADING => "\n-- Your ROI analysis --",
        RESULT_SAVINGS_PER_YEAR => "Annual savings",
        RESULT_SAVINGS_PER_MONTH => "Monthly savings",
        RESULT_BREAK_EVEN => "Payback period",
        RESULT_TOTAL_SAVINGS => "Total savings over {years} years",
        RESULT_ROI_RATIO => "Savings relative to investment",
        RESULT_YEARS_UNIT => "years",
        RESULT_NEVER => "no payback",
        RESULT_SUMMARY_PAYBACK => "After {years} years your wallbox installation has paid for itself; from then on you save {per_year} per year ({per_month} per month).",
        RESULT_SUMMARY_TOTAL => "After {years} years you have saved {total} in total, which is {ratio} of your initial investment.",
        TABLE_YEAR => "Year",
        TABLE_HOME_COSTS => "Home charging cost",
        TABLE_PUBLIC_COSTS => "Public charging cost",
        TABLE_CUMULATIVE_SAVINGS => "Cumulative savings",
        TABLE_HOME_PER_YEAR => "Home / year",
        TABLE_PUBLIC_PER_YEAR => "Public / year",
        TABLE_SAVINGS_PER_YEAR => "Savings / year",
        REPORT_TITLE => "Wallbox ROI Analysis",
        REPORT_SUBTITLE => "Personal cost-effectiveness calculation",
        REPORT_CREATED_ON => "Created on: {date}",
        REPORT_INPUTS_HEADING => "Your input:",
        REPORT_RESULTS_HEADING => "Key results:",
        REPORT_TABLE_HEADING => "Detailed cost savings:",
        REPORT_CONCLUSION_HEADING => "Conclusion:",
        REPORT_CONCLUSION => "With your own wallbox you not only save money, you also enjoy the comfort of charging at home. The investment pays for itself after {years} years and brings you considerable savings in the long run.",
        REPORT_CONCLUSION_NEVER => "At the given electricity price, charging at home is not cheaper than public charging, so the investment does not pay for itself.",
        REPORT_FOOTER => "Wallbox ROI Calculator | © {year}",
        REPORT_SAVED => "Report saved: {path}",
        REPORT_EMAIL_SENT => "Report was sent to {email}.",
        REPORT_EMAIL_FAILED => "Sending the e-mail failed.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language: {lang}",
        SETTINGS_LANGUAGE_OPTIONS => "1) Automatic  2) Deutsch  3) English",
        SETTINGS_SAVED => "Settings saved.",
        GUI_INPUTS_HEADING => "Your details",
        GUI_CALCULATE => "Calculate savings",
        GUI_CALCULATING => "Calculating...",
        GUI_CALC_SUCCESS => "Calculation successful. Your personal ROI analysis is ready.",
        GUI_CALC_ERROR => "Calculation failed.",
        GUI_RESET => "Reset",
        GUI_CHART_TITLE => "Cost comparison over the years",
        GUI_CHART_HOME => "Home charging",
        GUI_CHART_PUBLIC => "Public charging",
        GUI_CHART_SAVINGS => "Cumulative savings",
        GUI_TABLE_TITLE => "Yearly overview",
        GUI_REPORT_HEADING => "Get your analysis",
        GUI_SAVE_REPORT => "Download report",
        GUI_SEND_REPORT => "Send report",
        GUI_SENDING => "Sending...",
        GUI_SETTINGS => "Settings",
        GUI_LANGUAGE => "Language",
        GUI_LANGUAGE_AUTO => "System",
        GUI_ALPHA => "Window transparency",
        GUI_SAVE_SETTINGS => "Save settings",
        GUI_EMPTY_STATE => "Enter your details and start the calculation.",
        _ => return None,
    };
    Some(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_code_falls_back_to_german() {
        let tr = Translator::new("fr");
        assert_eq!(tr.language(), Language::De);
        assert_eq!(tr.t(keys::TABLE_YEAR), "Jahr");
    }

    #[test]
    fn english_table_is_used_for_en_codes() {
        let tr = Translator::new("en-us");
        assert_eq!(tr.language_code(), "en");
        assert_eq!(tr.t(keys::TABLE_YEAR), "Year");
    }

    #[test]
    fn missing_key_returns_key() {
        let tr = Translator::new("de");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn template_placeholders_are_filled() {
        let tr = Translator::new("de");
        let s = tr.tf(keys::RESULT_TOTAL_SAVINGS, &[("years", "10".into())]);
        assert_eq!(s, "Gesamtersparnis über 10 Jahre");
    }

    #[test]
    fn explicit_language_wins_over_config() {
        assert_eq!(resolve_language("en", Some("de")), "en-us");
        assert_eq!(resolve_language("auto", Some("de-AT")), "de-de");
    }

    #[test]
    fn pack_overrides_builtin_strings() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("en-us.toml"),
            "[table]\nyear = \"Yr\"\n",
        )
        .unwrap();
        let tr = Translator::new_with_pack("en-us", dir.path().to_str());
        assert_eq!(tr.t(keys::TABLE_YEAR), "Yr");
        assert_eq!(tr.t(keys::TABLE_HOME_COSTS), "Home charging cost");
    }
}

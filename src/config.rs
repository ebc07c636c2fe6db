use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::report::DEFAULT_REPORT_FILE;
use crate::roi::RoiModel;
use crate::validation::CalculatorForm;

/// 기본 설정 파일 이름(작업 디렉터리 기준).
pub const CONFIG_FILE: &str = "config.toml";

/// 화면/전송 흐름에서 흉내 내는 지연 시간.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedDelays {
    /// 계산 요청 지연 [ms]
    pub calculation_ms: u64,
    /// 이메일 전송 지연 [ms]
    pub email_ms: u64,
}

impl Default for SimulatedDelays {
    fn default() -> Self {
        Self {
            calculation_ms: 800,
            email_ms: 1_500,
        }
    }
}

impl SimulatedDelays {
    pub fn calculation(&self) -> Duration {
        Duration::from_millis(self.calculation_ms)
    }

    pub fn email(&self) -> Duration {
        Duration::from_millis(self.email_ms)
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(auto/de-de/en-us)
    pub language: String,
    /// 사용자 언어팩 디렉터리
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_pack_dir: Option<String>,
    /// GUI 창 불투명도(0.3~1.0)
    pub window_alpha: f32,
    /// 보고서 기본 파일 이름
    pub report_file_name: String,
    /// 모델 상수
    pub model: RoiModel,
    /// 입력 폼 기본값
    pub defaults: CalculatorForm,
    pub delays: SimulatedDelays,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            window_alpha: 1.0,
            report_file_name: DEFAULT_REPORT_FILE.to_string(),
            model: RoiModel::default(),
            defaults: CalculatorForm::default(),
            delays: SimulatedDelays::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("config file I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_default_at(Path::new(CONFIG_FILE))
}

/// 지정한 경로의 설정을 로드하거나, 없으면 기본값을 그 경로에 저장한다.
pub fn load_or_default_at(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        tracing::info!(path = %path.display(), "default config created");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Path::new(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = load_or_default_at(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.language = "en-us".into();
        cfg.model.public_price_per_kwh = 0.79;
        cfg.defaults.km_per_year = 22_000.0;
        cfg.defaults.preset = Some(crate::roi::WallboxPreset::Smart);
        cfg.save_to(&path).unwrap();

        let loaded = load_or_default_at(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "language = \"de-de\"\n[model]\nconsumption_kwh_per_km = 0.18\n").unwrap();
        let cfg = load_or_default_at(&path).unwrap();
        assert_eq!(cfg.language, "de-de");
        assert_eq!(cfg.model.consumption_kwh_per_km, 0.18);
        assert_eq!(cfg.model.public_price_per_kwh, 0.60);
        assert_eq!(cfg.delays, SimulatedDelays::default());
    }

    #[test]
    fn broken_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "language = [").unwrap();
        assert!(matches!(load_or_default_at(&path), Err(ConfigError::Parse(_))));
    }
}

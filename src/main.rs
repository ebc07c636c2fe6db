use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use wallbox_roi::app::{self, AppError, OutputFormat, RunOptions};
use wallbox_roi::i18n::{self, keys, Translator};
use wallbox_roi::roi::WallboxPreset;
use wallbox_roi::{config, logging, ui_cli};

/// 가정용 월박스와 공용 충전의 비용을 비교한다.
#[derive(Debug, Parser)]
#[command(name = "wallbox_roi_cli", version, about)]
struct Cli {
    /// 연간 주행거리 [km]
    #[arg(long)]
    km: Option<f64>,
    /// 가정용 전기 단가 [€/kWh]
    #[arg(long)]
    price: Option<f64>,
    /// 월박스 기기 가격 [€]
    #[arg(long)]
    device_cost: Option<f64>,
    /// 시공비 [€]
    #[arg(long)]
    installation_cost: Option<f64>,
    /// 카탈로그 설치비 사용(기기/시공비 대신)
    #[arg(long, value_enum, conflicts_with_all = ["device_cost", "installation_cost"])]
    preset: Option<WallboxPreset>,
    /// 분석 기간 [년]
    #[arg(long)]
    years: Option<u32>,
    /// 출력 형식
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    /// 보고서 저장 경로
    #[arg(long)]
    report: Option<PathBuf>,
    /// 보고서를 보낼 이메일(전송은 모의 동작)
    #[arg(long)]
    email: Option<String>,
    /// 언어: auto/de/en
    #[arg(long = "lang", short = 'L', default_value = "auto")]
    lang: String,
    /// 설정 파일 경로
    #[arg(long, default_value = config::CONFIG_FILE)]
    config: PathBuf,
    /// 메뉴 방식으로 실행
    #[arg(short, long)]
    interactive: bool,
    /// 로그 출력 수준(RUST_LOG가 우선)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let mut cfg = match config::load_or_default_at(&cli.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::warn!(error = %err, "config unavailable, using defaults");
            config::Config::default()
        }
    };
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let mut tr = Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());

    let outcome = if cli.interactive {
        app::run_interactive(&mut cfg, &cli.config, &mut tr)
    } else {
        let opts = run_options(&cli, &cfg);
        app::run_once(&cfg, &tr, &opts)
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Input(err)) => {
            ui_cli::print_input_error(&tr, &err);
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("{}: {err}", tr.t(keys::ERROR_PREFIX));
            ExitCode::FAILURE
        }
    }
}

fn run_options(cli: &Cli, cfg: &config::Config) -> RunOptions {
    let mut form = cfg.defaults;
    if let Some(km) = cli.km {
        form.km_per_year = km;
    }
    if let Some(price) = cli.price {
        form.electricity_cost = price;
    }
    if let Some(device) = cli.device_cost {
        form.device_cost = device;
        form.preset = None;
    }
    if let Some(installation) = cli.installation_cost {
        form.installation_cost = installation;
        form.preset = None;
    }
    if cli.preset.is_some() {
        form.preset = cli.preset;
    }
    if let Some(years) = cli.years {
        form.years_to_project = years;
    }
    RunOptions {
        form,
        format: cli.format,
        report_path: cli.report.clone(),
        email: cli.email.clone(),
    }
}

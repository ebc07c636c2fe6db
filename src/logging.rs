use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// stderr 로 출력하는 tracing 구독자를 설치한다.
///
/// `RUST_LOG`가 있으면 그 필터를, 없으면 `default_level`을 크레이트 필터로 쓴다.
/// 이미 설치되어 있으면(테스트 등) 조용히 넘어간다.
pub fn init(default_level: &str) {
    let default_filter = format!("wallbox_roi={default_level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .compact(),
        )
        .try_init();
}

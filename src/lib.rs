//! 월박스 투자비 회수 계산기. 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 함께 쓴다.

pub mod app;
pub mod config;
pub mod format;
pub mod i18n;
pub mod logging;
pub mod report;
pub mod roi;
pub mod ui_cli;
pub mod validation;

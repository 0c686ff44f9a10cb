//! 선택/유도 코어를 라이브러리로 분리하여 CLI와 GUI가 같은 로직을 공유한다.

pub mod app;
pub mod config;
pub mod i18n;
pub mod medium_db;
pub mod selection;
pub mod ui_cli;

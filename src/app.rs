use crate::config::Config;
use crate::i18n::{self, Translator};
use crate::medium_db::DensityTable;
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(crate::config::ConfigError),
    /// 밀도 테이블 로드 오류
    Table(crate::medium_db::TableError),
    /// 선택 상태 전이 오류
    Selection(crate::selection::SelectionError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Table(e) => write!(f, "테이블 오류: {e}"),
            AppError::Selection(e) => write!(f, "선택 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<crate::medium_db::TableError> for AppError {
    fn from(value: crate::medium_db::TableError) -> Self {
        AppError::Table(value)
    }
}

impl From<crate::selection::SelectionError> for AppError {
    fn from(value: crate::selection::SelectionError) -> Self {
        AppError::Selection(value)
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config, tr: &Translator, table: &DensityTable) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::DensityForm => ui_cli::handle_density_form(tr, table)?,
            MenuChoice::TableView => ui_cli::handle_table_view(tr, table)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save()?;
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}

use std::path::{Path, PathBuf};

use clap::Parser;
use medium_density_selector::{app, config, i18n, medium_db::DensityTable};

/// 매질/온도 선택으로 밀도를 유도하는 대화형 CLI.
#[derive(Debug, Parser)]
#[command(name = "medium_density_selector_cli", version)]
struct Cli {
    /// 언어 코드 (auto/en-us/ko-kr/de-de)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    /// 언어팩 디렉터리 (기본: locales/)
    #[arg(long)]
    lang_pack_dir: Option<String>,
    /// 밀도 테이블 TOML 경로 (기본: 내장 테이블)
    #[arg(long)]
    table: Option<PathBuf>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_default()?;

    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let pack_dir = cli
        .lang_pack_dir
        .clone()
        .or_else(|| cfg.language_pack_dir.clone());
    let tr = i18n::Translator::new_with_pack(&lang, pack_dir.as_deref());

    // 명시적으로 지정한 테이블은 실패 시 중단, 설정 파일의 테이블은 내장 테이블로 폴백한다.
    let table = if let Some(path) = cli.table.as_deref() {
        DensityTable::load(path)?
    } else if let Some(path) = cfg.table_path.as_deref() {
        match DensityTable::load(Path::new(path)) {
            Ok(t) => t,
            Err(err) => {
                eprintln!("{}: {err}", tr.t(i18n::keys::WARN_TABLE_FALLBACK));
                DensityTable::built_in()
            }
        }
    } else {
        DensityTable::built_in()
    };

    app::run(&mut cfg, &tr, &table)?;
    Ok(())
}

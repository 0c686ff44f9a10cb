use std::io::{self, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::medium_db::{DensityTable, OTHER_MEDIUM};
use crate::selection::{Notice, SelectionState};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    DensityForm,
    TableView,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_DENSITY_FORM));
    println!("{}", tr.t(keys::MAIN_MENU_TABLE_VIEW));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::DensityForm),
            "2" => return Ok(MenuChoice::TableView),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 매질 밀도 선택 폼을 처리한다.
pub fn handle_density_form(tr: &Translator, table: &DensityTable) -> Result<(), AppError> {
    println!("{}", tr.t(keys::FORM_HEADING));
    println!("{}", tr.t(keys::FORM_INTRO));

    let mut state = SelectionState::new();

    println!("{}", tr.t(keys::FORM_MEDIUM_LIST));
    for (i, m) in table.media().iter().enumerate() {
        println!("{}) {}", i + 1, m.name);
    }
    let medium = loop {
        let sel = read_line(tr.t(keys::FORM_PROMPT_MEDIUM))?;
        let trimmed = sel.trim();
        if trimmed == "0" {
            println!("{}", tr.t(keys::FORM_CANCELLED));
            return Ok(());
        }
        if let Ok(n) = trimmed.parse::<usize>() {
            if let Some(m) = n.checked_sub(1).and_then(|i| table.media().get(i)) {
                break m.name.clone();
            }
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    };
    state.select_medium(&medium);

    let buckets: Vec<String> = table
        .buckets_for(&medium)
        .iter()
        .map(|b| b.to_string())
        .collect();
    println!("{}", tr.t(keys::FORM_BUCKET_LIST));
    for (i, b) in buckets.iter().enumerate() {
        println!("{}) {}", i + 1, b);
    }
    let bucket = loop {
        let sel = read_line(tr.t(keys::FORM_PROMPT_BUCKET))?;
        let trimmed = sel.trim();
        if trimmed == "0" {
            println!("{}", tr.t(keys::FORM_CANCELLED));
            return Ok(());
        }
        if let Ok(n) = trimmed.parse::<usize>() {
            if let Some(b) = n.checked_sub(1).and_then(|i| buckets.get(i)) {
                break b.clone();
            }
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    };
    // 수락되면 포커스 신호가 돌아온다. CLI에서는 곧바로 밀도 입력으로 넘어가는 것으로 갈음한다.
    let _signal = state.select_temperature(table, &bucket)?;

    print_density(tr, &state);
    loop {
        let raw = read_line(tr.t(keys::FORM_PROMPT_DENSITY))?;
        if raw.trim().is_empty() {
            break;
        }
        if state.set_density(&raw) {
            break;
        }
        println!("{}", tr.t(keys::ERROR_INVALID_NUMBER));
    }

    println!("{}", tr.t(keys::FORM_SUMMARY));
    println!("  {} / {} / {}", medium, bucket, density_display(tr, &state));
    Ok(())
}

/// 참조 테이블을 매질별로 출력한다.
pub fn handle_table_view(tr: &Translator, table: &DensityTable) -> Result<(), AppError> {
    println!("{}", tr.t(keys::TABLE_VIEW_HEADING));
    println!("{}", tr.t(keys::TABLE_VIEW_NOTE));
    for m in table.media() {
        println!("\n{}", m.name);
        if !m.notes.is_empty() {
            println!("  ({})", m.notes);
        }
        if m.name == OTHER_MEDIUM {
            println!("  {}", tr.t(keys::TABLE_VIEW_OTHER_NOTE));
            continue;
        }
        for p in &m.points {
            match p.density {
                Some(d) => println!("  {:>8}  {:>7.1} kg/m3", p.bucket, d),
                None => println!("  {:>8}  {:>7}", p.bucket, "-"),
            }
        }
    }
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    if sel.trim().is_empty() {
        return Ok(());
    }
    let lang = match sel.trim() {
        "1" => "auto",
        "2" => "en-us",
        "3" => "ko-kr",
        "4" => "de-de",
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(());
        }
    };
    cfg.language = lang.to_string();
    println!("{} {}", tr.t(keys::SETTINGS_SAVED), cfg.language);
    Ok(())
}

fn print_density(tr: &Translator, state: &SelectionState) {
    println!(
        "{} {}",
        tr.t(keys::FORM_CURRENT_DENSITY),
        density_display(tr, state)
    );
    if let Some(Notice::AutoDerived) = state.status() {
        println!("{}", tr.t(keys::STATUS_AUTO_DERIVED));
    }
}

fn density_display(tr: &Translator, state: &SelectionState) -> String {
    if state.density().is_some() {
        state.density_text()
    } else {
        tr.t(keys::FORM_DENSITY_EMPTY).to_string()
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

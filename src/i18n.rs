use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_DENSITY_FORM: &str = "main_menu.density_form";
    pub const MAIN_MENU_TABLE_VIEW: &str = "main_menu.table_view";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const FORM_HEADING: &str = "form.heading";
    pub const FORM_INTRO: &str = "form.intro";
    pub const FORM_MEDIUM_LIST: &str = "form.medium_list";
    pub const FORM_PROMPT_MEDIUM: &str = "form.prompt_medium";
    pub const FORM_BUCKET_LIST: &str = "form.bucket_list";
    pub const FORM_PROMPT_BUCKET: &str = "form.prompt_bucket";
    pub const FORM_CURRENT_DENSITY: &str = "form.current_density";
    pub const FORM_DENSITY_EMPTY: &str = "form.density_empty";
    pub const FORM_PROMPT_DENSITY: &str = "form.prompt_density";
    pub const FORM_SUMMARY: &str = "form.summary";
    pub const FORM_CANCELLED: &str = "form.cancelled";

    pub const STATUS_AUTO_DERIVED: &str = "status.auto_derived";

    pub const TABLE_VIEW_HEADING: &str = "table_view.heading";
    pub const TABLE_VIEW_NOTE: &str = "table_view.note";
    pub const TABLE_VIEW_OTHER_NOTE: &str = "table_view.other_note";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const WARN_TABLE_FALLBACK: &str = "warn.table_fallback";

    pub const HELP_DENSITY_FORM: &str = "help.density_form";
    pub const HELP_TABLE_VIEW: &str = "help.table_view";
    pub const HELP_SETTINGS: &str = "help.settings";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
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
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
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
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
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

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Box::leak(v.clone().into_boxed_str());
            }
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" => Some("ko".into()),
        "ko-kr" => Some("ko-kr".into()),
        "en" => Some("en".into()),
        "en-us" => Some("en-us".into()),
        "en-uk" => Some("en-us".into()),
        "de" => Some("de-de".into()),
        "de-de" => Some("de-de".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
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
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        "de" => Some("de-de".into()),
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
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    if let Ok(lang) = std::env::var("LC_ALL") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
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

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
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

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "en-us" | "en" => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        "ko-kr" | "ko" => parse_toml_to_map(include_str!("../locales/ko-kr.toml")),
        "de-de" | "de" => parse_toml_to_map(include_str!("../locales/de-de.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Medium Density Selector ===",
        MAIN_MENU_DENSITY_FORM => "1) 매질 밀도 선택",
        MAIN_MENU_TABLE_VIEW => "2) 참조 테이블 보기",
        MAIN_MENU_SETTINGS => "3) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        FORM_HEADING => "\n-- 매질 밀도 선택 --",
        FORM_INTRO => {
            "매질과 온도를 선택하면 해당 밀도를 보여줍니다. 필요하면 밀도를 직접 수정할 수 있습니다."
        }
        FORM_MEDIUM_LIST => "매질:",
        FORM_PROMPT_MEDIUM => "매질 번호 (0=취소): ",
        FORM_BUCKET_LIST => "온도 구간:",
        FORM_PROMPT_BUCKET => "온도 구간 번호 (0=취소): ",
        FORM_CURRENT_DENSITY => "현재 밀도 [kg/m3]:",
        FORM_DENSITY_EMPTY => "(비어 있음)",
        FORM_PROMPT_DENSITY => "밀도 [kg/m3] (엔터 시 유지): ",
        FORM_SUMMARY => "선택 결과:",
        FORM_CANCELLED => "선택을 취소했습니다.",
        STATUS_AUTO_DERIVED => "선택에 따라 밀도가 자동으로 채워졌습니다.",
        TABLE_VIEW_HEADING => "\n-- 참조 테이블 --",
        TABLE_VIEW_NOTE => "참고: 값은 참고용 물성치입니다. 설계 시 실제 데이터로 검증하세요.",
        TABLE_VIEW_OTHER_NOTE => "Other는 수기 입력용 온도 눈금만 제공합니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_OPTIONS => "1) auto  2) en-us  3) ko-kr  4) de-de",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "언어 설정이 저장되었습니다. 다음 실행부터 적용됩니다:",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        WARN_TABLE_FALLBACK => "밀도 테이블을 불러오지 못해 내장 테이블을 사용합니다",
        HELP_DENSITY_FORM => {
            "도움말: 매질 → 온도 구간 순으로 선택하면 밀도가 자동으로 채워집니다. Other는 직접 입력합니다."
        }
        HELP_TABLE_VIEW => "도움말: 매질별 온도 구간과 밀도를 테이블 순서대로 보여줍니다.",
        HELP_SETTINGS => "도움말: UI 언어를 바꿉니다. 매질 이름과 온도 라벨은 데이터라 번역되지 않습니다.",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Medium Density Selector ===",
        MAIN_MENU_DENSITY_FORM => "1) Medium density form",
        MAIN_MENU_TABLE_VIEW => "2) Reference table",
        MAIN_MENU_SETTINGS => "3) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        FORM_HEADING => "\n-- Medium Density Form --",
        FORM_INTRO => {
            "Select the medium and temperature to see the corresponding density. You can also adjust the density manually if needed."
        }
        FORM_MEDIUM_LIST => "Media:",
        FORM_PROMPT_MEDIUM => "Medium number (0=cancel): ",
        FORM_BUCKET_LIST => "Temperature buckets:",
        FORM_PROMPT_BUCKET => "Bucket number (0=cancel): ",
        FORM_CURRENT_DENSITY => "Current density [kg/m3]:",
        FORM_DENSITY_EMPTY => "(empty)",
        FORM_PROMPT_DENSITY => "Density [kg/m3] (enter to keep): ",
        FORM_SUMMARY => "Selection result:",
        FORM_CANCELLED => "Selection cancelled.",
        STATUS_AUTO_DERIVED => "Density updated automatically based on selection.",
        TABLE_VIEW_HEADING => "\n-- Reference Table --",
        TABLE_VIEW_NOTE => "Note: values are reference data; verify against real property data for design.",
        TABLE_VIEW_OTHER_NOTE => "Other only offers a temperature scale for manual entry.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_OPTIONS => "1) auto  2) en-us  3) ko-kr  4) de-de",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; language unchanged.",
        SETTINGS_SAVED => "Language saved. Takes effect on next start:",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        WARN_TABLE_FALLBACK => "Failed to load density table; falling back to the built-in table",
        HELP_DENSITY_FORM => {
            "Help: pick medium, then bucket; density fills in automatically. For Other, enter it yourself."
        }
        HELP_TABLE_VIEW => "Help: shows each medium's buckets and densities in table order.",
        HELP_SETTINGS => "Help: changes the UI language. Medium names and bucket labels are data and stay untranslated.",
        _ => return None,
    })
}

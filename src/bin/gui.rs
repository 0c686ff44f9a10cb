#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};

use medium_density_selector::{
    config, i18n,
    medium_db::{DensityTable, OTHER_MEDIUM},
    selection::{Notice, SelectionState, UiSignal},
};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/ko-kr/de-de)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        }
        i += 1;
    }

    let icon_data = load_app_icon();
    let mut viewport = egui::ViewportBuilder::default().with_inner_size(egui::vec2(640.0, 560.0));
    if let Some(icon) = icon_data.clone() {
        viewport = viewport.with_icon(icon);
    }
    let native = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_default();
    if let Some(lang_cli) = cli_lang {
        let resolved = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
        app_cfg.language = resolved;
    }
    eframe::run_native(
        "Medium Density Selector",
        native,
        Box::new(move |cc| {
            let font_err = setup_fonts(&cc.egui_ctx).err();
            let mut app = GuiApp::new(app_cfg.clone());
            app.font_load_error = font_err;
            Box::new(app)
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png"];
    let path = search
        .iter()
        .find(|p| Path::new(*p).exists())
        .map(|s| s.to_string())?;
    let bytes = fs::read(&path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글과 ℃ 기호를 표시하기 위해 CJK 폰트를 우선 적용한다.
/// 1) assets/fonts/ 아래 프로젝트 폰트
/// 2) Windows 시스템 폰트(맑은 고딕/굴림/바탕 등)
/// 3) 모두 실패 시 Err를 반환해 설정에서 사용자 지정 폰트 로드를 유도한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let asset_path = Path::new("assets/fonts/malgun.ttf");
    if asset_path.exists() {
        let bytes = fs::read(asset_path).map_err(|e| format!("Failed to read font file: {e}"))?;
        apply_font_bytes(ctx, bytes, "korean_font");
        return Ok(());
    }

    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        let candidates = [
            "malgun.ttf",
            "malgunsl.ttf",
            "malgunbd.ttf",
            "gulim.ttc",
            "batang.ttc",
        ];
        for cand in candidates {
            let p = fonts.join(cand);
            if p.exists() {
                let bytes = fs::read(&p)
                    .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
                apply_font_bytes(ctx, bytes, "korean_font");
                return Ok(());
            }
        }
    }

    Err("Font not found. Please set a user font (.ttf/.ttc) in settings.".into())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

fn heading_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.heading(text).on_hover_text(tip)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Form,
    Table,
    Settings,
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    lang_input: String,
    lang_save_status: Option<String>,
    tab: Tab,
    table: DensityTable,
    table_load_error: Option<String>,
    sel: SelectionState,
    density_input: String,
    focus_density: bool,
    font_load_error: Option<String>,
}

impl GuiApp {
    fn new(cfg: config::Config) -> Self {
        let resolved = i18n::resolve_language(&cfg.language, None);
        let tr = i18n::Translator::new_with_pack(&resolved, cfg.language_pack_dir.as_deref());
        let mut table_load_error = None;
        let table = match cfg.table_path.as_deref() {
            Some(path) => match DensityTable::load(Path::new(path)) {
                Ok(t) => t,
                Err(err) => {
                    table_load_error = Some(err.to_string());
                    DensityTable::built_in()
                }
            },
            None => DensityTable::built_in(),
        };
        Self {
            lang_input: cfg.language.clone(),
            config: cfg,
            tr,
            lang_save_status: None,
            tab: Tab::Form,
            table,
            table_load_error,
            sel: SelectionState::new(),
            density_input: String::new(),
            focus_density: false,
            font_load_error: None,
        }
    }

    /// 매질 선택 이벤트. 같은 매질을 다시 골라도 종속 필드는 초기화된다.
    fn apply_medium(&mut self, name: &str) {
        self.sel.select_medium(name);
        self.density_input.clear();
    }

    /// 온도 구간 선택 이벤트. 수락되면 밀도 표시를 갱신하고 포커스 신호를 반영한다.
    fn apply_bucket(&mut self, bucket: &str) {
        if let Ok(UiSignal::FocusDensity) = self.sel.select_temperature(&self.table, bucket) {
            self.density_input = self.sel.density_text();
            self.focus_density = true;
        }
    }

    /// 밀도 입력 편집 이벤트. 거부된 입력은 직전 표시 문자열로 되돌린다.
    fn apply_density_edit(&mut self) {
        if !self.sel.set_density(&self.density_input) {
            self.density_input = self.sel.density_text();
        }
    }

    fn reset_form(&mut self) {
        self.sel = SelectionState::new();
        self.density_input.clear();
        self.focus_density = false;
    }

    /// 테이블 파일을 교체한다. 성공 시 선택 상태도 함께 초기화한다.
    fn replace_table(&mut self, table: DensityTable, path: Option<String>) {
        self.table = table;
        self.config.table_path = path;
        self.table_load_error = None;
        self.reset_form();
    }

    /// 사이드 메뉴를 제공한다.
    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        ui.vertical_centered(|ui| {
            ui.heading(txt("gui.nav.heading", "Menu"));
            ui.add_space(8.0);
        });
        for (tab, label) in [
            (Tab::Form, txt("gui.tab.form", "Medium Form")),
            (Tab::Table, txt("gui.tab.table", "Reference Table")),
            (Tab::Settings, txt("gui.tab.settings", "Settings")),
        ] {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            let resp = ui
                .add(button)
                .on_hover_text(txt("gui.nav.switch_tip", "Switch menu"));
            if resp.clicked() {
                self.tab = tab;
            }
            ui.add_space(4.0);
        }
    }

    fn ui_form(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        heading_with_tip(
            ui,
            &txt("gui.form.heading", "Medium"),
            &txt("gui.form.intro", "Select medium and temperature."),
        );
        ui.label(txt(
            "gui.form.intro",
            "Select the medium and temperature to see the corresponding density. You can also adjust the density manually if needed.",
        ));
        ui.add_space(8.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("form_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    label_with_tip(
                        ui,
                        &txt("gui.form.medium_label", "Medium (required)"),
                        &txt("gui.form.medium_placeholder", "Select a medium"),
                    );
                    let mut picked_medium: Option<String> = None;
                    let medium_text = self
                        .sel
                        .medium()
                        .map(str::to_string)
                        .unwrap_or_else(|| txt("gui.form.medium_placeholder", "Select a medium"));
                    egui::ComboBox::from_id_source("medium_choice")
                        .width(320.0)
                        .selected_text(medium_text)
                        .show_ui(ui, |ui| {
                            for m in self.table.media() {
                                let is_current = self.sel.medium() == Some(m.name.as_str());
                                if ui.selectable_label(is_current, &m.name).clicked() {
                                    picked_medium = Some(m.name.clone());
                                }
                            }
                        });
                    if let Some(name) = picked_medium {
                        self.apply_medium(&name);
                    }
                    ui.end_row();

                    label_with_tip(
                        ui,
                        &txt("gui.form.temperature_label", "Medium Temperature (required)"),
                        &txt("gui.form.temperature_placeholder", "Select approximate"),
                    );
                    let mut picked_bucket: Option<String> = None;
                    let medium_chosen = self.sel.medium().is_some();
                    ui.add_enabled_ui(medium_chosen, |ui| {
                        let bucket_text = self
                            .sel
                            .temperature()
                            .map(str::to_string)
                            .unwrap_or_else(|| {
                                txt("gui.form.temperature_placeholder", "Select approximate")
                            });
                        egui::ComboBox::from_id_source("bucket_choice")
                            .width(320.0)
                            .selected_text(bucket_text)
                            .show_ui(ui, |ui| {
                                if let Some(medium) = self.sel.medium() {
                                    for b in self.table.buckets_for(medium) {
                                        let is_current = self.sel.temperature() == Some(b);
                                        if ui.selectable_label(is_current, b).clicked() {
                                            picked_bucket = Some(b.to_string());
                                        }
                                    }
                                }
                            });
                    });
                    if let Some(bucket) = picked_bucket {
                        self.apply_bucket(&bucket);
                    }
                    ui.end_row();

                    label_with_tip(
                        ui,
                        &txt("gui.form.density_label", "Medium Density in kg/m³ (required)"),
                        &txt("gui.form.intro", "Adjust manually if needed."),
                    );
                    let density_resp = ui.add(
                        egui::TextEdit::singleline(&mut self.density_input).desired_width(320.0),
                    );
                    if density_resp.changed() {
                        self.apply_density_edit();
                    }
                    if self.focus_density {
                        density_resp.request_focus();
                        self.focus_density = false;
                    }
                    ui.end_row();
                });
        });

        if let Some(Notice::AutoDerived) = self.sel.status() {
            ui.add_space(4.0);
            ui.small(txt(
                "status.auto_derived",
                "Density updated automatically based on selection.",
            ));
        }

        ui.add_space(8.0);
        if ui.button(txt("gui.form.reset", "Reset form")).clicked() {
            self.reset_form();
        }
    }

    fn ui_table(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        heading_with_tip(
            ui,
            &txt("gui.table.heading", "Reference Table"),
            &txt("gui.table.note", "Reference data only."),
        );
        ui.small(txt(
            "gui.table.note",
            "Values are reference data; verify against real property data for design.",
        ));
        ui.add_space(8.0);
        for m in self.table.media() {
            egui::CollapsingHeader::new(&m.name)
                .default_open(false)
                .show(ui, |ui| {
                    if !m.notes.is_empty() {
                        ui.small(&m.notes);
                    }
                    if m.name == OTHER_MEDIUM {
                        ui.small(txt(
                            "gui.table.other_note",
                            "Other only offers a temperature scale for manual entry.",
                        ));
                        return;
                    }
                    egui::Grid::new(ui.next_auto_id())
                        .num_columns(2)
                        .striped(true)
                        .spacing([24.0, 4.0])
                        .show(ui, |ui| {
                            ui.label(txt("gui.table.bucket", "Temperature"));
                            ui.label(txt("gui.table.density", "Density [kg/m3]"));
                            ui.end_row();
                            for p in &m.points {
                                ui.label(&p.bucket);
                                match p.density {
                                    Some(d) => ui.label(format!("{d:.1}")),
                                    None => ui.label("-"),
                                };
                                ui.end_row();
                            }
                        });
                });
        }
    }

    fn ui_settings(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        heading_with_tip(
            ui,
            &txt("gui.settings.title", "Settings"),
            &txt("gui.nav.switch_tip", "Switch menu"),
        );
        ui.add_space(8.0);

        ui.label(txt("gui.settings.lang", "Language"));
        egui::ComboBox::from_id_source("lang_choice")
            .selected_text(&self.lang_input)
            .show_ui(ui, |ui| {
                ui.selectable_value(
                    &mut self.lang_input,
                    "auto".into(),
                    txt("gui.settings.lang.auto", "System"),
                );
                ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                ui.selectable_value(&mut self.lang_input, "de-de".into(), "Deutsch");
            });
        if ui.button(txt("gui.settings.save", "Save settings")).clicked() {
            self.config.language = self.lang_input.clone();
            // 즉시 번역기 반영
            let resolved = i18n::resolve_language(&self.config.language, None);
            self.tr = i18n::Translator::new_with_pack(
                &resolved,
                self.config.language_pack_dir.as_deref(),
            );
            if let Err(e) = self.config.save() {
                self.lang_save_status = Some(format!("Save error: {e}"));
            } else {
                self.lang_save_status = Some(txt("gui.settings.saved", "Saved."));
            }
        }
        if let Some(msg) = &self.lang_save_status {
            ui.label(msg);
        }

        ui.separator();
        ui.label(txt("gui.settings.table", "Density table"));
        match self.config.table_path.as_deref() {
            Some(path) => ui.monospace(path),
            None => ui.label(txt("gui.settings.table_built_in", "Built-in table")),
        };
        ui.horizontal(|ui| {
            if ui
                .button(txt("gui.settings.table_pick", "Load table file..."))
                .clicked()
            {
                if let Some(path) = FileDialog::new().add_filter("TOML", &["toml"]).pick_file() {
                    match DensityTable::load(&path) {
                        Ok(table) => {
                            self.replace_table(table, Some(path.display().to_string()));
                            if let Err(e) = self.config.save() {
                                self.lang_save_status = Some(format!("Save error: {e}"));
                            }
                        }
                        Err(err) => self.table_load_error = Some(err.to_string()),
                    }
                }
            }
            if ui
                .button(txt("gui.settings.table_reset", "Use built-in table"))
                .clicked()
            {
                self.replace_table(DensityTable::built_in(), None);
                if let Err(e) = self.config.save() {
                    self.lang_save_status = Some(format!("Save error: {e}"));
                }
            }
        });
        if let Some(err) = &self.table_load_error {
            ui.colored_label(
                ui.visuals().error_fg_color,
                format!("{}: {err}", txt("gui.settings.table_error", "Table load error")),
            );
        }

        if let Some(err) = self.font_load_error.clone() {
            ui.separator();
            ui.colored_label(ui.visuals().warn_fg_color, err);
            if ui.button("Load font (.ttf/.ttc)...").clicked() {
                if let Some(path) = FileDialog::new()
                    .add_filter("Font", &["ttf", "ttc", "otf"])
                    .pick_file()
                {
                    match load_custom_font(ui.ctx(), &path.display().to_string()) {
                        Ok(()) => self.font_load_error = None,
                        Err(e) => self.font_load_error = Some(e),
                    }
                }
            }
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let tr = self.tr.clone();
        let txt =
            move |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(txt("gui.nav.app_title", "Medium Density Selector"));
            });
        });

        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(130.0)
            .default_width(170.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::Form => self.ui_form(ui),
                    Tab::Table => self.ui_table(ui),
                    Tab::Settings => self.ui_settings(ui),
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> GuiApp {
        GuiApp::new(config::Config::default())
    }

    #[test]
    fn bucket_pick_fills_density_input_and_focus() {
        let mut app = app();
        app.apply_medium("Wasser");
        app.apply_bucket("20 ℃");
        assert_eq!(app.density_input, "998");
        assert!(app.focus_density);
        assert_eq!(app.sel.status(), Some(Notice::AutoDerived));
    }

    #[test]
    fn medium_pick_clears_density_input() {
        let mut app = app();
        app.apply_medium("Wasser");
        app.apply_bucket("20 ℃");
        app.apply_medium("Wasser");
        assert!(app.density_input.is_empty());
        assert_eq!(app.sel.density(), None);
        assert_eq!(app.sel.temperature(), None);
    }

    #[test]
    fn rejected_density_edit_reverts_input() {
        let mut app = app();
        app.apply_medium("Wasser");
        app.apply_bucket("20 ℃");
        app.density_input = "abc".to_string();
        app.apply_density_edit();
        assert_eq!(app.density_input, "998");
        assert_eq!(app.sel.density(), Some(998.0));
    }

    #[test]
    fn other_medium_keeps_manual_density() {
        let mut app = app();
        app.apply_medium(OTHER_MEDIUM);
        app.density_input = "850".to_string();
        app.apply_density_edit();
        app.apply_bucket("50 ℃");
        assert_eq!(app.sel.density(), Some(850.0));
        assert_eq!(app.density_input, "850");
        assert!(app.focus_density);
    }

    #[test]
    fn replace_table_resets_selection() {
        let mut app = app();
        app.apply_medium("Wasser");
        app.apply_bucket("20 ℃");
        app.replace_table(DensityTable::built_in(), None);
        assert_eq!(app.sel.medium(), None);
        assert!(app.density_input.is_empty());
    }
}

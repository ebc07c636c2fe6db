#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::{Duration, Instant};
use std::{env, fs, path::Path, thread};
use wallbox_roi::{
    config,
    format::{
        format_currency, format_decimal, format_number, format_payback, format_percentage,
        format_preset,
    },
    i18n::{self, keys, Language, Translator},
    logging,
    report::{self, Delivery, Report, ReportError, ReportInputs},
    roi::{CalculatorInput, CalculatorResult, Payback, RoiModel, WallboxPreset},
    validation::{self, CalculatorForm, FieldViolation, InputError},
};

const HOME_COLOR: egui::Color32 = egui::Color32::from_rgb(139, 92, 246);
const PUBLIC_COLOR: egui::Color32 = egui::Color32::from_rgb(234, 88, 12);
const SAVINGS_COLOR: egui::Color32 = egui::Color32::from_rgb(22, 163, 74);
const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);
/// 상태 메시지 표시 시간.
const STATUS_TTL: Duration = Duration::from_secs(5);

fn main() -> Result<(), eframe::Error> {
    logging::init("info");

    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/de/en)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([1180.0, 820.0])
        .with_transparent(true);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "config unavailable, using defaults");
        config::Config::default()
    });
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    eframe::run_native(
        "Wallbox ROI",
        options,
        Box::new(move |_cc| Box::new(GuiApp::new(app_cfg))),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width: w,
        height: h,
    })
}

/// 작업 스레드가 돌려주는 계산 결과. 세대 번호가 현재와 다르면 버린다.
struct CalculationOutcome {
    generation: u64,
    input: CalculatorInput,
    result: CalculatorResult,
}

struct PendingCalculation {
    generation: u64,
    rx: Receiver<CalculationOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Success,
    Error,
}

struct Status {
    kind: StatusKind,
    text: String,
    since: Instant,
}

struct GuiApp {
    config: config::Config,
    tr: Translator,
    form: CalculatorForm,
    lang_input: String,
    window_alpha: f32,
    show_settings: bool,
    settings_status: Option<String>,
    violations: Vec<FieldViolation>,
    generation: u64,
    pending: Option<PendingCalculation>,
    computed: Option<(CalculatorInput, CalculatorResult)>,
    email: String,
    email_error: Option<String>,
    sending: Option<Receiver<Result<Delivery, ReportError>>>,
    status: Option<Status>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        Self {
            form: config.defaults,
            lang_input: config.language.clone(),
            window_alpha: config.window_alpha,
            config,
            tr,
            show_settings: false,
            settings_status: None,
            violations: Vec::new(),
            generation: 0,
            pending: None,
            computed: None,
            email: String::new(),
            email_error: None,
            sending: None,
            status: None,
        }
    }

    fn set_status(&mut self, kind: StatusKind, text: String) {
        self.status = Some(Status {
            kind,
            text,
            since: Instant::now(),
        });
    }

    /// 입력이 바뀌면 진행 중인 계산을 무효화한다.
    fn on_form_changed(&mut self) {
        self.generation += 1;
        if self.pending.take().is_some() {
            tracing::debug!(generation = self.generation, "pending calculation superseded");
        }
        self.violations.clear();
    }

    /// 폼을 검증한다. 실패하면 위반 목록을 저장하고 None.
    fn begin_calculation(&mut self) -> Option<CalculatorInput> {
        match self.form.validate() {
            Ok(input) => {
                self.violations.clear();
                Some(input)
            }
            Err(InputError::Invalid(violations)) => {
                self.violations = violations;
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "unexpected validation error");
                None
            }
        }
    }

    fn start_calculation(&mut self, ctx: &egui::Context) {
        let Some(input) = self.begin_calculation() else {
            let text = self.tr.t(keys::GUI_CALC_ERROR);
            self.set_status(StatusKind::Error, text);
            return;
        };
        self.generation += 1;
        let generation = self.generation;
        let rx = spawn_calculation(
            self.config.model,
            input,
            self.config.delays.calculation(),
            generation,
            ctx.clone(),
        );
        self.pending = Some(PendingCalculation { generation, rx });
    }

    /// 현재 세대의 결과만 받아들인다.
    fn accept_outcome(&mut self, outcome: CalculationOutcome) -> bool {
        if outcome.generation != self.generation {
            return false;
        }
        tracing::info!(
            savings_per_year = outcome.result.savings_per_year,
            years = outcome.result.horizon(),
            "calculation finished"
        );
        self.computed = Some((outcome.input, outcome.result));
        true
    }

    fn poll_calculation(&mut self) {
        let Some(pending) = &self.pending else {
            return;
        };
        let expected = pending.generation;
        match pending.rx.try_recv() {
            Ok(outcome) => {
                self.pending = None;
                if outcome.generation == expected && self.accept_outcome(outcome) {
                    let text = self.tr.t(keys::GUI_CALC_SUCCESS);
                    self.set_status(StatusKind::Success, text);
                }
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                let text = self.tr.t(keys::GUI_CALC_ERROR);
                self.set_status(StatusKind::Error, text);
            }
        }
    }

    fn poll_sending(&mut self) {
        let Some(rx) = &self.sending else {
            return;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(ReportError::Io(std::io::Error::other(
                "e-mail worker stopped",
            ))),
        };
        self.sending = None;
        match outcome {
            Ok(delivery) => {
                let text = self
                    .tr
                    .tf(keys::REPORT_EMAIL_SENT, &[("email", delivery.recipient)]);
                self.set_status(StatusKind::Success, text);
            }
            Err(err) => {
                tracing::warn!(error = %err, "report e-mail failed");
                let text = self.tr.t(keys::REPORT_EMAIL_FAILED);
                self.set_status(StatusKind::Error, text);
            }
        }
    }

    fn build_report(&self) -> Option<Report> {
        let (input, result) = self.computed.as_ref()?;
        let email = Some(self.email.trim().to_string()).filter(|e| !e.is_empty());
        let inputs = ReportInputs::from_input(input, email);
        Some(Report::build(
            result,
            &inputs,
            jiff::Zoned::now().date(),
            &self.tr,
        ))
    }

    fn save_report(&mut self) {
        let Some(report) = self.build_report() else {
            return;
        };
        let Some(path) = FileDialog::new()
            .set_file_name(self.config.report_file_name.as_str())
            .add_filter("Markdown", &["md"])
            .save_file()
        else {
            return;
        };
        match report.write_to(&path) {
            Ok(_) => {
                let text = self
                    .tr
                    .tf(keys::REPORT_SAVED, &[("path", path.display().to_string())]);
                self.set_status(StatusKind::Success, text);
            }
            Err(err) => {
                let text = format!("{}: {err}", self.tr.t(keys::ERROR_PREFIX));
                self.set_status(StatusKind::Error, text);
            }
        }
    }

    fn send_report(&mut self, ctx: &egui::Context) {
        if let Err(err) = validation::validate_email(&self.email) {
            self.email_error = Some(err.messages(&self.tr).join(" "));
            return;
        }
        self.email_error = None;
        let Some(report) = self.build_report() else {
            return;
        };
        let (tx, rx) = mpsc::channel();
        let email = self.email.clone();
        let delay = self.config.delays.email();
        let ctx = ctx.clone();
        thread::spawn(move || {
            let outcome = report::send_via_email(&email, &report, delay);
            let _ = tx.send(outcome);
            ctx.request_repaint();
        });
        self.sending = Some(rx);
    }

    fn save_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        self.config.window_alpha = self.window_alpha;
        let resolved = i18n::resolve_language("auto", Some(self.config.language.as_str()));
        self.tr = Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
        self.settings_status = Some(match self.config.save() {
            Ok(()) => self.tr.t(keys::SETTINGS_SAVED),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }

    /// 입력 패널. 값이 바뀌었으면 true.
    fn ui_inputs(&mut self, ui: &mut egui::Ui) -> bool {
        let tr = self.tr.clone();
        let lang = tr.language();
        let mut changed = false;

        ui.heading(tr.t(keys::GUI_INPUTS_HEADING));
        ui.separator();

        ui.label(tr.t(keys::LABEL_KM_PER_YEAR));
        changed |= ui
            .add(
                egui::Slider::new(&mut self.form.km_per_year, 1_000.0..=100_000.0)
                    .step_by(1_000.0)
                    .suffix(" km"),
            )
            .changed();

        ui.label(tr.t(keys::LABEL_ELECTRICITY_COST));
        changed |= ui
            .add(
                egui::Slider::new(&mut self.form.electricity_cost, 0.10..=1.00)
                    .step_by(0.01)
                    .fixed_decimals(2)
                    .suffix(" €/kWh"),
            )
            .changed();

        ui.label(tr.t(keys::LABEL_PRESET));
        let before = self.form.preset;
        egui::ComboBox::from_id_source("wallbox_preset")
            .selected_text(format_preset(self.form.preset, &tr))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut self.form.preset, None, format_preset(None, &tr));
                for preset in WallboxPreset::ALL {
                    let label = format!(
                        "{} ({})",
                        format_preset(Some(preset), &tr),
                        format_currency(preset.cost(), lang)
                    );
                    ui.selectable_value(&mut self.form.preset, Some(preset), label);
                }
            });
        changed |= before != self.form.preset;

        let itemized = self.form.preset.is_none();
        ui.add_enabled_ui(itemized, |ui| {
            ui.label(tr.t(keys::LABEL_DEVICE_COST));
            changed |= ui
                .add(
                    egui::Slider::new(&mut self.form.device_cost, 500.0..=5_000.0)
                        .step_by(100.0)
                        .suffix(" €"),
                )
                .changed();
            ui.label(tr.t(keys::LABEL_INSTALLATION_COST));
            changed |= ui
                .add(
                    egui::Slider::new(&mut self.form.installation_cost, 500.0..=5_000.0)
                        .step_by(100.0)
                        .suffix(" €"),
                )
                .changed();
        });
        ui.label(format!(
            "{}: {}",
            tr.t(keys::LABEL_WALLBOX_COST),
            format_currency(self.form.wallbox_cost(), lang)
        ));

        ui.label(tr.t(keys::LABEL_YEARS));
        changed |= ui
            .add(egui::Slider::new(&mut self.form.years_to_project, 1..=50))
            .changed();

        if !self.violations.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ERROR_COLOR, tr.t(keys::VALIDATION_HEADING));
            for v in &self.violations {
                ui.colored_label(ERROR_COLOR, format!("• {}", v.message(&tr)));
            }
        }
        changed
    }

    fn ui_report(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::GUI_REPORT_HEADING));
        ui.horizontal(|ui| {
            ui.label(tr.t(keys::LABEL_EMAIL));
            if ui.text_edit_singleline(&mut self.email).changed() {
                self.email_error = None;
            }
        });
        if let Some(err) = &self.email_error {
            ui.colored_label(ERROR_COLOR, err.as_str());
        }
        let mut save_clicked = false;
        let mut send_clicked = false;
        let sending = self.sending.is_some();
        ui.horizontal(|ui| {
            save_clicked = ui.button(tr.t(keys::GUI_SAVE_REPORT)).clicked();
            let send_label = if sending {
                tr.t(keys::GUI_SENDING)
            } else {
                tr.t(keys::GUI_SEND_REPORT)
            };
            send_clicked = ui
                .add_enabled(!sending, egui::Button::new(send_label))
                .clicked();
            if sending {
                ui.add(egui::Spinner::new());
            }
        });
        if save_clicked {
            self.save_report();
        }
        if send_clicked {
            self.send_report(ctx);
        }
    }

    fn ui_settings_window(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        let mut save_clicked = false;
        egui::Window::new(tr.t(keys::GUI_SETTINGS))
            .collapsible(false)
            .resizable(false)
            .open(&mut self.show_settings)
            .show(ctx, |ui| {
                ui.label(tr.t(keys::GUI_LANGUAGE));
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(self.lang_input.as_str())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(
                            &mut self.lang_input,
                            "auto".into(),
                            tr.t(keys::GUI_LANGUAGE_AUTO),
                        );
                        ui.selectable_value(&mut self.lang_input, "de-de".into(), "Deutsch");
                        ui.selectable_value(&mut self.lang_input, "en-us".into(), "English");
                    });
                ui.separator();
                ui.label(tr.t(keys::GUI_ALPHA));
                ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                ui.separator();
                save_clicked = ui.button(tr.t(keys::GUI_SAVE_SETTINGS)).clicked();
                if let Some(msg) = &self.settings_status {
                    ui.label(msg.as_str());
                }
            });
        if save_clicked {
            self.save_settings();
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_calculation();
        self.poll_sending();
        if self.pending.is_some() || self.sending.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // 투명도 적용
        let mut style = (*ctx.style()).clone();
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        let tr = self.tr.clone();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(tr.t(keys::APP_TITLE));
                ui.separator();
                if ui.button(tr.t(keys::GUI_SETTINGS)).clicked() {
                    self.show_settings = true;
                }
            });
            ui.small(tr.t(keys::APP_SUBTITLE));
        });

        if self.show_settings {
            self.ui_settings_window(ctx);
        }

        let expired = self
            .status
            .as_ref()
            .is_some_and(|s| s.since.elapsed() > STATUS_TTL);
        if expired {
            self.status = None;
        } else if self.status.is_some() {
            ctx.request_repaint_after(STATUS_TTL);
        }
        if let Some(status) = &self.status {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                let color = match status.kind {
                    StatusKind::Success => SAVINGS_COLOR,
                    StatusKind::Error => ERROR_COLOR,
                };
                ui.colored_label(color, status.text.as_str());
            });
        }

        egui::SidePanel::left("inputs")
            .resizable(true)
            .min_width(260.0)
            .default_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if self.ui_inputs(ui) {
                        self.on_form_changed();
                    }
                    ui.add_space(10.0);
                    let pending = self.pending.is_some();
                    ui.horizontal(|ui| {
                        let label = if pending {
                            tr.t(keys::GUI_CALCULATING)
                        } else {
                            tr.t(keys::GUI_CALCULATE)
                        };
                        if ui
                            .add_enabled(!pending, egui::Button::new(label))
                            .clicked()
                        {
                            self.start_calculation(ctx);
                        }
                        if pending {
                            ui.add(egui::Spinner::new());
                        }
                    });
                    if ui.button(tr.t(keys::GUI_RESET)).clicked() {
                        self.form = self.config.defaults;
                        self.on_form_changed();
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    let Some((_, result)) = self.computed.clone() else {
                        ui.label(tr.t(keys::GUI_EMPTY_STATE));
                        return;
                    };
                    summary_cards(ui, &result, &tr);
                    ui.add_space(8.0);
                    summary_text(ui, &result, &tr);
                    ui.separator();
                    ui.heading(tr.t(keys::GUI_CHART_TITLE));
                    chart_legend(ui, &tr);
                    draw_chart(ui, &result, tr.language());
                    ui.separator();
                    ui.heading(tr.t(keys::GUI_TABLE_TITLE));
                    yearly_table(ui, &result, &tr);
                    ui.separator();
                    self.ui_report(ui, ctx);
                });
        });
    }
}

fn spawn_calculation(
    model: RoiModel,
    input: CalculatorInput,
    delay: Duration,
    generation: u64,
    ctx: egui::Context,
) -> Receiver<CalculationOutcome> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        let result = model.project(&input);
        // 수신 측이 이미 취소되었으면 보낼 곳이 없다.
        if tx
            .send(CalculationOutcome {
                generation,
                input,
                result,
            })
            .is_ok()
        {
            ctx.request_repaint();
        }
    });
    rx
}

fn summary_cards(ui: &mut egui::Ui, result: &CalculatorResult, tr: &Translator) {
    let lang = tr.language();
    let cards = [
        (
            tr.t(keys::RESULT_SAVINGS_PER_YEAR),
            format_currency(result.savings_per_year, lang),
        ),
        (
            tr.t(keys::RESULT_SAVINGS_PER_MONTH),
            format_currency(result.savings_per_month, lang),
        ),
        (
            tr.t(keys::RESULT_BREAK_EVEN),
            format_payback(result.payback(), tr),
        ),
        (
            tr.tf(
                keys::RESULT_TOTAL_SAVINGS,
                &[("years", result.horizon().to_string())],
            ),
            format_currency(result.total_savings, lang),
        ),
    ];
    ui.horizontal_wrapped(|ui| {
        for (title, value) in cards {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_min_width(170.0);
                ui.vertical(|ui| {
                    ui.small(title);
                    ui.label(egui::RichText::new(value).strong().size(20.0));
                });
            });
        }
    });
}

fn summary_text(ui: &mut egui::Ui, result: &CalculatorResult, tr: &Translator) {
    let lang = tr.language();
    if let Payback::Years(years) = result.payback() {
        ui.label(tr.tf(
            keys::RESULT_SUMMARY_PAYBACK,
            &[
                ("years", format_decimal(years, 1, lang)),
                ("per_year", format_currency(result.savings_per_year, lang)),
                ("per_month", format_currency(result.savings_per_month, lang)),
            ],
        ));
    }
    ui.label(tr.tf(
        keys::RESULT_SUMMARY_TOTAL,
        &[
            ("years", result.horizon().to_string()),
            ("total", format_currency(result.total_savings, lang)),
            ("ratio", format_percentage(result.roi_ratio().abs(), lang)),
        ],
    ));
}

fn chart_legend(ui: &mut egui::Ui, tr: &Translator) {
    ui.horizontal(|ui| {
        for (key, color) in [
            (keys::GUI_CHART_HOME, HOME_COLOR),
            (keys::GUI_CHART_PUBLIC, PUBLIC_COLOR),
            (keys::GUI_CHART_SAVINGS, SAVINGS_COLOR),
        ] {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
            ui.painter().rect_filled(rect, 2.0, color);
            ui.label(tr.t(key));
            ui.add_space(8.0);
        }
    });
}

/// 세 시계열의 세로축 범위. 0을 항상 포함하고 유한값만 본다.
fn value_range(result: &CalculatorResult) -> (f64, f64) {
    let mut lo = 0.0_f64;
    let mut hi = 0.0_f64;
    for v in result
        .home_costs
        .iter()
        .chain(&result.public_costs)
        .chain(&result.cumulative_savings)
        .filter(|v| v.is_finite())
    {
        lo = lo.min(*v);
        hi = hi.max(*v);
    }
    if hi - lo < f64::EPSILON {
        hi = lo + 1.0;
    }
    (lo, hi)
}

/// (연도 인덱스, 값)을 차트 영역 좌표로 옮긴다.
fn to_screen(
    rect: egui::Rect,
    index: usize,
    count: usize,
    value: f64,
    range: (f64, f64),
) -> egui::Pos2 {
    let t = if count > 1 {
        index as f32 / (count - 1) as f32
    } else {
        0.5
    };
    let frac = ((value - range.0) / (range.1 - range.0)) as f32;
    egui::pos2(
        egui::lerp(rect.left()..=rect.right(), t),
        egui::lerp(rect.bottom()..=rect.top(), frac),
    )
}

fn axis_label(value: f64, lang: Language) -> String {
    match lang {
        Language::De => format!("{} €", format_decimal(value, 0, lang)),
        Language::En => format!("€{}", format_decimal(value, 0, lang)),
    }
}

fn draw_chart(ui: &mut egui::Ui, result: &CalculatorResult, lang: Language) {
    let n = result.horizon();
    if n == 0 {
        return;
    }
    let desired = egui::vec2(ui.available_width().max(300.0), 300.0);
    let (response, painter) = ui.allocate_painter(desired, egui::Sense::hover());
    let frame = response.rect;
    let plot = egui::Rect::from_min_max(
        frame.min + egui::vec2(90.0, 10.0),
        frame.max - egui::vec2(16.0, 24.0),
    );
    let text_color = ui.visuals().text_color();
    let axis_color = ui.visuals().weak_text_color();
    let font = egui::FontId::proportional(11.0);
    let range = value_range(result);

    painter.rect_stroke(plot, 0.0, egui::Stroke::new(1.0, axis_color));
    for i in 0..=4 {
        let value = range.0 + (range.1 - range.0) * f64::from(i) / 4.0;
        let y = to_screen(plot, 0, n, value, range).y;
        painter.line_segment(
            [egui::pos2(plot.left(), y), egui::pos2(plot.right(), y)],
            egui::Stroke::new(0.5, axis_color.gamma_multiply(0.5)),
        );
        painter.text(
            egui::pos2(plot.left() - 6.0, y),
            egui::Align2::RIGHT_CENTER,
            axis_label(value, lang),
            font.clone(),
            text_color,
        );
    }
    if range.0 < 0.0 {
        let y = to_screen(plot, 0, n, 0.0, range).y;
        painter.line_segment(
            [egui::pos2(plot.left(), y), egui::pos2(plot.right(), y)],
            egui::Stroke::new(1.0, axis_color),
        );
    }
    for (i, year) in result.years_data.iter().enumerate() {
        let x = to_screen(plot, i, n, range.0, range).x;
        painter.text(
            egui::pos2(x, plot.bottom() + 4.0),
            egui::Align2::CENTER_TOP,
            year.to_string(),
            font.clone(),
            text_color,
        );
    }

    for (values, color) in [
        (&result.home_costs, HOME_COLOR),
        (&result.public_costs, PUBLIC_COLOR),
        (&result.cumulative_savings, SAVINGS_COLOR),
    ] {
        if values.iter().any(|v| !v.is_finite()) {
            continue;
        }
        let points: Vec<egui::Pos2> = values
            .iter()
            .enumerate()
            .map(|(i, v)| to_screen(plot, i, n, *v, range))
            .collect();
        for p in &points {
            painter.circle_filled(*p, 3.0, color);
        }
        painter.add(egui::Shape::line(points, egui::Stroke::new(2.0, color)));
    }

    if let Some(pos) = response.hover_pos() {
        let t = ((pos.x - plot.left()) / plot.width()).clamp(0.0, 1.0);
        let idx = ((t * (n.saturating_sub(1)) as f32).round() as usize).min(n - 1);
        response.on_hover_ui_at_pointer(|ui| {
            ui.strong(format!("{}", result.years_data[idx]));
            ui.colored_label(HOME_COLOR, format_currency(result.home_costs[idx], lang));
            ui.colored_label(PUBLIC_COLOR, format_currency(result.public_costs[idx], lang));
            ui.colored_label(
                SAVINGS_COLOR,
                format_currency(result.cumulative_savings[idx], lang),
            );
        });
    }
}

fn yearly_table(ui: &mut egui::Ui, result: &CalculatorResult, tr: &Translator) {
    let lang = tr.language();
    egui::Grid::new("yearly_table")
        .striped(true)
        .num_columns(5)
        .spacing([18.0, 4.0])
        .show(ui, |ui| {
            ui.strong(tr.t(keys::TABLE_YEAR));
            ui.strong(tr.t(keys::TABLE_HOME_PER_YEAR));
            ui.strong(tr.t(keys::TABLE_PUBLIC_PER_YEAR));
            ui.strong(tr.t(keys::TABLE_SAVINGS_PER_YEAR));
            ui.strong(tr.t(keys::TABLE_CUMULATIVE_SAVINGS));
            ui.end_row();
            for row in result.rows() {
                ui.label(format_number(f64::from(row.year), lang));
                ui.label(format_currency(result.home_cost_per_year, lang));
                ui.label(format_currency(result.public_cost_per_year, lang));
                ui.label(format_currency(result.savings_per_year, lang));
                let color = if row.cumulative_savings < 0.0 {
                    ERROR_COLOR
                } else {
                    SAVINGS_COLOR
                };
                ui.colored_label(color, format_currency(row.cumulative_savings, lang));
                ui.end_row();
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallbox_roi::roi::calculate_roi;

    fn sample() -> CalculatorResult {
        calculate_roi(&CalculatorInput::new(15_000.0, 0.30, 2_200.0).with_years(10))
    }

    #[test]
    fn value_range_spans_negative_savings_and_costs() {
        let (lo, hi) = value_range(&sample());
        assert_eq!(lo, -1_300.0);
        assert!((hi - 18_000.0).abs() < 1e-9);
    }

    #[test]
    fn value_range_never_collapses() {
        let res = calculate_roi(&CalculatorInput::new(0.0, 0.30, 0.0).with_years(3));
        let (lo, hi) = value_range(&res);
        assert!(hi > lo);
    }

    #[test]
    fn to_screen_maps_extremes_to_edges() {
        let rect = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(100.0, 50.0));
        let bottom_left = to_screen(rect, 0, 5, -10.0, (-10.0, 10.0));
        let top_right = to_screen(rect, 4, 5, 10.0, (-10.0, 10.0));
        assert_eq!(bottom_left, egui::pos2(0.0, 50.0));
        assert_eq!(top_right, egui::pos2(100.0, 0.0));
    }

    #[test]
    fn form_change_discards_pending_calculation() {
        let mut app = GuiApp::new(config::Config::default());
        let (_tx, rx) = mpsc::channel();
        let stale = app.generation;
        app.pending = Some(PendingCalculation {
            generation: stale,
            rx,
        });
        app.on_form_changed();
        assert!(app.pending.is_none());
        let accepted = app.accept_outcome(CalculationOutcome {
            generation: stale,
            input: CalculatorInput::new(15_000.0, 0.30, 2_200.0),
            result: sample(),
        });
        assert!(!accepted);
        assert!(app.computed.is_none());
    }

    #[test]
    fn invalid_form_reports_violations() {
        let mut app = GuiApp::new(config::Config::default());
        app.form.km_per_year = 500.0;
        assert!(app.begin_calculation().is_none());
        assert_eq!(app.violations.len(), 1);
    }

    #[test]
    fn current_outcome_is_accepted() {
        let mut app = GuiApp::new(config::Config::default());
        let input = app.begin_calculation().unwrap();
        let accepted = app.accept_outcome(CalculationOutcome {
            generation: app.generation,
            input,
            result: sample(),
        });
        assert!(accepted);
        assert!(app.build_report().is_some());
    }
}

// src/gui/app.rs
use std::{error::Error, path::PathBuf};

use eframe::egui;

use crate::{
    config::ViewerOptions,
    data::DataSet,
    viewer::{Session, ViewerCommand},
};

use super::components::{action_bar, data_table, summary, upload};

pub fn run(options: eframe::NativeOptions, viewer: ViewerOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Crypto CSV Viewer",
        options,
        Box::new(move |_cc| Ok(Box::new(App::new(viewer)))),
    )?;
    Ok(())
}

pub struct App {
    pub opts: ViewerOptions,

    // loaded table + diff (None until something is loaded)
    pub session: Option<Session>,
    // summary as display strings, built once per load
    pub summary_view: Option<DataSet>,
    // numeric-column flags for both tables, also built once per load
    pub data_numeric: Vec<bool>,
    pub summary_numeric: Vec<bool>,

    pub status: String,

    // text fields
    pub upload_path_text: String,
    pub download_path_text: String,

    // set by widgets, handled at the end of the frame
    pub pending: Option<ViewerCommand>,
}

impl App {
    pub fn new(opts: ViewerOptions) -> Self {
        let mut app = Self {
            opts,
            session: None,
            summary_view: None,
            data_numeric: Vec::new(),
            summary_numeric: Vec::new(),
            status: s!("Idle"),
            upload_path_text: s!(),
            download_path_text: s!(),
            pending: None,
        };
        app.reload();
        app
    }

    /// (Re)open the data file. Missing file → upload prompt.
    pub fn reload(&mut self) {
        match Session::open(&self.opts) {
            Ok(Some(s)) => self.set_session(s),
            Ok(None) => {
                self.session = None;
                self.summary_view = None;
                self.status = format!(
                    "No `{}` found. You can upload a CSV below.",
                    self.opts.data_path.display()
                );
            }
            Err(e) => {
                loge!("Viewer: Failed to read {}: {}", self.opts.data_path.display(), e);
                self.status = format!("Failed to read {}: {e}", self.opts.data_path.display());
            }
        }
    }

    pub fn load_upload(&mut self, name: &str, bytes: &[u8]) {
        match Session::from_upload(&self.opts, name, bytes) {
            Ok(s) => self.set_session(s),
            Err(e) => {
                loge!("Viewer: Upload {} failed: {}", name, e);
                self.status = format!("Failed to read uploaded CSV: {e}");
            }
        }
    }

    /// Read the file named in the upload text field.
    pub fn load_upload_path(&mut self) {
        let path = PathBuf::from(self.upload_path_text.trim());
        match std::fs::read(&path) {
            Ok(bytes) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.load_upload(&name, &bytes);
            }
            Err(e) => {
                logd!("Viewer: Cannot open {}: {}", path.display(), e);
                self.status = format!("Cannot open {}: {e}", path.display());
            }
        }
    }

    fn set_session(&mut self, s: Session) {
        self.download_path_text = self
            .opts
            .download_dir
            .join(s.download_name())
            .to_string_lossy()
            .into_owned();
        self.summary_view = s.comparison.summary().map(|t| t.to_dataset());
        self.data_numeric = s.table.numeric_columns();
        self.summary_numeric = self
            .summary_view
            .as_ref()
            .map(DataSet::numeric_columns)
            .unwrap_or_default();
        self.status = s
            .notices
            .first()
            .map(|n| s!(n.text()))
            .unwrap_or_else(|| s!("Ready"));
        self.session = Some(s);
    }

    pub fn download(&mut self) {
        let Some(session) = &self.session else {
            self.status = s!("Nothing to download");
            return;
        };
        let path = PathBuf::from(self.download_path_text.trim());
        self.status = match session.save_download(&path) {
            Ok(p) => format!("Saved: {}", p.display()),
            Err(e) => {
                loge!("Viewer: Download failed {}: {}", path.display(), e);
                format!("Could not prepare CSV for download: {e}")
            }
        };
    }

    #[inline]
    pub fn request_close(&mut self) {
        self.pending = Some(ViewerCommand::Close);
    }

    #[inline]
    pub fn take_command(&mut self) -> Option<ViewerCommand> {
        self.pending.take()
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Enter outside a text field presses "Close"
        if !ctx.wants_keyboard_input() && ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.request_close();
        }

        if self.session.is_none() {
            let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
            if let Some(file) = dropped {
                upload::accept_drop(self, file);
            }
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading("Crypto CSV Viewer");
            ui.label(&self.status);
            if let Some(s) = &self.session {
                for w in s.warnings() {
                    ui.colored_label(egui::Color32::from_rgb(0xF0, 0xD2, 0x3C), w);
                }
            }
        });

        egui::TopBottomPanel::bottom("actions").show(ctx, |ui| {
            action_bar::draw(ui, self);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(session) = &self.session {
                let avail = ui.available_height();
                ui.strong("Data");
                data_table::draw(
                    ui,
                    "data_table",
                    &session.table,
                    &self.data_numeric,
                    avail * 0.55,
                    |_, _| None,
                );
                ui.separator();
                summary::draw(ui, session, self.summary_view.as_ref(), &self.summary_numeric);
            } else {
                upload::draw(ui, self);
            }
        });

        if let Some(ViewerCommand::Close) = self.take_command() {
            logf!("Viewer: Close requested");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

mod components;
pub mod config;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::{Rc, Weak};

use graph_core::csv::{read_csv, write_csv};
use graph_core::sync::PlotSync;
use graph_core::table::DataTable;

use self::components::{Editor, PlotPanel};
use config::Config;

pub struct GraphEdApp {
    config: Config,
    table: DataTable,
    plot_sync: Rc<RefCell<PlotSync>>,
    editor: Editor,
    plot_panel: PlotPanel,
    current_file: Option<PathBuf>,
    error_message: Option<String>,
    shortcuts_modal_open: bool,
}

impl GraphEdApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let mut table = DataTable::new(&config.x_label, &config.y_label);
        let plot_sync = Rc::new(RefCell::new(PlotSync::new()));
        let weak: Weak<RefCell<PlotSync>> = Rc::downgrade(&plot_sync);
        table.subscribe(weak);

        Self {
            config,
            table,
            plot_sync,
            editor: Editor::default(),
            plot_panel: PlotPanel::new(),
            current_file: None,
            error_message: None,
            shortcuts_modal_open: false,
        }
    }
}

impl eframe::App for GraphEdApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut should_quit = false;
        let mut open_requested = false;
        let mut save_requested = false;

        // Handle keyboard input. The file dialogs block, so they run
        // outside the input closure.
        ctx.input_mut(|i| {
            if i.consume_key(egui::Modifiers::CTRL, egui::Key::O) {
                open_requested = true;
            }
            if i.consume_key(egui::Modifiers::CTRL, egui::Key::S) {
                save_requested = true;
            }
            if i.key_pressed(egui::Key::F1) {
                self.shortcuts_modal_open = !self.shortcuts_modal_open;
            }
            if i.key_pressed(egui::Key::F10) {
                should_quit = true;
            }
        });
        if open_requested {
            self.open_file_dialog();
        }
        if save_requested {
            self.save_current_file();
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.render_shortcut_modal(ctx);
            self.render_error_modal(ctx);
            self.menu(ui, ctx);
        });

        egui::SidePanel::left("data_grid_panel")
            .min_width(220.0)
            .show(ctx, |ui| {
                self.editor.render(&mut self.table, ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let plot_sync = self.plot_sync.borrow();
            self.plot_panel.render(
                plot_sync.geometry(),
                self.table.x_label(),
                self.table.y_label(),
                ui,
                ctx,
            );
        });

        if should_quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

impl GraphEdApp {
    fn menu(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open…").clicked() {
                    self.open_file_dialog();
                    ui.close_menu();
                }
                if ui.button("Save").clicked() {
                    self.save_current_file();
                    ui.close_menu();
                }
                if ui.button("Save As…").clicked() {
                    self.save_file_dialog();
                    ui.close_menu();
                }
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.toggle_value(&mut self.shortcuts_modal_open, "Help (F1)");

            if let Some(path) = &self.current_file {
                ui.label(path.display().to_string());
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                egui::widgets::global_theme_preference_buttons(ui);
            });
        });
    }

    fn open_file_dialog(&mut self) {
        log::debug!("open dialog to select data file");
        let picked = rfd::FileDialog::new()
            .add_filter("CSV File", &["csv"])
            .set_directory(&self.config.data_dir)
            .pick_file();
        if let Some(path) = picked {
            self.load_file(path);
        }
    }

    fn load_file(&mut self, path: PathBuf) {
        match read_csv(&path) {
            Ok(contents) => {
                log::info!("loaded {} rows from {:?}", contents.rows.len(), path);
                self.table
                    .replace(contents.x_label, contents.y_label, contents.rows);
                self.current_file = Some(path);
            }
            // The table is left as it was.
            Err(err) => self.report_error(err.to_string()),
        }
    }

    fn save_current_file(&mut self) {
        match self.current_file.clone() {
            Some(path) => self.save_file(path),
            None => self.save_file_dialog(),
        }
    }

    fn save_file_dialog(&mut self) {
        log::debug!("open dialog to select save path");
        let picked = rfd::FileDialog::new()
            .add_filter("CSV File", &["csv"])
            .set_directory(&self.config.data_dir)
            .set_file_name("data.csv")
            .save_file();
        if let Some(path) = picked {
            self.save_file(path);
        }
    }

    fn save_file(&mut self, path: PathBuf) {
        match write_csv(&path, &self.table) {
            Ok(()) => {
                log::info!("saved {} rows to {:?}", self.table.row_count(), path);
                self.current_file = Some(path);
            }
            Err(err) => self.report_error(err.to_string()),
        }
    }

    fn report_error(&mut self, message: String) {
        log::error!("{}", message);
        self.error_message = Some(message);
    }

    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = &self.error_message {
            if egui::Modal::new("error_modal".into())
                .show(ctx, |ui| {
                    ui.heading("File Error");
                    ui.separator();
                    ui.label(message);
                })
                .should_close()
            {
                self.error_message = None;
            }
        }
    }

    fn render_shortcut_modal(&mut self, ctx: &egui::Context) {
        if self.shortcuts_modal_open
            && egui::Modal::new("shortcut_modal".into())
                .show(ctx, |ui| {
                    ui.heading("Keyboard Shortcuts");
                    ui.separator();
                    ui.label("CTRL + O = Open Data File");
                    ui.separator();
                    ui.label("CTRL + S = Save Data File");
                    ui.separator();
                    ui.label("F1 = Show Keyboard Shortcuts");
                    ui.separator();
                    ui.label("F10 = Quit App");
                })
                .should_close()
        {
            self.shortcuts_modal_open = false;
        }
    }
}

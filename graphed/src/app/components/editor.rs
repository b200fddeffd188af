use graph_core::table::DataTable;

/// The editable data grid. All edits are routed through [`DataTable`]
/// mutations, so the plot follows without further wiring.
#[derive(Default)]
pub struct Editor {
    /// Deletion is deferred to after the grid loop so row indices stay
    /// valid while rendering.
    pending_removal: Option<usize>,
}

impl Editor {
    pub fn render(&mut self, table: &mut DataTable, ui: &mut egui::Ui) {
        ui.heading("Data");

        // Column labels.
        ui.horizontal(|ui| {
            let mut x_label = table.x_label().to_owned();
            if ui
                .add(egui::TextEdit::singleline(&mut x_label).desired_width(80.0))
                .changed()
            {
                table.set_x_label(x_label);
            }
            let mut y_label = table.y_label().to_owned();
            if ui
                .add(egui::TextEdit::singleline(&mut y_label).desired_width(80.0))
                .changed()
            {
                table.set_y_label(y_label);
            }
        });

        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("data_grid")
                .striped(true)
                .num_columns(3)
                .show(ui, |ui| {
                    ui.label(table.x_label().to_owned());
                    ui.label(table.y_label().to_owned());
                    ui.label("");
                    ui.end_row();

                    for row in 0..table.row_count() {
                        let Some(record) = table.row(row) else {
                            continue;
                        };
                        let mut x = record.x;
                        let mut y = record.y;
                        if ui.add(egui::DragValue::new(&mut x).speed(0.1)).changed() {
                            table.set_value(row, 0, x);
                        }
                        if ui.add(egui::DragValue::new(&mut y).speed(0.1)).changed() {
                            table.set_value(row, 1, y);
                        }
                        if ui
                            .button("✖")
                            .on_hover_text("Remove this row")
                            .clicked()
                        {
                            self.pending_removal = Some(row);
                        }
                        ui.end_row();
                    }
                });
        });

        if let Some(row) = self.pending_removal.take() {
            table.remove_rows(row, row);
        }

        ui.separator();

        if ui.button("Add Row").clicked() {
            let row = table.row_count();
            table.insert_row(row);
            // Populating the fresh row pushes it into the plot cache.
            table.set_row(row, 0.0, 0.0);
        }
    }
}

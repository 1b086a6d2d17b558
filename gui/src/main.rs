use eframe::egui;
use egui_plot::{Bar, BarChart, Plot};
use esi_rank_core::{ArchiveClient, Error, PlanetRecord, RunState, Status, WeightConfig};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([500.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Calcul de l'ESI des exoplanètes",
        options,
        Box::new(|_cc| Box::new(EsiApp::default())),
    )
    .map_err(|e| anyhow::anyhow!("Échec de l'ouverture de la fenêtre: {}", e))
}

/// Étape restant à exécuter à la prochaine frame
enum PendingStep {
    Fetch(WeightConfig),
    Compute(WeightConfig, Vec<PlanetRecord>),
}

#[derive(Default)]
struct EsiApp {
    state: RunState,
    client: Option<ArchiveClient>,
    /// Chaque étape attend la frame suivante pour que le statut soit affiché
    pending: Option<PendingStep>,
    error_message: Option<String>,
}

impl eframe::App for EsiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(step) = self.pending.take() {
            self.execute_step(step, ctx);
        }

        egui::TopBottomPanel::top("weights_panel").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.label("Définissez les poids de chaque paramètre (la somme doit être 1) :");
            egui::Grid::new("weights_grid")
                .num_columns(2)
                .spacing([10.0, 4.0])
                .show(ui, |ui| {
                    ui.label("Rayon :");
                    ui.add(egui::TextEdit::singleline(&mut self.state.radius_text).desired_width(50.0));
                    ui.end_row();

                    ui.label("Densité :");
                    ui.add(egui::TextEdit::singleline(&mut self.state.density_text).desired_width(50.0));
                    ui.end_row();

                    ui.label("Température :");
                    ui.add(egui::TextEdit::singleline(&mut self.state.temp_text).desired_width(50.0));
                    ui.end_row();
                });

            ui.add_space(4.0);
            let busy = self.state.status.is_busy();
            if ui
                .add_enabled(!busy, egui::Button::new("Calculer l'ESI"))
                .clicked()
            {
                self.start_run(ctx);
            }

            ui.label(
                egui::RichText::new(self.state.status.to_string()).color(status_color(&self.state.status)),
            );
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.table.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label("Lancez le calcul pour voir le classement");
                });
                return;
            }

            let bars: Vec<Bar> = self
                .state
                .table
                .iter()
                .map(|row| Bar::new(row.rank as f64, row.score).name(&row.name))
                .collect();
            Plot::new("esi_plot")
                .height(120.0)
                .include_y(0.0)
                .include_y(1.0)
                .allow_drag(false)
                .allow_zoom(false)
                .allow_scroll(false)
                .show(ui, |plot_ui| plot_ui.bar_chart(BarChart::new(bars)));

            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("ranking_grid")
                    .num_columns(2)
                    .spacing([20.0, 4.0])
                    .striped(true)
                    .show(ui, |ui| {
                        ui.strong("Nom de l'exoplanète");
                        ui.strong("ESI");
                        ui.end_row();

                        for row in &self.state.table {
                            ui.label(row.name.as_str());
                            ui.label(format!("{:.5}", row.score));
                            ui.end_row();
                        }
                    });
            });
        });

        if let Some(message) = self.error_message.clone() {
            egui::Window::new("Erreur")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }
    }
}

impl EsiApp {
    fn start_run(&mut self, ctx: &egui::Context) {
        // Poids invalides : erreur immédiate, aucune requête réseau
        match self.state.prepare() {
            Ok(weights) => {
                self.pending = Some(PendingStep::Fetch(weights));
                ctx.request_repaint();
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
            }
        }
    }

    fn execute_step(&mut self, step: PendingStep, ctx: &egui::Context) {
        match step {
            PendingStep::Fetch(weights) => {
                if self.client.is_none() {
                    match ArchiveClient::new() {
                        Ok(client) => self.client = Some(client),
                        Err(e) => {
                            error!("{}", e);
                            self.state.status = Status::Failed(e.to_string());
                            self.error_message = Some(e.to_string());
                            return;
                        }
                    }
                }
                let Some(client) = self.client.as_ref() else {
                    return;
                };

                match self.state.fetch(client) {
                    Ok(records) => {
                        // Le statut "calcul" sera affiché avant le classement
                        self.pending = Some(PendingStep::Compute(weights, records));
                        ctx.request_repaint();
                    }
                    Err(e) => self.report(e),
                }
            }
            PendingStep::Compute(weights, records) => {
                if let Err(e) = self.state.compute(&records, &weights) {
                    self.report(e);
                }
            }
        }
    }

    fn report(&mut self, e: Error) {
        if e.is_fatal() {
            self.error_message = Some(e.to_string());
        }
    }
}

fn status_color(status: &Status) -> egui::Color32 {
    match status {
        Status::Idle => egui::Color32::GRAY,
        Status::Fetching | Status::Computing => egui::Color32::LIGHT_BLUE,
        Status::Done(_) => egui::Color32::from_rgb(0, 200, 0),
        Status::NoResults | Status::Failed(_) => egui::Color32::RED,
    }
}

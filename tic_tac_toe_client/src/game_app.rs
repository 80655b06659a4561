use eframe::egui;
use tic_tac_toe_core::{Cell, Marker, MoveRequest};
use tracing::error;

use crate::{config::AppConfig, game_service::GameService};

pub struct GameApp {
    config: AppConfig,
    input_name_x: String,
    input_name_o: String,
    game_service: Option<GameService>,
    error_message: Option<String>,
}

impl GameApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            input_name_x: config.player_x.clone(),
            input_name_o: config.player_o.clone(),
            config,
            game_service: None,
            error_message: None,
        }
    }
}

impl eframe::App for GameApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.group(|ui| {
                    ui.set_width(400.0);
                    ui.set_height(500.0);

                    if self.game_service.is_some() {
                        self.handle_game_ui(ui);
                    } else {
                        self.handle_setup_ui(ui);
                    }
                });
            });
        });
    }
}

impl GameApp {
    fn handle_setup_ui(&mut self, ui: &mut egui::Ui) {
        ui.label("Player X name:");
        ui.add_space(3.0);
        ui.text_edit_singleline(&mut self.input_name_x);

        ui.add_space(10.0);

        ui.label("Player O name:");
        ui.add_space(3.0);
        ui.text_edit_singleline(&mut self.input_name_o);

        ui.add_space(10.0);

        if ui
            .add(egui::Button::new("Start Game").min_size(egui::vec2(100.0, 30.0)))
            .clicked()
        {
            self.game_service = Some(GameService::start(
                &self.input_name_x,
                &self.input_name_o,
                self.config.next_starter,
            ));
            self.error_message = None;
        }
    }

    fn handle_game_ui(&mut self, ui: &mut egui::Ui) {
        self.render_board(ui);

        ui.add_space(10.0);

        if let Some(error) = &self.error_message {
            ui.colored_label(egui::Color32::RED, error);
            ui.add_space(10.0);
        }

        self.display_game_status(ui);

        ui.add_space(5.0);

        let Some(service) = self.game_service.as_mut() else {
            return;
        };

        if service.status().is_finished()
            && ui
                .button(
                    egui::RichText::new("🔄 Play again")
                        .size(25.0)
                        .color(egui::Color32::from_rgb(240, 148, 0)),
                )
                .clicked()
        {
            service.play_again();
            self.error_message = None;
        }
    }

    fn render_board(&mut self, ui: &mut egui::Ui) {
        let Some(service) = self.game_service.as_ref() else {
            return;
        };

        let snapshot = service.snapshot();
        let winning_cells: Vec<Cell> = snapshot
            .result
            .and_then(|outcome| outcome.line())
            .map(|line| line.cells().to_vec())
            .unwrap_or_default();

        let button_size = 100.0;
        let mut clicked = None;

        ui.vertical_centered(|ui| {
            for (row, cells) in snapshot.board.iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.add_space(40.0);
                    for (col, cell) in cells.iter().enumerate() {
                        let can_move = snapshot.running && cell.is_none();
                        let highlighted = winning_cells
                            .iter()
                            .any(|c| c.row() == row && c.col() == col);

                        let label = match cell {
                            Some(Marker::X) => egui::RichText::new("X")
                                .size(50.0)
                                .color(egui::Color32::from_rgb(255, 99, 71)),
                            Some(Marker::O) => egui::RichText::new("O")
                                .size(50.0)
                                .color(egui::Color32::from_rgb(34, 139, 34)),
                            None => egui::RichText::new(" ")
                                .size(50.0)
                                .color(egui::Color32::from_rgb(180, 180, 180)),
                        };

                        let mut button =
                            egui::Button::new(label).min_size(egui::vec2(button_size, button_size));
                        if highlighted {
                            button = button.fill(egui::Color32::from_rgb(255, 215, 0));
                        }

                        if ui.add_enabled(can_move, button).clicked() {
                            clicked = Some(MoveRequest { row, col });
                        }
                    }
                });
            }
        });

        if let Some(request) = clicked {
            self.make_move(request);
        }
    }

    fn make_move(&mut self, request: MoveRequest) {
        let Some(service) = self.game_service.as_mut() else {
            return;
        };

        match service.make_move(request) {
            Ok(_) => self.error_message = None,
            Err(e) => {
                error!("❌ Move failed: {}", e);
                self.error_message = Some(format!("Error making move: {}", e));
            }
        }
    }

    fn display_game_status(&self, ui: &mut egui::Ui) {
        let Some(service) = self.game_service.as_ref() else {
            return;
        };

        ui.label(
            egui::RichText::new(service.scores().to_string())
                .size(24.0)
                .color(egui::Color32::from_rgb(0, 191, 255)),
        );

        ui.add_space(10.0);

        let status = service.status();
        let color = if status.is_finished() {
            egui::Color32::from_rgb(255, 0, 0)
        } else {
            egui::Color32::from_rgb(0, 255, 0)
        };

        ui.label(egui::RichText::new(status.to_string()).size(30.0).color(color));
    }
}

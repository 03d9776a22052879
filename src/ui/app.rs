//! Main application for the Reversi GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use super::board_view::BoardView;
use super::game_state::GameState;
use super::theme::*;
use crate::config::{AppConfig, PlayMode};
use crate::game::{EndReason, GameOutcome};
use crate::Side;

/// Main Reversi application
pub struct ReversiApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
}

impl ReversiApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        Self {
            state: GameState::new(config),
            board_view: BoardView::default(),
            show_debug: true,
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (Play Black)").clicked() {
                        self.state.set_mode(PlayMode::HumanBlack);
                        ui.close_menu();
                    }
                    if ui.button("New Game (Play White)").clicked() {
                        self.state.set_mode(PlayMode::HumanWhite);
                        ui.close_menu();
                    }
                    if ui.button("Watch AI vs AI").clicked() {
                        self.state.set_mode(PlayMode::Watch);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Undo (U)").clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.state.mode {
                        PlayMode::HumanBlack => "You: Black".to_string(),
                        PlayMode::HumanWhite => "You: White".to_string(),
                        PlayMode::Watch => format!(
                            "{} vs {}",
                            self.state.engine_name(Side::Black),
                            self.state.engine_name(Side::White)
                        ),
                    };
                    ui.label(mode_text);
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);

                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_discs_card(ui);
                ui.add_space(10.0);

                self.render_actions_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(outcome) = self.state.outcome.clone() {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, &outcome);
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("●○").size(20.0).color(TEXT_SECONDARY));
            ui.add_space(4.0);
            ui.label(RichText::new("REVERSI").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("6 × 6").size(11.0).color(TEXT_MUTED));
        });
    }

    /// Render turn indicator card
    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let side = self.state.to_move();
            let (fill, name) = match side {
                Side::Black => (BLACK_DISC, "BLACK"),
                Side::White => (WHITE_DISC, "WHITE"),
            };

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 20.0, fill);
                ui.painter().circle_stroke(rect.center(), 20.0, egui::Stroke::new(1.0, TEXT_MUTED));

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(name).size(18.0).strong().color(TEXT_PRIMARY));

                    let status = if self.state.is_over() {
                        "Game Over".to_string()
                    } else if self.state.is_ai_thinking() {
                        let secs = self.state.ai_thinking_elapsed().unwrap_or_default().as_secs_f32();
                        format!("AI thinking... {secs:.1}s")
                    } else if self.state.is_human_turn() {
                        format!("Your turn ({:.0}s)", self.state.move_timer.elapsed().as_secs_f32())
                    } else {
                        "AI to move".to_string()
                    };
                    let color = if self.state.is_ai_thinking() { STATUS_WARNING } else { STATUS_OK };
                    ui.label(RichText::new(status).size(12.0).color(color));
                });
            });
        });
    }

    /// Disc counts per side
    fn render_discs_card(&self, ui: &mut egui::Ui) {
        let board = self.state.game.board();
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("DISCS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            for side in [Side::Black, Side::White] {
                ui.horizontal(|ui| {
                    let symbol = match side {
                        Side::Black => "●",
                        Side::White => "○",
                    };
                    ui.label(RichText::new(symbol).size(18.0).color(TEXT_PRIMARY));
                    ui.label(RichText::new(self.state.engine_name(side)).size(11.0).color(TEXT_SECONDARY));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(RichText::new(board.count(side).to_string()).size(16.0).strong().color(TEXT_PRIMARY));
                    });
                });
            }

            ui.add_space(4.0);
            ui.label(RichText::new(format!("{} empty", board.empty_count())).size(10.0).color(TEXT_MUTED));
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let btn_frame = Frame::new()
                    .fill(egui::Color32::from_rgb(50, 53, 58))
                    .corner_radius(CornerRadius::same(6))
                    .inner_margin(8.0);

                btn_frame.show(ui, |ui| {
                    if ui.add(egui::Label::new(RichText::new("↩ Undo").size(12.0).color(TEXT_PRIMARY)).sense(egui::Sense::click())).clicked() {
                        self.state.undo();
                    }
                });

                ui.add_space(4.0);

                btn_frame.show(ui, |ui| {
                    if ui.add(egui::Label::new(RichText::new("New Game").size(12.0).color(TEXT_PRIMARY)).sense(egui::Sense::click())).clicked() {
                        self.state.reset();
                    }
                });
            });

            ui.add_space(8.0);
            ui.label(RichText::new(format!("Turn #{}", self.state.game.turns().len())).size(11.0).color(TEXT_SECONDARY));
        });
    }

    /// Stats of the last AI search
    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Frame::new()
            .fill(egui::Color32::from_rgb(30, 33, 38))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
                ui.add_space(6.0);

                let Some(result) = &self.state.last_ai_result else {
                    ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                    return;
                };

                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        let score = result.score.map_or("-".to_string(), |s| s.to_string());
                        ui.label(RichText::new(format!("Score: {score}")).size(11.0).strong().color(STATUS_OK));
                        ui.label(
                            RichText::new(format!("{} legal, {} filtered", result.legal_moves, result.filtered))
                                .size(10.0)
                                .color(TEXT_SECONDARY),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(format!("{}ms", result.time_ms)).size(10.0).color(TEXT_SECONDARY));
                            ui.label(RichText::new(format!("{} nodes", result.nodes)).size(10.0).color(TEXT_MUTED));
                            ui.label(RichText::new(format!("{} cutoffs", result.cutoffs)).size(10.0).color(TEXT_MUTED));
                        });
                    });
                });

                ui.label(
                    RichText::new(format!("{} of {} candidates searched, {} leaves", result.searched, result.legal_moves, result.leaves))
                        .size(10.0)
                        .color(TEXT_MUTED),
                );

                if let Some(think) = self.state.move_timer.ai_thinking_time {
                    ui.label(RichText::new(format!("Last AI: {:.3}s", think.as_secs_f32())).size(10.0).color(TEXT_SECONDARY));
                }

                if result.timed_out {
                    ui.label(RichText::new("time limit hit").size(10.0).color(STATUS_WARNING));
                }

                if let Some(pos) = result.best_move {
                    ui.add_space(4.0);
                    ui.label(RichText::new(format!("→ {pos}")).size(12.0).strong().color(WIN_HIGHLIGHT));
                }
            });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui, outcome: &GameOutcome) {
        let headline = match outcome.winner {
            Some(Side::Black) => "BLACK WINS!",
            Some(Side::White) => "WHITE WINS!",
            None => "DRAW",
        };
        let detail = match &outcome.reason {
            EndReason::NoMovesLeft => format!("{} - {}", outcome.black_discs, outcome.white_discs),
            EndReason::Forfeit { side, .. } => format!("{side} forfeits"),
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(18.0).strong().color(WIN_HIGHLIGHT));
                    ui.add_space(4.0);
                    ui.label(RichText::new(detail).size(12.0).color(TEXT_SECONDARY));
                    ui.add_space(12.0);

                    Frame::new()
                        .fill(egui::Color32::from_rgb(60, 100, 70))
                        .corner_radius(CornerRadius::same(6))
                        .inner_margin(10.0)
                        .show(ui, |ui| {
                            if ui
                                .add(egui::Label::new(RichText::new("New Game").size(14.0).strong().color(TEXT_PRIMARY)).sense(egui::Sense::click()))
                                .clicked()
                            {
                                self.state.reset();
                            }
                        });
                });
            });
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("⚠").size(14.0).color(STATUS_CRITICAL));
                    ui.add_space(4.0);
                    ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
                });
            });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().visuals.panel_fill = egui::Color32::from_rgb(40, 42, 46);

            let legal = self.state.legal_moves();
            let accept_input = self.state.is_human_turn() && !self.state.is_over();

            let clicked = self.board_view.show(
                ui,
                self.state.game.board(),
                self.state.to_move(),
                &legal,
                self.state.game.last_move(),
                accept_input,
            );

            if let Some(pos) = clicked {
                if let Err(msg) = self.state.try_play(pos) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        ctx.input(|i| {
            // D - Toggle debug panel
            if i.key_pressed(egui::Key::D) {
                self.show_debug = !self.show_debug;
            }

            // U - Undo
            if i.key_pressed(egui::Key::U) {
                self.state.undo();
            }

            // N - New game
            if i.key_pressed(egui::Key::N) {
                self.state.reset();
            }
        });
    }
}

impl eframe::App for ReversiApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.state.check_ai_result();
        self.state.start_ai_thinking();

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.state.is_ai_thinking() {
            ctx.request_repaint();
        } else if let Some(delay) = self.state.ai_delay_remaining() {
            ctx.request_repaint_after(delay);
        } else if self.state.is_human_turn() && !self.state.is_over() {
            // Keep the move timer ticking
            ctx.request_repaint_after(std::time::Duration::from_millis(200));
        }
    }
}

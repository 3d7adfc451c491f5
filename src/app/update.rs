use crate::engine::{Event, InteractionState, ViewState, geometry};
use crate::model;
use eframe::egui;

use super::render::{draw_area_layer, draw_background, draw_bbox_layer};
use super::{BboxApp, View};

fn cursor_icon(style: model::CursorStyle) -> egui::CursorIcon {
    match style {
        model::CursorStyle::Grab => egui::CursorIcon::Grab,
        model::CursorStyle::Grabbing => egui::CursorIcon::Grabbing,
        model::CursorStyle::Pointer => egui::CursorIcon::PointingHand,
        model::CursorStyle::NotAllowed => egui::CursorIcon::NotAllowed,
        model::CursorStyle::ResizeHorizontal => egui::CursorIcon::ResizeHorizontal,
        model::CursorStyle::ResizeVertical => egui::CursorIcon::ResizeVertical,
    }
}

fn view_state(view: &View) -> ViewState {
    ViewState {
        latitude: view.center.y,
        longitude: view.center.x,
    }
}

impl eframe::App for BboxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut effects = Vec::new();

        ctx.input_mut(|i| {
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::S) {
                self.save_json_dialog();
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::O) {
                self.open_json_dialog();
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::E) {
                let on = self.engine.edit_mode();
                self.engine.set_edit_mode(!on);
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Escape) {
                self.engine.set_edit_mode(false);
            }
        });

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open... (⌘O)").clicked() {
                        self.open_json_dialog();
                        ui.close_menu();
                    }
                    if ui.button("Save JSON... (⌘S)").clicked() {
                        self.save_json_dialog();
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.label("Quick save path:");
                    if ui.text_edit_singleline(&mut self.file_path).changed() {
                        self.persist_settings();
                    }
                    if ui.small_button("Quick Save").clicked() {
                        self.save_to_path();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Reload Settings").clicked() {
                        self.reload_settings();
                        ui.close_menu();
                    }
                });

                ui.separator();
                let mut edit = self.engine.edit_mode();
                if ui
                    .selectable_label(edit, "Edit bbox (E)")
                    .on_hover_text("Toggle drawing/editing of the bounding box")
                    .clicked()
                {
                    edit = !edit;
                    self.engine.set_edit_mode(edit);
                }
                let has_points = !self.engine.active_points().is_empty();
                if ui
                    .add_enabled(has_points, egui::Button::new("Clear"))
                    .clicked()
                {
                    self.clear_bbox();
                }
            });
        });

        egui::SidePanel::right("config_panel")
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Constraints");
                let mut config = self.engine.config().clone();
                let mut changed = false;

                ui.label("Min border range (deg):");
                changed |= ui
                    .add(
                        egui::DragValue::new(&mut config.min_border_range)
                            .speed(0.001)
                            .range(0.0..=f64::MAX),
                    )
                    .changed();

                let mut has_min = config.min_bbox_area_km2.is_some();
                if ui.checkbox(&mut has_min, "Min area (km²)").changed() {
                    config.min_bbox_area_km2 = has_min.then_some(0.0);
                    changed = true;
                }
                if let Some(min_area) = &mut config.min_bbox_area_km2 {
                    changed |= ui
                        .add(egui::DragValue::new(min_area).speed(1.0).range(0.0..=f64::MAX))
                        .changed();
                }

                let mut has_max = config.max_bbox_area_km2.is_some();
                if ui.checkbox(&mut has_max, "Max area (km²)").changed() {
                    config.max_bbox_area_km2 = has_max.then_some(10_000.0);
                    changed = true;
                }
                if let Some(max_area) = &mut config.max_bbox_area_km2 {
                    changed |= ui
                        .add(egui::DragValue::new(max_area).speed(1.0).range(0.0..=f64::MAX))
                        .changed();
                }

                ui.separator();
                changed |= ui
                    .checkbox(&mut config.follow_map_screen, "Box follows map pan")
                    .changed();
                changed |= ui.checkbox(&mut config.disabled, "Disable bbox tool").changed();

                if changed {
                    self.engine.set_config(config);
                    self.persist_settings();
                }

                ui.separator();
                ui.heading("Export");
                ui.monospace(
                    serde_json::to_string_pretty(&model::BboxExport {
                        points: self.engine.active_points().to_vec(),
                        area_km2: self.engine.area_km2(),
                    })
                    .unwrap_or_default(),
                );
            });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.status.as_deref().unwrap_or("Ready"));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(area) = self.engine.area_km2() {
                        ui.label(geometry::format_area(area));
                        ui.separator();
                    }
                    ui.label(format!("{} corner(s)", self.engine.active_points().len()));
                    ui.separator();
                    ui.label(format!("zoom {:.0} px/°", self.view.zoom));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (rect, response) =
                ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

            let scroll_delta = ctx.input(|i| i.raw_scroll_delta.y);
            if scroll_delta.abs() > 0.0 {
                if let Some(hover_pos) = ctx.input(|i| i.pointer.hover_pos()) {
                    if rect.contains(hover_pos) {
                        let old_view = view_state(&self.view);
                        let zoom_delta = (1.0 + scroll_delta as f64 * 0.001).clamp(0.8, 1.25);
                        self.view.zoom_about_screen_point(rect, hover_pos, zoom_delta);
                        let view = view_state(&self.view);
                        if view != old_view {
                            effects.extend(self.engine.handle(Event::ViewStateChange {
                                view,
                                old_view,
                                interaction: InteractionState {
                                    is_zooming: true,
                                    ..InteractionState::default()
                                },
                            }));
                        }
                    }
                }
            }

            let pointer_world = ctx
                .input(|i| i.pointer.interact_pos())
                .filter(|p| rect.contains(*p) || self.engine.is_dragging() || self.dragging_map)
                .map(|p| self.view.screen_to_world(rect, p));
            let threshold_world = 6.0 / self.view.zoom;

            if response.drag_started() {
                if let Some(world) = pointer_world {
                    let feature = self.pick(world, threshold_world);
                    if self.engine.edit_mode() && feature.is_some() {
                        effects.extend(self.engine.handle(Event::DragStart {
                            coordinate: world,
                            feature,
                        }));
                    } else {
                        self.dragging_map = true;
                    }
                }
            }

            if response.dragged() {
                if self.dragging_map {
                    let delta = response.drag_delta();
                    let old_view = view_state(&self.view);
                    self.view.center.x -= delta.x as f64 / self.view.zoom;
                    self.view.center.y += delta.y as f64 / self.view.zoom;
                    let view = view_state(&self.view);
                    if view != old_view {
                        effects.extend(self.engine.handle(Event::ViewStateChange {
                            view,
                            old_view,
                            interaction: InteractionState {
                                is_panning: true,
                                ..InteractionState::default()
                            },
                        }));
                    }
                } else if self.engine.is_dragging() {
                    if let Some(world) = pointer_world {
                        let feature = self.pick(world, threshold_world);
                        effects.extend(self.engine.handle(Event::Drag {
                            coordinate: world,
                            feature,
                        }));
                    }
                }
            }

            if response.drag_stopped() {
                if self.dragging_map {
                    self.dragging_map = false;
                } else if self.engine.is_dragging() {
                    effects.extend(self.engine.handle(Event::DragStop));
                }
            }

            if response.clicked() {
                if let Some(world) = pointer_world {
                    let feature = self.pick(world, threshold_world);
                    effects.extend(self.engine.handle(Event::Click {
                        coordinate: world,
                        feature,
                    }));
                }
            }

            if !self.dragging_map && !response.dragged() {
                if let Some(world) = pointer_world {
                    let feature = self.pick(world, threshold_world);
                    effects.extend(self.engine.handle(Event::Hover {
                        coordinate: world,
                        feature,
                    }));
                }
            }

            if response.hovered() {
                ctx.set_cursor_icon(cursor_icon(self.engine.cursor()));
            }

            let painter = ui.painter_at(rect);
            draw_background(&painter, rect, &self.view);
            if let Some(layer) = self.engine.area_layer() {
                draw_area_layer(&painter, rect, &self.view, &layer);
            }
            if let Some(layer) = self.engine.bbox_layer() {
                draw_bbox_layer(&painter, rect, &self.view, &layer, self.engine.area_km2());
            }
        });

        self.apply_effects(effects);
    }
}

use crate::PaintApp;
use crate::drawable::Primitive;
use crate::tools::Tool;

pub fn menu_bar(app: &mut PaintApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            // Commands that ask something wait until the open question is answered
            let can_ask = app.editor().pending_prompt().is_none();
            ui.menu_button("File", |ui| {
                if ui.add_enabled(can_ask, egui::Button::new("Open…")).clicked() {
                    app.run(|editor, prompter| editor.open_from(prompter));
                    ui.close_menu();
                }
                if ui.add_enabled(can_ask, egui::Button::new("Save…")).clicked() {
                    app.run(|editor, prompter| editor.save_as(prompter));
                    ui.close_menu();
                }
                // No File->Quit on web pages
                if !cfg!(target_arch = "wasm32") {
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                }
            });

            ui.menu_button("Brush", |ui| {
                if ui.add_enabled(can_ask, egui::Button::new("Color…")).clicked() {
                    app.run(|editor, prompter| {
                        editor.change_brush_color(prompter);
                        Ok(())
                    });
                    ui.close_menu();
                }
                if ui.add_enabled(can_ask, egui::Button::new("Size…")).clicked() {
                    app.run(|editor, prompter| editor.change_brush_size(prompter));
                    ui.close_menu();
                }
            });

            ui.menu_button("Tool", |ui| {
                let current = app.editor().tool();
                for tool in Tool::ALL {
                    if ui.radio(current == tool, tool.name()).clicked() {
                        app.editor_mut().select_tool(tool);
                        ui.close_menu();
                    }
                }
            });

            ui.menu_button("Shape Fill", |ui| {
                if ui.button("Solid Color").clicked() {
                    app.editor_mut().fill_shapes();
                    ui.close_menu();
                }
                if ui.button("No Fill").clicked() {
                    app.editor_mut().no_fill_shapes();
                    ui.close_menu();
                }
            });

            ui.menu_button("Shape Outline", |ui| {
                if ui.add_enabled(can_ask, egui::Button::new("Color…")).clicked() {
                    app.run(|editor, prompter| {
                        editor.change_outline_color(prompter);
                        Ok(())
                    });
                    ui.close_menu();
                }
                if ui.add_enabled(can_ask, egui::Button::new("Size…")).clicked() {
                    app.run(|editor, prompter| editor.change_outline_size(prompter));
                    ui.close_menu();
                }
            });

            ui.menu_button("Layers", |ui| {
                if ui.button("Add Layer").clicked() {
                    app.editor_mut().add_layer();
                    ui.close_menu();
                }
                if ui.button("Delete Layer").clicked() {
                    let result = app.editor_mut().delete_active_layer();
                    app.report(result);
                    ui.close_menu();
                }
                let active = app.editor().layers().active_id();
                if ui.button("Move Layer Up").clicked() {
                    let result = app.editor_mut().move_layer_up(active);
                    app.report(result);
                    ui.close_menu();
                }
                if ui.button("Move Layer Down").clicked() {
                    let result = app.editor_mut().move_layer_down(active);
                    app.report(result);
                    ui.close_menu();
                }
                if ui.button("Hide Layer").clicked() {
                    let result = app.editor_mut().set_layer_visible(active, false);
                    app.report(result);
                    ui.close_menu();
                }
                if ui.button("Show Layer").clicked() {
                    let result = app.editor_mut().set_layer_visible(active, true);
                    app.report(result);
                    ui.close_menu();
                }
            });

            ui.separator();

            let (can_undo, can_redo) = (app.editor().can_undo(), app.editor().can_redo());
            if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                app.editor_mut().undo();
            }
            if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                app.editor_mut().redo();
            }
            if ui.button("Clear").clicked() {
                app.editor_mut().clear();
            }
        });
    });
}

pub fn status_bar(app: &PaintApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        let editor = app.editor();
        let brush = editor.brush();
        ui.horizontal(|ui| {
            ui.label(format!("Tool: {}", editor.tool().name()));
            ui.separator();
            ui.label("Brush:");
            let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
            ui.painter().rect_filled(rect, 2.0, brush.color);
            ui.label(format!(
                "size {}{}",
                brush.size,
                if brush.fill_enabled { ", filled" } else { "" }
            ));
            ui.separator();
            ui.label(format!("Layer: {}", editor.layers().active().name));
            ui.separator();
            ui.label(format!(
                "History: {} / {}",
                editor.history().past_len(),
                editor.history().future_len()
            ));
            match editor.selection() {
                [] => {}
                [only] => {
                    if let Some(drawable) = editor.layers().active().drawable(*only) {
                        ui.separator();
                        ui.label(format!("1 {} selected", drawable.kind()));
                    }
                }
                many => {
                    ui.separator();
                    ui.label(format!("{} selected", many.len()));
                }
            }
        });
    });
}

use crate::PaintApp;
use crate::layer::LayerId;

enum LayerAction {
    Select(LayerId),
    SetVisible(LayerId, bool),
    MoveUp(LayerId),
    MoveDown(LayerId),
    Delete(LayerId),
    Add,
}

pub fn layers_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::right("layers_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Layers");
            ui.separator();

            let mut action = None;
            let layers = app.editor().layers();
            let active = layers.active_id();

            // Top of the stack first
            for layer in layers.layers().iter().rev() {
                let id = layer.id();
                ui.horizontal(|ui| {
                    let mut visible = layer.visible;
                    if ui.checkbox(&mut visible, "").changed() {
                        action = Some(LayerAction::SetVisible(id, visible));
                    }
                    if ui.selectable_label(id == active, &layer.name).clicked() {
                        action = Some(LayerAction::Select(id));
                    }
                    if ui.small_button("⬆").on_hover_text("Move up").clicked() {
                        action = Some(LayerAction::MoveUp(id));
                    }
                    if ui.small_button("⬇").on_hover_text("Move down").clicked() {
                        action = Some(LayerAction::MoveDown(id));
                    }
                    if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                        action = Some(LayerAction::Delete(id));
                    }
                });
            }

            ui.separator();
            if ui.button("Add Layer").clicked() {
                action = Some(LayerAction::Add);
            }

            if let Some(action) = action {
                apply(app, action);
            }
        });
}

fn apply(app: &mut PaintApp, action: LayerAction) {
    let editor = app.editor_mut();
    let result = match action {
        LayerAction::Select(id) => editor.select_layer(id),
        LayerAction::SetVisible(id, visible) => editor.set_layer_visible(id, visible),
        LayerAction::MoveUp(id) => editor.move_layer_up(id).map(|_| ()),
        LayerAction::MoveDown(id) => editor.move_layer_down(id).map(|_| ()),
        LayerAction::Delete(id) => editor.delete_layer(id).map(|_| ()),
        LayerAction::Add => {
            editor.add_layer();
            Ok(())
        }
    };
    app.report(result);
}

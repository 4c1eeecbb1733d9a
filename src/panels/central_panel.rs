use crate::PaintApp;
use crate::renderer::Renderer;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both().show(ui, |ui| {
            let size = Renderer::canvas_size(app.editor());
            let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());

            app.input_handler_mut().set_canvas_rect(response.rect, response.hovered());
            app.handle_input(ctx);
            app.paint_canvas(ctx, &painter, response.rect);
        });
    });
}

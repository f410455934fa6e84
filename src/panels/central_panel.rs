use crate::ColoringApp;
use crate::command::Command;
use crate::renderer::{fit_canvas, to_canvas};

pub fn central_panel(app: &mut ColoringApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available = ui.available_size();
        let (response, painter) = ui.allocate_painter(available, egui::Sense::drag());
        let rect = fit_canvas(response.rect, app.session().surface());

        // Handle input; a minimized window leaves no area to map onto
        if app.session().state().is_ready() && rect.is_positive() {
            let pointer = response
                .interact_pointer_pos()
                .or_else(|| ctx.input(|i| i.pointer.latest_pos()));
            if let Some(pos) = pointer {
                let pos = to_canvas(rect, app.session().surface(), pos);
                if response.drag_started() {
                    app.apply(Command::PointerDown(pos));
                }
                if response.drag_stopped() {
                    app.apply(Command::PointerUp(pos));
                } else if response.dragged() {
                    app.apply(Command::PointerMove(pos));
                }
            }
        }

        // Render the canvas
        let preview = app.session().preview();
        let (renderer, session) = app.renderer_and_session();
        renderer.render(ctx, &painter, rect, session.surface(), preview.as_ref());

        if session.state().is_loading() || session.state().is_exporting() {
            ui.put(
                egui::Rect::from_center_size(rect.center(), egui::vec2(48.0, 48.0)),
                egui::Spinner::new().size(48.0),
            );
        }
    });
}

use crate::ColoringApp;

pub fn status_panel(app: &ColoringApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let session = app.session();
            ui.weak(session.state().name());
            ui.separator();
            ui.weak(format!("{} strokes", session.surface().stroke_count()));
            if let Some(image) = session.image() {
                ui.separator();
                ui.weak(&image.title);
            }
            if let Some(message) = app.status() {
                ui.separator();
                ui.label(message);
            }
        });
    });
}

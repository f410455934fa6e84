use egui::{Color32, Slider, Stroke};

use crate::ColoringApp;
use crate::acquisition::{ImageRequest, catalog, generator};
use crate::command::Command;
use crate::config::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
use crate::export::ExportKind;
use crate::gallery::ArtworkId;
use crate::pages::PAGE_COUNT_OPTIONS;
use crate::palette;
use crate::tools::ToolKind;

const SWATCH_SIZE: f32 = 22.0;

pub fn tools_panel(app: &mut ColoringApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Tools");
                let ready = app.session().state().is_ready();

                ui.add_enabled_ui(ready, |ui| {
                    tool_section(app, ui);
                    ui.separator();
                    color_section(app, ui);
                    ui.separator();
                    history_section(app, ui);
                    ui.separator();
                    export_section(app, ui);
                });
                ui.separator();

                pictures_section(app, ui);
                generate_section(app, ui);
                print_section(app, ui);
                gallery_section(app, ui);

                ui.separator();
                ui.weak("Drop an image file on the window to color your own drawing.");
            });
        });
}

fn tool_section(app: &mut ColoringApp, ui: &mut egui::Ui) {
    let active = app.session().tool();
    ui.horizontal(|ui| {
        for kind in ToolKind::ALL {
            if ui.selectable_label(active == kind, kind.label()).clicked() {
                log::info!("Tool selected from UI: {}", kind.label());
                app.apply(Command::SelectTool(kind));
            }
        }
    });

    let mut size = app.session().brush_size();
    let slider = Slider::new(&mut size, MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE).text("Size");
    if ui.add(slider).changed() {
        app.apply(Command::SetBrushSize(size));
    }
}

fn color_section(app: &mut ColoringApp, ui: &mut egui::Ui) {
    let active = app.session().active_color();
    let suggested = app
        .session()
        .image()
        .map(|image| *palette::category_palette(&image.category));

    ui.label("Colors");
    egui::Grid::new("palette_grid")
        .spacing([4.0, 4.0])
        .show(ui, |ui| {
            for (i, color) in palette::COLOR_PALETTE.iter().enumerate() {
                if swatch(ui, *color, active == *color) {
                    app.apply(Command::SelectColor(*color));
                }
                if i % 5 == 4 {
                    ui.end_row();
                }
            }
        });

    if let Some(colors) = suggested {
        ui.label("Suggested");
        ui.horizontal(|ui| {
            for color in colors {
                if swatch(ui, color, active == color) {
                    app.apply(Command::SelectColor(color));
                }
            }
        });
    }

    ui.horizontal(|ui| {
        ui.label("Custom:");
        let mut custom = active;
        if egui::color_picker::color_edit_button_srgba(
            ui,
            &mut custom,
            egui::color_picker::Alpha::Opaque,
        )
        .changed()
        {
            app.apply(Command::SelectColor(custom));
        }
    });
}

fn swatch(ui: &mut egui::Ui, color: Color32, selected: bool) -> bool {
    let stroke = if selected {
        Stroke::new(3.0, ui.visuals().selection.stroke.color)
    } else {
        Stroke::new(1.0, Color32::GRAY)
    };
    ui.add(
        egui::Button::new("")
            .fill(color)
            .stroke(stroke)
            .min_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE)),
    )
    .clicked()
}

fn history_section(app: &mut ColoringApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        let can_undo = app.session().history().can_undo();
        if ui.add_enabled(can_undo, egui::Button::new("↶ Undo")).clicked() {
            app.apply(Command::Undo);
        }
        // Always clickable so it can explain itself
        if ui.button("↷ Redo").clicked() {
            app.apply(Command::Redo);
        }
    });
    ui.weak(format!(
        "Undo stack size: {}",
        app.session().history().undo_stack().len()
    ));
}

fn export_section(app: &mut ColoringApp, ui: &mut egui::Ui) {
    ui.horizontal_wrapped(|ui| {
        if ui.button("💾 Save PNG").clicked() {
            app.export(ExportKind::Image);
        }
        if ui.button("📄 Export PDF").clicked() {
            app.export(ExportKind::Document);
        }
        if ui.button("📋 Copy").clicked() {
            app.export(ExportKind::Clipboard);
        }
    });
}

fn pictures_section(app: &mut ColoringApp, ui: &mut egui::Ui) {
    egui::CollapsingHeader::new("Pictures")
        .default_open(true)
        .show(ui, |ui| {
            for image in catalog::all() {
                ui.horizontal(|ui| {
                    let label = format!("{} {}", palette::category_icon(&image.category), image.title);
                    if ui.button(label).on_hover_text(&image.description).clicked() {
                        app.open(ImageRequest::Catalog {
                            id: image.id.clone(),
                        });
                    }
                    ui.colored_label(
                        palette::difficulty_color(image.difficulty),
                        format!("{:?}", image.difficulty),
                    );
                });
            }
        });
}

fn generate_section(app: &mut ColoringApp, ui: &mut egui::Ui) {
    egui::CollapsingHeader::new("Make a new picture").show(ui, |ui| {
        ui.add(egui::TextEdit::singleline(&mut app.prompt).hint_text("What should we draw?"));
        egui::ComboBox::from_id_salt("prompt_category")
            .selected_text(app.prompt_category.as_str())
            .show_ui(ui, |ui| {
                for category in generator::categories() {
                    ui.selectable_value(&mut app.prompt_category, category.to_owned(), category);
                }
            });
        if ui.button("✨ Create").clicked() {
            let request = ImageRequest::Generate {
                prompt: app.prompt.clone(),
                category: app.prompt_category.clone(),
            };
            app.open(request);
        }
    });
}

fn print_section(app: &mut ColoringApp, ui: &mut egui::Ui) {
    let categories: Vec<String> = app.generator().categories().map(str::to_owned).collect();

    egui::CollapsingHeader::new("Print pages").show(ui, |ui| {
        egui::ComboBox::from_id_salt("page_count")
            .selected_text(format!("{} pages", app.print.count))
            .show_ui(ui, |ui| {
                for count in PAGE_COUNT_OPTIONS {
                    ui.selectable_value(&mut app.print.count, count, format!("{count} pages"));
                }
            });

        egui::ComboBox::from_id_salt("page_category")
            .selected_text(app.print.category.as_deref().unwrap_or("All"))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut app.print.category, None, "All");
                for category in &categories {
                    ui.selectable_value(
                        &mut app.print.category,
                        Some(category.clone()),
                        category.as_str(),
                    );
                }
            });

        if ui.button("🖨️ Print").clicked() {
            app.print_pages();
        }
    });
}

enum GalleryAction {
    Save(ArtworkId),
    Copy(ArtworkId),
    Like(ArtworkId),
    Remove(ArtworkId),
}

fn gallery_section(app: &mut ColoringApp, ui: &mut egui::Ui) {
    let mut action = None;

    egui::CollapsingHeader::new(format!("Gallery ({})", app.gallery().len())).show(ui, |ui| {
        if app.gallery().is_empty() {
            ui.weak("Save or copy a picture to see it here.");
        }
        // Newest first
        for item in app.gallery().items().iter().rev() {
            ui.push_id(item.id, |ui| {
                ui.label(format!("{} ({:?})", item.title, item.artwork.kind));
                ui.horizontal(|ui| {
                    if ui.small_button("💾 Save").clicked() {
                        action = Some(GalleryAction::Save(item.id));
                    }
                    if ui
                        .add_enabled(item.can_copy(), egui::Button::new("📋 Copy").small())
                        .clicked()
                    {
                        action = Some(GalleryAction::Copy(item.id));
                    }
                    if ui.small_button(format!("❤ {}", item.likes)).clicked() {
                        action = Some(GalleryAction::Like(item.id));
                    }
                    if ui.small_button("🗑").on_hover_text("Remove").clicked() {
                        action = Some(GalleryAction::Remove(item.id));
                    }
                });
            });
        }
    });

    match action {
        Some(GalleryAction::Save(id)) => app.save_from_gallery(id),
        Some(GalleryAction::Copy(id)) => app.copy_from_gallery(id),
        Some(GalleryAction::Like(id)) => app.like_in_gallery(id),
        Some(GalleryAction::Remove(id)) => app.remove_from_gallery(id),
        None => {}
    }
}

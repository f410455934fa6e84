use uuid::Uuid;

use super::{ColoringImage, Difficulty, outline};

const CATEGORY_DRAWINGS: &[(&str, &str)] = &[
    ("animals", "cat"),
    ("fantasy", "dragon"),
    ("nature", "flower"),
];

pub fn categories() -> impl Iterator<Item = &'static str> {
    CATEGORY_DRAWINGS.iter().map(|(category, _)| *category)
}

/// Stand-in for an image generation service: returns canned line-art for the
/// category. Unknown categories get the animals drawing.
pub fn generate(prompt: &str, category: &str) -> ColoringImage {
    let drawing = CATEGORY_DRAWINGS
        .iter()
        .find(|(name, _)| *name == category)
        .map_or(CATEGORY_DRAWINGS[0].1, |(_, drawing)| *drawing);

    let title = if prompt.trim().is_empty() {
        format!("{category} Drawing")
    } else {
        prompt.trim().to_owned()
    };

    log::info!("✨ Generated \"{title}\" ({category}) from {drawing}");

    ColoringImage {
        id: format!("ai_{}", Uuid::new_v4()),
        title,
        description: format!("A beautiful {category} drawing created by AI"),
        outline_image_url: outline::builtin_url(drawing),
        category: category.to_owned(),
        difficulty: Difficulty::Medium,
        tags: vec![category.to_owned(), "ai-generated".to_owned()],
        is_ai: true,
    }
}

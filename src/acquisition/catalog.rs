use super::{ColoringImage, Difficulty, outline};

struct CatalogEntry {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    drawing: &'static str,
    category: &'static str,
    difficulty: Difficulty,
    tags: &'static [&'static str],
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: "1",
        title: "Happy Cat",
        description: "A cute cat waiting to be colored!",
        drawing: "cat",
        category: "animals",
        difficulty: Difficulty::Easy,
        tags: &["cat", "animals", "cute"],
    },
    CatalogEntry {
        id: "2",
        title: "Magic Dragon",
        description: "A friendly dragon ready for some color!",
        drawing: "dragon",
        category: "fantasy",
        difficulty: Difficulty::Medium,
        tags: &["dragon", "fantasy", "magic"],
    },
    CatalogEntry {
        id: "3",
        title: "Beautiful Flower",
        description: "A garden flower full of petals to fill.",
        drawing: "flower",
        category: "nature",
        difficulty: Difficulty::Easy,
        tags: &["flower", "nature", "garden"],
    },
];

impl CatalogEntry {
    fn to_image(&self) -> ColoringImage {
        ColoringImage {
            id: self.id.to_owned(),
            title: self.title.to_owned(),
            description: self.description.to_owned(),
            outline_image_url: outline::builtin_url(self.drawing),
            category: self.category.to_owned(),
            difficulty: self.difficulty,
            tags: self.tags.iter().map(|t| (*t).to_owned()).collect(),
            is_ai: false,
        }
    }
}

pub fn lookup(id: &str) -> Option<ColoringImage> {
    CATALOG
        .iter()
        .find(|entry| entry.id == id)
        .map(CatalogEntry::to_image)
}

/// First catalog entry of a category
pub fn first_in_category(category: &str) -> Option<ColoringImage> {
    CATALOG
        .iter()
        .find(|entry| entry.category == category)
        .map(CatalogEntry::to_image)
}

pub fn all() -> Vec<ColoringImage> {
    CATALOG.iter().map(CatalogEntry::to_image).collect()
}

//! Printable page sets: a run of outline pages drawn from an icon pool.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::acquisition::outline;
use crate::config::PageSize;
use crate::error::ExportError;
use crate::export::pdf::{self, DocumentPage, Placement, TextLine};

/// Page counts offered by the print picker
pub const PAGE_COUNT_OPTIONS: [usize; 10] = [5, 10, 15, 20, 25, 30, 35, 40, 45, 50];

/// Icon pools by category. Every icon names a built-in outline drawing.
pub const ICON_POOLS: &[(&str, &[&str])] = &[
    ("animals", &["cat", "dog", "elephant", "lion"]),
    ("vehicles", &["car", "airplane", "train", "boat"]),
    ("birds and insects", &["eagle", "owl", "butterfly", "bee"]),
    ("nature", &["tree", "flower", "mountain", "rainbow"]),
    ("sky", &["sun", "moon", "star", "cloud"]),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based
    pub number: usize,
    pub total: usize,
    pub icon: String,
    pub outline_url: String,
}

#[derive(Debug, Clone)]
pub struct PageSetGenerator {
    pools: Vec<(String, Vec<String>)>,
}

impl Default for PageSetGenerator {
    fn default() -> Self {
        Self::with_pools(ICON_POOLS)
    }
}

impl PageSetGenerator {
    pub fn with_pools(pools: &[(&str, &[&str])]) -> Self {
        Self {
            pools: pools
                .iter()
                .map(|(category, icons)| {
                    (
                        (*category).to_owned(),
                        icons.iter().map(|icon| (*icon).to_owned()).collect(),
                    )
                })
                .collect(),
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.pools.iter().map(|(category, _)| category.as_str())
    }

    /// The icons for `category`, or every pool combined when the category is
    /// unset or unknown
    pub fn pool(&self, category: Option<&str>) -> Vec<&str> {
        let known = category.and_then(|wanted| {
            self.pools
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
        });
        match known {
            Some((_, icons)) => icons.iter().map(String::as_str).collect(),
            None => self
                .pools
                .iter()
                .flat_map(|(_, icons)| icons.iter().map(String::as_str))
                .collect(),
        }
    }

    pub fn generate(&self, count: usize, category: Option<&str>) -> Vec<Page> {
        self.generate_with_rng(count, category, &mut rand::thread_rng())
    }

    /// Shuffle the pool afresh, then take pages in order, wrapping around
    /// once the pool is exhausted
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        count: usize,
        category: Option<&str>,
        rng: &mut R,
    ) -> Vec<Page> {
        let mut pool = self.pool(category);
        if pool.is_empty() {
            return Vec::new();
        }
        pool.shuffle(rng);

        (0..count)
            .map(|i| {
                let icon = pool[i % pool.len()];
                Page {
                    number: i + 1,
                    total: count,
                    icon: icon.to_owned(),
                    outline_url: outline::builtin_url(icon),
                }
            })
            .collect()
    }
}

const MARGIN: f32 = 40.0;
const HEADER_SIZE: f32 = 20.0;
const BODY_SIZE: f32 = 12.0;

/// Multi-page PDF with one outline per page, a header and a name/date footer
pub fn print_document(pages: &[Page], page_size: PageSize) -> Result<Vec<u8>, ExportError> {
    let image_side = (page_size.width - 2.0 * MARGIN)
        .min(page_size.height - 2.0 * MARGIN - 140.0)
        .max(1.0);
    let pixels = image_side.round() as u32;

    let mut document = Vec::with_capacity(pages.len());
    for page in pages {
        let name = page
            .outline_url
            .strip_prefix(outline::BUILTIN_SCHEME)
            .unwrap_or(&page.icon);
        let image = outline::render_builtin(name, pixels, pixels).ok_or_else(|| {
            ExportError::Document(format!("no outline drawing named {name}"))
        })?;

        let top = page_size.height - MARGIN;
        let image_y = top - 60.0 - image_side;
        document.push(DocumentPage {
            size: page_size,
            image: Some((
                image,
                Placement {
                    x: (page_size.width - image_side) / 2.0,
                    y: image_y,
                    width: image_side,
                    height: image_side,
                },
            )),
            text: vec![
                TextLine {
                    x: MARGIN,
                    y: top - HEADER_SIZE,
                    size: HEADER_SIZE,
                    text: "Cartoon Coloring Outline".to_owned(),
                },
                TextLine {
                    x: MARGIN,
                    y: top - HEADER_SIZE - 22.0,
                    size: BODY_SIZE,
                    text: format!("Page {} of {}", page.number, page.total),
                },
                TextLine {
                    x: MARGIN,
                    y: MARGIN + 30.0,
                    size: BODY_SIZE,
                    text: "Name: ______________________".to_owned(),
                },
                TextLine {
                    x: MARGIN,
                    y: MARGIN,
                    size: BODY_SIZE,
                    text: "Date: ______________________".to_owned(),
                },
            ],
        });
    }

    log::info!("🖨️ Composed {} printable pages", document.len());
    pdf::compose_pages(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::A4_PAGE;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_numbering_and_urls() {
        let generator = PageSetGenerator::default();
        let mut rng = StdRng::seed_from_u64(7);
        let pages = generator.generate_with_rng(5, Some("sky"), &mut rng);
        assert_eq!(pages.len(), 5);
        for (i, page) in pages.iter().enumerate() {
            assert_eq!(page.number, i + 1);
            assert_eq!(page.total, 5);
            assert!(["sun", "moon", "star", "cloud"].contains(&page.icon.as_str()));
            assert_eq!(page.outline_url, format!("builtin://{}", page.icon));
        }
        // Wraps only after the whole pool has been used once
        assert_eq!(pages[4].icon, pages[0].icon);
    }

    #[test]
    fn test_unknown_category_uses_every_pool() {
        let generator = PageSetGenerator::default();
        assert_eq!(generator.pool(Some("dinosaurs")).len(), 20);
        assert_eq!(generator.pool(None).len(), 20);
        assert_eq!(generator.pool(Some("Animals")).len(), 4);
    }

    #[test]
    fn test_every_icon_has_a_drawing() {
        let names: Vec<_> = outline::drawing_names().collect();
        for icon in PageSetGenerator::default().pool(None) {
            assert!(names.contains(&icon), "missing drawing for {icon}");
        }
    }

    #[test]
    fn test_print_document_has_one_page_per_entry() {
        let pages = PageSetGenerator::default().generate(3, Some("nature"));
        let bytes = print_document(&pages, A4_PAGE).unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_print_document_rejects_unknown_drawing() {
        let page = Page {
            number: 1,
            total: 1,
            icon: "unicorn".to_owned(),
            outline_url: "builtin://unicorn".to_owned(),
        };
        assert!(matches!(
            print_document(&[page], A4_PAGE),
            Err(ExportError::Document(_))
        ));
    }

    #[test]
    fn test_empty_page_set_is_rejected() {
        assert!(print_document(&[], A4_PAGE).is_err());
    }
}

use crate::domain::identifier::normalize_card_no;
use crate::domain::model::Card;
use crate::domain::ports::ConfigProvider;

pub const DEFAULT_IMAGE_BASE_URL: &str = "/images/cards";
pub const DEFAULT_IMAGE_EXTENSION: &str = "jpg";
pub const DEFAULT_STAR_GLYPH: &str = "★";

/// Canonical form of a card number for display.
pub fn format_card_no(no: &str) -> String {
    normalize_card_no(no)
}

pub fn rarity_stars(rarity: u32) -> String {
    DEFAULT_STAR_GLYPH.repeat(rarity as usize)
}

pub fn card_image_url(card: &Card) -> String {
    DisplayOptions::default().image_url(card)
}

/// Presentation settings shared by the renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub image_base_url: String,
    pub image_extension: String,
    pub star_glyph: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            image_extension: DEFAULT_IMAGE_EXTENSION.to_string(),
            star_glyph: DEFAULT_STAR_GLYPH.to_string(),
        }
    }
}

impl DisplayOptions {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            image_base_url: config.image_base_url().to_string(),
            image_extension: config.image_extension().to_string(),
            star_glyph: config.star_glyph().to_string(),
        }
    }

    pub fn stars(&self, rarity: u32) -> String {
        self.star_glyph.repeat(rarity as usize)
    }

    pub fn image_url(&self, card: &Card) -> String {
        format!(
            "{}/{}.{}",
            self.image_base_url.trim_end_matches('/'),
            card.no,
            self.image_extension.trim_start_matches('.')
        )
    }
}

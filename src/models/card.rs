//! Card model as returned by the card database API.

use serde::{Deserialize, Serialize};

/// Image URLs for a card at several resolutions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUris {
    /// Small thumbnail
    pub small: String,

    /// Normal resolution, used for gallery thumbnails
    pub normal: String,

    /// Large resolution
    pub large: String,

    /// Full-size transparent PNG
    pub png: String,
}

/// A single card (or one printing of a card)
///
/// Cards are immutable once fetched. Fields the panel does not use are ignored
/// during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Card identifier (unique per printing)
    pub id: String,

    /// Display name
    pub name: String,

    /// Name of the set this printing belongs to
    pub set_name: String,

    /// Image URLs; absent for some layouts (e.g. double-faced cards)
    #[serde(default)]
    pub image_uris: Option<ImageUris>,

    /// URI listing every printing of this card
    pub prints_search_uri: String,
}

impl Card {
    /// Normal-resolution thumbnail URL, if the card carries image data
    pub fn thumbnail(&self) -> Option<&str> {
        self.image_uris.as_ref().map(|uris| uris.normal.as_str())
    }

    /// Whether this card carries image data
    pub fn has_image(&self) -> bool {
        self.image_uris.is_some()
    }
}

/// All known printings of the currently displayed card, in API order
pub type PrintList = Vec<Card>;

/// Builder for constructing Card instances
#[derive(Debug, Clone)]
pub struct CardBuilder {
    card: Card,
}

impl CardBuilder {
    /// Create a new builder with the required fields
    pub fn new(id: impl Into<String>, name: impl Into<String>, set_name: impl Into<String>) -> Self {
        Self {
            card: Card {
                id: id.into(),
                name: name.into(),
                set_name: set_name.into(),
                image_uris: None,
                prints_search_uri: String::new(),
            },
        }
    }

    /// Set all image URLs from a common prefix (`{prefix}/small.jpg`, ...)
    pub fn images(mut self, prefix: impl AsRef<str>) -> Self {
        let prefix = prefix.as_ref();
        self.card.image_uris = Some(ImageUris {
            small: format!("{}/small.jpg", prefix),
            normal: format!("{}/normal.jpg", prefix),
            large: format!("{}/large.jpg", prefix),
            png: format!("{}/png.png", prefix),
        });
        self
    }

    /// Set the printings search URI
    pub fn prints_search_uri(mut self, uri: impl Into<String>) -> Self {
        self.card.prints_search_uri = uri.into();
        self
    }

    /// Build the Card
    pub fn build(self) -> Card {
        self.card
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOLT_JSON: &str = r#"{
        "object": "card",
        "id": "e3285e6b-3e79-4d7c-bf96-d920f973b80e",
        "name": "Lightning Bolt",
        "set_name": "Magic 2010",
        "rarity": "common",
        "image_uris": {
            "small": "https://cards.scryfall.io/small/front/e/3/e3285e6b.jpg",
            "normal": "https://cards.scryfall.io/normal/front/e/3/e3285e6b.jpg",
            "large": "https://cards.scryfall.io/large/front/e/3/e3285e6b.jpg",
            "png": "https://cards.scryfall.io/png/front/e/3/e3285e6b.png",
            "art_crop": "https://cards.scryfall.io/art_crop/front/e/3/e3285e6b.jpg"
        },
        "prints_search_uri": "https://api.scryfall.com/cards/search?order=released&q=oracleid%3A4457ed35&unique=prints"
    }"#;

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let card: Card = serde_json::from_str(BOLT_JSON).unwrap();
        assert_eq!(card.name, "Lightning Bolt");
        assert_eq!(card.set_name, "Magic 2010");
        assert!(card.prints_search_uri.contains("unique=prints"));
        assert_eq!(
            card.thumbnail(),
            Some("https://cards.scryfall.io/normal/front/e/3/e3285e6b.jpg")
        );
    }

    #[test]
    fn test_missing_image_uris() {
        let json = r#"{
            "id": "abc",
            "name": "Delver of Secrets // Insectile Aberration",
            "set_name": "Innistrad",
            "prints_search_uri": "https://api.scryfall.com/cards/search?q=delver"
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert!(!card.has_image());
        assert_eq!(card.thumbnail(), None);
    }

    #[test]
    fn test_card_builder() {
        let card = CardBuilder::new("1", "Counterspell", "Alpha")
            .images("https://img.test/1")
            .prints_search_uri("https://api.test/prints/1")
            .build();

        assert_eq!(card.thumbnail(), Some("https://img.test/1/normal.jpg"));
        assert_eq!(card.prints_search_uri, "https://api.test/prints/1");
    }
}

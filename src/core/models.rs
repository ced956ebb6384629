use serde::{Deserialize, Serialize};

/// One record parsed out of the RSS/Atom feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub pub_date: String,
    pub description: String,
}

/// Input to the key point pipeline: a feed item plus scraped page context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceItem {
    pub title: String,
    pub description: String,
    pub context: String,
    pub link: String,
}

impl SourceItem {
    #[must_use]
    pub fn from_feed(item: &FeedItem, context: &str) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            context: context.to_string(),
            link: item.link.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    pub use_model: bool,
    pub api_key: String,
    pub model: String,
    pub max_chars_per_item: usize,
}

impl GenerationOptions {
    /// Generation only runs when enabled and a credential is present.
    #[must_use]
    pub fn generation_enabled(&self) -> bool {
        self.use_model && !self.api_key.is_empty()
    }
}

/// Meta description and outbound link scraped from an item's page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicContext {
    pub summary: String,
    pub source_link: String,
}

/// A feed item with its rendered key point, ready for the digest message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestEntry {
    pub title: String,
    pub link: String,
    pub key_point: String,
    pub source_link: Option<String>,
}

//! HTML attributes attached to every shape.

use serde::{Deserialize, Serialize};

/// Token replaced by a tile's 1-based index.
pub const INDEX_TOKEN: &str = "[#]";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AreaProperties {
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub id: String,
}

impl AreaProperties {
    pub fn new(href: impl Into<String>, alt: impl Into<String>, title: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            alt: alt.into(),
            title: title.into(),
            id: id.into(),
        }
    }

    /// Copy with every [`INDEX_TOKEN`] replaced by `index`.
    pub fn numbered(&self, index: usize) -> Self {
        let n = index.to_string();
        Self {
            href: self.href.replace(INDEX_TOKEN, &n),
            alt: self.alt.replace(INDEX_TOKEN, &n),
            title: self.title.replace(INDEX_TOKEN, &n),
            id: self.id.replace(INDEX_TOKEN, &n),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.href.is_empty() && self.alt.is_empty() && self.title.is_empty() && self.id.is_empty()
    }

    /// `(name, value)` pairs in export order.
    pub fn attributes(&self) -> [(&'static str, &str); 4] {
        [
            ("href", self.href.as_str()),
            ("alt", self.alt.as_str()),
            ("title", self.title.as_str()),
            ("id", self.id.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_replaces_every_token() {
        let props = AreaProperties::new("/room/[#]", "Room [#]", "", "room-[#]-[#]");
        let numbered = props.numbered(7);
        assert_eq!(numbered.href, "/room/7");
        assert_eq!(numbered.alt, "Room 7");
        assert_eq!(numbered.id, "room-7-7");
        assert!(numbered.title.is_empty());
    }
}

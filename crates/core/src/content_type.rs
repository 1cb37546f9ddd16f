//! Content types shared by the Hugo source tree and the Astro target tree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A section of the Hugo/Astro content tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Posts,
    Micro,
    Elsewhere,
    Quote,
    Imagery,
}

impl ContentType {
    /// Types that have a directory under `src/data/` in the Astro project.
    pub const ASTRO_SECTIONS: [ContentType; 4] =
        [ContentType::Posts, ContentType::Micro, ContentType::Elsewhere, ContentType::Quote];

    /// Types produced by the micro-content batch conversion.
    pub const MICRO_SECTIONS: [ContentType; 4] = [
        ContentType::Micro,
        ContentType::Elsewhere,
        ContentType::Quote,
        ContentType::Imagery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Posts => "posts",
            ContentType::Micro => "micro",
            ContentType::Elsewhere => "elsewhere",
            ContentType::Quote => "quote",
            ContentType::Imagery => "imagery",
        }
    }

    /// Value of the `contentType` frontmatter field in the unified collection.
    pub fn content_type_tag(&self) -> Option<&'static str> {
        match self {
            ContentType::Posts => Some("essay"),
            ContentType::Micro => Some("brief"),
            ContentType::Elsewhere => Some("elsewhere"),
            ContentType::Quote => Some("quote"),
            ContentType::Imagery => None,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown content type '{0}' (expected posts, micro, elsewhere, quote or imagery)")]
pub struct UnknownContentType(pub String);

impl FromStr for ContentType {
    type Err = UnknownContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "posts" | "post" => Ok(ContentType::Posts),
            "micro" => Ok(ContentType::Micro),
            "elsewhere" => Ok(ContentType::Elsewhere),
            "quote" | "quotes" => Ok(ContentType::Quote),
            "imagery" => Ok(ContentType::Imagery),
            other => Err(UnknownContentType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!("Posts".parse::<ContentType>().unwrap(), ContentType::Posts);
        assert_eq!("quotes".parse::<ContentType>().unwrap(), ContentType::Quote);
        assert!("podcast".parse::<ContentType>().is_err());
    }

    #[test]
    fn content_type_tags() {
        assert_eq!(ContentType::Posts.content_type_tag(), Some("essay"));
        assert_eq!(ContentType::Micro.content_type_tag(), Some("brief"));
        assert_eq!(ContentType::Imagery.content_type_tag(), None);
    }
}

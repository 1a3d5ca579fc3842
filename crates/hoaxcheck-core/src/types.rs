//! Core types for hoaxcheck

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Text domain a bundle was trained for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// News articles
    #[serde(alias = "berita")]
    News,
    /// Social-media posts
    #[serde(alias = "sosmed")]
    Social,
}

impl Domain {
    /// All known domains, in display order
    pub const ALL: [Domain; 2] = [Domain::News, Domain::Social];

    /// Lowercase identifier used in config files and APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Social => "social",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "news" | "berita" => Ok(Self::News),
            "social" | "sosmed" => Ok(Self::Social),
            _ => Err(Error::unknown_domain(s)),
        }
    }
}

/// Predicted class. Discriminants match the classifier's class indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Real = 0,
    Hoax = 1,
}

impl Label {
    /// Number of classes every bundle must provide
    pub const COUNT: usize = 2;

    /// Map a class index back to a label
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Real),
            1 => Some(Self::Hoax),
            _ => None,
        }
    }

    /// Class index of this label
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Real => "REAL",
            Self::Hoax => "HOAX",
        }
    }

    /// Emphasis tag for terms supporting this label
    pub fn emphasis_tag(&self) -> &'static str {
        match self {
            Self::Real => "supports-real",
            Self::Hoax => "supports-hoax",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_parsing() {
        assert_eq!("news".parse::<Domain>().unwrap(), Domain::News);
        assert_eq!(" Sosmed ".parse::<Domain>().unwrap(), Domain::Social);
        assert_eq!("berita".parse::<Domain>().unwrap(), Domain::News);

        let err = "sports".parse::<Domain>().unwrap_err();
        assert!(matches!(err, Error::UnknownDomain(ref d) if d == "sports"));
    }

    #[test]
    fn test_domain_serde() {
        let domain: Domain = serde_json::from_str("\"sosmed\"").unwrap();
        assert_eq!(domain, Domain::Social);
        assert_eq!(serde_json::to_string(&Domain::News).unwrap(), "\"news\"");
    }

    #[test]
    fn test_label_indices() {
        assert_eq!(Label::from_index(0), Some(Label::Real));
        assert_eq!(Label::from_index(1), Some(Label::Hoax));
        assert_eq!(Label::from_index(2), None);
        assert_eq!(Label::Hoax.index(), 1);
        assert_eq!(serde_json::to_string(&Label::Hoax).unwrap(), "\"HOAX\"");
        assert_eq!(Label::Real.emphasis_tag(), "supports-real");
    }
}

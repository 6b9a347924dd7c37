use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// An `owner/name` repository reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoSlug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(Error::InvalidRepo(s.to_string())),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slug() {
        let slug: RepoSlug = "rust-lang/cargo".parse().unwrap();
        assert_eq!(slug.owner, "rust-lang");
        assert_eq!(slug.name, "cargo");
        assert_eq!(slug.to_string(), "rust-lang/cargo");
    }

    #[test]
    fn test_reject_malformed_slugs() {
        for bad in ["cargo", "/cargo", "rust-lang/", "a/b/c", ""] {
            assert!(bad.parse::<RepoSlug>().is_err(), "accepted {:?}", bad);
        }
    }
}

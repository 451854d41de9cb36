//! Hyperlinks between resources.
//!
//! Every fetched resource carries a list of named links; navigation between
//! resources (and between collection pages) goes through these links rather
//! than hand-built URLs.

use serde::{Deserialize, Serialize};

/// A generic link: a relation name plus an absolute URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// What this link points to, relative to the resource carrying it,
    /// e.g. `"self"`, `"game"` or `"next"`.
    pub rel: String,
    /// The absolute URI of the target.
    pub uri: String,
}

/// A link pointing to an image, with its dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetLink {
    pub uri: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Anything that exposes API links: every resource, plus the pagination
/// metadata of collections. Link resolution is written once against this
/// capability.
pub trait HasLinks {
    fn links(&self) -> &[Link];

    /// The first link whose relation name matches, or `None` if there is no
    /// such link. Absence is a normal outcome for optional relations.
    fn link(&self, rel: &str) -> Option<&Link> {
        first_link(self.links(), rel)
    }
}

/// First-match-by-relation-name lookup; ties are broken by list order.
pub fn first_link<'a>(links: &'a [Link], rel: &str) -> Option<&'a Link> {
    links.iter().find(|link| link.rel == rel)
}

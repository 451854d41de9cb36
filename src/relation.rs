//! Relationship fields with ambiguous wire shapes.
//!
//! A relationship field on a resource arrives in one of three shapes: it is
//! missing entirely, it holds bare identifiers, or it holds a fully embedded
//! sub-resource (`{"data": ...}`) because the request asked for an embed.
//! The enums here resolve that shape once, at the deserialization boundary,
//! so accessors only ever match on an explicit variant instead of guessing
//! at raw JSON. Accessors re-evaluate the variant on every call; nothing is
//! cached on the resource itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Player, PlayerLink, User};
use crate::types::ModLevel;

/// A to-one relationship: either a bare identifier or an embedded resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Relation<T> {
    /// The field was not part of the response at all.
    #[default]
    Absent,
    /// Only the identifier of the related resource.
    Id(String),
    /// The related resource was embedded into the response.
    Embedded { data: T },
    /// The embed was requested but there is no related resource. The API
    /// sends an empty list in place of the embed in that case.
    Empty { data: Vec<()> },
}

impl<T> Relation<T> {
    /// Whether the response carried no usable relation, either because the
    /// field was missing or because the embed resolved to nothing.
    pub fn is_absent(&self) -> bool {
        matches!(self, Relation::Absent | Relation::Empty { .. })
    }

    /// The bare identifier, if that is what the response carried.
    pub fn id(&self) -> Option<&str> {
        match self {
            Relation::Id(id) => Some(id),
            _ => None,
        }
    }

    /// The embedded value, if the relation was embedded.
    pub fn embedded(&self) -> Option<&T> {
        match self {
            Relation::Embedded { data } => Some(data),
            _ => None,
        }
    }
}

/// A to-many relationship: either a list of bare identifiers or an embedded
/// sub-collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationList<T> {
    /// The field was not part of the response at all.
    Absent,
    /// Only the identifiers of the related resources.
    Ids(Vec<String>),
    /// The related resources were embedded into the response.
    Embedded { data: Vec<T> },
}

impl<T> Default for RelationList<T> {
    fn default() -> Self {
        RelationList::Absent
    }
}

impl<T> RelationList<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, RelationList::Absent)
    }

    /// The embedded values, if the relation was embedded.
    pub fn embedded(&self) -> Option<&[T]> {
        match self {
            RelationList::Embedded { data } => Some(data),
            _ => None,
        }
    }
}

/// The players of a run or leaderboard: either a list of user/guest links
/// or embedded player objects (each tagged with `rel`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayersRelation {
    #[default]
    Absent,
    /// Links that point at either a user or a guest each.
    Links(Vec<PlayerLink>),
    /// Fully embedded users and guests.
    Embedded { data: Vec<Player> },
}

/// The moderators of a game or series: either a map of user IDs to their
/// moderation level, or embedded user objects. The API drops the level
/// information when moderators are embedded, so the embedded variant only
/// yields [`ModLevel::Unknown`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModeratorsRelation {
    #[default]
    Absent,
    Map(BTreeMap<String, ModLevel>),
    Embedded { data: Vec<User> },
}

impl ModeratorsRelation {
    /// Map of user ID to moderation level. Always available without network
    /// I/O; embedded moderators report [`ModLevel::Unknown`].
    pub fn moderator_map(&self) -> BTreeMap<String, ModLevel> {
        match self {
            ModeratorsRelation::Absent => BTreeMap::new(),
            ModeratorsRelation::Map(map) => map.clone(),
            ModeratorsRelation::Embedded { data } => data
                .iter()
                .map(|user| (user.id.clone(), ModLevel::Unknown))
                .collect(),
        }
    }
}

//! Players: registered users or guests.

use serde::{Deserialize, Serialize};

use crate::client::{Envelope, SpeedrunClient};
use crate::error::Result;
use crate::query::Query;

use super::{Guest, User};

/// A participant of a run: either a registered user or a guest. The wire
/// payload tags each entry with `rel`, which disambiguates the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rel", rename_all = "lowercase")]
pub enum Player {
    User(User),
    Guest(Guest),
}

impl Player {
    /// The display name: the international name for users, the plain name
    /// for guests.
    pub fn name(&self) -> &str {
        match self {
            Player::User(user) => &user.names.international,
            Player::Guest(guest) => &guest.name,
        }
    }

    pub fn as_user(&self) -> Option<&User> {
        match self {
            Player::User(user) => Some(user),
            Player::Guest(_) => None,
        }
    }

    pub fn as_guest(&self) -> Option<&Guest> {
        match self {
            Player::User(_) => None,
            Player::Guest(guest) => Some(guest),
        }
    }
}

/// A link that points at either a user (carrying their ID) or a guest
/// (carrying their name), disambiguated by the `rel` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rel", rename_all = "lowercase")]
pub enum PlayerLink {
    User { id: String, uri: String },
    Guest { name: String, uri: String },
}

impl PlayerLink {
    /// The URI this link points at.
    pub fn uri(&self) -> &str {
        match self {
            PlayerLink::User { uri, .. } | PlayerLink::Guest { uri, .. } => uri,
        }
    }

    /// Fetch the user or guest the link points to.
    pub async fn fetch(&self, client: &SpeedrunClient) -> Result<Player> {
        match self {
            PlayerLink::User { uri, .. } => {
                let response: Envelope<User> = client.get_link(uri, &Query::new()).await?;
                Ok(Player::User(response.data))
            }
            PlayerLink::Guest { uri, .. } => {
                let response: Envelope<Guest> = client.get_link(uri, &Query::new()).await?;
                Ok(Player::Guest(response.data))
            }
        }
    }
}

//! User model and its relationship accessors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{Envelope, SpeedrunClient};
use crate::collection::Collection;
use crate::error::Result;
use crate::link::{HasLinks, Link};
use crate::query::{apply_cursor, apply_sorting, push, Cursor, Embeds, Query, Sorting};

use super::{
    fetch_collection_link, Game, GameFilter, PersonalBest, PersonalBestFilter, Run, RunFilter,
};
use crate::types::{lenient_datetime, Names};

/// A registered user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: String,

    /// International and japanese names.
    #[serde(default)]
    pub names: Names,

    /// Link to the user's profile on speedrun.com.
    #[serde(default)]
    pub weblink: String,

    /// How the username is rendered on speedrun.com.
    #[serde(rename = "name-style", default)]
    pub name_style: NameStyle,

    /// Site role, e.g. `"user"`, `"moderator"` or `"admin"`.
    #[serde(default)]
    pub role: String,

    /// When the user signed up. Old accounts carry no timestamp.
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub signup: Option<DateTime<Utc>>,

    /// Country and optional sub-region of the user.
    #[serde(default)]
    pub location: Option<UserLocation>,

    #[serde(default)]
    pub twitch: Option<SocialLink>,
    #[serde(default)]
    pub hitbox: Option<SocialLink>,
    #[serde(default)]
    pub youtube: Option<SocialLink>,
    #[serde(default)]
    pub twitter: Option<SocialLink>,
    #[serde(default)]
    pub speedrunslive: Option<SocialLink>,

    /// API links to related resources.
    #[serde(default)]
    pub links: Vec<Link>,
}

/// A minimal link pointing to an external website.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub uri: String,
}

/// A country or region code with names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub names: Names,
}

/// Country plus optional sub-region of a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    #[serde(default)]
    pub country: Location,
    #[serde(default)]
    pub region: Option<Location>,
}

/// Hex color codes for light and dark backgrounds, used to display
/// usernames.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameColor {
    #[serde(default)]
    pub light: String,
    #[serde(default)]
    pub dark: String,
}

/// Username rendering style: a solid color or a gradient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameStyle {
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub color: Option<NameColor>,
    #[serde(rename = "color-from", default)]
    pub color_from: Option<NameColor>,
    #[serde(rename = "color-to", default)]
    pub color_to: Option<NameColor>,
}

impl User {
    /// Fetch a single user by their ID.
    pub async fn by_id(client: &SpeedrunClient, id: &str) -> Result<User> {
        let response: Envelope<User> = client
            .get(&format!("users/{}", urlencoding::encode(id)), &Query::new())
            .await?;
        Ok(response.data)
    }

    /// Fetch one page of the user list. In most cases you will want a
    /// filter; paging through *all* users takes a lot of requests.
    pub async fn list(
        client: &SpeedrunClient,
        filter: &UserFilter,
        sorting: Option<&Sorting>,
        cursor: Option<&Cursor>,
    ) -> Result<Collection<User>> {
        let mut query = Query::new();
        filter.apply(&mut query);
        apply_sorting(sorting, &mut query);
        apply_cursor(cursor, &mut query);

        client.get("users", &query).await
    }

    /// Runs done by this user, optionally filtered and sorted. Always a
    /// collection.
    pub async fn runs(
        &self,
        client: &SpeedrunClient,
        filter: &RunFilter,
        sorting: Option<&Sorting>,
        embeds: &Embeds,
    ) -> Result<Collection<Run>> {
        let mut query = Query::new();
        filter.apply(&mut query);
        apply_sorting(sorting, &mut query);
        embeds.apply(&mut query);
        fetch_collection_link(client, self.link("runs"), query).await
    }

    /// Games moderated by this user, optionally filtered and sorted.
    /// Always a collection.
    pub async fn moderated_games(
        &self,
        client: &SpeedrunClient,
        filter: &GameFilter,
        sorting: Option<&Sorting>,
        embeds: &Embeds,
    ) -> Result<Collection<Game>> {
        let mut query = Query::new();
        filter.apply(&mut query);
        apply_sorting(sorting, &mut query);
        embeds.apply(&mut query);
        fetch_collection_link(client, self.link("games"), query).await
    }

    /// Personal bests of this user, optionally filtered. The endpoint is
    /// not paginated; the result is a plain list.
    pub async fn personal_bests(
        &self,
        client: &SpeedrunClient,
        filter: &PersonalBestFilter,
        embeds: &Embeds,
    ) -> Result<Vec<PersonalBest>> {
        let Some(link) = self.link("personal-bests") else {
            return Ok(Vec::new());
        };

        let mut query = Query::new();
        filter.apply(&mut query);
        embeds.apply(&mut query);

        let response: Envelope<Vec<PersonalBest>> = client.get_link(&link.uri, &query).await?;
        Ok(response.data)
    }
}

impl HasLinks for User {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

/// Filtering options when fetching a list of users.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    /// Case-insensitive exact-match across names and social profiles.
    pub lookup: Option<String>,
    /// Case-insensitive name prefix.
    pub name: Option<String>,
    pub twitch: Option<String>,
    pub hitbox: Option<String>,
    pub twitter: Option<String>,
    pub speedrunslive: Option<String>,
}

impl UserFilter {
    pub(crate) fn apply(&self, query: &mut Query) {
        if let Some(lookup) = &self.lookup {
            push(query, "lookup", lookup.clone());
        }
        if let Some(name) = &self.name {
            push(query, "name", name.clone());
        }
        if let Some(twitch) = &self.twitch {
            push(query, "twitch", twitch.clone());
        }
        if let Some(hitbox) = &self.hitbox {
            push(query, "hitbox", hitbox.clone());
        }
        if let Some(twitter) = &self.twitter {
            push(query, "twitter", twitter.clone());
        }
        if let Some(speedrunslive) = &self.speedrunslive {
            push(query, "speedrunslive", speedrunslive.clone());
        }
    }
}

//! Series model and its relationship accessors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::client::{Envelope, SpeedrunClient};
use crate::collection::Collection;
use crate::error::Result;
use crate::link::{AssetLink, HasLinks, Link};
use crate::query::{apply_cursor, apply_sorting, push, Cursor, Embeds, Query, Sorting};
use crate::relation::ModeratorsRelation;
use crate::types::{ModLevel, Names};

use super::{fetch_collection_link, Game, GameFilter, User};

/// A series of games, like "Grand Theft Auto".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Unique series ID.
    pub id: String,

    /// International and japanese names.
    #[serde(default)]
    pub names: Names,

    /// Unique abbreviation, e.g. "gta" for Grand Theft Auto.
    #[serde(default)]
    pub abbreviation: String,

    /// Link to the series page on speedrun.com.
    #[serde(default)]
    pub weblink: String,

    /// Images for the series page design, like background images and
    /// trophy icons. Not every asset slot is set for every series.
    #[serde(default)]
    pub assets: BTreeMap<String, Option<AssetLink>>,

    /// API links to related resources.
    #[serde(default)]
    pub links: Vec<Link>,

    /// Moderators; either a map of user IDs to mod levels, or a list of
    /// users when embedded. Use the accessor methods.
    #[serde(default)]
    pub moderators: ModeratorsRelation,
}

impl Series {
    /// Fetch a single series by its ID.
    pub async fn by_id(client: &SpeedrunClient, id: &str, embeds: &Embeds) -> Result<Series> {
        let mut query = Query::new();
        embeds.apply(&mut query);

        let response: Envelope<Series> = client
            .get(&format!("series/{}", urlencoding::encode(id)), &query)
            .await?;
        Ok(response.data)
    }

    /// Fetch a single series by its abbreviation. Convenient, but
    /// abbreviations can change over time, unlike IDs.
    pub async fn by_abbreviation(
        client: &SpeedrunClient,
        abbreviation: &str,
        embeds: &Embeds,
    ) -> Result<Series> {
        Series::by_id(client, abbreviation, embeds).await
    }

    /// Fetch one page of the series list, optionally filtered and sorted.
    pub async fn list(
        client: &SpeedrunClient,
        filter: &SeriesFilter,
        sorting: Option<&Sorting>,
        cursor: Option<&Cursor>,
        embeds: &Embeds,
    ) -> Result<Collection<Series>> {
        let mut query = Query::new();
        filter.apply(&mut query);
        apply_sorting(sorting, &mut query);
        apply_cursor(cursor, &mut query);
        embeds.apply(&mut query);

        client.get("series", &query).await
    }

    /// Games in this series, optionally filtered and sorted. Always a
    /// collection.
    pub async fn games(
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

    /// A map of user IDs to their moderation levels. The levels are not
    /// part of the payload when moderators were embedded; embedded users
    /// all map to [`ModLevel::Unknown`].
    pub fn moderator_map(&self) -> BTreeMap<String, ModLevel> {
        self.moderators.moderator_map()
    }

    /// The users moderating this series. Embedded users are returned
    /// as-is; otherwise every user is fetched individually.
    pub async fn moderators(&self, client: &SpeedrunClient) -> Result<Vec<User>> {
        match &self.moderators {
            ModeratorsRelation::Embedded { data } => Ok(data.clone()),
            ModeratorsRelation::Map(map) => {
                let mut users = Vec::with_capacity(map.len());
                for id in map.keys() {
                    users.push(User::by_id(client, id).await?);
                }
                Ok(users)
            }
            ModeratorsRelation::Absent => Ok(Vec::new()),
        }
    }
}

impl HasLinks for Series {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

/// Filtering options when fetching a list of series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesFilter {
    /// Fuzzy name search.
    pub name: Option<String>,
    /// Exact abbreviation match.
    pub abbreviation: Option<String>,
    /// Moderated by the user with this ID.
    pub moderator: Option<String>,
}

impl SeriesFilter {
    pub(crate) fn apply(&self, query: &mut Query) {
        if let Some(name) = &self.name {
            push(query, "name", name.clone());
        }
        if let Some(abbreviation) = &self.abbreviation {
            push(query, "abbreviation", abbreviation.clone());
        }
        if let Some(moderator) = &self.moderator {
            push(query, "moderator", moderator.clone());
        }
    }
}

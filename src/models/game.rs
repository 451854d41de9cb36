//! Game model and its relationship accessors.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{Envelope, SpeedrunClient};
use crate::collection::Collection;
use crate::error::Result;
use crate::link::{AssetLink, HasLinks, Link};
use crate::query::{apply_cursor, apply_sorting, push, Cursor, Embeds, OptionalFlag, Query, Sorting};
use crate::relation::{ModeratorsRelation, RelationList};
use crate::types::{lenient_datetime, ModLevel, Names, TimingMethod};

use super::{
    fetch_collection_link, fetch_one_link, Category, CategoryFilter, Leaderboard,
    LeaderboardFilter, LeaderboardOptions, Level, Platform, Region, Run, RunFilter, Series, User,
    Variable,
};

/// A single game or romhack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Unique ID of this game.
    pub id: String,

    /// International and japanese names; the international one is always
    /// present.
    pub names: Names,

    /// Unique abbreviation, e.g. `"sms"` for Super Mario Sunshine.
    #[serde(default)]
    pub abbreviation: String,

    /// Link to the game page on speedrun.com.
    #[serde(default)]
    pub weblink: String,

    /// Year in which the game was released.
    #[serde(default)]
    pub released: u32,

    /// Ruleset for the game.
    #[serde(default)]
    pub ruleset: Ruleset,

    /// Whether or not this is a romhack.
    #[serde(default)]
    pub romhack: bool,

    /// When the game was added on speedrun.com; old games carry no
    /// timestamp.
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created: Option<DateTime<Utc>>,

    /// Images for the game page design (box art, trophy icons, ...).
    #[serde(default)]
    pub assets: BTreeMap<String, Option<AssetLink>>,

    /// API links to related resources.
    #[serde(default)]
    pub links: Vec<Link>,

    /// Platforms the game is assigned to; use the accessor methods.
    #[serde(default)]
    pub platforms: RelationList<Platform>,

    /// Regions the game is assigned to; use the accessor methods.
    #[serde(default)]
    pub regions: RelationList<Region>,

    /// Moderators of the game; use the accessor methods.
    #[serde(default)]
    pub moderators: ModeratorsRelation,

    /// Categories, only present when embedded; use the accessor methods.
    #[serde(default)]
    pub categories: RelationList<Category>,

    /// Levels, only present when embedded; use the accessor methods.
    #[serde(default)]
    pub levels: RelationList<Level>,

    /// Variables, only present when embedded; use the accessor methods.
    #[serde(default)]
    pub variables: RelationList<Variable>,
}

/// Ruleset for a game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Ruleset {
    #[serde(default)]
    pub show_milliseconds: bool,
    #[serde(default)]
    pub require_verification: bool,
    #[serde(default)]
    pub require_video: bool,
    #[serde(default)]
    pub run_times: Vec<TimingMethod>,
    #[serde(default)]
    pub default_time: Option<TimingMethod>,
    #[serde(default)]
    pub emulators_allowed: bool,
}

impl Game {
    /// Fetch a single game or romhack by its ID.
    pub async fn by_id(client: &SpeedrunClient, id: &str, embeds: &Embeds) -> Result<Game> {
        let mut query = Query::new();
        embeds.apply(&mut query);

        let response: Envelope<Game> = client
            .get(&format!("games/{}", urlencoding::encode(id)), &query)
            .await?;
        Ok(response.data)
    }

    /// Fetch a single game by its abbreviation. Convenient, but
    /// abbreviations can change over time (IDs cannot), so prefer
    /// [`Game::by_id`] for anything persistent.
    pub async fn by_abbreviation(
        client: &SpeedrunClient,
        abbreviation: &str,
        embeds: &Embeds,
    ) -> Result<Game> {
        Self::by_id(client, abbreviation, embeds).await
    }

    /// Fetch one page of the game list. In most cases you will want a
    /// filter; paging through *all* games takes a lot of requests.
    pub async fn list(
        client: &SpeedrunClient,
        filter: &GameFilter,
        sorting: Option<&Sorting>,
        cursor: Option<&Cursor>,
        embeds: &Embeds,
    ) -> Result<Collection<Game>> {
        let mut query = Query::new();
        filter.apply(&mut query);
        apply_sorting(sorting, &mut query);
        apply_cursor(cursor, &mut query);
        embeds.apply(&mut query);

        client.get("games", &query).await
    }

    /// The series the game belongs to. `None` only when the data on the
    /// site is broken and the link is missing.
    pub async fn series(&self, client: &SpeedrunClient, embeds: &Embeds) -> Result<Option<Series>> {
        let mut query = Query::new();
        embeds.apply(&mut query);
        fetch_one_link(client, self.link("series"), query).await
    }

    /// Platform IDs this game is assigned to. Always available without
    /// network I/O; when platforms were embedded, the IDs are collected
    /// from the embedded objects.
    pub fn platform_ids(&self) -> Vec<String> {
        match &self.platforms {
            RelationList::Absent => Vec::new(),
            RelationList::Ids(ids) => ids.clone(),
            RelationList::Embedded { data } => data.iter().map(|p| p.id.clone()).collect(),
        }
    }

    /// The platforms this game is assigned to. When they were not
    /// embedded, each one is fetched from the network, one request per
    /// platform, in list order. A failure partway through surfaces the
    /// error instead of a partial list.
    pub async fn platforms(&self, client: &SpeedrunClient) -> Result<Vec<Platform>> {
        match &self.platforms {
            RelationList::Absent => Ok(Vec::new()),
            RelationList::Ids(ids) => {
                let mut result = Vec::with_capacity(ids.len());
                for id in ids {
                    result.push(Platform::by_id(client, id).await?);
                }
                Ok(result)
            }
            RelationList::Embedded { data } => Ok(data.clone()),
        }
    }

    /// Region IDs this game is assigned to. Always available without
    /// network I/O.
    pub fn region_ids(&self) -> Vec<String> {
        match &self.regions {
            RelationList::Absent => Vec::new(),
            RelationList::Ids(ids) => ids.clone(),
            RelationList::Embedded { data } => data.iter().map(|r| r.id.clone()).collect(),
        }
    }

    /// The regions this game is assigned to; one request per region when
    /// they were not embedded.
    pub async fn regions(&self, client: &SpeedrunClient) -> Result<Vec<Region>> {
        match &self.regions {
            RelationList::Absent => Ok(Vec::new()),
            RelationList::Ids(ids) => {
                let mut result = Vec::with_capacity(ids.len());
                for id in ids {
                    result.push(Region::by_id(client, id).await?);
                }
                Ok(result)
            }
            RelationList::Embedded { data } => Ok(data.clone()),
        }
    }

    /// The categories of this game. When they were not embedded, one
    /// additional request is performed and only then are filter, sorting
    /// and embeds taken into account.
    pub async fn categories(
        &self,
        client: &SpeedrunClient,
        filter: &CategoryFilter,
        sorting: Option<&Sorting>,
        embeds: &Embeds,
    ) -> Result<Vec<Category>> {
        if let Some(data) = self.categories.embedded() {
            return Ok(data.to_vec());
        }

        let mut query = Query::new();
        filter.apply(&mut query);
        apply_sorting(sorting, &mut query);
        embeds.apply(&mut query);

        let collection: Collection<Category> =
            fetch_collection_link(client, self.link("categories"), query).await?;
        Ok(collection.data)
    }

    /// The levels of this game. When they were not embedded, one
    /// additional request is performed and only then are sorting and
    /// embeds taken into account.
    pub async fn levels(
        &self,
        client: &SpeedrunClient,
        sorting: Option<&Sorting>,
        embeds: &Embeds,
    ) -> Result<Vec<Level>> {
        if let Some(data) = self.levels.embedded() {
            return Ok(data.to_vec());
        }

        let mut query = Query::new();
        apply_sorting(sorting, &mut query);
        embeds.apply(&mut query);

        let collection: Collection<Level> =
            fetch_collection_link(client, self.link("levels"), query).await?;
        Ok(collection.data)
    }

    /// The variables of this game. When they were not embedded, one
    /// additional request is performed and only then is sorting taken into
    /// account.
    pub async fn variables(
        &self,
        client: &SpeedrunClient,
        sorting: Option<&Sorting>,
    ) -> Result<Vec<Variable>> {
        if let Some(data) = self.variables.embedded() {
            return Ok(data.to_vec());
        }

        let mut query = Query::new();
        apply_sorting(sorting, &mut query);

        let collection: Collection<Variable> =
            fetch_collection_link(client, self.link("variables"), query).await?;
        Ok(collection.data)
    }

    /// Map of user IDs to their moderation level. The API drops the level
    /// when moderators are embedded; in that case every entry is
    /// [`ModLevel::Unknown`]. Needing both takes two requests.
    pub fn moderator_map(&self) -> BTreeMap<String, ModLevel> {
        self.moderators.moderator_map()
    }

    /// The users moderating this game. When they were not embedded, each
    /// one is fetched from the network, one request per user.
    pub async fn moderators(&self, client: &SpeedrunClient) -> Result<Vec<User>> {
        match &self.moderators {
            ModeratorsRelation::Absent => Ok(Vec::new()),
            ModeratorsRelation::Map(map) => {
                let mut result = Vec::with_capacity(map.len());
                for id in map.keys() {
                    result.push(User::by_id(client, id).await?);
                }
                Ok(result)
            }
            ModeratorsRelation::Embedded { data } => Ok(data.clone()),
        }
    }

    /// The romhacks of this game. Always a collection, even when there are
    /// no romhacks or the game is itself a romhack.
    pub async fn romhacks(
        &self,
        client: &SpeedrunClient,
        embeds: &Embeds,
    ) -> Result<Collection<Game>> {
        let mut query = Query::new();
        embeds.apply(&mut query);
        fetch_collection_link(client, self.link("romhacks"), query).await
    }

    /// The primary leaderboard, if any, for the game.
    pub async fn primary_leaderboard(
        &self,
        client: &SpeedrunClient,
        options: &LeaderboardOptions,
        embeds: &Embeds,
    ) -> Result<Option<Leaderboard>> {
        let mut query = Query::new();
        options.apply(&mut query);
        embeds.apply(&mut query);
        fetch_one_link(client, self.link("leaderboard"), query).await
    }

    /// Leaderboards for the game, full-game and per-level ones. Always a
    /// collection.
    pub async fn records(
        &self,
        client: &SpeedrunClient,
        filter: &LeaderboardFilter,
        embeds: &Embeds,
    ) -> Result<Collection<Leaderboard>> {
        let mut query = Query::new();
        filter.apply(&mut query);
        embeds.apply(&mut query);
        fetch_collection_link(client, self.link("records"), query).await
    }

    /// Runs done in this game, optionally filtered and sorted. Always a
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
}

impl HasLinks for Game {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

/// Filtering options when fetching a list of games.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameFilter {
    /// Fuzzy match on game names.
    pub name: Option<String>,
    /// Exact abbreviation.
    pub abbreviation: Option<String>,
    /// Release year.
    pub released: Option<u32>,
    /// Platform ID.
    pub platform: Option<String>,
    /// Region ID.
    pub region: Option<String>,
    /// User ID of a moderator.
    pub moderator: Option<String>,
    /// Restrict to romhacks (or non-romhacks).
    pub romhack: OptionalFlag,
}

impl GameFilter {
    pub(crate) fn apply(&self, query: &mut Query) {
        if let Some(name) = &self.name {
            push(query, "name", name.clone());
        }
        if let Some(abbreviation) = &self.abbreviation {
            push(query, "abbreviation", abbreviation.clone());
        }
        if let Some(released) = self.released {
            push(query, "released", released.to_string());
        }
        if let Some(platform) = &self.platform {
            push(query, "platform", platform.clone());
        }
        if let Some(region) = &self.region {
            push(query, "region", region.clone());
        }
        if let Some(moderator) = &self.moderator {
            push(query, "moderator", moderator.clone());
        }
        self.romhack.apply("romhack", query);
    }
}

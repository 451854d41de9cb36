//! Run model and its relationship accessors.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{Envelope, SpeedrunClient};
use crate::collection::Collection;
use crate::error::Result;
use crate::link::{HasLinks, Link};
use crate::query::{apply_cursor, apply_sorting, push, Cursor, Embeds, OptionalFlag, Query, Sorting};
use crate::relation::{PlayersRelation, Relation};
use crate::types::{lenient_datetime, Duration};

use super::{fetch_one_link, Category, Game, Level, Platform, Player, Region, User};

/// A single run: one (possibly multi-player) attempt at a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Unique run ID.
    pub id: String,

    /// Link to the run on speedrun.com.
    #[serde(default)]
    pub weblink: String,

    /// Videos submitted for the run.
    #[serde(default)]
    pub videos: Option<RunVideos>,

    /// The runner's comment.
    #[serde(default)]
    pub comment: Option<String>,

    /// The verification status of the run.
    pub status: RunStatus,

    /// The date the run was done on, as given by the runner.
    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// When the run was submitted to speedrun.com.
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub submitted: Option<DateTime<Utc>>,

    /// Timing information. Only the primary time is always available.
    #[serde(default)]
    pub times: RunTimes,

    /// The system the run was done on.
    #[serde(default)]
    pub system: RunSystem,

    /// If available, a link to a website with the splits for the run.
    #[serde(default)]
    pub splits: Option<Link>,

    /// Chosen variable values, as a map of variable ID to value ID.
    #[serde(default)]
    pub values: BTreeMap<String, String>,

    /// API links to related resources.
    #[serde(default)]
    pub links: Vec<Link>,

    /// The game, as an ID or embedded; use the accessor methods.
    #[serde(default)]
    pub game: Relation<Game>,

    /// The category, as an ID or embedded; use the accessor methods.
    #[serde(default)]
    pub category: Relation<Category>,

    /// The level, absent for full-game runs; use the accessor methods.
    #[serde(default)]
    pub level: Relation<Level>,

    /// The platform, only present when embedded; otherwise the ID lives
    /// in [`RunSystem`]. Use the accessor methods.
    #[serde(default)]
    pub platform: Relation<Platform>,

    /// The region, only present when embedded; otherwise the ID lives in
    /// [`RunSystem`]. Use the accessor methods.
    #[serde(default)]
    pub region: Relation<Region>,

    /// The participants, as links or embedded; use the accessor methods.
    #[serde(default)]
    pub players: PlayersRelation,
}

/// Videos submitted for a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunVideos {
    /// The original free-text submission value.
    #[serde(default)]
    pub text: Option<String>,

    /// Links to videos on external websites.
    #[serde(default)]
    pub links: Vec<Link>,
}

/// The verification status of a run, tagged by the `status` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RunStatus {
    /// Submitted but not examined yet.
    New,
    /// Accepted by an examiner.
    Verified {
        /// User ID of the examiner.
        #[serde(default)]
        examiner: Option<String>,
        /// When the run was verified. Not known for old runs.
        #[serde(rename = "verify-date", default, deserialize_with = "lenient_datetime")]
        verify_date: Option<DateTime<Utc>>,
    },
    /// Rejected by an examiner.
    Rejected {
        /// User ID of the examiner.
        #[serde(default)]
        examiner: Option<String>,
        /// The reason given for the rejection, if any.
        #[serde(default)]
        reason: Option<String>,
    },
}

impl RunStatus {
    /// The examiner's user ID, if the run has been examined.
    pub fn examiner(&self) -> Option<&str> {
        match self {
            RunStatus::New => None,
            RunStatus::Verified { examiner, .. } | RunStatus::Rejected { examiner, .. } => {
                examiner.as_deref()
            }
        }
    }
}

/// The measured times of a run. Which clocks are filled depends on the
/// game's timing rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunTimes {
    /// The time that the leaderboard ranks by.
    #[serde(rename = "primary_t", default)]
    pub primary: Option<Duration>,

    /// Wall-clock time.
    #[serde(rename = "realtime_t", default)]
    pub realtime: Option<Duration>,

    /// Wall-clock time with loading screens subtracted.
    #[serde(rename = "realtime_noloads_t", default)]
    pub realtime_noloads: Option<Duration>,

    /// Time as measured by the game itself.
    #[serde(rename = "ingame_t", default)]
    pub ingame: Option<Duration>,
}

/// The system a run was done on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSystem {
    /// Platform ID.
    #[serde(default)]
    pub platform: Option<String>,

    /// Whether the run was done on an emulator.
    #[serde(default)]
    pub emulated: bool,

    /// Region ID.
    #[serde(default)]
    pub region: Option<String>,
}

impl Run {
    /// Fetch a single run by its ID.
    pub async fn by_id(client: &SpeedrunClient, id: &str, embeds: &Embeds) -> Result<Run> {
        let mut query = Query::new();
        embeds.apply(&mut query);

        let response: Envelope<Run> = client
            .get(&format!("runs/{}", urlencoding::encode(id)), &query)
            .await?;
        Ok(response.data)
    }

    /// Fetch one page of the run list, optionally filtered and sorted.
    pub async fn list(
        client: &SpeedrunClient,
        filter: &RunFilter,
        sorting: Option<&Sorting>,
        cursor: Option<&Cursor>,
        embeds: &Embeds,
    ) -> Result<Collection<Run>> {
        let mut query = Query::new();
        filter.apply(&mut query);
        apply_sorting(sorting, &mut query);
        apply_cursor(cursor, &mut query);
        embeds.apply(&mut query);

        client.get("runs", &query).await
    }

    /// The game the run was done in: the embedded one when available,
    /// otherwise one additional request. `None` only when the data on the
    /// site is broken.
    pub async fn game(&self, client: &SpeedrunClient, embeds: &Embeds) -> Result<Option<Game>> {
        match &self.game {
            Relation::Embedded { data } => Ok(Some(data.clone())),
            Relation::Id(id) => Ok(Some(Game::by_id(client, id, embeds).await?)),
            Relation::Absent | Relation::Empty { .. } => {
                let mut query = Query::new();
                embeds.apply(&mut query);
                fetch_one_link(client, self.link("game"), query).await
            }
        }
    }

    /// The category the run was done in.
    pub async fn category(
        &self,
        client: &SpeedrunClient,
        embeds: &Embeds,
    ) -> Result<Option<Category>> {
        match &self.category {
            Relation::Embedded { data } => Ok(Some(data.clone())),
            Relation::Id(id) => Ok(Some(Category::by_id(client, id, embeds).await?)),
            Relation::Absent | Relation::Empty { .. } => {
                let mut query = Query::new();
                embeds.apply(&mut query);
                fetch_one_link(client, self.link("category"), query).await
            }
        }
    }

    /// The level the run was done in. Full-game runs have no level, so
    /// `None` is a normal outcome.
    pub async fn level(&self, client: &SpeedrunClient, embeds: &Embeds) -> Result<Option<Level>> {
        match &self.level {
            Relation::Embedded { data } => Ok(Some(data.clone())),
            Relation::Id(id) => Ok(Some(Level::by_id(client, id, embeds).await?)),
            Relation::Absent | Relation::Empty { .. } => Ok(None),
        }
    }

    /// The platform the run was done on. Not every run has one.
    pub async fn platform(&self, client: &SpeedrunClient) -> Result<Option<Platform>> {
        match &self.platform {
            Relation::Embedded { data } => Ok(Some(data.clone())),
            Relation::Id(id) => Ok(Some(Platform::by_id(client, id).await?)),
            Relation::Absent | Relation::Empty { .. } => match &self.system.platform {
                Some(id) if !id.is_empty() => Ok(Some(Platform::by_id(client, id).await?)),
                _ => Ok(None),
            },
        }
    }

    /// The region the run was done in. Not every run has one.
    pub async fn region(&self, client: &SpeedrunClient) -> Result<Option<Region>> {
        match &self.region {
            Relation::Embedded { data } => Ok(Some(data.clone())),
            Relation::Id(id) => Ok(Some(Region::by_id(client, id).await?)),
            Relation::Absent | Relation::Empty { .. } => match &self.system.region {
                Some(id) if !id.is_empty() => Ok(Some(Region::by_id(client, id).await?)),
                _ => Ok(None),
            },
        }
    }

    /// All participants of the run. Embedded players are returned as-is;
    /// otherwise every user and guest is fetched individually, and the
    /// first failing request aborts the batch.
    pub async fn players(&self, client: &SpeedrunClient) -> Result<Vec<Player>> {
        match &self.players {
            PlayersRelation::Embedded { data } => Ok(data.clone()),
            PlayersRelation::Links(links) => {
                let mut players = Vec::with_capacity(links.len());
                for link in links {
                    players.push(link.fetch(client).await?);
                }
                Ok(players)
            }
            PlayersRelation::Absent => Ok(Vec::new()),
        }
    }

    /// The user that examined the run after submission. `None` for runs
    /// that have not been examined yet.
    pub async fn examiner(&self, client: &SpeedrunClient) -> Result<Option<User>> {
        fetch_one_link(client, self.link("examiner"), Query::new()).await
    }
}

impl HasLinks for Run {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

/// Filtering options when fetching a list of runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunFilter {
    /// Done by the user with this ID.
    pub user: Option<String>,
    /// Done by the guest with this name.
    pub guest: Option<String>,
    /// Last examined by the user with this ID.
    pub examiner: Option<String>,
    pub game: Option<String>,
    pub level: Option<String>,
    pub category: Option<String>,
    pub platform: Option<String>,
    pub region: Option<String>,
    /// Include only emulated or only non-emulated runs.
    pub emulated: OptionalFlag,
    /// `"new"`, `"verified"` or `"rejected"`.
    pub status: Option<String>,
}

impl RunFilter {
    pub(crate) fn apply(&self, query: &mut Query) {
        if let Some(user) = &self.user {
            push(query, "user", user.clone());
        }
        if let Some(guest) = &self.guest {
            push(query, "guest", guest.clone());
        }
        if let Some(examiner) = &self.examiner {
            push(query, "examiner", examiner.clone());
        }
        if let Some(game) = &self.game {
            push(query, "game", game.clone());
        }
        if let Some(level) = &self.level {
            push(query, "level", level.clone());
        }
        if let Some(category) = &self.category {
            push(query, "category", category.clone());
        }
        if let Some(platform) = &self.platform {
            push(query, "platform", platform.clone());
        }
        if let Some(region) = &self.region {
            push(query, "region", region.clone());
        }
        self.emulated.apply("emulated", query);
        if let Some(status) = &self.status {
            push(query, "status", status.clone());
        }
    }
}

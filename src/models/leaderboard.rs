//! Leaderboard model and its relationship accessors.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::{Envelope, SpeedrunClient};
use crate::error::{Error, Result};
use crate::link::{HasLinks, Link};
use crate::query::{push, Embeds, OptionalFlag, Query};
use crate::relation::{PlayersRelation, Relation, RelationList};
use crate::types::TimingMethod;

use super::{Category, CategoryType, Game, Level, Platform, Player, Region, Run, Variable};

/// A leaderboard: ranked runs for one configuration of game, category,
/// level and options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    /// Link to the leaderboard on speedrun.com.
    #[serde(default)]
    pub weblink: String,

    /// Whether emulators are allowed.
    #[serde(default)]
    pub emulators: bool,

    /// Platform ID the board is restricted to, if any.
    #[serde(default)]
    pub platform: Option<String>,

    /// Region ID the board is restricted to, if any.
    #[serde(default)]
    pub region: Option<String>,

    /// Whether only runs with video are counted.
    #[serde(rename = "video-only", default)]
    pub video_only: bool,

    /// The timing method used to compare runs.
    #[serde(default)]
    pub timing: Option<TimingMethod>,

    /// The chosen variable values, as a map of variable ID to value ID.
    #[serde(default)]
    pub values: BTreeMap<String, String>,

    /// The runs, sorted from best to worst.
    #[serde(default)]
    pub runs: Vec<RankedRun>,

    /// API links to related resources.
    #[serde(default)]
    pub links: Vec<Link>,

    /// The game, as an ID or embedded; use the accessor methods.
    #[serde(default)]
    pub game: Relation<Game>,

    /// The category, as an ID or embedded; use the accessor methods.
    #[serde(default)]
    pub category: Relation<Category>,

    /// The level, absent for full-game boards; use the accessor methods.
    #[serde(default)]
    pub level: Relation<Level>,

    /// Players of the board, only present when embedded.
    #[serde(default)]
    pub players: PlayersRelation,

    /// Platforms used in the board, only present when embedded.
    #[serde(default)]
    pub platforms: RelationList<Platform>,

    /// Regions used in the board, only present when embedded.
    #[serde(default)]
    pub regions: RelationList<Region>,

    /// Variables applicable to the board, only present when embedded.
    #[serde(default)]
    pub variables: RelationList<Variable>,
}

/// A run with its rank on a leaderboard. Ranks only exist relative to a
/// leaderboard's configuration, so plain runs never carry one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRun {
    /// The rank, starting at 1. Ties share a rank.
    #[serde(rename = "place")]
    pub rank: u32,

    /// The run itself.
    pub run: Run,
}

impl Leaderboard {
    /// Fetch the leaderboard for a full-game category. The category must
    /// be a per-game category. Passing the game saves one request;
    /// otherwise it is resolved through the category.
    pub async fn full_game(
        client: &SpeedrunClient,
        game: Option<&Game>,
        category: &Category,
        options: &LeaderboardOptions,
        embeds: &Embeds,
    ) -> Result<Leaderboard> {
        if category.category_type != CategoryType::PerGame {
            return Err(Error::BadLogic(
                "the given category is not a full-game category",
            ));
        }

        let game_id = match game {
            Some(game) => game.id.clone(),
            None => {
                let game = category
                    .game(client, &Embeds::none())
                    .await?
                    .ok_or(Error::BadLogic("the category does not belong to a game"))?;
                game.id
            }
        };

        let mut query = Query::new();
        options.apply(&mut query);
        embeds.apply(&mut query);

        let response: Envelope<Leaderboard> = client
            .get(
                &format!(
                    "leaderboards/{}/category/{}",
                    urlencoding::encode(&game_id),
                    urlencoding::encode(&category.id)
                ),
                &query,
            )
            .await?;
        Ok(response.data)
    }

    /// Fetch the leaderboard for a level in a per-level category. Passing
    /// the game saves one request; otherwise it is resolved through the
    /// level.
    pub async fn for_level(
        client: &SpeedrunClient,
        game: Option<&Game>,
        category: &Category,
        level: &Level,
        options: &LeaderboardOptions,
        embeds: &Embeds,
    ) -> Result<Leaderboard> {
        if category.category_type != CategoryType::PerLevel {
            return Err(Error::BadLogic(
                "the given category is not an individual-level category",
            ));
        }

        let game_id = match game {
            Some(game) => game.id.clone(),
            None => {
                let game = level
                    .game(client, &Embeds::none())
                    .await?
                    .ok_or(Error::BadLogic("the level does not belong to a game"))?;
                game.id
            }
        };

        let mut query = Query::new();
        options.apply(&mut query);
        embeds.apply(&mut query);

        let response: Envelope<Leaderboard> = client
            .get(
                &format!(
                    "leaderboards/{}/level/{}/{}",
                    urlencoding::encode(&game_id),
                    urlencoding::encode(&level.id),
                    urlencoding::encode(&category.id)
                ),
                &query,
            )
            .await?;
        Ok(response.data)
    }

    /// The game the leaderboard is for.
    pub async fn game(&self, client: &SpeedrunClient, embeds: &Embeds) -> Result<Option<Game>> {
        match &self.game {
            Relation::Embedded { data } => Ok(Some(data.clone())),
            Relation::Id(id) => Ok(Some(Game::by_id(client, id, embeds).await?)),
            Relation::Absent | Relation::Empty { .. } => {
                let mut query = Query::new();
                embeds.apply(&mut query);
                super::fetch_one_link(client, self.link("game"), query).await
            }
        }
    }

    /// The category the leaderboard is for.
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
                super::fetch_one_link(client, self.link("category"), query).await
            }
        }
    }

    /// The level the leaderboard is for. `None` for full-game boards.
    pub async fn level(
        &self,
        client: &SpeedrunClient,
        embeds: &Embeds,
    ) -> Result<Option<Level>> {
        match &self.level {
            Relation::Embedded { data } => Ok(Some(data.clone())),
            Relation::Id(id) => Ok(Some(Level::by_id(client, id, embeds).await?)),
            Relation::Absent | Relation::Empty { .. } => Ok(None),
        }
    }

    /// All platforms used in the board. Empty unless they were embedded.
    pub fn platforms(&self) -> &[Platform] {
        self.platforms.embedded().unwrap_or_default()
    }

    /// All regions used in the board. Empty unless they were embedded.
    pub fn regions(&self) -> &[Region] {
        self.regions.embedded().unwrap_or_default()
    }

    /// All variables applicable to the board. Empty unless they were
    /// embedded.
    pub fn variables(&self) -> &[Variable] {
        self.variables.embedded().unwrap_or_default()
    }

    /// All players present in the board. Empty unless they were embedded.
    pub fn players(&self) -> &[Player] {
        match &self.players {
            PlayersRelation::Embedded { data } => data,
            _ => &[],
        }
    }
}

impl HasLinks for Leaderboard {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

/// Options to narrow a leaderboard down to a subset of runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaderboardOptions {
    /// Only return this many places. There can be multiple runs sharing a
    /// rank, so more runs than places may come back.
    pub top: Option<u32>,

    /// Restrict the board to this platform ID.
    pub platform: Option<String>,

    /// Restrict the board to this region ID.
    pub region: Option<String>,

    /// Include only emulated or only non-emulated runs.
    pub emulators: OptionalFlag,

    /// Include only runs with video.
    pub video_only: OptionalFlag,

    /// The timing method to rank by. Not all methods are allowed for all
    /// games; the server rejects invalid choices.
    pub timing: Option<TimingMethod>,

    /// Only count runs done before this date.
    pub date: Option<NaiveDate>,

    /// Restrict variables, as a map of variable ID to value ID. Each
    /// entry becomes a `var-<ID>` parameter.
    pub values: BTreeMap<String, String>,
}

impl LeaderboardOptions {
    pub(crate) fn apply(&self, query: &mut Query) {
        if let Some(top) = self.top {
            if top > 0 {
                push(query, "top", top.to_string());
            }
        }
        if let Some(platform) = &self.platform {
            push(query, "platform", platform.clone());
        }
        if let Some(region) = &self.region {
            push(query, "region", region.clone());
        }
        self.emulators.apply("emulators", query);
        self.video_only.apply("video-only", query);
        if let Some(timing) = self.timing {
            push(query, "timing", timing.as_str().to_string());
        }
        if let Some(date) = self.date {
            push(query, "date", date.format("%Y-%m-%d").to_string());
        }
        for (variable, value) in &self.values {
            push(query, &format!("var-{variable}"), value.clone());
        }
    }
}

/// Filtering options when fetching a list of leaderboards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaderboardFilter {
    /// Only return this many places per board.
    pub top: Option<u32>,

    /// Skip boards without any runs.
    pub skip_empty: OptionalFlag,
}

impl LeaderboardFilter {
    pub(crate) fn apply(&self, query: &mut Query) {
        if let Some(top) = self.top {
            if top > 0 {
                push(query, "top", top.to_string());
            }
        }
        self.skip_empty.apply("skip-empty", query);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_ranked_runs() {
        let board: Leaderboard = serde_json::from_str(
            r#"{
                "weblink": "https://www.speedrun.com/sms",
                "game": "v1pxjz68",
                "category": "n2y3r8do",
                "level": null,
                "platform": null,
                "region": null,
                "emulators": false,
                "video-only": false,
                "timing": "realtime",
                "values": {},
                "runs": [
                    {"place": 1, "run": {"id": "90y6pm7e", "status": {"status": "verified"}, "links": []}},
                    {"place": 2, "run": {"id": "v0q6p3kn", "status": {"status": "verified"}, "links": []}}
                ],
                "links": []
            }"#,
        )
        .unwrap();

        assert_eq!(board.timing, Some(TimingMethod::Realtime));
        assert_eq!(board.runs.len(), 2);
        assert_eq!(board.runs[0].rank, 1);
        assert_eq!(board.runs[1].run.id, "v0q6p3kn");
        assert!(board.level.is_absent());
        assert!(board.platforms().is_empty());
    }

    #[test]
    fn options_render_variable_values() {
        let mut options = LeaderboardOptions {
            top: Some(10),
            timing: Some(TimingMethod::IngameTime),
            ..LeaderboardOptions::default()
        };
        options
            .values
            .insert("38dz5zn8".to_string(), "5q8e86rl".to_string());

        let mut query = Query::new();
        options.apply(&mut query);

        assert!(query.contains(&("top".to_string(), "10".to_string())));
        assert!(query.contains(&("timing".to_string(), "ingame".to_string())));
        assert!(query.contains(&("var-38dz5zn8".to_string(), "5q8e86rl".to_string())));
    }
}

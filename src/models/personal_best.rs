//! Personal bests: a user's best run per game, category and level.

use serde::{Deserialize, Serialize};

use crate::client::SpeedrunClient;
use crate::error::Result;
use crate::link::HasLinks;
use crate::query::{push, Embeds, Query};
use crate::relation::{PlayersRelation, Relation};

use super::{fetch_one_link, Category, Game, Level, Platform, Player, Region, Run, User};

/// One personal best of a user in a certain game, category and level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalBest {
    /// The rank on the default leaderboard, i.e. with no options set.
    #[serde(rename = "place")]
    pub rank: u32,

    /// The run itself.
    pub run: Run,

    /// The game, only present when embedded; use the accessor methods.
    #[serde(default)]
    pub game: Relation<Game>,

    /// The category, only present when embedded; use the accessor methods.
    #[serde(default)]
    pub category: Relation<Category>,

    /// The level, only present when embedded; use the accessor methods.
    #[serde(default)]
    pub level: Relation<Level>,

    /// The platform, only present when embedded; use the accessor methods.
    #[serde(default)]
    pub platform: Relation<Platform>,

    /// The region, only present when embedded; use the accessor methods.
    #[serde(default)]
    pub region: Relation<Region>,

    /// The players, only present when embedded; use the accessor methods.
    #[serde(default)]
    pub players: PlayersRelation,
}

impl PersonalBest {
    /// The game the run was done in. Falls back to resolving through the
    /// run when the game was not embedded on the personal best itself.
    pub async fn game(&self, client: &SpeedrunClient, embeds: &Embeds) -> Result<Option<Game>> {
        if let Some(data) = self.game.embedded() {
            return Ok(Some(data.clone()));
        }
        self.run.game(client, embeds).await
    }

    /// The category the run was done in.
    pub async fn category(
        &self,
        client: &SpeedrunClient,
        embeds: &Embeds,
    ) -> Result<Option<Category>> {
        if let Some(data) = self.category.embedded() {
            return Ok(Some(data.clone()));
        }
        self.run.category(client, embeds).await
    }

    /// The level the run was done in. `None` for full-game runs.
    pub async fn level(
        &self,
        client: &SpeedrunClient,
        embeds: &Embeds,
    ) -> Result<Option<Level>> {
        if let Some(data) = self.level.embedded() {
            return Ok(Some(data.clone()));
        }
        self.run.level(client, embeds).await
    }

    /// The platform the run was done on. Not every run has one.
    pub async fn platform(&self, client: &SpeedrunClient) -> Result<Option<Platform>> {
        if let Some(data) = self.platform.embedded() {
            return Ok(Some(data.clone()));
        }
        self.run.platform(client).await
    }

    /// The region the run was done in. Not every run has one.
    pub async fn region(&self, client: &SpeedrunClient) -> Result<Option<Region>> {
        if let Some(data) = self.region.embedded() {
            return Ok(Some(data.clone()));
        }
        self.run.region(client).await
    }

    /// All participants of the run. Embedded players on the personal best
    /// take precedence over the run's own relation.
    pub async fn players(&self, client: &SpeedrunClient) -> Result<Vec<Player>> {
        if let PlayersRelation::Embedded { data } = &self.players {
            return Ok(data.clone());
        }
        self.run.players(client).await
    }

    /// The user that examined the run. `None` for unexamined runs.
    pub async fn examiner(&self, client: &SpeedrunClient) -> Result<Option<User>> {
        fetch_one_link(client, self.run.link("examiner"), Query::new()).await
    }
}

/// Filtering options when fetching a list of personal bests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonalBestFilter {
    /// Only return personal bests with a rank at least this good.
    pub top: Option<u32>,

    /// Restrict to runs in this series.
    pub series: Option<String>,

    /// Restrict to runs in this game.
    pub game: Option<String>,
}

impl PersonalBestFilter {
    pub(crate) fn apply(&self, query: &mut Query) {
        if let Some(top) = self.top {
            if top > 0 {
                push(query, "top", top.to_string());
            }
        }
        if let Some(series) = &self.series {
            push(query, "series", series.clone());
        }
        if let Some(game) = &self.game {
            push(query, "game", game.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_personal_best() {
        let best: PersonalBest = serde_json::from_str(
            r#"{
                "place": 3,
                "run": {
                    "id": "90y6pm7e",
                    "game": "v1pxjz68",
                    "status": {"status": "verified"},
                    "links": []
                }
            }"#,
        )
        .unwrap();

        assert_eq!(best.rank, 3);
        assert_eq!(best.run.game.id(), Some("v1pxjz68"));
        assert!(best.game.is_absent());
    }
}

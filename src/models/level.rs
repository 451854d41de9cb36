//! Level model and its relationship accessors.

use serde::{Deserialize, Serialize};

use crate::client::{Envelope, SpeedrunClient};
use crate::collection::Collection;
use crate::error::Result;
use crate::link::{HasLinks, Link};
use crate::query::{apply_sorting, Embeds, Query, Sorting};
use crate::relation::RelationList;

use super::{
    fetch_collection_link, fetch_one_link, Category, CategoryFilter, Game, Leaderboard,
    LeaderboardFilter, LeaderboardOptions, Run, RunFilter, Variable,
};

/// An individual level of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Unique level ID.
    pub id: String,

    /// The name of the level.
    #[serde(default)]
    pub name: String,

    /// Link to the leaderboard for this level on speedrun.com.
    #[serde(default)]
    pub weblink: String,

    /// Rules for the level; arbitrary text.
    #[serde(default)]
    pub rules: Option<String>,

    /// API links to related resources.
    #[serde(default)]
    pub links: Vec<Link>,

    /// Categories, only present when embedded; use the accessor methods.
    #[serde(default)]
    pub categories: RelationList<Category>,

    /// Variables, only present when embedded; use the accessor methods.
    #[serde(default)]
    pub variables: RelationList<Variable>,
}

impl Level {
    /// Fetch a single level by its ID.
    pub async fn by_id(client: &SpeedrunClient, id: &str, embeds: &Embeds) -> Result<Level> {
        let mut query = Query::new();
        embeds.apply(&mut query);

        let response: Envelope<Level> = client
            .get(&format!("levels/{}", urlencoding::encode(id)), &query)
            .await?;
        Ok(response.data)
    }

    /// The game this level belongs to. `None` only when the data on the
    /// site is broken and the link is missing.
    pub async fn game(&self, client: &SpeedrunClient, embeds: &Embeds) -> Result<Option<Game>> {
        let mut query = Query::new();
        embeds.apply(&mut query);
        fetch_one_link(client, self.link("game"), query).await
    }

    /// The categories applicable to this level. Filter and sorting are
    /// only relevant when the categories were not already embedded.
    pub async fn categories(
        &self,
        client: &SpeedrunClient,
        filter: &CategoryFilter,
        sorting: Option<&Sorting>,
    ) -> Result<Vec<Category>> {
        if let Some(data) = self.categories.embedded() {
            return Ok(data.to_vec());
        }

        let mut query = Query::new();
        filter.apply(&mut query);
        apply_sorting(sorting, &mut query);

        let collection: Collection<Category> =
            fetch_collection_link(client, self.link("categories"), query).await?;
        Ok(collection.data)
    }

    /// The variables applicable to this level. Sorting is only relevant
    /// when the variables were not already embedded.
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

    /// The primary leaderboard, if any, for the level.
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

    /// Leaderboards for the level, one per applicable category. Always a
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

    /// Runs done in this level, optionally filtered and sorted. Always a
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

impl HasLinks for Level {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_level_with_embedded_categories() {
        let level: Level = serde_json::from_str(
            r#"{
                "id": "xd4e80wm",
                "name": "Bianco Hills",
                "weblink": "https://www.speedrun.com/sms/Bianco_Hills",
                "rules": null,
                "categories": {"data": [{
                    "id": "wkpq068d",
                    "name": "Episodes",
                    "weblink": "https://www.speedrun.com/sms#Episodes",
                    "type": "per-level",
                    "rules": null,
                    "players": {"type": "up-to", "value": 1},
                    "miscellaneous": false,
                    "links": []
                }]},
                "links": [
                    {"rel": "game", "uri": "https://www.speedrun.com/api/v1/games/v1pxjz68"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(level.name, "Bianco Hills");
        let categories = level.categories.embedded().unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Episodes");
        assert!(level.variables.embedded().is_none());
        assert!(level.link("game").is_some());
    }
}

//! Category model and its relationship accessors.

use serde::{Deserialize, Serialize};

use crate::client::{Envelope, SpeedrunClient};
use crate::collection::Collection;
use crate::error::Result;
use crate::link::{HasLinks, Link};
use crate::query::{apply_sorting, Embeds, OptionalFlag, Query, Sorting};
use crate::relation::{Relation, RelationList};

use super::{
    fetch_collection_link, fetch_one_link, Game, Leaderboard, LeaderboardFilter,
    LeaderboardOptions, Run, RunFilter, Variable,
};

/// Whether a category is played over the whole game or per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryType {
    #[serde(rename = "per-game")]
    PerGame,
    #[serde(rename = "per-level")]
    PerLevel,
}

/// A game category, like "Any%", either per-game or per-level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category ID.
    pub id: String,

    /// Category name, for example "Any%".
    #[serde(default)]
    pub name: String,

    /// Link to this category on speedrun.com.
    #[serde(default)]
    pub weblink: String,

    /// Whether this is a full-game or a per-level category.
    #[serde(rename = "type")]
    pub category_type: CategoryType,

    /// Ruleset for the category; arbitrary text.
    #[serde(default)]
    pub rules: Option<String>,

    /// How many players are needed/allowed for runs in this category.
    #[serde(default)]
    pub players: CategoryPlayers,

    /// Whether this is a misc (fun) category.
    #[serde(default)]
    pub miscellaneous: bool,

    /// API links to related resources.
    #[serde(default)]
    pub links: Vec<Link>,

    /// The game, only present when embedded; use the accessor methods.
    #[serde(default)]
    pub game: Relation<Game>,

    /// Variables, only present when embedded; use the accessor methods.
    #[serde(default)]
    pub variables: RelationList<Variable>,
}

/// Player count rule for a category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryPlayers {
    /// `"exactly"` or `"up-to"`.
    #[serde(rename = "type", default)]
    pub rule: String,
    #[serde(default)]
    pub value: u32,
}

impl Category {
    /// Fetch a single category by its ID.
    pub async fn by_id(client: &SpeedrunClient, id: &str, embeds: &Embeds) -> Result<Category> {
        let mut query = Query::new();
        embeds.apply(&mut query);

        let response: Envelope<Category> = client
            .get(&format!("categories/{}", urlencoding::encode(id)), &query)
            .await?;
        Ok(response.data)
    }

    /// The game this category belongs to: the embedded one when available,
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

    /// The variables applicable to this category. Sorting is only relevant
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

    /// The primary leaderboard, if any, for the category.
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

    /// Leaderboards for the category: one for a full-game category,
    /// otherwise one per level. Always a collection.
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

    /// Runs done in this category, optionally filtered and sorted. Always
    /// a collection.
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

impl HasLinks for Category {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

/// Filtering options when fetching a list of categories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryFilter {
    /// Include or exclude misc categories.
    pub miscellaneous: OptionalFlag,
}

impl CategoryFilter {
    pub(crate) fn apply(&self, query: &mut Query) {
        self.miscellaneous.apply("miscellaneous", query);
    }
}

//! Region model and its relationship accessors.

use serde::{Deserialize, Serialize};

use crate::client::{Envelope, SpeedrunClient};
use crate::collection::Collection;
use crate::error::Result;
use crate::link::{HasLinks, Link};
use crate::query::{apply_cursor, apply_sorting, Cursor, Embeds, Query, Sorting};

use super::{fetch_collection_link, Game, GameFilter, Run, RunFilter};

/// A game region, like "PAL" or "NTSC-J".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Unique region ID.
    pub id: String,

    /// The name of the region.
    #[serde(default)]
    pub name: String,

    /// API links to related resources.
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Region {
    /// Fetch a single region by its ID.
    pub async fn by_id(client: &SpeedrunClient, id: &str) -> Result<Region> {
        let response: Envelope<Region> = client
            .get(
                &format!("regions/{}", urlencoding::encode(id)),
                &Query::new(),
            )
            .await?;
        Ok(response.data)
    }

    /// Fetch one page of the region list.
    pub async fn list(
        client: &SpeedrunClient,
        sorting: Option<&Sorting>,
        cursor: Option<&Cursor>,
    ) -> Result<Collection<Region>> {
        let mut query = Query::new();
        apply_sorting(sorting, &mut query);
        apply_cursor(cursor, &mut query);

        client.get("regions", &query).await
    }

    /// Games available in this region, optionally filtered and sorted.
    /// Always a collection.
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

    /// Runs done in this region, optionally filtered and sorted. Always a
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

impl HasLinks for Region {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

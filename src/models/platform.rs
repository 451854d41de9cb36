//! Platform model and its relationship accessors.

use serde::{Deserialize, Serialize};

use crate::client::{Envelope, SpeedrunClient};
use crate::collection::Collection;
use crate::error::Result;
use crate::link::{HasLinks, Link};
use crate::query::{apply_cursor, apply_sorting, Cursor, Embeds, Query, Sorting};

use super::{fetch_collection_link, Game, GameFilter, Run, RunFilter};

/// A platform games can be run on, like "NES" or "PC".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Unique platform ID.
    pub id: String,

    /// The name of the platform.
    #[serde(default)]
    pub name: String,

    /// Year the platform was released.
    #[serde(default)]
    pub released: u32,

    /// API links to related resources.
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Platform {
    /// Fetch a single platform by its ID.
    pub async fn by_id(client: &SpeedrunClient, id: &str) -> Result<Platform> {
        let response: Envelope<Platform> = client
            .get(
                &format!("platforms/{}", urlencoding::encode(id)),
                &Query::new(),
            )
            .await?;
        Ok(response.data)
    }

    /// Fetch one page of the platform list.
    pub async fn list(
        client: &SpeedrunClient,
        sorting: Option<&Sorting>,
        cursor: Option<&Cursor>,
    ) -> Result<Collection<Platform>> {
        let mut query = Query::new();
        apply_sorting(sorting, &mut query);
        apply_cursor(cursor, &mut query);

        client.get("platforms", &query).await
    }

    /// Games available on this platform, optionally filtered and sorted.
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

    /// Runs done on this platform, optionally filtered and sorted. Always
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

impl HasLinks for Platform {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

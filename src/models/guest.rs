//! Guests: run participants without an account.

use serde::{Deserialize, Serialize};

use crate::client::{Envelope, SpeedrunClient};
use crate::collection::Collection;
use crate::error::Result;
use crate::link::{HasLinks, Link};
use crate::query::{apply_sorting, Embeds, Query, Sorting};

use super::{fetch_collection_link, Run, RunFilter};

/// A guest participated in a run without being registered; all the site
/// stores about them is a name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    /// The guest's name. Guests have no IDs; the name is the identifier.
    pub name: String,

    /// API links to related resources.
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Guest {
    /// Fetch a single guest by their name.
    pub async fn by_name(client: &SpeedrunClient, name: &str) -> Result<Guest> {
        let response: Envelope<Guest> = client
            .get(
                &format!("guests/{}", urlencoding::encode(name)),
                &Query::new(),
            )
            .await?;
        Ok(response.data)
    }

    /// Runs this guest participated in, optionally filtered and sorted.
    /// Always a collection.
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

impl HasLinks for Guest {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

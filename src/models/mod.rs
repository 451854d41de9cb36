//! speedrun.com resource types.

mod category;
mod game;
mod guest;
mod leaderboard;
mod level;
mod personal_best;
mod platform;
mod player;
mod region;
mod run;
mod series;
mod user;
mod variable;

pub use category::*;
pub use game::*;
pub use guest::*;
pub use leaderboard::*;
pub use level::*;
pub use personal_best::*;
pub use platform::*;
pub use player::*;
pub use region::*;
pub use run::*;
pub use series::*;
pub use user::*;
pub use variable::*;

use serde::de::DeserializeOwned;

use crate::client::{Envelope, SpeedrunClient};
use crate::collection::Collection;
use crate::error::Result;
use crate::link::Link;
use crate::query::Query;

/// Fetch the single resource a link points to. A missing link is a normal
/// outcome for optional relations and yields `None`, not an error.
pub(crate) async fn fetch_one_link<T: DeserializeOwned>(
    client: &SpeedrunClient,
    link: Option<&Link>,
    query: Query,
) -> Result<Option<T>> {
    let Some(link) = link else {
        return Ok(None);
    };

    let response: Envelope<T> = client.get_link(&link.uri, &query).await?;
    Ok(Some(response.data))
}

/// Fetch the collection a link points to. A missing link yields the empty
/// collection, so callers always get an iterable value.
pub(crate) async fn fetch_collection_link<T: DeserializeOwned>(
    client: &SpeedrunClient,
    link: Option<&Link>,
    query: Query,
) -> Result<Collection<T>> {
    let Some(link) = link else {
        return Ok(Collection::default());
    };

    client.get_link(&link.uri, &query).await
}

//! Variable model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::client::{Envelope, SpeedrunClient};
use crate::error::Result;
use crate::link::{HasLinks, Link};
use crate::query::{Embeds, Query};

use super::{fetch_one_link, Category, Game};

/// A custom variable defined for a game, like "Glitches" with the choices
/// "None" and "All". Runs carry a chosen value for each applicable
/// variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    /// Unique variable ID.
    pub id: String,

    /// The name of the variable.
    #[serde(default)]
    pub name: String,

    /// Where the variable applies.
    #[serde(default)]
    pub scope: VariableScope,

    /// Whether a value must be given when submitting a run.
    #[serde(default)]
    pub mandatory: bool,

    /// Whether users can define their own values.
    #[serde(rename = "user-defined", default)]
    pub user_defined: bool,

    /// Whether runs with distinct values obsolete each other.
    #[serde(default)]
    pub obsoletes: bool,

    /// The allowed values.
    #[serde(default)]
    pub values: VariableValues,

    /// API links to related resources.
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Scope of a variable: the whole game, all levels, or a single level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableScope {
    /// `"global"`, `"full-game"`, `"all-levels"` or `"single-level"`.
    #[serde(rename = "type", default)]
    pub scope_type: String,

    /// Level ID, only set for single-level scopes.
    #[serde(default)]
    pub level: Option<String>,
}

/// The values a variable can take, keyed by value ID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableValues {
    #[serde(default)]
    pub choices: BTreeMap<String, String>,

    /// The value ID of the default choice, if any.
    #[serde(default)]
    pub default: Option<String>,
}

impl Variable {
    /// Fetch a single variable by its ID.
    pub async fn by_id(client: &SpeedrunClient, id: &str) -> Result<Variable> {
        let response: Envelope<Variable> = client
            .get(
                &format!("variables/{}", urlencoding::encode(id)),
                &Query::new(),
            )
            .await?;
        Ok(response.data)
    }

    /// The game this variable belongs to. `None` only when the data on
    /// the site is broken and the link is missing.
    pub async fn game(&self, client: &SpeedrunClient, embeds: &Embeds) -> Result<Option<Game>> {
        let mut query = Query::new();
        embeds.apply(&mut query);
        fetch_one_link(client, self.link("game"), query).await
    }

    /// The category this variable is tied to. Variables scoped to a whole
    /// game have no category, so `None` is a normal outcome.
    pub async fn category(
        &self,
        client: &SpeedrunClient,
        embeds: &Embeds,
    ) -> Result<Option<Category>> {
        let mut query = Query::new();
        embeds.apply(&mut query);
        fetch_one_link(client, self.link("category"), query).await
    }
}

impl HasLinks for Variable {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

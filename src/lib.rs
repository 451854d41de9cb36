//! speedrun.com API client library.
//!
//! A Rust client for the read-only speedrun.com REST API: games,
//! categories, levels, runs, leaderboards, users and everything in
//! between. Resources are plain values; everything that may need the
//! network takes a [`SpeedrunClient`] and returns a `Result`.
//!
//! # Quick Start
//!
//! ```no_run
//! use speedrun_api::{Embeds, Game, GameFilter, Sorting, SpeedrunClient};
//!
//! #[tokio::main]
//! async fn main() -> speedrun_api::Result<()> {
//!     let client = SpeedrunClient::new()?;
//!
//!     // Fetch a game by its abbreviation
//!     let game = Game::by_abbreviation(&client, "sms", &Embeds::none()).await?;
//!     println!("{} ({})", game.names.international, game.released);
//!
//!     // Search the game list
//!     let filter = GameFilter {
//!         name: Some("mario".to_string()),
//!         ..Default::default()
//!     };
//!     let games = Game::list(
//!         &client,
//!         &filter,
//!         Some(&Sorting::by("released")),
//!         None,
//!         &Embeds::none(),
//!     )
//!     .await?;
//!     for game in &games {
//!         println!("- {}", game.names.international);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Navigation
//!
//! Resources link to each other. A [`Game`] knows its categories, a
//! [`Category`] knows its runs, and so on. Accessor methods resolve these
//! relationships lazily: when the related data was embedded into the
//! response (see [`Embeds`]), it is returned without network I/O, otherwise
//! the accessor follows the resource's link and performs one request.
//! Either way the caller gets the same values.
//!
//! List endpoints return a [`Collection`]: one page of items plus the
//! pagination links to move forward ([`Collection::next_page`]) and
//! backward ([`Collection::prev_page`]), or to stream across pages
//! ([`Collection::walk`], [`Collection::collect_all`]).

mod client;
mod collection;
mod error;
mod link;
mod models;
mod query;
mod relation;
mod types;

pub use client::{SpeedrunClient, DEFAULT_API_URL};
pub use collection::{Collection, Pagination};
pub use error::{Error, Result};
pub use link::{first_link, AssetLink, HasLinks, Link};
pub use query::{Cursor, Direction, Embeds, OptionalFlag, Sorting};
pub use relation::{ModeratorsRelation, PlayersRelation, Relation, RelationList};
pub use types::{Duration, ModLevel, Names, TimingMethod};

pub use models::{
    // Games
    Game,
    GameFilter,
    Ruleset,
    // Categories
    Category,
    CategoryFilter,
    CategoryPlayers,
    CategoryType,
    // Levels
    Level,
    // Variables
    Variable,
    VariableScope,
    VariableValues,
    // Platforms and regions
    Platform,
    Region,
    // Series
    Series,
    SeriesFilter,
    // Users and guests
    Guest,
    Location,
    NameColor,
    NameStyle,
    SocialLink,
    User,
    UserFilter,
    UserLocation,
    // Players
    Player,
    PlayerLink,
    // Runs
    Run,
    RunFilter,
    RunStatus,
    RunSystem,
    RunTimes,
    RunVideos,
    // Leaderboards
    Leaderboard,
    LeaderboardFilter,
    LeaderboardOptions,
    RankedRun,
    // Personal bests
    PersonalBest,
    PersonalBestFilter,
};

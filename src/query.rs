//! Query-string building blocks shared by all list endpoints.
//!
//! Filters, sorting and cursors are pure value objects: their only behavior
//! is projecting themselves onto a list of query pairs. The three never
//! contribute overlapping keys.

/// Accumulated query-string pairs for one request.
pub(crate) type Query = Vec<(String, String)>;

pub(crate) fn push(query: &mut Query, key: &str, value: impl Into<String>) {
    query.push((key.to_string(), value.into()));
}

/// The current position in a collection: an offset plus a page size.
///
/// Zero values are treated as "use the server default" and are not sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// How many items to skip.
    pub offset: u32,
    /// Maximum number of items per page.
    pub max: u32,
}

impl Cursor {
    /// Create a cursor at the given offset with the given page size.
    pub fn new(offset: u32, max: u32) -> Self {
        Self { offset, max }
    }

    pub(crate) fn apply(&self, query: &mut Query) {
        if self.offset > 0 {
            push(query, "offset", self.offset.to_string());
        }
        if self.max > 0 {
            push(query, "max", self.max.to_string());
        }
    }
}

/// Sort order for list requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// a...z
    #[default]
    Ascending,
    /// z...a
    Descending,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }
}

/// Sorting options for list requests: which field to order by and in which
/// direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sorting {
    pub order_by: String,
    pub direction: Direction,
}

impl Sorting {
    /// Sort ascending by the given field.
    pub fn by(order_by: impl Into<String>) -> Self {
        Self {
            order_by: order_by.into(),
            direction: Direction::Ascending,
        }
    }

    /// Flip the direction to descending.
    pub fn descending(mut self) -> Self {
        self.direction = Direction::Descending;
        self
    }

    pub(crate) fn apply(&self, query: &mut Query) {
        push(query, "orderby", self.order_by.clone());
        push(query, "direction", self.direction.as_str());
    }
}

pub(crate) fn apply_sorting(sorting: Option<&Sorting>, query: &mut Query) {
    if let Some(sorting) = sorting {
        sorting.apply(query);
    }
}

pub(crate) fn apply_cursor(cursor: Option<&Cursor>, query: &mut Query) {
    if let Some(cursor) = cursor {
        cursor.apply(query);
    }
}

/// A tri-state of yes, no and unset, used for flags in collection filters.
///
/// A plain `bool` cannot express "don't filter on this at all", so filters
/// use this type instead; only `Yes` and `No` end up in the query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OptionalFlag {
    #[default]
    Unset,
    Yes,
    No,
}

impl OptionalFlag {
    pub(crate) fn apply(&self, name: &str, query: &mut Query) {
        match self {
            OptionalFlag::Yes => push(query, name, "yes"),
            OptionalFlag::No => push(query, name, "no"),
            OptionalFlag::Unset => {}
        }
    }
}

impl From<bool> for OptionalFlag {
    fn from(value: bool) -> Self {
        if value {
            OptionalFlag::Yes
        } else {
            OptionalFlag::No
        }
    }
}

/// The set of relation names the server should inline into the response.
///
/// Embedding is purely a transport optimization: accessors return the same
/// values whether or not the relation was embedded, the embedded variant
/// just avoids follow-up requests.
///
/// # Example
///
/// ```
/// use speedrun_api::Embeds;
///
/// let embeds = Embeds::new(["platforms", "regions"]);
/// assert!(!embeds.is_empty());
/// assert!(Embeds::none().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Embeds(Vec<String>);

impl Embeds {
    /// No embeds; every relation stays a link or identifier list.
    pub fn none() -> Self {
        Self::default()
    }

    /// Embed the given relation names, in order.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn apply(&self, query: &mut Query) {
        if !self.0.is_empty() {
            push(query, "embed", self.0.join(","));
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Embeds {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

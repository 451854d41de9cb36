//! Paginated collections.
//!
//! Every list endpoint returns one page of items plus pagination metadata.
//! A collection is an immutable snapshot of one page; advancing produces a
//! new collection via a fresh request, it never mutates the original.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::client::SpeedrunClient;
use crate::error::{Error, Result};
use crate::link::{HasLinks, Link};

/// Safety cap on pages fetched by [`Collection::walk`] and
/// [`Collection::collect_all`], to prevent runaway loops on huge lists.
const MAX_PAGES: u32 = 1000;

/// How to navigate through multiple pages of results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    /// How many items were skipped.
    #[serde(default)]
    pub offset: u32,
    /// The maximum page size that was applied.
    #[serde(default)]
    pub max: u32,
    /// Number of items on this page.
    #[serde(default)]
    pub size: u32,
    /// Navigation links (`next`, `prev`).
    #[serde(default)]
    pub links: Vec<Link>,
}

impl HasLinks for Pagination {
    fn links(&self) -> &[Link] {
        &self.links
    }
}

/// One page of a list resource plus its pagination metadata.
///
/// `Collection` is `Default`-constructible: the empty collection is a valid,
/// iterable zero value, which callers can fall back to when they choose to
/// ignore a pagination error (`unwrap_or_default`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    /// The items on this page.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Navigation metadata for this page.
    #[serde(default)]
    pub pagination: Pagination,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}

impl<T> Collection<T> {
    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The first item on this page, if any.
    pub fn first(&self) -> Option<&T> {
        self.data.first()
    }

    /// Iterate over the items on this page (no network).
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T: DeserializeOwned> Collection<T> {
    /// Follow the `next` link and fetch the next page.
    ///
    /// # Errors
    ///
    /// [`Error::NoSuchLink`] when this is the last page; this is the normal
    /// terminal condition, distinct from a failed request.
    pub async fn next_page(&self, client: &SpeedrunClient) -> Result<Self> {
        self.follow(client, "next").await
    }

    /// Follow the `prev` link and fetch the previous page.
    ///
    /// # Errors
    ///
    /// [`Error::NoSuchLink`] when this is the first page.
    pub async fn prev_page(&self, client: &SpeedrunClient) -> Result<Self> {
        self.follow(client, "prev").await
    }

    /// The navigation link already encodes offset and max; it is fetched
    /// verbatim.
    async fn follow(&self, client: &SpeedrunClient, rel: &str) -> Result<Self> {
        let link = self
            .pagination
            .link(rel)
            .ok_or_else(|| Error::NoSuchLink(rel.to_string()))?;

        client.get_link(&link.uri, &Vec::new()).await
    }

    /// Apply `visit` to every item, in order, fetching further pages as
    /// needed. Returning `false` from the callback stops the walk without
    /// fetching any more pages.
    pub async fn walk<F>(&self, client: &SpeedrunClient, mut visit: F) -> Result<()>
    where
        F: FnMut(&T) -> bool,
    {
        for item in &self.data {
            if !visit(item) {
                return Ok(());
            }
        }

        let mut pages = 1u32;
        let mut current = match self.pagination.link("next") {
            Some(_) => self.next_page(client).await?,
            None => return Ok(()),
        };

        loop {
            for item in &current.data {
                if !visit(item) {
                    return Ok(());
                }
            }

            if current.pagination.link("next").is_none() {
                return Ok(());
            }

            pages += 1;
            if pages >= MAX_PAGES {
                tracing::warn!("reached pagination cap of {MAX_PAGES} pages, stopping");
                return Ok(());
            }

            current = current.next_page(client).await?;
        }
    }

    /// Gather items across pages into a flat list, stopping after `limit`
    /// items when one is given. The bounded view only limits how far the
    /// walk goes; it does not change page sizes.
    pub async fn collect_all(&self, client: &SpeedrunClient, limit: Option<usize>) -> Result<Vec<T>>
    where
        T: Clone,
    {
        let mut items = Vec::new();

        if let Some(0) = limit {
            return Ok(items);
        }

        self.walk(client, |item| {
            items.push(item.clone());
            limit.map_or(true, |cap| items.len() < cap)
        })
        .await?;

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_the_list_envelope() {
        let collection: Collection<String> = serde_json::from_str(
            r#"{
                "data": ["a", "b"],
                "pagination": {
                    "offset": 0,
                    "max": 2,
                    "size": 2,
                    "links": [{"rel": "next", "uri": "https://www.speedrun.com/api/v1/games?offset=2&max=2"}]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.pagination.max, 2);
        assert!(collection.pagination.link("next").is_some());
        assert!(collection.pagination.link("prev").is_none());
    }

    #[test]
    fn default_collection_is_a_usable_zero_value() {
        let collection = Collection::<String>::default();
        assert!(collection.is_empty());
        assert_eq!(collection.iter().count(), 0);
        assert!(collection.pagination.links.is_empty());
    }

    #[test]
    fn page_local_iteration_needs_no_client() {
        let collection = Collection {
            data: vec![1, 2, 3],
            pagination: Pagination::default(),
        };

        let doubled: Vec<i32> = (&collection).into_iter().map(|n| n * 2).collect();
        assert_eq!(doubled, vec![2, 4, 6]);
        assert_eq!(collection.first(), Some(&1));
    }
}

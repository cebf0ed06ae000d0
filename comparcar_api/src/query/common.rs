//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] fields, and [`SortDirection`].

use std::str::FromStr;

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for pagination and sort direction.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the page index (0-indexed).
    fn with_page(mut self, page: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page = page;
        self
    }

    /// Sets the number of results per page.
    fn with_page_size(mut self, size: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().size = size;
        self
    }

    /// Sets the sort direction (ascending or descending).
    fn with_sort_direction(mut self, sort_direction: SortDirection) -> Self
    where
        Self: Sized,
    {
        self.get_common().sort_direction = sort_direction;
        self
    }

    /// The serialized parameter list, e.g. `page=0&size=20&sortBy=id&sortDirection=ASC`.
    ///
    /// Two queries with equal parameters produce equal strings, so this doubles
    /// as a request signature.
    fn query_string(&self) -> String {
        match Url::parse("http://localhost/") {
            Ok(base) => self.add_to_url(&base).query().unwrap_or_default().to_string(),
            Err(_) => String::new(),
        }
    }
}

/// Sort order for API results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order. This is the default.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        })
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// Fields shared by all query types: pagination and sort direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryCommon {
    /// Page index (0-indexed). Defaults to 0.
    pub page: i64,
    /// Results per page. Defaults to 20.
    pub size: i64,
    /// Sort direction. Defaults to ascending.
    pub sort_direction: SortDirection,
}

impl QueryCommon {
    pub const DEFAULT_PAGE_SIZE: i64 = 20;

    /// Appends the pagination parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("page", &self.page.to_string())
            .append_pair("size", &self.size.to_string());
        url
    }
}

impl Default for QueryCommon {
    fn default() -> QueryCommon {
        QueryCommon {
            page: 0,
            size: QueryCommon::DEFAULT_PAGE_SIZE,
            sort_direction: SortDirection::Asc,
        }
    }
}

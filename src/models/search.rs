// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters accepted by `GET /api/movies/`.
///
/// Defaults are an immutable record copied per request; parameters present in
/// the query string override them field by field. Anything outside this
/// allow-list is ignored during deserialization instead of being merged into
/// the request.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct MovieListParams {
    /// Page size; no upper bound is enforced
    pub limit: usize,
    /// 1-based page number
    pub page: usize,
    /// Document field to sort by, passed to the search engine unvalidated
    pub sort: String,
    /// Sort direction, "asc" or "desc", passed through unvalidated
    pub sort_order: String,
    /// Optional full-text query matched against the title
    pub search: Option<String>,
}

impl Default for MovieListParams {
    fn default() -> Self {
        Self {
            limit: 50,
            page: 1,
            sort: "id".to_string(),
            sort_order: "asc".to_string(),
            search: None,
        }
    }
}

impl MovieListParams {
    /// Result offset for the requested page; page 1 starts at 0.
    pub fn offset(&self) -> usize {
        self.limit * self.page.saturating_sub(1)
    }

    /// Meilisearch sort expression, e.g. `imdb_rating:desc`.
    pub fn sort_expression(&self) -> String {
        format!("{}:{}", self.sort, self.sort_order)
    }

    /// The search term, with an empty string treated as absent.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|term| !term.is_empty())
    }
}

/// Projected movie returned by the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MovieListItem {
    pub id: String,
    pub title: String,
    pub imdb_rating: Option<f64>,
}

// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::movie::MovieDocument;
use crate::models::search::{MovieListItem, MovieListParams};
use anyhow::{anyhow, bail, Result};
use meilisearch_sdk::client::Client;
use meilisearch_sdk::errors::{Error, ErrorCode, MeilisearchError};
use meilisearch_sdk::search::Selectors;
use tracing::info;

/// Name of the search index shared by the loader and the facade
pub const MOVIES_INDEX: &str = "movies";

/// Fields returned by the list endpoint
const LIST_FIELDS: &[&str] = &["id", "title", "imdb_rating"];

/// Meilisearch client wrapper for indexing and querying movie documents
pub struct SearchClient {
    client: Client,
    index_name: String,
}

impl SearchClient {
    /// Create a new Meilisearch client
    pub async fn new(host: &str, index_name: String) -> Result<Self> {
        // Construct the full URL if only host:port is provided
        let url = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("http://{}", host)
        };

        let client = Client::new(&url, None::<String>)?;

        info!(url = %url, index = %index_name, "created Meilisearch client");

        Ok(Self { client, index_name })
    }

    /// Verify the search engine is reachable and ready.
    ///
    /// Both subcommands call this at startup and refuse to run when it fails.
    pub async fn health_check(&self) -> Result<()> {
        let health = self
            .client
            .health()
            .await
            .map_err(|e| anyhow!("Meilisearch health check failed: {}", e))?;

        if health.status != "available" {
            bail!("Meilisearch reported status '{}'", health.status);
        }
        Ok(())
    }

    /// Initialize the movies index with proper settings
    pub async fn init_index(&self) -> Result<()> {
        let index = self.client.index(&self.index_name);

        // The title is the only full-text searchable field
        let _ = index.set_searchable_attributes(["title"]).await;

        // Fields the list endpoint may sort on
        let _ = index
            .set_sortable_attributes(["id", "title", "imdb_rating"])
            .await;

        info!(index = %self.index_name, "initialized search index");

        Ok(())
    }

    /// Bulk-insert the assembled movie documents in a single call.
    ///
    /// Documents are upserted by `id`; per-item results are not inspected.
    pub async fn index_movies(&self, movies: &[MovieDocument]) -> Result<()> {
        if movies.is_empty() {
            return Ok(());
        }

        let index = self.client.index(&self.index_name);

        index
            .add_documents(movies, Some("id"))
            .await
            .map_err(|e| anyhow!("Failed to bulk index movies: {}", e))?;

        info!(count = movies.len(), "submitted movies for indexing");

        Ok(())
    }

    /// Run the list query: pagination, single-field sort, optional full-text
    /// search, projected to the list fields.
    pub async fn list_movies(&self, params: &MovieListParams) -> Result<Vec<MovieListItem>> {
        let index = self.client.index(&self.index_name);

        let sort_expression = params.sort_expression();
        let sort = [sort_expression.as_str()];

        let mut query = index.search();
        query
            .with_limit(params.limit)
            .with_offset(params.offset())
            .with_sort(&sort)
            .with_attributes_to_retrieve(Selectors::Some(LIST_FIELDS));
        if let Some(term) = params.search_term() {
            query.with_query(term);
        }

        let results = query
            .execute::<MovieListItem>()
            .await
            .map_err(|e| anyhow!("Search failed: {}", e))?;

        Ok(results.hits.into_iter().map(|hit| hit.result).collect())
    }

    /// Fetch one movie document by id; `None` when the index has no such id.
    pub async fn get_movie(&self, movie_id: &str) -> Result<Option<MovieDocument>> {
        let index = self.client.index(&self.index_name);

        match index.get_document::<MovieDocument>(movie_id).await {
            Ok(movie) => Ok(Some(movie)),
            Err(Error::Meilisearch(MeilisearchError {
                error_code: ErrorCode::DocumentNotFound,
                ..
            })) => Ok(None),
            Err(e) => Err(anyhow!("Failed to fetch movie '{}': {}", movie_id, e)),
        }
    }
}

// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Read-only access to the relational movie database.

use crate::models::db::{parse_rating, MovieRow, WriterSource};
use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::collections::HashMap;
use std::path::Path;

/// Name value meaning "unknown" in the source tables
const NOT_AVAILABLE: &str = "N/A";

type RawMovieRow = (
    String,         // id
    Option<String>, // genre
    Option<String>, // director
    String,         // title
    Option<String>, // plot
    Option<String>, // imdb_rating
    Option<String>, // writer
    Option<String>, // writers
);

/// SQLite client for the normalized movie tables
pub struct MovieDb {
    pool: SqlitePool,
}

impl MovieDb {
    /// Open the database file read-only.
    pub async fn connect(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new().filename(path).read_only(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .with_context(|| format!("failed to open SQLite database {}", path.display()))?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool; used by tests with in-memory databases.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// id → name lookup for actors, skipping the "N/A" sentinel rows.
    pub async fn fetch_actor_names(&self) -> Result<HashMap<i64, String>> {
        let rows: Vec<(i64, String)> = sqlx::query_as(&names_query("actors"))
            .fetch_all(&self.pool)
            .await
            .context("failed to fetch actor names")?;
        Ok(rows.into_iter().collect())
    }

    /// id → name lookup for writers, skipping the "N/A" sentinel rows.
    pub async fn fetch_writer_names(&self) -> Result<HashMap<String, String>> {
        let rows: Vec<(String, String)> = sqlx::query_as(&names_query("writers"))
            .fetch_all(&self.pool)
            .await
            .context("failed to fetch writer names")?;
        Ok(rows.into_iter().collect())
    }

    /// movie id → actor ids, in join-table row order.
    pub async fn fetch_movie_actors(&self) -> Result<HashMap<String, Vec<i64>>> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT movie_id, actor_id FROM movie_actors")
                .fetch_all(&self.pool)
                .await
                .context("failed to fetch movie/actor associations")?;

        let mut associations: HashMap<String, Vec<i64>> = HashMap::new();
        for (movie_id, actor_id) in rows {
            associations.entry(movie_id).or_default().push(actor_id);
        }
        Ok(associations)
    }

    /// Movie base rows, with the writer columns resolved into a
    /// [`WriterSource`] as they are read. Malformed writer data aborts the
    /// whole fetch.
    pub async fn fetch_movies(&self) -> Result<Vec<MovieRow>> {
        let rows: Vec<RawMovieRow> = sqlx::query_as(
            "SELECT id, genre, director, title, plot, imdb_rating, writer, writers FROM movies",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to fetch movies")?;

        rows.into_iter()
            .map(
                |(id, genre, director, title, plot, imdb_rating, writer, writers)| {
                    let writer_source = WriterSource::from_columns(&id, writer, writers)?;
                    Ok(MovieRow {
                        id,
                        genre,
                        director,
                        title,
                        description: plot,
                        imdb_rating: parse_rating(imdb_rating),
                        writer_source,
                    })
                },
            )
            .collect()
    }
}

fn names_query(table: &str) -> String {
    format!("SELECT id, name FROM {} WHERE name != '{}'", table, NOT_AVAILABLE)
}

// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Row types read from the relational movie database.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

/// Raw movie row with its writer columns already resolved into a
/// [`WriterSource`].
#[derive(Debug, Clone)]
pub struct MovieRow {
    pub id: String,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub title: String,
    /// `plot` column
    pub description: Option<String>,
    pub imdb_rating: Option<f64>,
    pub writer_source: WriterSource,
}

/// Where a movie's writer ids come from.
///
/// The source schema has two mutually exclusive columns: `writer` holds a
/// single id, `writers` holds a JSON array of `{"id": ...}` objects. The
/// choice is made once, here, on the nullness of the single-id column; when
/// that column is set the list column is never consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterSource {
    Single(String),
    List(Vec<String>),
}

#[derive(Deserialize)]
struct WriterIdRef {
    id: String,
}

impl WriterSource {
    /// Resolve the variant from the two raw columns.
    ///
    /// A row with neither column populated, or with unparseable JSON in the
    /// list column, is malformed source data and fails the whole run.
    pub fn from_columns(
        movie_id: &str,
        writer: Option<String>,
        writers: Option<String>,
    ) -> Result<Self> {
        match writer {
            Some(id) if !id.is_empty() => Ok(WriterSource::Single(id)),
            _ => {
                let raw = writers.ok_or_else(|| {
                    anyhow!("movie '{}' has neither writer column populated", movie_id)
                })?;
                let refs: Vec<WriterIdRef> = serde_json::from_str(&raw)
                    .with_context(|| format!("movie '{}' has malformed writers JSON", movie_id))?;
                Ok(WriterSource::List(
                    refs.into_iter().map(|r| r.id).collect(),
                ))
            }
        }
    }
}

/// Parse the textual rating column; the `N/A` sentinel and any other
/// non-numeric value map to `None`.
pub fn parse_rating(raw: Option<String>) -> Option<f64> {
    raw.and_then(|value| value.trim().parse().ok())
}

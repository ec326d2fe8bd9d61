// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Actor reference embedded in a movie document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActorRef {
    pub id: i64,
    pub name: String,
}

/// Writer reference embedded in a movie document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WriterRef {
    pub id: String,
    pub name: String,
}

/// Denormalized movie document stored in the `movies` search index.
///
/// This shape is the wire contract between the loader and the facade:
/// the loader writes it, `GET /api/movies/{id}` returns it verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MovieDocument {
    /// Unique movie id, primary key of the index
    pub id: String,
    pub title: String,
    pub genre: Option<String>,
    pub director: Option<String>,
    /// Free-text plot description
    pub description: Option<String>,
    /// Rating, absent when the source carried no numeric value
    pub imdb_rating: Option<f64>,
    pub actors: Vec<ActorRef>,
    pub writers: Vec<WriterRef>,
    /// Resolved actor names joined with ", ", kept for display and search
    pub actors_names: String,
    /// Resolved writer names joined with ", ", kept for display and search
    pub writers_names: String,
}

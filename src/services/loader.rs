// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! One-shot migration of the relational movie data into the search index.

use crate::models::db::{MovieRow, WriterSource};
use crate::models::movie::{ActorRef, MovieDocument, WriterRef};
use crate::services::db::MovieDb;
use crate::services::search::SearchClient;
use anyhow::Result;
use std::collections::HashMap;
use tracing::{info, warn};

/// Runs the extract → assemble → bulk-insert pipeline, start to finish,
/// with no concurrency and no partial-success mode.
pub struct MovieLoader {
    db: MovieDb,
    search: SearchClient,
}

impl MovieLoader {
    pub fn new(db: MovieDb, search: SearchClient) -> Self {
        Self { db, search }
    }

    /// Execute one load run. Returns the number of documents submitted.
    pub async fn run(&self) -> Result<usize> {
        let actors = self.db.fetch_actor_names().await?;
        let writers = self.db.fetch_writer_names().await?;
        let movie_actors = self.db.fetch_movie_actors().await?;
        let rows = self.db.fetch_movies().await?;

        info!(
            movies = rows.len(),
            actors = actors.len(),
            writers = writers.len(),
            "extracted relational data"
        );

        let documents = assemble_movies(rows, &actors, &writers, &movie_actors);

        self.search.init_index().await?;
        self.search.index_movies(&documents).await?;

        Ok(documents.len())
    }
}

/// Denormalize movie rows into index documents, in row order.
pub fn assemble_movies(
    rows: Vec<MovieRow>,
    actors: &HashMap<i64, String>,
    writers: &HashMap<String, String>,
    movie_actors: &HashMap<String, Vec<i64>>,
) -> Vec<MovieDocument> {
    rows.into_iter()
        .map(|row| assemble_movie(row, actors, writers, movie_actors))
        .collect()
}

fn assemble_movie(
    row: MovieRow,
    actors: &HashMap<i64, String>,
    writers: &HashMap<String, String>,
    movie_actors: &HashMap<String, Vec<i64>>,
) -> MovieDocument {
    let writer_ids = match row.writer_source {
        WriterSource::Single(id) => vec![id],
        WriterSource::List(ids) => ids,
    };

    // Ids without a lookup entry were sentinel rows; skip them silently
    let resolved_writers: Vec<WriterRef> = writer_ids
        .into_iter()
        .filter_map(|id| {
            writers.get(&id).map(|name| WriterRef {
                id,
                name: name.clone(),
            })
        })
        .collect();

    // A movie missing from the join table gets an empty cast
    let actor_ids: &[i64] = match movie_actors.get(&row.id) {
        Some(ids) => ids,
        None => {
            warn!(movie_id = %row.id, "movie has no actor associations");
            &[]
        }
    };

    let resolved_actors: Vec<ActorRef> = actor_ids
        .iter()
        .filter_map(|id| {
            actors.get(id).map(|name| ActorRef {
                id: *id,
                name: name.clone(),
            })
        })
        .collect();

    let actors_names = joined_names(resolved_actors.iter().map(|actor| actor.name.as_str()));
    let writers_names = joined_names(resolved_writers.iter().map(|writer| writer.name.as_str()));

    MovieDocument {
        id: row.id,
        title: row.title,
        genre: row.genre,
        director: row.director,
        description: row.description,
        imdb_rating: row.imdb_rating,
        actors: resolved_actors,
        writers: resolved_writers,
        actors_names,
        writers_names,
    }
}

fn joined_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

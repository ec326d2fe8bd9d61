// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use movies_search::services::db::MovieDb;
use movies_search::services::loader::MovieLoader;
use movies_search::services::search::SearchClient;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::path::PathBuf;
use std::time::Duration;

// End-to-end test of the load pipeline
// Requires a running Meilisearch instance on 127.0.0.1:7700
// Run with: cargo test --test loader_integration_test -- --ignored

const LOADER_TEST_INDEX: &str = "movies_loader_test";

async fn build_fixture_database(path: &PathBuf) -> sqlx::Result<()> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;

    for statement in [
        "CREATE TABLE actors (id INTEGER PRIMARY KEY, name TEXT)",
        "CREATE TABLE writers (id TEXT PRIMARY KEY, name TEXT)",
        "CREATE TABLE movie_actors (movie_id TEXT, actor_id INTEGER)",
        "CREATE TABLE movies (id TEXT PRIMARY KEY, genre TEXT, director TEXT, title TEXT, \
         plot TEXT, imdb_rating TEXT, writer TEXT, writers TEXT)",
        "INSERT INTO actors VALUES (1, 'Mark Hamill'), (2, 'Harrison Ford'), (3, 'N/A')",
        "INSERT INTO writers VALUES ('w1', 'Leigh Brackett'), ('w2', 'Lawrence Kasdan')",
        "INSERT INTO movie_actors VALUES ('tt-load-1', 2), ('tt-load-1', 1), ('tt-load-2', 1)",
        "INSERT INTO movies VALUES \
         ('tt-load-1', 'Sci-Fi', 'Irvin Kershner', 'The Empire Strikes Back', \
          'The saga continues.', '8.7', NULL, '[{\"id\": \"w1\"}, {\"id\": \"w2\"}]'), \
         ('tt-load-2', 'Sci-Fi', 'George Lucas', 'Star Wars', \
          'A long time ago...', 'N/A', 'w2', NULL)",
    ] {
        sqlx::query(statement).execute(&pool).await?;
    }

    pool.close().await;
    Ok(())
}

#[tokio::test]
#[ignore] // Requires Meilisearch running
async fn test_load_then_query_round_trip() {
    let database = std::env::temp_dir().join(format!(
        "movies-loader-test-{}.sqlite",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&database);
    build_fixture_database(&database)
        .await
        .expect("fixture database should build");

    let db = MovieDb::connect(&database)
        .await
        .expect("fixture database should open");
    let search_client = SearchClient::new("http://127.0.0.1:7700", LOADER_TEST_INDEX.to_string())
        .await
        .expect("Failed to create search client");
    search_client
        .health_check()
        .await
        .expect("Meilisearch must be running for this test");

    let loader = MovieLoader::new(db, search_client);
    let indexed = loader.run().await.expect("load run should succeed");
    assert_eq!(indexed, 2);

    // Indexing is asynchronous on the engine side
    tokio::time::sleep(Duration::from_secs(1)).await;

    let search_client = SearchClient::new("http://127.0.0.1:7700", LOADER_TEST_INDEX.to_string())
        .await
        .unwrap();

    let empire = search_client
        .get_movie("tt-load-1")
        .await
        .expect("get should succeed")
        .expect("document should exist");
    // Writer-list variant, resolved in list order
    assert_eq!(empire.writers_names, "Leigh Brackett, Lawrence Kasdan");
    // Actors in join-table row order
    assert_eq!(empire.actors_names, "Harrison Ford, Mark Hamill");
    assert_eq!(empire.imdb_rating, Some(8.7));

    let star_wars = search_client
        .get_movie("tt-load-2")
        .await
        .expect("get should succeed")
        .expect("document should exist");
    // Single-writer variant
    assert_eq!(star_wars.writers_names, "Lawrence Kasdan");
    // The N/A rating is absent from the document
    assert_eq!(star_wars.imdb_rating, None);

    let _ = std::fs::remove_file(&database);
}

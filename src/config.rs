// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Shared configuration for the `serve` and `load` subcommands.
//!
//! Both components talk to the same Meilisearch instance, so the endpoint is
//! read from a single `MEILISEARCH_HOST` variable rather than per-component
//! settings that can drift apart.

use anyhow::Context;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_MEILISEARCH_HOST: &str = "http://127.0.0.1:7700";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_DATABASE: &str = "db.sqlite";

/// Process configuration driven by environment variables.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Meilisearch endpoint, shared by the facade and the loader.
    pub meilisearch_host: String,
    /// Address the HTTP facade binds to.
    pub bind_addr: SocketAddr,
    /// SQLite database file read by the loader.
    pub database_path: PathBuf,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        let meilisearch_host = env::var("MEILISEARCH_HOST")
            .unwrap_or_else(|_| DEFAULT_MEILISEARCH_HOST.to_string());

        let bind_addr: SocketAddr = env::var("MOVIES_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("MOVIES_BIND_ADDR must be a host:port address")?;

        let database_path = env::var("MOVIES_DATABASE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATABASE));

        Ok(Self {
            meilisearch_host,
            bind_addr,
            database_path,
        })
    }
}

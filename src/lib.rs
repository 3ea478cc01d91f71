//! # stackload
//!
//! A small ETL tool that seeds a local SQLite database with question/answer
//! data from the Stack Exchange API.
//!
//! stackload fetches paginated question pages for a tag, follows up each page
//! with a batched request for its accepted answers, deduplicates everything
//! by primary key, derives a `question_tag` relation, and bulk-loads the
//! result into three freshly recreated tables.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌─────────┐   ┌──────────┐
//! │  Fetch   │──▶│  Decode  │──▶│  Dedup  │──▶│  SQLite  │
//! │ gzip GET │   │ lenient  │   │ + tags  │   │ 3 tables │
//! └──────────┘   └──────────┘   └─────────┘   └──────────┘
//! ```
//!
//! The import is best-effort: a fetch or decode failure stops pagination but
//! everything accumulated up to that point is still persisted. See
//! [`import::ImportOutcome`] for how partial runs are reported.
//!
//! ## Quick Start
//!
//! ```bash
//! stackload init                # create database
//! stackload import              # fetch, dedup, and load
//! stackload import --pages 5    # smaller run
//! stackload stats               # row counts and db size
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`fetch`] | HTTP page fetcher (gzip-aware) |
//! | [`decode`] | Policy-driven JSON page decoding |
//! | [`dedup`] | First-seen-wins deduplication |
//! | [`tags`] | Question tag extraction |
//! | [`import`] | Pagination loop and orchestration |
//! | [`store`] | Table recreation and bulk insert |
//! | [`stats`] | Database summary |
//! | [`db`] | Database connection |

pub mod config;
pub mod db;
pub mod decode;
pub mod dedup;
pub mod error;
pub mod fetch;
pub mod import;
pub mod models;
pub mod stats;
pub mod store;
pub mod tags;

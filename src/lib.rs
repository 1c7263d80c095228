//! # Snippet DB
//!
//! A local snippet manager: short code snippets stored as plain files, one
//! directory per language, with a SQLite index of their titles and
//! descriptions for scoped substring search.
//!
//! ## Architecture
//!
//! ```text
//! raw text ──▶ ┌────────┐   ┌────────┐   ┌───────────────┐   ┌──────────┐
//!              │Markers │──▶│ Parser │──▶│ Store (files) │──▶│  Index   │
//!              └────────┘   └────────┘   └───────────────┘   │ (SQLite) │
//!                                                            └────┬─────┘
//!                                      search (language, q) ◀─────┘
//! ```
//!
//! The first line of a snippet, behind a language-specific comment marker,
//! is its title; an optional second commented line is its description.
//!
//! ## Quick Start
//!
//! ```bash
//! snip init
//! snip add --language SQL --file join_users.sql
//! snip search --language SQL --query Join
//! snip languages
//! snip show 1
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration |
//! | [`error`] | Error taxonomy |
//! | [`markers`] | Language → comment marker table |
//! | [`parser`] | Title/description extraction |
//! | [`store`] | On-disk content files |
//! | [`index`] | Metadata catalog (SQLite and in-memory) |
//! | [`ingest`] | Ingestion pipeline |
//! | [`search`] | Scoped title search |
//! | [`get`] | Lazy body retrieval |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema initialization |

pub mod config;
pub mod db;
pub mod error;
pub mod get;
pub mod index;
pub mod ingest;
pub mod markers;
pub mod migrate;
pub mod models;
pub mod parser;
pub mod search;
pub mod store;

pub use error::{Result, SnippetError};

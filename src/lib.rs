//! 4D Command Documentation MCP Service
//!
//! This crate fetches reference documentation for 4D language commands from
//! developer.4d.com, caches the extracted article per command on disk, and
//! serves it through an MCP tool server and an editor-style command surface.
//!
//! # Features
//!
//! - Resolve command names to documentation URLs
//! - Extract the article fragment and make site links absolute
//! - Cache fragments in the platform cache directory
//! - MCP server with docs, cache-clear and open-in-browser tools
//! - Editor commands with a reusable documentation panel
//!
//! # Modules
//!
//! - [`naming`]: URL slug, documentation URL and cache key derivation
//! - [`cache`]: On-disk cache of extracted fragments
//! - [`extract`]: Article extraction and link rewriting
//! - [`docs_client`]: HTTP access to the documentation site
//! - [`service`]: The fetch-and-cache service
//! - [`browser`]: Opening pages with the system browser
//! - [`mcp`]: MCP server implementation and protocol handling
//! - [`detect`], [`viewer`], [`terminal`]: Editor command surface

pub mod browser;
pub mod cache;
pub mod config;
pub mod detect;
pub mod docs_client;
pub mod error;
pub mod extract;
pub mod mcp;
pub mod naming;
pub mod server;
pub mod service;
pub mod terminal;
pub mod viewer;

pub use error::{DocsError, Result};

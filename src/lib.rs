//! Newsgauge - a news credibility dashboard
//!
//! This crate provides source adapters for pulling articles from external
//! news providers, a client for a remote credibility-analysis backend,
//! and a web dashboard that renders scored articles with filters.

pub mod backend;
pub mod config;
pub mod models;
pub mod routes;
pub mod sources;

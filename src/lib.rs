//! QA Test Manager server library.
//!
//! Provides the HTTP API for projects, test plans and their versions, test
//! cases, executions and evidence uploads, along with the database layer and
//! schema migrations behind it.

pub mod api;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;

//! Matty-AI backend.
//!
//! A small REST service with four areas: a keyword-matching assistant with a
//! safe arithmetic fallback, a notes store, an append-only activity log that
//! audits note writes, and a placeholder image generator. Saved canvas
//! designs round out the storage surface.
//!
//! Storage is pluggable behind [`repository::DocumentStore`]: PostgreSQL for
//! deployments and an in-process store for tests and local runs.

pub mod app;
pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod placeholder;
pub mod repository;
pub mod responder;
pub mod service;

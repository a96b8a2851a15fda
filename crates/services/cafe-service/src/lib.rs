//! Cafe Service Library
//!
//! Persistence for the cafe catalog (regions, cafes, reviews, likes and
//! users) with a reversible soft delete lifecycle. Soft delete and restore
//! cascade one level along the ownership relations in `domain::Relation`;
//! hard delete relies on the foreign key actions of the schema.

pub mod cli;
pub mod commands;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

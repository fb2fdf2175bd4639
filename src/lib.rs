//! Attendance tracking and Bradford Factor absence scoring
//!
//! This crate groups a team's unplanned absences into spells over a rolling
//! window, scores them with the Bradford Factor (`spells² × days`), and
//! classifies the result. Around that core it provides the organisation
//! model, role-based access rules, an in-memory attendance store, and an
//! HTTP API.

#![warn(missing_docs)]

pub mod access;
pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

//! Inventory API Tester - smoke tests for the oil inventory management REST API
//!
//! This crate drives a running backend through its resource endpoints:
//! - A harness that issues one request at a time and tallies pass/fail
//! - Typed request/response records for each endpoint
//! - A fixed sequence of scenarios, one per resource area

pub mod config;
pub mod harness;
pub mod models;
pub mod scenarios;

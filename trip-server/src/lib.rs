//! Multi-city trip planner server.
//!
//! A web application that answers: "which round trips through a few cities
//! fit my dates and my budget?"

pub mod cache;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod planner;
pub mod pricing;
pub mod seed;
pub mod store;
pub mod tasks;
pub mod weather;
pub mod web;

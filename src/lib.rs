// src/lib.rs

//! jobwatch library: scrape career pages and job APIs, report new openings.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

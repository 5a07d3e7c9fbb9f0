// src/lib.rs

//! Movie collection harvester and poster wall builder.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

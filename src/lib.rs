// Library crate exposing modules for the binary and integration tests

pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod util;
pub mod view;

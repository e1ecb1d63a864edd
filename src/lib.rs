pub mod api;
pub mod awards;
pub mod config;
pub mod course;
pub mod error;
pub mod ingest;
pub mod scorecard;
// cmd and reports belong to the binary (main.rs).

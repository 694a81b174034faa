//! FormatForge Server Library
//!
//! HTTP service that turns images into A4 PDFs, compresses images and PDFs,
//! converts PDFs to DOCX and keeps a history of what it did.
//!
//! # Modules
//!
//! - `imaging`: data-URI decoding, page composition, JPEG encoding
//! - `pdf`: page assembly and structural rewrite via `lopdf`
//! - `docx`: external PDF to DOCX converter and its scratch files
//! - `convert`: the blocking conversion pipelines
//! - `db`: SQLite conversion history
//! - `routes`: axum handlers

pub mod config;
pub mod convert;
pub mod db;
pub mod docx;
pub mod error;
pub mod imaging;
pub mod pdf;
pub mod routes;
pub mod state;

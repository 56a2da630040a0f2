//! # chatkit-core
//!
//! Core crate for ChatKit. Contains the unified error system, result
//! folding, configuration schemas, chat domain models, and the channel
//! filter builder.
//!
//! This crate has **no** internal dependencies on other ChatKit crates.

pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod result;

pub use error::{ChatError, ErrorKind};
pub use filter::FilterObject;
pub use result::{ChatResult, fold_results};

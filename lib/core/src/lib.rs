//! # bioquery Core
//!
//! Core library for bioquery.
//!
//! This crate provides the data side of a query:
//!
//! - [`Record`] - One experiment row (organism, gravity condition, experiment type, abstract)
//! - [`Dataset`] - CSV loading with the inclusion filter applied
//! - [`SparseVector`] - Sparse weights with cosine similarity
//!
//! ## Example
//!
//! ```rust
//! use bioquery_core::Dataset;
//!
//! let csv = "Organism,Gravity_Condition,Experimental_Type,Abstract\n\
//!            Mus musculus,Microgravity,Spaceflight,Liver changes\n\
//!            N/A,Microgravity,Spaceflight,Dropped\n";
//! let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
//! assert_eq!(dataset.len(), 1);
//! ```

pub mod dataset;
pub mod error;
pub mod record;
pub mod vector;

pub use dataset::Dataset;
pub use error::{Error, Result};
pub use record::{is_present, Record};
pub use vector::SparseVector;

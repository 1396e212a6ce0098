#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the plm crates.
//! [plm_core]: https://docs.rs/plm_core/latest/plm_core/index.html
//! [plm_axum]: https://docs.rs/plm_axum/latest/plm_axum/index.html
//! [plm_sqlite]: https://docs.rs/plm_sqlite/latest/plm_sqlite/index.html
#![doc = include_str!("../README.md")]

/// Core domain models for the product lifecycle management system.
///
/// This module contains the records the service stores and exchanges:
/// products, bills of materials, suppliers, engineering change orders and
/// quality records. The models are primarily data structures with minimal
/// business logic; validation and the ECO workflow live alongside them.
pub mod models;

/// Interface traits for the product lifecycle management system.
///
/// This module contains the "ports" in the hexagonal architecture pattern.
///
/// These traits define the contract between the domain logic and external adapters
/// (such as databases or HTTP servers) without specifying implementation details.
pub mod ports;

/// Bill-of-materials cost computation.
///
/// Given read-only snapshots of the product and BOM collections, compute the
/// flat cost of a BOM and its recursively rolled-up manufactured cost.
pub mod costing;

/// Aggregate figures for dashboards.
pub mod analytics;

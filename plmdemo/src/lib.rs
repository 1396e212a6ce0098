#![warn(missing_docs)]
//! [plm_core]: https://docs.rs/plm_core/latest/plm_core/index.html
//! [plm_axum]: https://docs.rs/plm_axum/latest/plm_axum/index.html
//! [plm_sqlite]: https://docs.rs/plm_sqlite/latest/plm_sqlite/index.html
#![doc = include_str!("../README.md")]

pub mod impls;
pub mod seed;

mod cli;
pub use cli::Cli;

mod config;
pub use config::AppConfig;

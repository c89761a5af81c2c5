#![forbid(unsafe_code)]

//! Interactive surface for the EV charging demand predictor.
//!
//! [`app::PredictorApp`] is the FrankenTUI model behind the form; [`cli`]
//! wires configuration, logging, and the model loader together.

pub mod app;
pub mod cli;
pub mod error;
pub mod form;
pub mod logging;
pub mod theme;

pub use cli::run_from_env;
pub use error::{AppError, Result};

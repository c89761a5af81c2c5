#![forbid(unsafe_code)]

//! Core of the EV charging demand predictor.
//!
//! The crate turns four form inputs into the fixed-order feature vector the
//! pre-trained forest expects, loads that forest once per [`ModelLoader`],
//! and pairs every prediction with a static behavioral [`Narrative`].
//!
//! ```rust,ignore
//! let loader = ModelLoader::new(DEFAULT_ARTIFACT_PATH);
//! let service = PredictionService::new(loader.load()?);
//! let input = RawInput::new(Hour::new(8)?, DayOfWeek::Monday, Month::new(3)?, DayType::Weekday);
//! let prediction = service.predict(&input);
//! println!("{}", prediction.formatted_demand());
//! ```

pub mod artifact;
pub mod config;
pub mod error;
pub mod features;
pub mod input;
pub mod model;
pub mod narrative;
pub mod service;

pub use artifact::{ForestArtifact, ForestMetadata, RandomForest};
pub use config::{ConfigError, EvChargeConfig};
pub use error::{InputError, ModelError};
pub use features::{FEATURE_NAMES, FeatureVector, encode};
pub use input::{DayOfWeek, DayType, Hour, Month, RawInput};
pub use model::{DEFAULT_ARTIFACT_PATH, DemandModel, ModelHandle, ModelLoader, read_forest};
pub use narrative::Narrative;
pub use service::{Prediction, PredictionService};

//! Model loading.
//!
//! A [`ModelLoader`] owns one artifact path and memoizes the first successful
//! load. It is built by the composition root and handed to whoever needs
//! predictions; there is no process-global model.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use tracing::{debug, info, warn};

use crate::artifact::{ArtifactError, ForestArtifact, RandomForest};
use crate::error::ModelError;
use crate::features::{FEATURE_NAMES, FeatureVector};

/// Artifact file name, resolved against the working directory.
pub const DEFAULT_ARTIFACT_PATH: &str = "rf_ev_charging_demand.json";

/// A pre-trained regressor over [`FeatureVector`]s.
pub trait DemandModel: Send + Sync {
    /// Predicted charging demand in kWh. Not clamped to be non-negative.
    fn predict(&self, features: &FeatureVector) -> f64;

    /// Short human-readable description of the model.
    fn describe(&self) -> String {
        String::from("Random Forest")
    }
}

/// Shared read-only handle to a loaded model.
pub type ModelHandle = Arc<dyn DemandModel>;

/// Loads the artifact at most once per instance.
pub struct ModelLoader {
    path: PathBuf,
    cached: OnceLock<ModelHandle>,
    reads: AtomicUsize,
}

impl fmt::Debug for ModelLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelLoader")
            .field("path", &self.path)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new(DEFAULT_ARTIFACT_PATH)
    }
}

impl ModelLoader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: OnceLock::new(),
            reads: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cached.get().is_some()
    }

    /// How many times storage has been read.
    #[must_use]
    pub fn storage_reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    /// Return the memoized handle, reading the artifact on first use.
    ///
    /// Every successful call on the same loader returns the same `Arc`.
    /// Failures are not cached, so a later call retries the read.
    pub fn load(&self) -> Result<ModelHandle, ModelError> {
        if let Some(handle) = self.cached.get() {
            return Ok(Arc::clone(handle));
        }

        let handle = self.read_artifact()?;
        // A concurrent first load may have won; hand out the stored one.
        let stored = self.cached.get_or_init(|| handle);
        Ok(Arc::clone(stored))
    }

    fn read_artifact(&self) -> Result<ModelHandle, ModelError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        let forest = read_forest(&self.path)?;
        Ok(Arc::new(forest))
    }
}

/// Read and validate a forest artifact without memoizing it.
pub fn read_forest(path: &Path) -> Result<RandomForest, ModelError> {
    info!(path = %path.display(), "loading model artifact");

    let text = std::fs::read_to_string(path).map_err(|source| {
        let err = match source.kind() {
            io::ErrorKind::NotFound => ModelError::ArtifactNotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::InvalidData => ModelError::corrupt(path, "artifact is not UTF-8"),
            _ => ModelError::Io {
                path: path.to_path_buf(),
                source,
            },
        };
        warn!(path = %path.display(), error = %err, "model artifact unavailable");
        err
    })?;

    let forest = ForestArtifact::from_json_str(&text)
        .and_then(ForestArtifact::validate)
        .map_err(|err| {
            warn!(path = %path.display(), error = %err, "model artifact rejected");
            artifact_error(path, err)
        })?;

    debug!(
        trees = forest.tree_count(),
        nodes = forest.node_count(),
        "forest validated"
    );
    info!(
        path = %path.display(),
        trees = forest.tree_count(),
        model = %forest.metadata().caption(),
        "model artifact loaded"
    );
    Ok(forest)
}

fn artifact_error(path: &Path, err: ArtifactError) -> ModelError {
    match err {
        ArtifactError::SchemaMismatch { found } => ModelError::EncodingMismatch {
            expected: FEATURE_NAMES.iter().map(ToString::to_string).collect(),
            found,
        },
        other => ModelError::corrupt(path, other.to_string()),
    }
}

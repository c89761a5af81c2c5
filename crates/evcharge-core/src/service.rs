//! Prediction requests: encode, predict, attach a narrative.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::features::{FeatureVector, encode};
use crate::input::RawInput;
use crate::model::{DemandModel, ModelHandle};
use crate::narrative::Narrative;

/// Outcome of one prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub features: FeatureVector,
    pub demand_kwh: f64,
    pub narrative: Narrative,
}

impl Prediction {
    /// `"12.34 kWh"`.
    #[must_use]
    pub fn formatted_demand(&self) -> String {
        format!("{:.2} kWh", self.demand_kwh)
    }
}

/// Stateless front for a loaded model.
///
/// Cheap to clone; clones share the same model.
#[derive(Clone)]
pub struct PredictionService {
    model: ModelHandle,
}

impl fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredictionService")
            .field("model", &self.model.describe())
            .finish()
    }
}

impl PredictionService {
    #[must_use]
    pub fn new(model: ModelHandle) -> Self {
        Self { model }
    }

    /// Wrap any concrete model, e.g. a stub in tests.
    #[must_use]
    pub fn from_model(model: impl DemandModel + 'static) -> Self {
        Self::new(Arc::new(model))
    }

    #[must_use]
    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    /// Run the model and choose the narrative from the weekend flag alone.
    #[must_use]
    pub fn predict_and_narrate(&self, features: &FeatureVector) -> Prediction {
        let demand_kwh = self.model.predict(features);
        let narrative = Narrative::for_weekend_flag(features.is_weekend());
        debug!(?features, demand_kwh, ?narrative, "prediction");
        Prediction {
            features: *features,
            demand_kwh,
            narrative,
        }
    }

    #[must_use]
    pub fn predict(&self, input: &RawInput) -> Prediction {
        self.predict_and_narrate(&encode(input))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::input::{DayOfWeek, DayType, Hour, Month};

    /// Returns a fixed value and counts calls.
    struct FixedModel {
        value: f64,
        calls: AtomicUsize,
    }

    impl FixedModel {
        fn new(value: f64) -> Self {
            Self {
                value,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl DemandModel for FixedModel {
        fn predict(&self, _features: &FeatureVector) -> f64 {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.value
        }
    }

    fn features(is_weekend: u8) -> FeatureVector {
        FeatureVector {
            hour: 10,
            day_of_week: 2,
            is_weekend,
            month: 7,
        }
    }

    #[test]
    fn narrative_ignores_predicted_value() {
        for value in [-5.0, 0.0, 3.5, 1_000.0] {
            let service = PredictionService::from_model(FixedModel::new(value));
            assert_eq!(
                service.predict_and_narrate(&features(1)).narrative,
                Narrative::Weekend
            );
            assert_eq!(
                service.predict_and_narrate(&features(0)).narrative,
                Narrative::Weekday
            );
        }
    }

    #[test]
    fn every_request_reaches_the_model() {
        let model = Arc::new(FixedModel::new(4.0));
        let service = PredictionService::new(model.clone());
        let fv = features(0);
        let _ = service.predict_and_narrate(&fv);
        let _ = service.predict_and_narrate(&fv);
        assert_eq!(model.calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn demand_is_formatted_to_two_decimals() {
        let service = PredictionService::from_model(FixedModel::new(12.345_6));
        let input = RawInput::new(
            Hour::new(8).expect("hour"),
            DayOfWeek::Monday,
            Month::new(3).expect("month"),
            DayType::Weekday,
        );
        let prediction = service.predict(&input);
        assert_eq!(prediction.formatted_demand(), "12.35 kWh");
        assert_eq!(prediction.features.as_array(), [8.0, 0.0, 0.0, 3.0]);
    }

    #[test]
    fn negative_values_pass_through() {
        let service = PredictionService::from_model(FixedModel::new(-1.0));
        assert_eq!(service.predict_and_narrate(&features(0)).demand_kwh, -1.0);
    }
}

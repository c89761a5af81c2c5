#![forbid(unsafe_code)]

//! The predictor form as an Elm-style [`Model`].
//!
//! # Controls
//!
//! - Tab / Down, Shift+Tab / Up: move between controls
//! - Left / Right (or h / l): change the focused control
//! - Home / End: first / last option
//! - Enter / p: predict
//! - q / Esc / Ctrl+C: quit

use evcharge_core::{
    DemandModel, ForestMetadata, Hour, ModelError, Narrative, Prediction, PredictionService,
};
use ftui_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
use ftui_core::geometry::Rect;
use ftui_layout::{Constraint, Flex};
use ftui_render::frame::Frame;
use ftui_runtime::{Cmd, Model};
use ftui_text::WrapMode;
use ftui_widgets::Widget;
use ftui_widgets::block::{Alignment, Block};
use ftui_widgets::borders::{BorderType, Borders};
use ftui_widgets::paragraph::Paragraph;
use tracing::{info, warn};

use crate::form::{Field, FormState};
use crate::theme;

pub const TITLE: &str = "EV Charging Demand Prediction";
pub const SUBTITLE: &str = "Predict hourly EV charging demand (kWh) using real UrbanEV data";

/// Messages driving [`PredictorApp`].
#[derive(Debug)]
pub enum Msg {
    Key(KeyEvent),
    /// Run a prediction for the current form values.
    Predict,
    Ignored,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) => Self::Key(key),
            _ => Self::Ignored,
        }
    }
}

/// Whether predictions can be served.
#[derive(Debug)]
pub enum ModelStatus {
    Ready(PredictionService),
    /// Load failed; the form stays usable but nothing is predicted.
    Unavailable(ModelError),
}

impl From<Result<PredictionService, ModelError>> for ModelStatus {
    fn from(result: Result<PredictionService, ModelError>) -> Self {
        match result {
            Ok(service) => Self::Ready(service),
            Err(err) => Self::Unavailable(err),
        }
    }
}

#[derive(Debug)]
pub struct PredictorApp {
    form: FormState,
    status: ModelStatus,
    last: Option<Prediction>,
    caption: String,
}

impl PredictorApp {
    #[must_use]
    pub fn new(status: impl Into<ModelStatus>, default_hour: Hour) -> Self {
        let status = status.into();
        let caption = match &status {
            ModelStatus::Ready(service) => service.model().describe(),
            ModelStatus::Unavailable(_) => ForestMetadata::default().caption(),
        };
        Self {
            form: FormState::new(default_hour),
            status,
            last: None,
            caption,
        }
    }

    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    #[must_use]
    pub fn last_prediction(&self) -> Option<&Prediction> {
        self.last.as_ref()
    }

    #[must_use]
    pub fn load_error(&self) -> Option<&ModelError> {
        match &self.status {
            ModelStatus::Ready(_) => None,
            ModelStatus::Unavailable(err) => Some(err),
        }
    }

    /// Narrative for the current day-type selection.
    #[must_use]
    pub fn narrative(&self) -> Narrative {
        Narrative::for_weekend_flag(self.form.snapshot().day_type.is_weekend())
    }

    fn predict(&mut self) {
        match &self.status {
            ModelStatus::Ready(service) => {
                let input = self.form.snapshot();
                let prediction = service.predict(&input);
                info!(
                    hour = input.hour.get(),
                    day = %input.day_of_week,
                    month = input.month.get(),
                    day_type = %input.day_type,
                    demand_kwh = prediction.demand_kwh,
                    "prediction served"
                );
                self.last = Some(prediction);
            }
            ModelStatus::Unavailable(err) => {
                warn!(error = %err, "prediction requested without a model");
            }
        }
    }

    fn on_input_changed(&mut self, changed: bool) {
        if changed {
            self.last = None;
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Cmd<Msg> {
        if key.kind == KeyEventKind::Release {
            return Cmd::None;
        }
        if key.modifiers.contains(Modifiers::CTRL) && key.code == KeyCode::Char('c') {
            return Cmd::Quit;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Escape => return Cmd::Quit,
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
            KeyCode::Right | KeyCode::Char('l') => {
                let changed = self.form.increment();
                self.on_input_changed(changed);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                let changed = self.form.decrement();
                self.on_input_changed(changed);
            }
            KeyCode::Home => {
                let changed = self.form.jump_first();
                self.on_input_changed(changed);
            }
            KeyCode::End => {
                let changed = self.form.jump_last();
                self.on_input_changed(changed);
            }
            KeyCode::Enter | KeyCode::Char('p') => self.predict(),
            _ => {}
        }
        Cmd::None
    }

    fn render_header(&self, area: Rect, frame: &mut Frame) {
        if area.height == 0 {
            return;
        }
        Paragraph::new(TITLE)
            .style(theme::title())
            .alignment(Alignment::Center)
            .render(Rect::new(area.x, area.y, area.width, 1), frame);
        if area.height > 1 {
            Paragraph::new(SUBTITLE)
                .style(theme::subtitle())
                .alignment(Alignment::Center)
                .render(Rect::new(area.x, area.y + 1, area.width, 1), frame);
        }
    }

    fn render_form(&self, area: Rect, frame: &mut Frame) {
        let block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title("Inputs")
            .style(theme::panel_border());
        let inner = block.inner(area);
        block.render(area, frame);

        for (row, field) in (0u16..).zip(Field::ALL) {
            if row >= inner.height {
                break;
            }
            let focused = field == self.form.focus();
            let marker = if focused { '>' } else { ' ' };
            let line = format!(
                "{marker} {:<12} {}",
                field.label(),
                self.form.value_text(field)
            );
            let style = if focused {
                theme::focused_row()
            } else {
                theme::body()
            };
            Paragraph::new(line)
                .style(style)
                .render(Rect::new(inner.x, inner.y + row, inner.width, 1), frame);
        }
    }

    fn render_result(&self, area: Rect, frame: &mut Frame) {
        let block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title("Prediction")
            .style(theme::panel_border());
        let inner = block.inner(area);
        block.render(area, frame);

        let (text, style) = match (&self.status, &self.last) {
            (ModelStatus::Unavailable(err), _) => {
                (format!("Model unavailable: {err}"), theme::error())
            }
            (ModelStatus::Ready(_), Some(prediction)) => (
                format!(
                    "Predicted Charging Demand: {}",
                    prediction.formatted_demand()
                ),
                theme::result(),
            ),
            (ModelStatus::Ready(_), None) => (
                "Press Enter to predict charging demand".to_string(),
                theme::muted(),
            ),
        };
        Paragraph::new(text)
            .style(style)
            .wrap(WrapMode::Word)
            .render(inner, frame);
    }

    fn render_insight(&self, area: Rect, frame: &mut Frame) {
        let narrative = self.narrative();
        let block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(narrative.title())
            .style(theme::panel_border());
        let inner = block.inner(area);
        block.render(area, frame);

        Paragraph::new(narrative.body())
            .style(theme::insight())
            .wrap(WrapMode::Word)
            .render(inner, frame);
    }

    fn render_footer(&self, area: Rect, frame: &mut Frame) {
        let line = format!(
            " {}  |  Tab: next  <-/->: change  Enter: predict  q: quit",
            self.caption
        );
        Paragraph::new(line)
            .style(theme::status_bar())
            .render(area, frame);
    }
}

impl Model for PredictorApp {
    type Message = Msg;

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Key(key) => self.handle_key(key),
            Msg::Predict => {
                self.predict();
                Cmd::None
            }
            Msg::Ignored => Cmd::None,
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = Rect::from_size(frame.buffer.width(), frame.buffer.height());

        let chunks = Flex::vertical()
            .constraints([
                Constraint::Fixed(2),
                Constraint::Fixed(6),
                Constraint::Fixed(4),
                Constraint::Min(4),
                Constraint::Fixed(1),
            ])
            .split(area);

        self.render_header(chunks[0], frame);
        self.render_form(chunks[1], frame);
        self.render_result(chunks[2], frame);
        self.render_insight(chunks[3], frame);
        self.render_footer(chunks[4], frame);
    }
}

#[cfg(test)]
mod tests {
    use evcharge_core::{DayType, FeatureVector};

    use super::*;

    struct Constant(f64);

    impl DemandModel for Constant {
        fn predict(&self, _features: &FeatureVector) -> f64 {
            self.0
        }
    }

    fn ready(value: f64) -> PredictorApp {
        PredictorApp::new(
            ModelStatus::Ready(PredictionService::from_model(Constant(value))),
            Hour::default(),
        )
    }

    fn press(app: &mut PredictorApp, code: KeyCode) -> Cmd<Msg> {
        app.update(Msg::Key(KeyEvent::new(code)))
    }

    #[test]
    fn enter_predicts_current_form() {
        let mut app = ready(21.5);
        assert!(app.last_prediction().is_none());
        let _ = press(&mut app, KeyCode::Enter);
        let prediction = app.last_prediction().expect("prediction");
        assert_eq!(prediction.formatted_demand(), "21.50 kWh");
        assert_eq!(prediction.features.hour, 12);
        assert_eq!(prediction.narrative, Narrative::Weekday);
    }

    #[test]
    fn changing_an_input_clears_the_result() {
        let mut app = ready(3.0);
        let _ = press(&mut app, KeyCode::Char('p'));
        assert!(app.last_prediction().is_some());
        let _ = press(&mut app, KeyCode::Right);
        assert!(app.last_prediction().is_none());
        assert_eq!(app.form().snapshot().hour.get(), 13);
    }

    #[test]
    fn saturated_slider_keeps_the_result() {
        let mut app = ready(3.0);
        let _ = press(&mut app, KeyCode::End);
        let _ = press(&mut app, KeyCode::Enter);
        let _ = press(&mut app, KeyCode::Right);
        assert!(app.last_prediction().is_some());
    }

    #[test]
    fn unavailable_model_blocks_predictions() {
        let mut app = PredictorApp::new(
            ModelStatus::Unavailable(ModelError::ArtifactNotFound {
                path: "rf_ev_charging_demand.json".into(),
            }),
            Hour::default(),
        );
        let _ = press(&mut app, KeyCode::Enter);
        let _ = app.update(Msg::Predict);
        assert!(app.last_prediction().is_none());
        assert!(matches!(
            app.load_error(),
            Some(ModelError::ArtifactNotFound { .. })
        ));
    }

    #[test]
    fn narrative_follows_day_type_control() {
        let mut app = ready(1.0);
        assert_eq!(app.narrative(), Narrative::Weekday);
        let _ = press(&mut app, KeyCode::BackTab);
        let _ = press(&mut app, KeyCode::Right);
        assert_eq!(app.form().snapshot().day_type, DayType::Weekend);
        assert_eq!(app.narrative(), Narrative::Weekend);
    }

    #[test]
    fn quit_keys() {
        let mut app = ready(1.0);
        assert!(matches!(press(&mut app, KeyCode::Char('q')), Cmd::Quit));
        assert!(matches!(press(&mut app, KeyCode::Escape), Cmd::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL);
        assert!(matches!(app.update(Msg::Key(ctrl_c)), Cmd::Quit));
    }

    #[test]
    fn key_release_is_ignored() {
        let mut app = ready(1.0);
        let release = KeyEvent::new(KeyCode::Right).with_kind(KeyEventKind::Release);
        let _ = app.update(Msg::Key(release));
        assert_eq!(app.form().snapshot().hour.get(), 12);
    }
}

use std::sync::Arc;

use crate::bundle::{ModelBundle, PredictionRound};
use crate::form::GameInputs;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Models loaded at startup, shared read-only.
    pub bundle: Arc<ModelBundle>,

    /// Current form contents.
    pub inputs: GameInputs,

    /// Result of the last successful round (None before the first submit).
    pub round: Option<PredictionRound>,

    /// Error from the last failed round, shown in place of results.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(bundle: Arc<ModelBundle>) -> Self {
        Self {
            bundle,
            inputs: GameInputs::default(),
            round: None,
            status_message: None,
        }
    }

    /// Run one prediction round from the current form.
    ///
    /// A failed round clears the previous results; there is no partial output.
    pub fn submit(&mut self) {
        let raw = self.inputs.to_raw_record();
        match self.bundle.predict_round(&raw) {
            Ok(round) => {
                log::info!(
                    "Predicted SO {:.2} (p={:.4}), BB {:.2} (p={:.4})",
                    round.strikeouts.expected,
                    round.strikeouts.probability,
                    round.walks.expected,
                    round.walks.probability
                );
                self.round = Some(round);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Prediction round failed: {e:#}");
                self.round = None;
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Restore the form defaults. Results stay until the next submit.
    pub fn reset_inputs(&mut self) {
        self.inputs = GameInputs::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::tests::write_artifacts;

    fn state() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let bundle = ModelBundle::load(&write_artifacts(dir.path())).unwrap();
        (dir, AppState::new(Arc::new(bundle)))
    }

    #[test]
    fn editing_inputs_does_not_predict() {
        let (_dir, mut state) = state();
        state.inputs.rolling_so = 2.0;
        assert!(state.round.is_none());
    }

    #[test]
    fn submit_fills_results_and_clears_errors() {
        let (_dir, mut state) = state();
        state.status_message = Some("stale".into());
        state.submit();
        let round = state.round.as_ref().unwrap();
        assert_eq!(round.strikeouts.expected, 6.5);
        assert!(state.status_message.is_none());

        state.inputs.rolling_so = 2.0;
        state.submit();
        assert_eq!(state.round.as_ref().unwrap().strikeouts.expected, 4.5);
    }

    #[test]
    fn reset_keeps_last_results() {
        let (_dir, mut state) = state();
        state.inputs.days_rest = 9;
        state.submit();
        state.reset_inputs();
        assert_eq!(state.inputs, GameInputs::default());
        assert!(state.round.is_some());
    }
}

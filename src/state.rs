use std::collections::BTreeMap;
use std::path::Path;

use crate::color::TrialColors;
use crate::data::filter::{toggle, HiddenTrials};
use crate::data::loader::load_csv;
use crate::data::model::{LabDataset, Part, PartSplit};
use crate::fit::sample_trend;

// ---------------------------------------------------------------------------
// Figure – which of the three charts is active
// ---------------------------------------------------------------------------

/// The three figures of the lab report. Each renders as two stacked panels,
/// one per experiment part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Figure {
    GasMass,
    Energy,
    PercentCombustion,
}

impl Figure {
    pub const ALL: [Figure; 3] = [Figure::GasMass, Figure::Energy, Figure::PercentCombustion];

    /// Full figure caption, numbered as in the lab report.
    pub fn title(self) -> &'static str {
        match self {
            Figure::GasMass => "Figure II - Gas produced as time passes for each trial",
            Figure::Energy => "Figure III - Heat change in the water as time passes for each trial",
            Figure::PercentCombustion => "Figure IV - Percent of combustion completed as time passes",
        }
    }

    /// Short label for the figure selector.
    pub fn label(self) -> &'static str {
        match self {
            Figure::GasMass => "Gas mass",
            Figure::Energy => "Energy",
            Figure::PercentCombustion => "Percent combustion",
        }
    }

    /// The measurement stores this figure draws from.
    pub fn stores(self, dataset: &LabDataset) -> &PartSplit {
        match self {
            Figure::GasMass => &dataset.mass,
            Figure::Energy => &dataset.energy,
            Figure::PercentCombustion => &dataset.percent_mass,
        }
    }

    pub fn y_label(self, part: Part) -> &'static str {
        match (self, part) {
            (Figure::GasMass, _) => "Mass of gas produced (g)",
            // The calorimeter differed between parts: a pop can for Part A,
            // an open water bath for Part B.
            (Figure::Energy, Part::Oxidizer) => "Energy absorbed by pop can (J)",
            (Figure::Energy, Part::Catalyst) => "Energy absorbed by water (J)",
            (Figure::PercentCombustion, _) => "Percent",
        }
    }

    /// Mass and percent figures carry fitted trend curves; energy does not.
    pub fn has_trend(self) -> bool {
        !matches!(self, Figure::Energy)
    }

    /// Percent figures format y ticks with a `%` suffix.
    pub fn percent_axis(self) -> bool {
        matches!(self, Figure::PercentCombustion)
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<LabDataset>,

    /// Which figure the central panel currently shows.
    pub figure: Figure,

    /// Whether fitted trend curves are drawn on the figures that have them.
    pub show_trend: bool,

    /// Trials toggled off in the side panel.
    pub hidden: HiddenTrials,

    /// Fitted trend polylines, keyed by (figure, part, trial). Computed once
    /// per load so the event loop never refits.
    trends: BTreeMap<(Figure, Part, String), Vec<[f64; 2]>>,

    /// Per-panel trial colours.
    colors: BTreeMap<(Figure, Part), TrialColors>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            figure: Figure::GasMass,
            show_trend: true,
            hidden: HiddenTrials::new(),
            trends: BTreeMap::new(),
            colors: BTreeMap::new(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Load a CSV and ingest it on success; on failure keep the previous
    /// dataset and surface the error in the status line.
    pub fn load_file(&mut self, path: &Path) {
        match load_csv(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} readings ({} oxidizer trials, {} catalyst trials) from {}",
                    dataset.reading_count(),
                    dataset.trial_count(Part::Oxidizer),
                    dataset.trial_count(Part::Catalyst),
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                let err = anyhow::Error::from(e);
                log::error!("Failed to load {}: {err:#}", path.display());
                self.status_message = Some(format!("Error: {err:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset: reset the selection, rebuild colours,
    /// and fit the trend curves.
    pub fn set_dataset(&mut self, dataset: LabDataset) {
        self.hidden.clear();
        self.colors.clear();
        self.trends.clear();

        for figure in Figure::ALL {
            let stores = figure.stores(&dataset);
            for part in Part::ALL {
                let series = stores.get(part);
                self.colors.insert((figure, part), TrialColors::new(series));

                if !figure.has_trend() {
                    continue;
                }
                for trial in series.trials() {
                    let Some((xs, ys)) = series.series(trial) else {
                        continue;
                    };
                    match sample_trend(xs, ys) {
                        Ok(curve) => {
                            self.trends.insert((figure, part, trial.to_string()), curve);
                        }
                        Err(e) => {
                            log::warn!("No trend for {part} trial '{trial}': {e}");
                        }
                    }
                }
            }
        }

        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Colour assignment for one figure panel.
    pub fn colors_for(&self, figure: Figure, part: Part) -> Option<&TrialColors> {
        self.colors.get(&(figure, part))
    }

    /// The cached fitted polyline for one trial, if any.
    pub fn trend_for(&self, figure: Figure, part: Part, trial: &str) -> Option<&[[f64; 2]]> {
        self.trends
            .get(&(figure, part, trial.to_string()))
            .map(Vec::as_slice)
    }

    /// Flip one trial's visibility in the side panel.
    pub fn toggle_trial(&mut self, part: Part, trial: &str) {
        toggle(&mut self.hidden, part, trial);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dataset() -> LabDataset {
        let mut ds = LabDataset::default();
        for i in 0..10 {
            let t = i as f64;
            ds.mass.get_mut(Part::Oxidizer).append("A", t, t * 0.1);
            ds.percent_mass.get_mut(Part::Oxidizer).append("A", t, t * 10.0);
            ds.energy.get_mut(Part::Catalyst).append("B", t, t * 40.0);
        }
        ds
    }

    #[test]
    fn ingest_builds_trends_for_fitted_figures_only() {
        let mut state = AppState::default();
        state.set_dataset(sample_dataset());

        assert!(state
            .trend_for(Figure::GasMass, Part::Oxidizer, "A")
            .is_some());
        assert!(state
            .trend_for(Figure::PercentCombustion, Part::Oxidizer, "A")
            .is_some());
        assert!(state.trend_for(Figure::Energy, Part::Catalyst, "B").is_none());
    }

    #[test]
    fn ingest_resets_selection_and_status() {
        let mut state = AppState::default();
        state.status_message = Some("Error: old".into());
        state.toggle_trial(Part::Oxidizer, "A");

        state.set_dataset(sample_dataset());
        assert!(state.hidden.is_empty());
        assert!(state.status_message.is_none());
        assert!(state.dataset.is_some());
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = AppState::default();
        state.set_dataset(sample_dataset());
        state.load_file(Path::new("no_such_lab_data.csv"));

        assert!(state.dataset.is_some());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Error:")));
    }
}

use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Part – which half of the experiment a row belongs to
// ---------------------------------------------------------------------------

/// Label used in the CSV to mark rows of the variable-oxidizer part.
/// Every other label falls into the catalyst part.
pub const OXIDIZER_LABEL: &str = "Variable oxidizer";

/// The two experiment categories. Routing is binary: a row either carries
/// the oxidizer label or it belongs to the catalyst part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Part {
    Oxidizer,
    Catalyst,
}

impl Part {
    pub const ALL: [Part; 2] = [Part::Oxidizer, Part::Catalyst];

    /// Classify a raw part field.
    pub fn classify(label: &str) -> Part {
        if label == OXIDIZER_LABEL {
            Part::Oxidizer
        } else {
            Part::Catalyst
        }
    }

    /// Panel title shown above each figure half.
    pub fn title(self) -> &'static str {
        match self {
            Part::Oxidizer => "Part A - Variable oxidizer",
            Part::Catalyst => "Part B - Constant oxidizer, variable catalyst",
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Oxidizer => write!(f, "oxidizer"),
            Part::Catalyst => write!(f, "catalyst"),
        }
    }
}

// ---------------------------------------------------------------------------
// TrialSeries – per-trial time/value sequences
// ---------------------------------------------------------------------------

/// Append-only store of one measurement across trials: for every trial
/// identifier a pair of positionally aligned sequences (elapsed seconds,
/// measured value), in file order.
#[derive(Debug, Clone, Default)]
pub struct TrialSeries {
    times: BTreeMap<String, Vec<f64>>,
    values: BTreeMap<String, Vec<f64>>,
}

impl TrialSeries {
    /// Record one reading. An unseen trial starts fresh sequences; a known
    /// trial grows both in lockstep, keeping the pairwise alignment.
    pub fn append(&mut self, trial: &str, time: f64, value: f64) {
        self.times.entry(trial.to_string()).or_default().push(time);
        self.values.entry(trial.to_string()).or_default().push(value);
    }

    /// Trial identifiers in stable (sorted) order.
    pub fn trials(&self) -> impl Iterator<Item = &str> {
        self.times.keys().map(String::as_str)
    }

    /// The aligned (times, values) slices for one trial.
    pub fn series(&self, trial: &str) -> Option<(&[f64], &[f64])> {
        let t = self.times.get(trial)?;
        let v = self.values.get(trial)?;
        Some((t.as_slice(), v.as_slice()))
    }

    /// Number of trials with at least one reading.
    pub fn trial_count(&self) -> usize {
        self.times.len()
    }

    /// Total number of readings across all trials.
    pub fn reading_count(&self) -> usize {
        self.times.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

// ---------------------------------------------------------------------------
// PartSplit / LabDataset – the six populated stores
// ---------------------------------------------------------------------------

/// One store per experiment part.
#[derive(Debug, Clone, Default)]
pub struct PartSplit {
    pub oxidizer: TrialSeries,
    pub catalyst: TrialSeries,
}

impl PartSplit {
    pub fn get(&self, part: Part) -> &TrialSeries {
        match part {
            Part::Oxidizer => &self.oxidizer,
            Part::Catalyst => &self.catalyst,
        }
    }

    pub fn get_mut(&mut self, part: Part) -> &mut TrialSeries {
        match part {
            Part::Oxidizer => &mut self.oxidizer,
            Part::Catalyst => &mut self.catalyst,
        }
    }
}

/// The fully parsed dataset: three measurements, each split by part.
/// Read-only once the loader hands it over.
#[derive(Debug, Clone, Default)]
pub struct LabDataset {
    /// Mass of gas produced (g).
    pub mass: PartSplit,
    /// Energy absorbed (J).
    pub energy: PartSplit,
    /// Percent of combustion completed, derived from the mass rows.
    pub percent_mass: PartSplit,
}

impl LabDataset {
    /// Total readings across all six stores.
    pub fn reading_count(&self) -> usize {
        [&self.mass, &self.energy, &self.percent_mass]
            .iter()
            .flat_map(|split| Part::ALL.iter().map(|&p| split.get(p).reading_count()))
            .sum()
    }

    /// Distinct trial names for one part, across measurements, sorted.
    pub fn trial_names(&self, part: Part) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .mass
            .get(part)
            .trials()
            .chain(self.energy.get(part).trials())
            .chain(self.percent_mass.get(part).trials())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Distinct trial count for one part, across measurements.
    pub fn trial_count(&self, part: Part) -> usize {
        self.trial_names(part).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_starts_and_extends_in_lockstep() {
        let mut series = TrialSeries::default();
        series.append("A", 0.0, 1.0);
        assert_eq!(series.series("A"), Some((&[0.0][..], &[1.0][..])));

        series.append("A", 5.0, 2.5);
        let (t, v) = series.series("A").unwrap();
        assert_eq!(t, &[0.0, 5.0]);
        assert_eq!(v, &[1.0, 2.5]);
        assert_eq!(t.len(), v.len());
    }

    #[test]
    fn trials_are_independent() {
        let mut series = TrialSeries::default();
        series.append("A", 0.0, 1.0);
        series.append("B", 0.0, 9.0);
        series.append("A", 1.0, 2.0);

        assert_eq!(series.trial_count(), 2);
        assert_eq!(series.series("A").unwrap().0, &[0.0, 1.0]);
        assert_eq!(series.series("B").unwrap().1, &[9.0]);
        assert_eq!(series.series("C"), None);
    }

    #[test]
    fn classify_is_binary() {
        assert_eq!(Part::classify("Variable oxidizer"), Part::Oxidizer);
        assert_eq!(Part::classify("anything else"), Part::Catalyst);
        assert_eq!(Part::classify(""), Part::Catalyst);
    }

    #[test]
    fn reading_count_sums_all_stores() {
        let mut ds = LabDataset::default();
        ds.mass.get_mut(Part::Oxidizer).append("A", 0.0, 1.0);
        ds.percent_mass.get_mut(Part::Oxidizer).append("A", 0.0, 10.0);
        ds.energy.get_mut(Part::Catalyst).append("B", 0.0, 5.0);

        assert_eq!(ds.reading_count(), 3);
        assert_eq!(ds.trial_count(Part::Oxidizer), 1);
        assert_eq!(ds.trial_count(Part::Catalyst), 1);
    }
}

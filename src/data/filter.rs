use std::collections::BTreeSet;

use super::model::{Part, TrialSeries};

// ---------------------------------------------------------------------------
// Trial visibility: which trials are hidden per part
// ---------------------------------------------------------------------------

/// A trial within one part of the experiment. Trial identifiers are only
/// unique within a part, so the part tags along.
pub type TrialKey = (Part, String);

/// Hidden-trial selection state. Absence means visible, so a fresh dataset
/// starts with everything shown.
pub type HiddenTrials = BTreeSet<TrialKey>;

/// Whether a trial should currently be drawn.
pub fn is_visible(hidden: &HiddenTrials, part: Part, trial: &str) -> bool {
    !hidden.contains(&(part, trial.to_string()))
}

/// Flip one trial's visibility.
pub fn toggle(hidden: &mut HiddenTrials, part: Part, trial: &str) {
    let key = (part, trial.to_string());
    if !hidden.remove(&key) {
        hidden.insert(key);
    }
}

/// Trials of one store that pass the current selection, in stable order.
pub fn visible_trials<'a>(
    series: &'a TrialSeries,
    part: Part,
    hidden: &'a HiddenTrials,
) -> impl Iterator<Item = &'a str> {
    series
        .trials()
        .filter(move |trial| is_visible(hidden, part, trial))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everything_visible_by_default() {
        let mut series = TrialSeries::default();
        series.append("A", 0.0, 1.0);
        series.append("B", 0.0, 2.0);

        let hidden = HiddenTrials::new();
        let shown: Vec<&str> = visible_trials(&series, Part::Oxidizer, &hidden).collect();
        assert_eq!(shown, vec!["A", "B"]);
    }

    #[test]
    fn toggle_hides_and_reshows() {
        let mut series = TrialSeries::default();
        series.append("A", 0.0, 1.0);
        series.append("B", 0.0, 2.0);

        let mut hidden = HiddenTrials::new();
        toggle(&mut hidden, Part::Oxidizer, "A");
        assert!(!is_visible(&hidden, Part::Oxidizer, "A"));
        // Same trial name under the other part stays visible.
        assert!(is_visible(&hidden, Part::Catalyst, "A"));

        let shown: Vec<&str> = visible_trials(&series, Part::Oxidizer, &hidden).collect();
        assert_eq!(shown, vec!["B"]);

        toggle(&mut hidden, Part::Oxidizer, "A");
        assert!(is_visible(&hidden, Part::Oxidizer, "A"));
    }
}

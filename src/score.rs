//! The vocal sincerity index.
//!
//! Four sub-scores, each 0–25 points, derived from coarse acoustic
//! statistics:
//!
//! 1. Pitch Confidence — rough frequency sweet spot 130–200 Hz
//! 2. Dynamic Commitment — RMS amplitude sweet spot 0.02–0.08
//! 3. Tonal Stability — |RMS delta| / RMS amplitude sweet spot 0.3–0.7
//! 4. Conviction Quotient — max amplitude / mean norm sweet spot 3–8
//!
//! This is a fixed heuristic over noisy measurements, not a trained model.
//! The one hard requirement is determinism: identical features must always
//! produce the identical score.

use crate::audio::stats::FeatureSet;
use crate::defaults::NEUTRAL_COMPONENT_SCORE;

// Statistic names, as normalized by the feature extractor.
const STAT_ROUGH_FREQUENCY: &str = "rough frequency";
const STAT_RMS_AMPLITUDE: &str = "rms amplitude";
const STAT_RMS_DELTA: &str = "rms delta";
const STAT_MAXIMUM_AMPLITUDE: &str = "maximum amplitude";
const STAT_MEAN_NORM: &str = "mean norm";

/// Piecewise-linear component score: 0 at the extremes, 12 at the sweet-spot
/// edges, peaking at 25 in the middle of the sweet spot.
///
/// `None` (missing statistic or undefined ratio) scores the neutral 12.5.
/// The function is continuous at all four boundaries.
pub fn score_component(
    value: Option<f64>,
    low_extreme: f64,
    low_sweet: f64,
    high_sweet: f64,
    high_extreme: f64,
) -> f64 {
    let Some(value) = value else {
        return NEUTRAL_COMPONENT_SCORE;
    };

    if (low_sweet..=high_sweet).contains(&value) {
        let mid = (low_sweet + high_sweet) / 2.0;
        let half_range = (high_sweet - low_sweet) / 2.0;
        if half_range == 0.0 {
            return 25.0;
        }
        let dist = (value - mid).abs() / half_range;
        25.0 - 13.0 * dist
    } else if low_extreme <= value && value < low_sweet {
        let span = low_sweet - low_extreme;
        if span == 0.0 {
            return 0.0;
        }
        12.0 * (value - low_extreme) / span
    } else if high_sweet < value && value <= high_extreme {
        let span = high_extreme - high_sweet;
        if span == 0.0 {
            return 0.0;
        }
        12.0 * (1.0 - (value - high_sweet) / span)
    } else {
        0.0
    }
}

/// Per-component breakdown of one clip's sincerity.
#[derive(Debug, Clone, PartialEq)]
pub struct SincerityReport {
    pub pitch_confidence: f64,
    pub dynamic_commitment: f64,
    pub tonal_stability: f64,
    pub conviction_quotient: f64,
}

impl SincerityReport {
    /// Composite score: rounded sum of the four components, 0–100.
    pub fn total(&self) -> i64 {
        (self.pitch_confidence
            + self.dynamic_commitment
            + self.tonal_stability
            + self.conviction_quotient)
            .round() as i64
    }
}

/// Derive the four ratios from the features and score each one.
///
/// Pure function: no I/O, no randomness. Ratios with a non-positive
/// denominator are undefined and take the neutral score.
pub fn analyze(features: &FeatureSet) -> SincerityReport {
    let pitch_confidence =
        score_component(features.get(STAT_ROUGH_FREQUENCY), 50.0, 130.0, 200.0, 350.0);

    let rms = features.get(STAT_RMS_AMPLITUDE);
    let dynamic_commitment = score_component(rms, 0.0, 0.02, 0.08, 0.2);

    let stability_ratio = match (features.get(STAT_RMS_DELTA), rms) {
        (Some(delta), Some(rms)) if rms > 0.0 => Some(delta.abs() / rms),
        _ => None,
    };
    let tonal_stability = score_component(stability_ratio, 0.0, 0.3, 0.7, 1.5);

    let conviction_ratio = match (
        features.get(STAT_MAXIMUM_AMPLITUDE),
        features.get(STAT_MEAN_NORM),
    ) {
        (Some(max_amp), Some(mean_norm)) if mean_norm > 0.0 => Some(max_amp / mean_norm),
        _ => None,
    };
    let conviction_quotient = score_component(conviction_ratio, 0.0, 3.0, 8.0, 20.0);

    SincerityReport {
        pitch_confidence,
        dynamic_commitment,
        tonal_stability,
        conviction_quotient,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Features that put every ratio at its sweet-spot midpoint.
    fn midpoint_features() -> FeatureSet {
        let mut features = FeatureSet::new();
        features.insert("rough frequency", 165.0);
        features.insert("rms amplitude", 0.05);
        // |0.025| / 0.05 = 0.5, the stability midpoint
        features.insert("rms delta", 0.025);
        // 0.275 / 0.05 = 5.5, the conviction midpoint
        features.insert("maximum amplitude", 0.275);
        features.insert("mean norm", 0.05);
        features
    }

    #[test]
    fn test_all_midpoints_score_exactly_100() {
        let report = analyze(&midpoint_features());
        assert_eq!(report.pitch_confidence, 25.0);
        assert_eq!(report.dynamic_commitment, 25.0);
        assert_eq!(report.tonal_stability, 25.0);
        assert_eq!(report.conviction_quotient, 25.0);
        assert_eq!(report.total(), 100);
    }

    #[test]
    fn test_all_missing_scores_50() {
        let report = analyze(&FeatureSet::new());
        assert_eq!(report.pitch_confidence, NEUTRAL_COMPONENT_SCORE);
        assert_eq!(report.total(), 50);
    }

    #[test]
    fn test_component_missing_value_is_neutral() {
        assert_eq!(score_component(None, 0.0, 1.0, 2.0, 3.0), 12.5);
    }

    #[test]
    fn test_component_sweet_edges_score_12() {
        assert_eq!(score_component(Some(130.0), 50.0, 130.0, 200.0, 350.0), 12.0);
        assert_eq!(score_component(Some(200.0), 50.0, 130.0, 200.0, 350.0), 12.0);
    }

    #[test]
    fn test_component_extremes_score_0() {
        assert_eq!(score_component(Some(50.0), 50.0, 130.0, 200.0, 350.0), 0.0);
        assert_eq!(score_component(Some(350.0), 50.0, 130.0, 200.0, 350.0), 0.0);
    }

    #[test]
    fn test_component_outside_extremes_scores_0() {
        assert_eq!(score_component(Some(49.9), 50.0, 130.0, 200.0, 350.0), 0.0);
        assert_eq!(score_component(Some(1e6), 50.0, 130.0, 200.0, 350.0), 0.0);
        assert_eq!(score_component(Some(-1.0), 0.0, 0.3, 0.7, 1.5), 0.0);
    }

    #[test]
    fn test_component_continuous_at_boundaries() {
        let eps = 1e-9;
        let params = (50.0, 130.0, 200.0, 350.0);
        for boundary in [50.0, 130.0, 200.0, 350.0] {
            let below = score_component(Some(boundary - eps), params.0, params.1, params.2, params.3);
            let at = score_component(Some(boundary), params.0, params.1, params.2, params.3);
            let above = score_component(Some(boundary + eps), params.0, params.1, params.2, params.3);
            assert!(
                (below - at).abs() < 1e-6 && (above - at).abs() < 1e-6,
                "discontinuity at {}: {} / {} / {}",
                boundary,
                below,
                at,
                above
            );
        }
    }

    #[test]
    fn test_component_ramp_values() {
        // Halfway up the low ramp: 12 * (90 - 50) / 80 = 6
        assert_eq!(score_component(Some(90.0), 50.0, 130.0, 200.0, 350.0), 6.0);
        // Halfway down the high ramp: 12 * (1 - 75/150) = 6
        assert_eq!(score_component(Some(275.0), 50.0, 130.0, 200.0, 350.0), 6.0);
    }

    #[test]
    fn test_component_zero_width_sweet_spot_scores_25() {
        assert_eq!(score_component(Some(1.0), 0.0, 1.0, 1.0, 2.0), 25.0);
    }

    #[test]
    fn test_component_is_deterministic() {
        for _ in 0..10 {
            assert_eq!(
                score_component(Some(0.137), 0.0, 0.02, 0.08, 0.2),
                score_component(Some(0.137), 0.0, 0.02, 0.08, 0.2)
            );
        }
    }

    #[test]
    fn test_stability_undefined_when_rms_zero() {
        let mut features = midpoint_features();
        features.insert("rms amplitude", 0.0);
        let report = analyze(&features);
        // rms 0: dynamic scores the low extreme, stability is undefined
        assert_eq!(report.tonal_stability, NEUTRAL_COMPONENT_SCORE);
        assert_eq!(report.dynamic_commitment, 0.0);
    }

    #[test]
    fn test_conviction_undefined_when_mean_norm_zero() {
        let mut features = midpoint_features();
        features.insert("mean norm", 0.0);
        let report = analyze(&features);
        assert_eq!(report.conviction_quotient, NEUTRAL_COMPONENT_SCORE);
    }

    #[test]
    fn test_negative_rms_delta_uses_magnitude() {
        let mut features = midpoint_features();
        features.insert("rms delta", -0.025);
        let report = analyze(&features);
        assert_eq!(report.tonal_stability, 25.0);
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let features = midpoint_features();
        assert_eq!(analyze(&features), analyze(&features));
    }

    #[test]
    fn test_extreme_features_score_0() {
        let mut features = FeatureSet::new();
        features.insert("rough frequency", 1012.0);
        features.insert("rms amplitude", 0.5);
        features.insert("rms delta", 2.0);
        features.insert("maximum amplitude", 0.9);
        features.insert("mean norm", 0.001);
        let report = analyze(&features);
        assert_eq!(report.total(), 0);
    }
}

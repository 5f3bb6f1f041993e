//! Threshold safety correction.
//!
//! At startup the driver checks that the rerun threshold leaves enough
//! walltime margin for a rerun to actually land before the job's
//! expected walltime elapses; if not, the threshold is lowered and a
//! warning surfaced.

/// Sweep tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdConfig {
    /// Percent-completion at or above which a still-live job is
    /// considered a rerun candidate (inclusive).
    pub threshold: f64,
    /// How often the sweep runs.
    pub interval_hours: f64,
    /// Assumed walltime for jobs whose own request isn't known yet at
    /// startup-check time.
    pub expected_walltime_hours: f64,
    /// Safety margin multiplier applied to `interval_hours`.
    pub safe_buffer: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self { threshold: 95.0, interval_hours: 1.0, expected_walltime_hours: 72.0, safe_buffer: 1.5 }
    }
}

/// Returns `true` iff `(1 - threshold/100) * expected_walltime >=
/// safe_buffer * interval`.
pub fn is_safe(cfg: &ThresholdConfig) -> bool {
    (1.0 - cfg.threshold / 100.0) * cfg.expected_walltime_hours >= cfg.safe_buffer * cfg.interval_hours
}

/// If `cfg.threshold` violates [`is_safe`], return a corrected config
/// with the threshold lowered to exactly the safe boundary
/// (`(1 - safe_buffer*interval/expected_walltime)*100`), along with a
/// flag the caller should use to decide whether to log a warning.
pub fn correct(cfg: ThresholdConfig) -> (ThresholdConfig, bool) {
    if is_safe(&cfg) {
        return (cfg, false);
    }
    let corrected_threshold = (1.0 - (cfg.safe_buffer * cfg.interval_hours) / cfg.expected_walltime_hours) * 100.0;
    let mut corrected = cfg;
    corrected.threshold = corrected_threshold;
    (corrected, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_safe() {
        assert!(is_safe(&ThresholdConfig::default()));
    }

    #[test]
    fn unsafe_threshold_is_corrected_to_exact_boundary() {
        let cfg = ThresholdConfig { threshold: 99.9, interval_hours: 1.0, expected_walltime_hours: 72.0, safe_buffer: 1.5 };
        assert!(!is_safe(&cfg));

        let (corrected, warned) = correct(cfg);
        assert!(warned);
        assert!(is_safe(&corrected));
        // The boundary should hold with equality (within float tolerance).
        let margin = (1.0 - corrected.threshold / 100.0) * corrected.expected_walltime_hours;
        assert!((margin - corrected.safe_buffer * corrected.interval_hours).abs() < 1e-9);
    }

    #[test]
    fn safe_threshold_is_left_untouched() {
        let cfg = ThresholdConfig::default();
        let (corrected, warned) = correct(cfg);
        assert!(!warned);
        assert_eq!(corrected, cfg);
    }
}

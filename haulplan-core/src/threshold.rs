//! Cumulative-threshold emitter shared by the fuel and rest-break planners.
//!
//! The emitter walks consecutive pairs of a sequence, accumulating a per-leg
//! metric. When the running total crosses the threshold it emits a record
//! anchored at one end of the current leg and resets the total to zero.

/// Relative slack applied at the threshold so summed legs that are
/// nominally equal to it compare as equal.
const RELATIVE_TOLERANCE: f64 = 1e-9;

/// Comparison that fires the emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Trigger {
    /// Fire when the total is strictly greater than the threshold.
    Exceeds,
    /// Fire when the total is greater than or equal to the threshold.
    Reaches,
}

impl Trigger {
    fn is_met(self, total: f64, threshold: f64) -> bool {
        let slack = threshold.abs() * RELATIVE_TOLERANCE;
        match self {
            Self::Exceeds => total > threshold + slack,
            Self::Reaches => total >= threshold - slack,
        }
    }
}

/// End of the crossing leg a record is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Anchor {
    /// The step the leg departs from.
    LegOrigin,
    /// The step the leg arrives at.
    LegDestination,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CumulativeThreshold {
    pub(crate) threshold: f64,
    pub(crate) trigger: Trigger,
    pub(crate) anchor: Anchor,
}

impl CumulativeThreshold {
    /// Walk `steps` pairwise and collect a record for each crossing.
    ///
    /// `record` receives the anchored step and the total accumulated since
    /// the previous crossing (or the start).
    pub(crate) fn emit<S, T>(
        &self,
        steps: &[S],
        mut leg_metric: impl FnMut(&S, &S) -> f64,
        mut record: impl FnMut(&S, f64) -> T,
    ) -> Vec<T> {
        let mut total = 0.0;
        let mut emitted = Vec::new();
        for (from, to) in steps.iter().zip(steps.iter().skip(1)) {
            total += leg_metric(from, to);
            if self.trigger.is_met(total, self.threshold) {
                let anchored = match self.anchor {
                    Anchor::LegOrigin => from,
                    Anchor::LegDestination => to,
                };
                emitted.push(record(anchored, total));
                total = 0.0;
            }
        }
        emitted
    }
}

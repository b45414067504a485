//! Per-frame performance and accounting metrics.

/// Timing and fill accounting for a single [`update`](crate::WaterSystem::update).
///
/// Pre-fill frames report `active == false` and no stage timings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire update, in microseconds.
    pub total_us: u64,
    /// Per-stage execution times: `(name, microseconds)`.
    pub stage_us: Vec<(String, u64)>,
    /// Fill added at the inlet this frame.
    pub injected: f32,
    /// Fill removed by draining this frame.
    pub drained: f32,
    /// Sum of fill over all tiles after the update.
    pub total_fill: f32,
    /// Whether the grid simulation ran.
    pub active: bool,
}

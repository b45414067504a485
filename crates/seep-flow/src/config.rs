//! Flow tuning constants.

use seep_core::ParamError;

/// Rates and thresholds for the flow stages.
///
/// All rates are in tile-fractions per second; fill is dimensionless.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlowConfig {
    /// Fill added to the inlet per second.
    pub source_rate: f32,
    /// Cap on fill moved into the tile below per second.
    pub down_rate: f32,
    /// Cap on fill moved to a horizontal neighbour per second.
    pub side_rate: f32,
    /// Fill removed per second from tiles bordering outside space.
    pub leak_rate: f32,
    /// Transfer sub-iterations per frame, each using `dt / flow_iterations`.
    pub flow_iterations: u32,
    /// Minimum fill difference before lateral equalization moves anything.
    pub lateral_threshold: f32,
    /// Fill below which tiles bordering outside space are snapped to zero.
    pub crumb_epsilon: f32,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            source_rate: 2.2,
            down_rate: 10.0,
            side_rate: 4.0,
            leak_rate: 12.0,
            flow_iterations: 4,
            lateral_threshold: 0.02,
            crumb_epsilon: 0.06,
        }
    }
}

impl FlowConfig {
    /// Reject NaN/negative rates, zero iterations, and thresholds outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ParamError> {
        ParamError::check_rate("source_rate", self.source_rate)?;
        ParamError::check_rate("down_rate", self.down_rate)?;
        ParamError::check_rate("side_rate", self.side_rate)?;
        ParamError::check_rate("leak_rate", self.leak_rate)?;
        if self.flow_iterations == 0 {
            return Err(ParamError::ZeroFlowIterations);
        }
        ParamError::check_threshold("lateral_threshold", self.lateral_threshold, 0.0, 1.0)?;
        ParamError::check_threshold("crumb_epsilon", self.crumb_epsilon, 0.0, 1.0)?;
        Ok(())
    }
}

//! Detection configuration.
//!
//! All settings are plain values handed to the detectors; nothing is read from
//! process-wide state. Missing fields fall back to [`Default`] when loading
//! from serialized form.

use serde::{Deserialize, Serialize};

use crate::geometry::point::Tolerance;

/// Settings shared by both detection methods.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Equal-point tolerance.
    pub tolerance: Tolerance,
    /// Parameter steps across a drainage path during the proximity search.
    pub sample_steps: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::default(),
            sample_steps: 100,
        }
    }
}

/// Settings for [`SteepestDescentSimulator`](crate::algs::steepest_descent::SteepestDescentSimulator).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteepestDescentConfig {
    pub tolerance: Tolerance,
    /// Most paths opened from a single start vertex.
    pub max_branches: usize,
    /// Most vertices visited per path; `None` means the mesh vertex count.
    pub max_steps: Option<usize>,
}

impl Default for SteepestDescentConfig {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::default(),
            max_branches: 2,
            max_steps: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let cfg: DetectionConfig = serde_json::from_str(r#"{"tolerance": 0.001}"#).unwrap();
        assert_eq!(cfg.tolerance.equal_point(), 0.001);
        assert_eq!(cfg.sample_steps, 100);

        let sd: SteepestDescentConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(sd, SteepestDescentConfig::default());
    }

    #[test]
    fn negative_tolerance_rejected_on_load() {
        assert!(serde_json::from_str::<DetectionConfig>(r#"{"tolerance": -1.0}"#).is_err());
    }
}

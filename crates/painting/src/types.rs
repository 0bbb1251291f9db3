use quill_ipc::PenConfig;
use serde::{Deserialize, Serialize};

/// Pressure and tilt channels of a pressure-tracked path.
///
/// Both sequences run parallel to the coordinate sequences. Samples taken
/// after the device stopped reporting pressure are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PressureData {
    pub forces: Vec<Option<f32>>,
    pub tilts: Vec<Option<f32>>,
}

/// Sample sequences of a path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPathData")]
pub struct PathData {
    pub xs: Vec<f32>,
    pub ys: Vec<f32>,
    /// Present only when the first sample carried pressure
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<PressureData>,
    /// Present only when the pen configuration changed mid-stroke
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configs: Option<Vec<PenConfig>>,
}

/// Decoded form of [`PathData`] before the pressure channels are paired up
#[derive(Deserialize)]
struct RawPathData {
    xs: Vec<f32>,
    ys: Vec<f32>,
    #[serde(default)]
    forces: Option<Vec<Option<f32>>>,
    #[serde(default)]
    tilts: Option<Vec<Option<f32>>>,
    #[serde(default)]
    configs: Option<Vec<PenConfig>>,
}

impl TryFrom<RawPathData> for PathData {
    type Error = String;

    /// `forces` and `tilts` travel together; one without the other is
    /// rejected rather than dropped.
    fn try_from(raw: RawPathData) -> Result<Self, Self::Error> {
        let pressure = match (raw.forces, raw.tilts) {
            (Some(forces), Some(tilts)) => Some(PressureData { forces, tilts }),
            (None, None) => None,
            (Some(_), None) => return Err("path data has forces but no tilts".to_string()),
            (None, Some(_)) => return Err("path data has tilts but no forces".to_string()),
        };
        Ok(Self {
            xs: raw.xs,
            ys: raw.ys,
            pressure,
            configs: raw.configs,
        })
    }
}

/// One finished (or in-progress) stroke.
///
/// A path without `data.configs` was drawn with `config` along its full
/// extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub config: PenConfig,
    pub data: PathData,
}

impl Path {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.data.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.xs.is_empty()
    }

    /// Pen lookup key
    pub fn kind(&self) -> &str {
        &self.config.kind
    }

    pub fn is_pressure_tracked(&self) -> bool {
        self.data.pressure.is_some()
    }

    /// Sample positions in drawing order
    pub fn points(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.data.xs.iter().copied().zip(self.data.ys.iter().copied())
    }

    /// Configuration in effect at sample `index`
    pub fn config_at(&self, index: usize) -> &PenConfig {
        self.data
            .configs
            .as_ref()
            .and_then(|configs| configs.get(index))
            .unwrap_or(&self.config)
    }

    /// Force of sample `index`, `None` when not reported
    pub fn force_at(&self, index: usize) -> Option<f32> {
        self.data
            .pressure
            .as_ref()
            .and_then(|p| p.forces.get(index).copied().flatten())
    }

    /// Last recorded position
    pub fn last_point(&self) -> Option<(f32, f32)> {
        Some((*self.data.xs.last()?, *self.data.ys.last()?))
    }
}

/// One input observation in surface coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub x: f32,
    pub y: f32,
    pub force: Option<f32>,
    pub tilt: Option<f32>,
    pub config: PenConfig,
}

impl Sample {
    pub fn new(x: f32, y: f32, config: PenConfig) -> Self {
        Self {
            x,
            y,
            force: None,
            tilt: None,
            config,
        }
    }

    pub fn with_pressure(mut self, force: Option<f32>, tilt: Option<f32>) -> Self {
        self.force = force;
        self.tilt = tilt;
        self
    }
}

/// Rendering hints passed to a pen alongside the path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawOptions {
    /// The path is still being drawn
    pub active: bool,
}

impl DrawOptions {
    pub const ACTIVE: DrawOptions = DrawOptions { active: true };
    pub const PERSISTED: DrawOptions = DrawOptions { active: false };
}

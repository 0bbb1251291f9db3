//! Per-pointer tracking of in-progress strokes
//!
//! Each pointer owns at most one [`ActivePath`]. A path is created on
//! pointer-down, grows by one sample per move, and leaves the set on
//! release, at which point it is compressed into a persisted [`Path`].

use std::collections::BTreeMap;

use quill_ipc::{PenConfig, PointerId};
use tracing::debug;

use crate::types::{Path, PathData, PressureData, Sample};

/// Whether a force reading marks the device as pressure sensitive.
/// `None`, zero and NaN all read as "no pressure".
pub fn is_pressure_sensitive(force: Option<f32>) -> bool {
    force.is_some_and(|f| f != 0.0 && !f.is_nan())
}

/// A stroke that is still being drawn
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePath {
    pointer: PointerId,
    /// Always carries `data.configs` while active
    path: Path,
    config_dirty: bool,
}

impl ActivePath {
    /// Seed a path with its first sample.
    ///
    /// The path records pressure iff this sample does; later samples never
    /// change that decision.
    pub fn start(pointer: PointerId, sample: Sample) -> Self {
        let pressure = is_pressure_sensitive(sample.force).then(PressureData::default);
        let mut active = Self {
            pointer,
            path: Path {
                config: sample.config.clone(),
                data: PathData {
                    xs: Vec::new(),
                    ys: Vec::new(),
                    pressure,
                    configs: Some(Vec::new()),
                },
            },
            config_dirty: false,
        };
        active.append(sample);
        active
    }

    /// Rebuild the active form of a persisted path
    pub fn from_path(pointer: PointerId, mut path: Path) -> Self {
        let config_dirty = path.data.configs.is_some();
        if !config_dirty {
            path.data.configs = Some(vec![path.config.clone(); path.len()]);
        }
        Self {
            pointer,
            path,
            config_dirty,
        }
    }

    /// Append one sample
    pub fn append(&mut self, sample: Sample) {
        if sample.config != self.path.config {
            self.config_dirty = true;
        }

        let data = &mut self.path.data;
        data.xs.push(sample.x);
        data.ys.push(sample.y);
        if let Some(pressure) = data.pressure.as_mut() {
            pressure.forces.push(sample.force);
            pressure.tilts.push(sample.tilt);
        }
        if let Some(configs) = data.configs.as_mut() {
            configs.push(sample.config);
        }
    }

    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    /// The in-progress path, including per-sample configs
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn initial_config(&self) -> &PenConfig {
        &self.path.config
    }

    /// A sample carried a configuration other than the initial one
    pub fn is_config_dirty(&self) -> bool {
        self.config_dirty
    }

    pub fn is_pressure_tracked(&self) -> bool {
        self.path.is_pressure_tracked()
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Finalize into the persisted representation
    pub fn compress(self) -> Path {
        compress(self)
    }
}

/// Finalize an active path.
///
/// Per-sample configs are dropped unless the configuration changed
/// mid-stroke.
pub fn compress(active: ActivePath) -> Path {
    let ActivePath {
        mut path,
        config_dirty,
        ..
    } = active;
    if !config_dirty {
        path.data.configs = None;
    }
    path
}

/// Active paths keyed by pointer
#[derive(Debug, Default)]
pub struct ActivePaths {
    paths: BTreeMap<PointerId, ActivePath>,
}

impl ActivePaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a path for `pointer`.
    ///
    /// Returns the in-progress path this one replaced, if the pointer
    /// already had one.
    pub fn start(&mut self, pointer: PointerId, sample: Sample) -> Option<ActivePath> {
        let replaced = self
            .paths
            .insert(pointer, ActivePath::start(pointer, sample));
        if replaced.is_some() {
            debug!("start: pointer {} already active, discarding its path", pointer);
        }
        replaced
    }

    /// Append a sample to `pointer`'s path.
    ///
    /// Returns false (and does nothing) when the pointer has no active path.
    pub fn append(&mut self, pointer: PointerId, sample: Sample) -> bool {
        match self.paths.get_mut(&pointer) {
            Some(path) => {
                path.append(sample);
                true
            }
            None => {
                debug!("append: no active path for pointer {}, ignoring", pointer);
                false
            }
        }
    }

    /// Remove `pointer`'s path and compress it
    pub fn complete(&mut self, pointer: PointerId) -> Option<Path> {
        match self.paths.remove(&pointer) {
            Some(active) => Some(active.compress()),
            None => {
                debug!("complete: no active path for pointer {}, ignoring", pointer);
                None
            }
        }
    }

    pub fn get(&self, pointer: PointerId) -> Option<&ActivePath> {
        self.paths.get(&pointer)
    }

    pub fn contains(&self, pointer: PointerId) -> bool {
        self.paths.contains_key(&pointer)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActivePath> {
        self.paths.values()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Drop every in-progress path
    pub fn clear(&mut self) {
        self.paths.clear();
    }
}

use thiserror::Error;

use crate::types::Path;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Path has {xs} x samples but {ys} y samples")]
    CoordinateMismatch { xs: usize, ys: usize },
    #[error("Path has {samples} samples but {forces} forces and {tilts} tilts")]
    PressureMismatch {
        samples: usize,
        forces: usize,
        tilts: usize,
    },
    #[error("Path has {samples} samples but {configs} configs")]
    ConfigMismatch { samples: usize, configs: usize },
    #[error("Path has no samples")]
    Empty,
    #[error("Non-finite coordinate at sample {0}")]
    NonFinite(usize),
}

/// Check that every per-sample sequence of `path` has the same length.
///
/// Paths captured by a board always pass; this guards data handed in by
/// the host.
pub fn validate_path(path: &Path) -> Result<(), ValidationError> {
    let data = &path.data;
    let samples = data.xs.len();

    if data.ys.len() != samples {
        return Err(ValidationError::CoordinateMismatch {
            xs: samples,
            ys: data.ys.len(),
        });
    }
    if samples == 0 {
        return Err(ValidationError::Empty);
    }
    if let Some(pressure) = &data.pressure {
        if pressure.forces.len() != samples || pressure.tilts.len() != samples {
            return Err(ValidationError::PressureMismatch {
                samples,
                forces: pressure.forces.len(),
                tilts: pressure.tilts.len(),
            });
        }
    }
    if let Some(configs) = &data.configs {
        if configs.len() != samples {
            return Err(ValidationError::ConfigMismatch {
                samples,
                configs: configs.len(),
            });
        }
    }
    if let Some(index) = path
        .points()
        .position(|(x, y)| !x.is_finite() || !y.is_finite())
    {
        return Err(ValidationError::NonFinite(index));
    }

    Ok(())
}

/// Validate a whole stack, reporting the index of the first bad path
pub fn validate_paths(paths: &[Path]) -> Result<(), (usize, ValidationError)> {
    for (index, path) in paths.iter().enumerate() {
        validate_path(path).map_err(|e| (index, e))?;
    }
    Ok(())
}

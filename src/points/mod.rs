//! Point clouds: loading from disk, normalization, and demo generation.

mod pcd;
mod xyz;

use std::path::Path;

use glam::Vec3;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{error::SpriteError, sprite::PointInstance};

/// A set of world-space points to draw as sprites.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    /// Point positions.
    pub points: Vec<Vec3>,
}

impl PointCloud {
    /// Wrap an existing set of positions.
    #[must_use]
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    /// Load a cloud from disk, choosing the parser by file extension:
    /// `.pcd` for ASCII or binary PCD, `.xyz`/`.txt` for whitespace-separated
    /// columns.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::Io`] if the file cannot be read and
    /// [`SpriteError::PointLoad`] for unknown extensions or malformed
    /// contents.
    pub fn load(path: &Path) -> Result<Self, SpriteError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let points = match extension.as_deref() {
            Some("pcd") => pcd::parse(&std::fs::read(path)?)?,
            Some("xyz" | "txt") => {
                xyz::parse(&std::fs::read_to_string(path)?)?
            }
            _ => {
                return Err(SpriteError::PointLoad(format!(
                    "unsupported point file '{}'",
                    path.display()
                )))
            }
        };

        if points.is_empty() {
            log::warn!("{} contains no points", path.display());
        } else {
            log::info!("loaded {} points from {}", points.len(), path.display());
        }
        Ok(Self { points })
    }

    /// `count` points uniformly distributed in the unit cube, reproducible
    /// for a given `seed`.
    #[must_use]
    pub fn random_cube(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let points = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.random_range(0.0..1.0),
                    rng.random_range(0.0..1.0),
                    rng.random_range(0.0..1.0),
                )
            })
            .collect();
        Self { points }
    }

    /// Scale every coordinate by the largest coordinate value in the cloud,
    /// so positive data lands in the unit cube. Clouds whose largest
    /// coordinate is not positive are returned unchanged.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let max = self
            .points
            .iter()
            .map(|p| p.max_element())
            .fold(f32::NEG_INFINITY, f32::max);

        if !(max > 0.0 && max.is_finite()) {
            if !self.is_empty() {
                log::warn!("cloud not normalized: largest coordinate is {max}");
            }
            return self.clone();
        }
        Self {
            points: self.points.iter().map(|&p| p / max).collect(),
        }
    }

    /// GPU instance data, one entry per point.
    #[must_use]
    pub fn to_instances(&self) -> Vec<PointInstance> {
        self.points.iter().map(|&p| PointInstance::from(p)).collect()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the cloud has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

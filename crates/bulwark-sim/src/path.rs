//! Path model: the polyline enemies walk from spawn to base.
//!
//! Traversal is parameterised by arc length, so a fraction of 0.5 is always
//! halfway along the route regardless of segment lengths.

use glam::Vec2;

use bulwark_core::constants::{PATH_INSET_X, PATH_INSET_Y};
use bulwark_core::types::GameArea;

use crate::config::ConfigError;

/// Immutable polyline with precomputed cumulative segment lengths.
#[derive(Debug, Clone)]
pub struct Path {
    waypoints: Vec<Vec2>,
    /// `cumulative[i]` is the distance from the start to `waypoints[i]`.
    cumulative: Vec<f32>,
}

/// Rectangular loop inset from the game area edges.
pub fn default_waypoints(area: &GameArea) -> Vec<Vec2> {
    let left = area.x + PATH_INSET_X;
    let right = area.x + area.width - PATH_INSET_X;
    let top = area.y + PATH_INSET_Y;
    let bottom = area.bottom() - PATH_INSET_Y;
    vec![
        Vec2::new(left, top),
        Vec2::new(right, top),
        Vec2::new(right, bottom),
        Vec2::new(left, bottom),
    ]
}

impl Path {
    pub fn new(waypoints: Vec<Vec2>) -> Result<Self, ConfigError> {
        if waypoints.len() < 2 {
            return Err(ConfigError::PathTooShort(waypoints.len()));
        }
        let mut cumulative = Vec::with_capacity(waypoints.len());
        let mut total = 0.0;
        cumulative.push(0.0);
        for pair in waypoints.windows(2) {
            total += pair[0].distance(pair[1]);
            cumulative.push(total);
        }
        Ok(Self {
            waypoints,
            cumulative,
        })
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn total_length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn start_point(&self) -> Vec2 {
        self.waypoints[0]
    }

    pub fn end_point(&self) -> Vec2 {
        self.waypoints[self.waypoints.len() - 1]
    }

    /// Point at `fraction` of the total length. Clamped to `[0, 1]`.
    pub fn point_at_fraction(&self, fraction: f32) -> Vec2 {
        let total = self.total_length();
        if total <= 0.0 {
            return self.start_point();
        }
        let target = fraction.clamp(0.0, 1.0) * total;

        // First waypoint at or beyond the target distance.
        let end = self
            .cumulative
            .partition_point(|&d| d < target)
            .clamp(1, self.waypoints.len() - 1);
        let start = end - 1;

        let seg_len = self.cumulative[end] - self.cumulative[start];
        if seg_len <= 0.0 {
            return self.waypoints[end];
        }
        let t = (target - self.cumulative[start]) / seg_len;
        self.waypoints[start].lerp(self.waypoints[end], t)
    }
}

//! Fixed lane table for the racer
//!
//! Lanes are evenly spaced across a road centred in the playfield. The player
//! and every vehicle always sit exactly on one of these x-coordinates.

use serde::{Deserialize, Serialize};

use crate::settings::RacerTuning;

/// Lane centre x-coordinates plus the road limits the player may not cross
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lanes {
    xs: Vec<f32>,
    lane_width: f32,
    /// Player centre limits (road edges inset by the margin)
    min_x: f32,
    max_x: f32,
}

impl Lanes {
    pub fn new(center: f32, road_width: f32, count: usize, margin: f32) -> Self {
        debug_assert!(count > 0, "lane table cannot be empty");
        let lane_width = road_width / count as f32;
        let mid = (count as f32 - 1.0) / 2.0;
        let xs = (0..count)
            .map(|i| center + (i as f32 - mid) * lane_width)
            .collect();

        Self {
            xs,
            lane_width,
            min_x: center - road_width / 2.0 + margin,
            max_x: center + road_width / 2.0 - margin,
        }
    }

    pub fn from_tuning(tuning: &RacerTuning) -> Self {
        Self::new(
            tuning.width / 2.0,
            tuning.road_width,
            tuning.lane_count,
            tuning.road_margin,
        )
    }

    /// Number of lanes
    #[inline]
    pub fn count(&self) -> usize {
        self.xs.len()
    }

    pub fn xs(&self) -> &[f32] {
        &self.xs
    }

    /// Centre x of `lane`
    pub fn x(&self, lane: usize) -> f32 {
        debug_assert!(lane < self.xs.len(), "lane {lane} out of range");
        self.xs[lane]
    }

    /// Index of the lane nearest to `x` (ties go to the first lane scanned)
    pub fn nearest(&self, x: f32) -> usize {
        let mut best = 0;
        let mut best_dist = (x - self.xs[0]).abs();
        for (i, &lane_x) in self.xs.iter().enumerate().skip(1) {
            let dist = (x - lane_x).abs();
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        best
    }

    /// Snap `x` onto the nearest lane centre
    pub fn snap(&self, x: f32) -> f32 {
        self.xs[self.nearest(x)]
    }

    /// Move one lane-width in `direction` (-1 left, +1 right) if the road allows,
    /// then clamp to the road and snap to a lane.
    pub fn step(&self, x: f32, direction: i32) -> f32 {
        let mut next = x;
        if direction < 0 && x > self.min_x {
            next -= self.lane_width;
        } else if direction > 0 && x < self.max_x {
            next += self.lane_width;
        }
        self.snap(next.clamp(self.min_x, self.max_x))
    }

    pub fn leftmost(&self) -> f32 {
        self.xs[0]
    }

    pub fn rightmost(&self) -> f32 {
        self.xs[self.xs.len() - 1]
    }
}

//! Bounded motion-trail history.
//!
//! Each flake may carry a short history of past positions for the renderer
//! to draw as a trail. The history is a fixed-capacity ring: once full, the
//! oldest point is dropped for every new one.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Trail recording settings.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrailConfig {
    /// Record positions after every sub-step.
    pub enabled: bool,
    /// Maximum points per flake.
    pub capacity: usize,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            capacity: 32,
        }
    }
}

/// Position history of one flake, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trail {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl Trail {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a point, evicting the oldest when full.
    pub fn push(&mut self, point: Vec2) {
        if self.capacity == 0 {
            return;
        }
        while self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Change the capacity, dropping the oldest points if it shrank.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.points.len() > capacity {
            self.points.pop_front();
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Points from oldest to newest.
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().copied()
    }

    /// Most recent point.
    pub fn latest(&self) -> Option<Vec2> {
        self.points.back().copied()
    }
}

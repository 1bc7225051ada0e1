// Copyright 2026 cadence developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A fixed-capacity circular sample buffer producing the mean of the most
/// recent samples.
///
/// Each loop owns two independent instances (FPS and TPS); the buffer is
/// mutated only by the loop that owns it. `add_point` and `average` never
/// fail and never block.
#[derive(Debug, Clone)]
pub struct RollingAverage {
    samples: Vec<f64>,
    capacity: usize,
    // Index of the slot the next sample overwrites once the buffer is full.
    next: usize,
}

impl RollingAverage {
    /// Creates an empty buffer holding up to `capacity` samples.
    /// Capacity is fixed for the lifetime of the instance.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
            next: 0,
        }
    }

    /// Appends a sample, evicting the oldest once at capacity.
    pub fn add_point(&mut self, value: f64) {
        if self.samples.len() < self.capacity {
            self.samples.push(value);
        } else {
            self.samples[self.next] = value;
            self.next = (self.next + 1) % self.capacity;
        }
    }

    /// Returns the arithmetic mean of the currently held samples, or `0.0`
    /// when no samples have been added yet.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Number of samples currently held (at most the capacity).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True until the first sample is added.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The fixed capacity chosen at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_buffer_averages_to_zero() {
        let avg = RollingAverage::new(100);
        assert_eq!(avg.average(), 0.0);
        assert!(avg.is_empty());
        assert_eq!(avg.len(), 0);
        assert_eq!(avg.capacity(), 100);
    }

    #[test]
    fn partial_buffer_averages_held_samples_only() {
        let mut avg = RollingAverage::new(10);
        avg.add_point(2.0);
        avg.add_point(4.0);
        avg.add_point(6.0);
        assert_relative_eq!(avg.average(), 4.0);
        assert_eq!(avg.len(), 3);
    }

    #[test]
    fn full_buffer_keeps_only_the_most_recent_window() {
        // 150 increasing samples into a 100-slot buffer: the window is
        // samples 51..=150, whose mean is 100.5.
        let mut avg = RollingAverage::new(100);
        for i in 1..=150 {
            avg.add_point(i as f64);
        }
        assert_eq!(avg.len(), 100);
        assert_relative_eq!(avg.average(), 100.5);
    }

    #[test]
    fn eviction_wraps_past_the_capacity_boundary() {
        let mut avg = RollingAverage::new(3);
        for v in [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0] {
            avg.add_point(v);
        }
        // Held window is {5, 6, 7}.
        assert_relative_eq!(avg.average(), 6.0);
        assert_eq!(avg.len(), 3);
    }
}

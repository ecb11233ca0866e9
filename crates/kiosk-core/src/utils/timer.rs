// Copyright 2025 eraflo
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

//! Monotonic wall-clock measurement for time-budgeted slices.

use std::time::{Duration, Instant};

/// A started-on-creation stopwatch backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started_at: Instant,
}

impl Stopwatch {
    /// Creates a new stopwatch, already running.
    #[inline]
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    /// Returns the time elapsed since the stopwatch was started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Returns `true` once strictly more than `limit` has elapsed.
    #[inline]
    pub fn has_exceeded(&self, limit: Duration) -> bool {
        self.elapsed() > limit
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

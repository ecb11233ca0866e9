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

//! A recycling pool for objects that are expensive to construct.
//!
//! A [`ResourcePool`] front-loads construction at a controlled moment (level
//! load, shop opening) and then hands the same instances out again and again.
//! It never inspects the values it holds. Its only knowledge is whether an
//! instance is checked out or in stock, plus an activation hook called with
//! `true` when an instance leaves the pool and `false` when it comes back.
//!
//! # Preconditions
//!
//! The pool has no notion of instance identity. Releasing an instance that
//! came from another pool, or releasing the same instance twice, silently adds
//! it to stock again. Releases beyond the number of outstanding instances are
//! logged as a warning but still accepted.

use kiosk_core::PoolError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Capability interface for values that know how to switch themselves on and off.
///
/// This is the alternative to passing an activation closure to
/// [`ResourcePool::new`]; see [`ResourcePool::with_poolable`].
pub trait Poolable {
    /// Called with `true` when checked out and `false` when returned.
    fn set_active(&mut self, active: bool);
}

/// Construction-time configuration of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    /// Instances built eagerly when the pool is created.
    pub initial_population: usize,
    /// Whether the pool may construct new instances when stock runs out.
    pub dynamic: bool,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            initial_population: 5,
            dynamic: true,
        }
    }
}

/// A point-in-time view of a pool's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Instances currently in stock.
    pub available: usize,
    /// Instances currently checked out.
    pub in_use: usize,
    /// Instances ever built by the factory.
    pub created: u64,
    /// Successful `acquire` calls.
    pub acquisitions: u64,
    /// `release` calls.
    pub releases: u64,
}

type Factory<T> = Box<dyn FnMut() -> T>;
type ActivationHook<T> = Box<dyn FnMut(&mut T, bool)>;

/// Owns a recyclable set of `T` instances.
pub struct ResourcePool<T> {
    label: String,
    factory: Factory<T>,
    on_toggle: ActivationHook<T>,
    stock: Vec<T>,
    dynamic: bool,
    in_use: usize,
    created: u64,
    acquisitions: u64,
    releases: u64,
}

impl<T> ResourcePool<T> {
    /// Creates a pool and eagerly builds `settings.initial_population`
    /// instances, each deactivated before it enters stock.
    pub fn new(
        label: impl Into<String>,
        factory: impl FnMut() -> T + 'static,
        on_toggle: impl FnMut(&mut T, bool) + 'static,
        settings: PoolSettings,
    ) -> Self {
        let mut pool = Self {
            label: label.into(),
            factory: Box::new(factory),
            on_toggle: Box::new(on_toggle),
            stock: Vec::with_capacity(settings.initial_population),
            dynamic: settings.dynamic,
            in_use: 0,
            created: 0,
            acquisitions: 0,
            releases: 0,
        };
        pool.prewarm(settings.initial_population);
        log::debug!(
            "ResourcePool '{}': seeded with {} instance(s) (dynamic={})",
            pool.label,
            pool.stock.len(),
            pool.dynamic,
        );
        pool
    }

    /// Builds `count` additional instances straight into stock.
    pub fn prewarm(&mut self, count: usize) {
        self.stock.reserve(count);
        for _ in 0..count {
            let mut item = self.construct();
            (self.on_toggle)(&mut item, false);
            self.stock.push(item);
        }
    }

    /// Checks out an instance.
    ///
    /// The most recently released instance is handed out first. With an empty
    /// stock a dynamic pool builds a new instance; a fixed pool fails with
    /// [`PoolError::Exhausted`].
    pub fn acquire(&mut self) -> Result<T, PoolError> {
        let mut item = match self.stock.pop() {
            Some(item) => item,
            None if self.dynamic => {
                log::trace!("ResourcePool '{}': stock empty, growing", self.label);
                self.construct()
            }
            None => {
                return Err(PoolError::Exhausted {
                    label: self.label.clone(),
                    in_use: self.in_use,
                })
            }
        };

        (self.on_toggle)(&mut item, true);
        self.in_use += 1;
        self.acquisitions += 1;
        Ok(item)
    }

    /// Deactivates `item` and returns it to stock.
    ///
    /// `item` must have been acquired from this pool and not released since.
    pub fn release(&mut self, mut item: T) {
        (self.on_toggle)(&mut item, false);
        if self.in_use == 0 {
            log::warn!(
                "ResourcePool '{}': release with no instance checked out (foreign or double release?)",
                self.label,
            );
        }
        self.in_use = self.in_use.saturating_sub(1);
        self.releases += 1;
        self.stock.push(item);
    }

    /// Instances currently in stock.
    pub fn available(&self) -> usize {
        self.stock.len()
    }

    /// Instances currently checked out.
    pub fn in_use(&self) -> usize {
        self.in_use
    }

    /// Whether the pool grows on demand.
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// The label used in logs and errors.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns a snapshot of the pool's counters.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            available: self.stock.len(),
            in_use: self.in_use,
            created: self.created,
            acquisitions: self.acquisitions,
            releases: self.releases,
        }
    }

    fn construct(&mut self) -> T {
        self.created += 1;
        (self.factory)()
    }
}

impl<T: Poolable + 'static> ResourcePool<T> {
    /// Creates a pool whose activation hook is [`Poolable::set_active`].
    pub fn with_poolable(
        label: impl Into<String>,
        factory: impl FnMut() -> T + 'static,
        settings: PoolSettings,
    ) -> Self {
        Self::new(label, factory, |item: &mut T, active| item.set_active(active), settings)
    }
}

impl<T> fmt::Debug for ResourcePool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourcePool")
            .field("label", &self.label)
            .field("dynamic", &self.dynamic)
            .field("stats", &self.stats())
            .finish()
    }
}

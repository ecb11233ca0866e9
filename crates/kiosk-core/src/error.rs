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

//! Error types shared across the workspace.

use thiserror::Error;

/// Failure to hand out a pooled instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// Every instance is checked out and the pool may not grow.
    #[error("pool '{label}' exhausted: {in_use} instance(s) checked out and growth is disabled")]
    Exhausted {
        /// The pool's log label.
        label: String,
        /// How many instances were checked out when the request failed.
        in_use: usize,
    },
}

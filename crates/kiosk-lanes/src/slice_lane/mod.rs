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

//! Slice lanes: bounded units of work that resume on the next tick.
//!
//! Neither lane relies on coroutine suspension. The state needed to resume
//! (the remaining queue, the scan cursor) lives in the lane object, and each
//! call returns as soon as its budget is spent, reporting whether more work is
//! pending. Cancelling is simply not calling again; nothing is left half-done.

mod processor;
mod scanner;

pub use processor::{process_slice, BudgetedQueueProcessor, SliceOutcome, SliceProgress};
pub use scanner::{EarlyExitScanner, ScanStatus};

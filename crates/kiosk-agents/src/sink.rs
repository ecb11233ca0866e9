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

//! Non-blocking delivery of [`ShopEvent`]s to an optional consumer.

use crossbeam_channel::Sender;
use kiosk_core::ShopEvent;

/// Where an agent publishes its events. Detached sinks discard everything.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    sender: Option<Sender<ShopEvent>>,
}

impl EventSink {
    /// A sink publishing into `sender`.
    pub fn new(sender: Sender<ShopEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// Publishes `event` without blocking. Full or disconnected channels drop it.
    pub fn emit(&self, event: ShopEvent) {
        if let Some(sender) = &self.sender {
            if let Err(err) = sender.try_send(event) {
                log::trace!("EventSink: dropping event ({err})");
            }
        }
    }
}

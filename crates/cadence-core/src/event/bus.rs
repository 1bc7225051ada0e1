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

/// A generic, thread-safe event channel.
///
/// Payloads are moved, not broadcast, so `T` needs no `Clone` bound. The
/// owner of the bus holds the receiving end; any number of senders may be
/// handed out to worker threads.
#[derive(Debug)]
pub struct EventBus<T: Send + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Send + 'static> EventBus<T> {
    /// Creates a new bus backed by an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Sends an event, logging if the receiver is gone instead of failing.
    pub fn publish(&self, event: T) {
        if self.sender.send(event).is_err() {
            log::error!("Failed to publish event: receiver disconnected.");
        }
    }

    /// Returns a clone of the sender end for other parts of the system.
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// Takes the next pending event, if any. Never blocks.
    pub fn try_next(&self) -> Option<T> {
        self.receiver.try_recv().ok()
    }

    /// Drains every pending event. Never blocks.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }
}

impl<T: Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[derive(Debug, PartialEq)]
    enum TestFault {
        Backend(String),
        RenderFailure,
    }

    #[test]
    fn empty_bus_yields_nothing() {
        let bus = EventBus::<TestFault>::new();
        assert!(bus.try_next().is_none());
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn publish_then_take_single_event() {
        let bus = EventBus::new();
        bus.publish(TestFault::RenderFailure);
        assert_eq!(bus.try_next(), Some(TestFault::RenderFailure));
        assert!(bus.try_next().is_none());
    }

    #[test]
    fn drain_preserves_publish_order() {
        let bus = EventBus::new();
        bus.publish(TestFault::Backend("first".to_string()));
        bus.publish(TestFault::RenderFailure);
        let drained = bus.drain();
        assert_eq!(
            drained,
            vec![TestFault::Backend("first".to_string()), TestFault::RenderFailure]
        );
    }

    #[test]
    fn sender_crosses_thread_boundary() {
        let bus = EventBus::new();
        let sender = bus.sender();
        let handle = thread::spawn(move || {
            sender
                .send(TestFault::Backend("from worker".to_string()))
                .expect("send should succeed while the bus is alive");
        });
        handle.join().expect("worker thread should not panic");

        // The event is already delivered once the sender thread joined.
        thread::sleep(Duration::from_millis(1));
        assert_eq!(
            bus.try_next(),
            Some(TestFault::Backend("from worker".to_string()))
        );
    }
}

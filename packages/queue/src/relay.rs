//! Fan-out and fan-in compositions of queues.
//!
//! Each composition starts background relays on a [`Group`]. A relay drains
//! its input until the input is closed and empty, then closes what it feeds.
//! A relay never closes its input. The outputs are closed from a drop guard,
//! so a relay that panics still wakes the consumers of its outputs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use crate::error::{Error, Result};
use crate::group::Group;
use crate::queue::Queue;

impl<T: Clone + Send + 'static> Queue<T> {
    /// Duplicate every value of `input` into `count` new output queues.
    ///
    /// The outputs share the input's capacity. A value reaches every output
    /// before the next one is read, so a slow consumer holds back the rest.
    ///
    /// # Example
    ///
    /// ```rust
    /// use componentry_queue::{Group, Queue};
    ///
    /// let group = Group::new();
    /// let input = Queue::from_values(["a", "b"]);
    /// input.close().unwrap();
    ///
    /// let outputs = Queue::fork(&group, &input, 2).unwrap();
    /// group.wait().unwrap();
    /// for output in &outputs {
    ///     assert_eq!(output.values(), ["a", "b"]);
    ///     assert!(output.is_closed());
    /// }
    /// ```
    pub fn fork(group: &Group, input: &Queue<T>, count: usize) -> Result<Vec<Queue<T>>> {
        if count < 2 {
            return Err(Error::invalid_argument(format!(
                "fork requires at least two outputs, got {count}"
            )));
        }
        let outputs = fan_out(input.capacity(), count)?;
        let input = input.clone();
        let targets = outputs.clone();
        group.spawn("componentry-fork", move || {
            let targets = CloseOnDrop::new(targets, "fork");
            tracing::debug!(outputs = targets.queues.len(), "fork relay started");
            let mut forwarded = 0usize;
            while let Some(value) = input.remove_first() {
                if let Some((last, rest)) = targets.queues.split_last() {
                    for output in rest {
                        deliver(output, value.clone(), "fork");
                    }
                    deliver(last, value, "fork");
                }
                forwarded += 1;
            }
            tracing::debug!(forwarded, "fork relay finished");
        })?;
        Ok(outputs)
    }
}

impl<T: Send + 'static> Queue<T> {
    /// Distribute the values of `input` round-robin across `count` new
    /// output queues, so that each value lands in exactly one output.
    ///
    /// When the next output in turn has been closed by its consumer the
    /// value goes to the following open one.
    pub fn split(group: &Group, input: &Queue<T>, count: usize) -> Result<Vec<Queue<T>>> {
        if count < 2 {
            return Err(Error::invalid_argument(format!(
                "split requires at least two outputs, got {count}"
            )));
        }
        let outputs = fan_out(input.capacity(), count)?;
        let input = input.clone();
        let targets = outputs.clone();
        group.spawn("componentry-split", move || {
            let targets = CloseOnDrop::new(targets, "split");
            let queues = &targets.queues;
            tracing::debug!(outputs = queues.len(), "split relay started");
            let mut next = 0usize;
            let mut forwarded = 0usize;
            'values: while let Some(mut value) = input.remove_first() {
                for _ in 0..queues.len() {
                    let output = &queues[next];
                    next = (next + 1) % queues.len();
                    match output.push(value) {
                        Ok(()) => {
                            forwarded += 1;
                            continue 'values;
                        }
                        Err(rejected) => value = rejected,
                    }
                }
                tracing::warn!(relay = "split", "every output is closed, dropping value");
            }
            tracing::debug!(forwarded, "split relay finished");
        })?;
        Ok(outputs)
    }

    /// Merge the values of every input into one new output queue.
    ///
    /// Values from one input keep their relative order; values from
    /// different inputs interleave arbitrarily. The output takes the first
    /// input's capacity and is closed once every input has been closed and
    /// drained.
    pub fn join(group: &Group, inputs: &[Queue<T>]) -> Result<Queue<T>> {
        let Some(first) = inputs.first() else {
            return Err(Error::invalid_argument("join requires at least one input"));
        };
        let output = Queue::with_capacity(first.capacity())?;
        let remaining = Arc::new(AtomicUsize::new(inputs.len()));
        for (index, input) in inputs.iter().enumerate() {
            let relay_input = input.clone();
            let relay_output = output.clone();
            let relay_remaining = Arc::clone(&remaining);
            let spawned = group.spawn(format!("componentry-join-{index}"), move || {
                let countdown = Countdown {
                    output: relay_output,
                    remaining: relay_remaining,
                };
                tracing::debug!(input = index, "join relay started");
                let mut forwarded = 0usize;
                while let Some(value) = relay_input.remove_first() {
                    deliver(&countdown.output, value, "join");
                    forwarded += 1;
                }
                tracing::debug!(input = index, forwarded, "join relay finished");
            });
            if let Err(error) = spawned {
                // Relays that never started still count toward closing the output.
                let unstarted = inputs.len() - index;
                if remaining.fetch_sub(unstarted, Ordering::AcqRel) == unstarted {
                    close_all(std::slice::from_ref(&output), "join");
                }
                return Err(error);
            }
        }
        Ok(output)
    }
}

/// Closes a relay's outputs when the relay ends, normally or by panic.
struct CloseOnDrop<T> {
    queues: Vec<Queue<T>>,
    relay: &'static str,
}

impl<T> CloseOnDrop<T> {
    fn new(queues: Vec<Queue<T>>, relay: &'static str) -> Self {
        Self { queues, relay }
    }
}

impl<T> Drop for CloseOnDrop<T> {
    fn drop(&mut self) {
        if thread::panicking() {
            tracing::warn!(relay = self.relay, "relay panicked, closing its outputs");
        }
        close_all(&self.queues, self.relay);
    }
}

/// One join relay's share of the output; the last one to finish closes it.
struct Countdown<T> {
    output: Queue<T>,
    remaining: Arc<AtomicUsize>,
}

impl<T> Drop for Countdown<T> {
    fn drop(&mut self) {
        if thread::panicking() {
            tracing::warn!(relay = "join", "relay panicked, releasing the output");
        }
        if self.remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
            close_all(std::slice::from_ref(&self.output), "join");
        }
    }
}

fn fan_out<T>(capacity: usize, count: usize) -> Result<Vec<Queue<T>>> {
    (0..count).map(|_| Queue::with_capacity(capacity)).collect()
}

fn deliver<T>(output: &Queue<T>, value: T, relay: &'static str) {
    if output.push(value).is_err() {
        tracing::warn!(relay, "output queue is closed, dropping value");
    }
}

fn close_all<T>(outputs: &[Queue<T>], relay: &'static str) {
    for output in outputs {
        if output.close().is_err() {
            tracing::debug!(relay, "output queue was already closed");
        }
    }
}

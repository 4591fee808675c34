//! Change notifications
//!
//! Observers registered on a [`Histogram`](crate::Histogram) hear about
//! changes to its value table and shape. While notifications are frozen
//! they are queued and coalesced; thawing delivers each kind once, in
//! [`HistogramEvent`] order.

use std::fmt;
use std::sync::Arc;

/// Kind of change to a histogram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HistogramEvent {
    /// The channel count changed
    NChannels,
    /// The bin count changed
    NBins,
    /// The value table was refilled or released
    Values,
}

/// Receiver of histogram change notifications
pub trait HistogramObserver: Send + Sync {
    /// Called once per delivered event.
    fn notify(&self, event: HistogramEvent);
}

impl<F> HistogramObserver for F
where
    F: Fn(HistogramEvent) + Send + Sync,
{
    fn notify(&self, event: HistogramEvent) {
        self(event)
    }
}

/// Observer list with freeze/thaw coalescing
#[derive(Default)]
pub(crate) struct Notifier {
    observers: Vec<Arc<dyn HistogramObserver>>,
    freeze_count: u32,
    pending: Vec<HistogramEvent>,
}

impl Notifier {
    pub(crate) fn connect(&mut self, observer: Arc<dyn HistogramObserver>) {
        self.observers.push(observer);
    }

    pub(crate) fn n_observers(&self) -> usize {
        self.observers.len()
    }

    pub(crate) fn notify(&mut self, event: HistogramEvent) {
        if self.freeze_count > 0 {
            if !self.pending.contains(&event) {
                self.pending.push(event);
            }
        } else {
            self.dispatch(event);
        }
    }

    pub(crate) fn freeze(&mut self) {
        self.freeze_count += 1;
    }

    pub(crate) fn thaw(&mut self) {
        self.freeze_count = self.freeze_count.saturating_sub(1);
        if self.freeze_count > 0 {
            return;
        }

        let mut pending = std::mem::take(&mut self.pending);
        pending.sort_unstable();
        for event in pending {
            self.dispatch(event);
        }
    }

    fn dispatch(&self, event: HistogramEvent) {
        for observer in &self.observers {
            observer.notify(event);
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("observers", &self.observers.len())
            .field("freeze_count", &self.freeze_count)
            .field("pending", &self.pending)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording() -> (Arc<Mutex<Vec<HistogramEvent>>>, Notifier) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let mut notifier = Notifier::default();
        notifier.connect(Arc::new(move |event: HistogramEvent| {
            sink.lock().unwrap().push(event)
        }));
        (log, notifier)
    }

    #[test]
    fn test_immediate_dispatch() {
        let (log, mut notifier) = recording();
        notifier.notify(HistogramEvent::Values);
        notifier.notify(HistogramEvent::Values);
        assert_eq!(
            *log.lock().unwrap(),
            vec![HistogramEvent::Values, HistogramEvent::Values]
        );
    }

    #[test]
    fn test_frozen_coalescing() {
        let (log, mut notifier) = recording();
        notifier.freeze();
        notifier.notify(HistogramEvent::Values);
        notifier.notify(HistogramEvent::NBins);
        notifier.notify(HistogramEvent::Values);
        notifier.notify(HistogramEvent::NChannels);
        assert!(log.lock().unwrap().is_empty());

        notifier.thaw();
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                HistogramEvent::NChannels,
                HistogramEvent::NBins,
                HistogramEvent::Values
            ]
        );
    }

    #[test]
    fn test_nested_freeze() {
        let (log, mut notifier) = recording();
        notifier.freeze();
        notifier.freeze();
        notifier.notify(HistogramEvent::Values);
        notifier.thaw();
        assert!(log.lock().unwrap().is_empty());
        notifier.thaw();
        assert_eq!(log.lock().unwrap().len(), 1);
    }
}

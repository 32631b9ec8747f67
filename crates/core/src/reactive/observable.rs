use crossbeam_channel::{Receiver, Sender};

/// Handle returned by [`Observable::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer<T> = Box<dyn FnMut(&T) + Send>;

/// A value whose setter notifies registered observers synchronously.
///
/// Callback observers run in registration order on the caller's thread,
/// before `set` returns. Channel watchers receive a clone of each new value;
/// watchers whose receiver has been dropped are pruned on the next `set`.
pub struct Observable<T: Clone> {
    value: T,
    observers: Vec<(ObserverId, Observer<T>)>,
    watchers: Vec<Sender<T>>,
    next_id: u64,
}

impl<T: Clone> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            observers: Vec::new(),
            watchers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value, then notifies every observer and watcher.
    pub fn set(&mut self, value: T) {
        self.value = value;
        for (_, observer) in &mut self.observers {
            observer(&self.value);
        }
        let value = &self.value;
        self.watchers.retain(|tx| tx.send(value.clone()).is_ok());
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&T) + Send + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Returns a channel that receives every value set from now on.
    pub fn watch(&mut self) -> Receiver<T> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.watchers.push(tx);
        rx
    }

    /// Number of callback observers plus registered watchers (dropped
    /// receivers are pruned on the next `set`).
    pub fn observer_count(&self) -> usize {
        self.observers.len() + self.watchers.len()
    }
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("observers", &self.observers.len())
            .field("watchers", &self.watchers.len())
            .finish()
    }
}

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<T> = Box<dyn FnMut(&T)>;

struct Entry<T> {
    id: u64,
    topic: Option<String>,
    callback: Callback<T>,
}

struct Registry<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

/// Listeners for one kind of change notification, optionally keyed by topic.
pub struct Subscribers<T> {
    inner: Rc<RefCell<Registry<T>>>,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }
}

impl<T: 'static> Subscribers<T> {
    /// `topic: None` receives every notification.
    pub fn subscribe(
        &self,
        topic: Option<&str>,
        callback: impl FnMut(&T) + 'static,
    ) -> Subscription {
        let id = {
            let mut registry = self.inner.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push(Entry {
                id,
                topic: topic.map(str::to_string),
                callback: Box::new(callback),
            });
            id
        };

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().entries.retain(|e| e.id != id);
            }
        })
    }

    pub fn notify(&self, topic: &str, value: &T) {
        let mut registry = self.inner.borrow_mut();
        for entry in registry.entries.iter_mut() {
            if entry.topic.as_deref().is_none_or(|t| t == topic) {
                (entry.callback)(value);
            }
        }
    }

}

/// Live registration. Dropping it unregisters the callback.
#[must_use = "dropping a Subscription immediately cancels it"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

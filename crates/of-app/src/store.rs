//! Owner of the live filter specification.
//!
//! Single-threaded by construction: every edit runs to completion and all
//! observers have been notified before `dispatch` returns. Observers that
//! fire network queries own their own debouncing.

use crate::error::AppResult;
use of_spec::{EditPolicy, FilterEdit, FilterSpec, Transition, apply};
use std::fmt;
use tracing::{debug, warn};

/// Collaborator reacting to specification changes.
pub trait FilterObserver {
    /// Called with the full specification after every successful change.
    fn on_filter_change(&mut self, spec: &FilterSpec);

    /// Called when a collaborator asks for the current results to be re-run.
    /// `loading` is forwarded untouched for display.
    fn on_refresh(&mut self, _spec: &FilterSpec, _loading: bool) {}
}

impl<F: FnMut(&FilterSpec)> FilterObserver for F {
    fn on_filter_change(&mut self, spec: &FilterSpec) {
        self(spec)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

pub struct FilterStore {
    current: FilterSpec,
    policy: EditPolicy,
    observers: Vec<(ObserverId, Box<dyn FilterObserver>)>,
    next_observer: u64,
}

impl fmt::Debug for FilterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterStore")
            .field("current", &self.current)
            .field("policy", &self.policy)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new(EditPolicy::default())
    }
}

impl FilterStore {
    pub fn new(policy: EditPolicy) -> Self {
        Self::with_spec(FilterSpec::default(), policy)
    }

    pub fn with_spec(spec: FilterSpec, policy: EditPolicy) -> Self {
        Self {
            current: spec,
            policy,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    pub fn current(&self) -> &FilterSpec {
        &self.current
    }

    pub fn policy(&self) -> EditPolicy {
        self.policy
    }

    /// Install `next` wholesale and notify every observer.
    pub fn replace(&mut self, next: FilterSpec) {
        self.current = next;
        for (_, observer) in &mut self.observers {
            observer.on_filter_change(&self.current);
        }
    }

    /// Run one edit through the engine.
    ///
    /// Returns `Ok(true)` when the specification was replaced (observers were
    /// notified), `Ok(false)` for a no-op. A rejected edit leaves the
    /// specification as it was and notifies nobody.
    pub fn dispatch(&mut self, edit: FilterEdit) -> AppResult<bool> {
        let dimension = edit.dimension();
        debug!(?dimension, ?edit, "dispatching filter edit");

        match apply(&self.current, edit, self.policy) {
            Ok(Transition::Replaced(next)) => {
                self.replace(next);
                Ok(true)
            }
            Ok(Transition::Unchanged) => {
                debug!(?dimension, "edit left filter unchanged");
                Ok(false)
            }
            Err(err) => {
                warn!(?dimension, %err, "filter edit rejected");
                Err(err.into())
            }
        }
    }

    pub fn subscribe(&mut self, observer: impl FilterObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns whether the observer was registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    /// Ask observers to re-run their query. Since every change is notified,
    /// the current specification is also the last one observers saw.
    pub fn refresh(&mut self, loading: bool) {
        debug!(loading, "refresh requested");
        for (_, observer) in &mut self.observers {
            observer.on_refresh(&self.current, loading);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use of_spec::{Dimension, NestedKey, NestedValue};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_store() -> (FilterStore, Rc<RefCell<Vec<FilterSpec>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = FilterStore::default();
        let sink = Rc::clone(&seen);
        store.subscribe(move |spec: &FilterSpec| sink.borrow_mut().push(spec.clone()));
        (store, seen)
    }

    #[test]
    fn successful_edit_notifies_with_full_spec() {
        let (mut store, seen) = recording_store();
        let changed = store
            .dispatch(FilterEdit::AddValue {
                dimension: Dimension::Regions,
                value: "North Pacific".to_string(),
            })
            .unwrap();

        assert!(changed);
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(&seen[0], store.current());
    }

    #[test]
    fn noop_remove_does_not_notify() {
        let (mut store, seen) = recording_store();
        let changed = store
            .dispatch(FilterEdit::RemoveValue {
                dimension: Dimension::Seasons,
                value: Some("Winter".to_string()),
            })
            .unwrap();

        assert!(!changed);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn rejected_number_does_not_notify() {
        let (mut store, seen) = recording_store();
        let result = store.dispatch(FilterEdit::SetNested {
            dimension: Dimension::Coordinates,
            key: NestedKey::LatMin,
            value: NestedValue::Text("not-a-number".to_string()),
        });

        assert!(result.is_err());
        assert!(seen.borrow().is_empty());
        assert_eq!(store.current(), &FilterSpec::default());
    }

    #[test]
    fn unsubscribed_observer_is_silent() {
        let seen = Rc::new(RefCell::new(0usize));
        let mut store = FilterStore::default();
        let sink = Rc::clone(&seen);
        let id = store.subscribe(move |_: &FilterSpec| *sink.borrow_mut() += 1);

        store.dispatch(FilterEdit::ClearAll).unwrap();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.dispatch(FilterEdit::ClearAll).unwrap();

        assert_eq!(*seen.borrow(), 1);
    }

    struct RefreshProbe {
        calls: Rc<RefCell<Vec<bool>>>,
    }

    impl FilterObserver for RefreshProbe {
        fn on_filter_change(&mut self, _spec: &FilterSpec) {}

        fn on_refresh(&mut self, _spec: &FilterSpec, loading: bool) {
            self.calls.borrow_mut().push(loading);
        }
    }

    #[test]
    fn refresh_forwards_loading_flag() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut store = FilterStore::default();
        store.subscribe(RefreshProbe {
            calls: Rc::clone(&calls),
        });

        store.refresh(true);
        store.refresh(false);

        assert_eq!(*calls.borrow(), vec![true, false]);
    }
}

//! Current-currency persistence port.
//!
//! The registry never decides where the "current" currency lives (session,
//! cookie, database row...). The host injects an implementation of this
//! trait; without one the current currency only lives in the registry cache.

/// Port for persisting the current currency code.
pub trait CurrentCurrencyStore: Send {
    /// Returns the persisted current currency code, if any.
    fn resolve(&self) -> Option<String>;

    /// Persists a newly selected current currency code.
    ///
    /// Fire-and-forget: the registry does not observe failures.
    fn store(&self, code: &str);
}

/// Store that persists nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStore;

impl CurrentCurrencyStore for NoopStore {
    fn resolve(&self) -> Option<String> {
        None
    }

    fn store(&self, _code: &str) {}
}

/// Store built from a resolve closure and a store closure.
pub struct CallbackStore<R, S> {
    resolve: R,
    store: S,
}

impl<R, S> CallbackStore<R, S>
where
    R: Fn() -> Option<String> + Send,
    S: Fn(&str) + Send,
{
    pub fn new(resolve: R, store: S) -> Self {
        Self { resolve, store }
    }
}

impl<R, S> CurrentCurrencyStore for CallbackStore<R, S>
where
    R: Fn() -> Option<String> + Send,
    S: Fn(&str) + Send,
{
    fn resolve(&self) -> Option<String> {
        (self.resolve)()
    }

    fn store(&self, code: &str) {
        (self.store)(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_noop_store_resolves_nothing() {
        let store = NoopStore;
        store.store("EUR");
        assert_eq!(store.resolve(), None);
    }

    #[test]
    fn test_callback_store_delegates() {
        let saved = Arc::new(Mutex::new(Vec::<String>::new()));

        let reader = Arc::clone(&saved);
        let writer = Arc::clone(&saved);
        let store = CallbackStore::new(
            move || reader.lock().unwrap().last().cloned(),
            move |code: &str| writer.lock().unwrap().push(code.to_string()),
        );

        assert_eq!(store.resolve(), None);
        store.store("CZK");
        store.store("EUR");
        assert_eq!(store.resolve().as_deref(), Some("EUR"));
        assert_eq!(*saved.lock().unwrap(), vec!["CZK", "EUR"]);
    }
}

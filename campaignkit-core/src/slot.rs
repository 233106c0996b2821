//! Holder for the most recent generated result of a form.

/// Keeps the last successful result until it is replaced or discarded.
///
/// A failed generation leaves the previous value in place; editing the
/// inputs is expected to call [`discard`](ResultSlot::discard).
#[derive(Debug, Clone)]
pub struct ResultSlot<T> {
    current: Option<T>,
}

impl<T> Default for ResultSlot<T> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<T> ResultSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `generate`; store its value on success, keep the old one on error.
    pub fn generate<E>(&mut self, generate: impl FnOnce() -> Result<T, E>) -> Result<&T, E> {
        let value = generate()?;
        Ok(self.current.insert(value))
    }

    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    pub fn discard(&mut self) {
        self.current = None;
    }

    pub fn into_current(self) -> Option<T> {
        self.current
    }
}

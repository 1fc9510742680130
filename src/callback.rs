//! Callback abstraction for widget event handlers
//!
//! Instead of manually writing `Option<Box<dyn Fn(T) -> M>>` repeatedly,
//! widgets use `Callback<T, M>` which encapsulates this pattern.

use std::fmt;

/// A callback wrapper that encapsulates optional event handlers.
///
/// # Type Parameters
///
/// - `T`: The input type for the callback (e.g., load arguments, state)
/// - `M`: The message type returned by the callback
pub struct Callback<T, M> {
    f: Option<Box<dyn Fn(T) -> M>>,
}

impl<T, M> Callback<T, M> {
    /// Create a new callback from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> M + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty callback (no handler).
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Call the callback with a value, if it exists.
    ///
    /// Returns `Some(message)` if the callback is set, or `None` if no
    /// handler is registered.
    pub fn call(&self, value: T) -> Option<M> {
        self.f.as_ref().map(|f| f(value))
    }

    /// Check if the callback is set.
    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }

    /// Check if the callback is not set.
    pub fn is_none(&self) -> bool {
        self.f.is_none()
    }
}

impl<T, M> Default for Callback<T, M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T, M> Clone for Callback<T, M> {
    fn clone(&self) -> Self {
        // We can't actually clone the boxed closure, so we return an empty
        // callback. Callbacks are set via builder methods and cloning is only
        // used internally by the widget system.
        Self::none()
    }
}

impl<T, M> fmt::Debug for Callback<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_call() {
        let cb: Callback<u32, String> = Callback::new(|n| format!("got {}", n));
        assert!(cb.is_some());
        assert_eq!(cb.call(7), Some("got 7".to_string()));
    }

    #[test]
    fn test_empty_callback() {
        let cb: Callback<u32, String> = Callback::none();
        assert!(cb.is_none());
        assert_eq!(cb.call(7), None);
    }

    #[test]
    fn test_clone_drops_handler() {
        let cb: Callback<(), u8> = Callback::new(|_| 1);
        let cloned = cb.clone();
        assert!(cloned.is_none());
    }
}

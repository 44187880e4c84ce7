use std::fmt;

/// Untrusted data that has not yet passed the validation pipeline.
///
/// The HTTP boundary wraps the raw request body in `Tainted<T>`. Only code in
/// this crate can read it back, and it does so exactly once: to decode the
/// body and hand it to [`MethodRequest`](crate::MethodRequest) validation.
///
/// - No `Deref` or implicit conversions
/// - The inner value is inaccessible outside the crate
///
/// # Examples
///
/// ```
/// use scoring_core::Tainted;
///
/// let body = Tainted::new(br#"{"login": "h&f"}"#.to_vec());
/// assert!(format!("{:?}", body).starts_with("Tainted"));
/// ```
#[derive(Clone)]
pub struct Tainted<T> {
    // Private: reading the raw body must go through the decoder.
    inner: T,
}

impl<T> Tainted<T> {
    /// Wraps an untrusted value.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Borrows the inner value for decoding.
    pub(crate) fn as_inner(&self) -> &T {
        &self.inner
    }
}

// No Deref, AsRef, Borrow or Into<T>: those would let raw input skip validation.

impl<T: fmt::Debug> fmt::Debug for Tainted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tainted")
            .field("inner", &self.inner)
            .finish()
    }
}

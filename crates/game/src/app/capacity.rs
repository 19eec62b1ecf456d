use thiserror::Error;

/// A fixed-capacity collection refused a new element. The collection is left
/// exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{what} capacity of {capacity} exceeded")]
pub(crate) struct CapacityExceeded {
    pub(crate) what: &'static str,
    pub(crate) capacity: usize,
}

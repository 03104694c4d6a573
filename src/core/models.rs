//! Output configuration.

/// Controls which columns writers emit.
///
/// The base columns are always `timestamp`, `sender` and `body`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Also emit `date`, `hour`, `weekday`, `length` and `media`.
    pub include_derived: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_derived(mut self) -> Self {
        self.include_derived = true;
        self
    }
}

// -------------------------------------------------------------------
// Versioned
// -------------------------------------------------------------------

/// A value paired with a counter that moves whenever the value changes.
///
/// Readers that derive data from the value (the traversal overlay, for
/// instance) remember the version they saw and compare later.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    version: u64,
    data: T,
}

impl<T> Versioned<T> {
    pub fn new(data: T) -> Self {
        Self { version: 0, data }
    }
    pub fn get(&self) -> &T {
        &self.data
    }
    /// Run `f` against the value; the version moves only if `f` reports a
    /// change.
    pub fn mutate(&mut self, f: impl FnOnce(&mut T) -> bool) -> bool {
        let changed = f(&mut self.data);
        if changed {
            self.version = self.version.wrapping_add(1);
        }
        changed
    }
    pub fn set(&mut self, data: T) {
        self.data = data;
        self.version = self.version.wrapping_add(1);
    }
    pub fn version(&self) -> u64 {
        self.version
    }
}

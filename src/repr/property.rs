/// Side table mapping dense handles (node or edge ids) to optional values.
///
/// The store knows nothing about topology: it merely grows with its owner and
/// tells apart "no slot" (`None` from [`PropertyStore::slot`]) from "slot without
/// value" (`Some(None)`).
#[derive(Debug, Clone)]
pub struct PropertyStore<P> {
    values: Vec<Option<P>>,
}

impl<P> Default for PropertyStore<P> {
    fn default() -> Self {
        Self { values: Vec::new() }
    }
}

impl<P> PropertyStore<P> {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a slot for the next handle
    pub fn push(&mut self, value: Option<P>) {
        self.values.push(value);
    }

    /// Returns the slot of a handle: `None` if the handle has no slot,
    /// `Some(None)` if the slot holds no value
    pub fn slot(&self, idx: usize) -> Option<Option<&P>> {
        self.values.get(idx).map(Option::as_ref)
    }

    /// Returns the value stored for a handle, if any
    pub fn get(&self, idx: usize) -> Option<&P> {
        self.values.get(idx).and_then(Option::as_ref)
    }

    /// Stores a value for an existing handle and returns the previous value.
    /// ** Panics if the handle has no slot **
    pub fn set(&mut self, idx: usize, value: P) -> Option<P> {
        self.values[idx].replace(value)
    }

    /// Removes the value of an existing handle and returns it.
    /// ** Panics if the handle has no slot **
    pub fn take(&mut self, idx: usize) -> Option<P> {
        self.values[idx].take()
    }

    /// Returns the number of slots
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns *true* if there are no slots
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over all slots in handle order
    pub fn iter(&self) -> impl Iterator<Item = Option<&P>> + '_ {
        self.values.iter().map(Option::as_ref)
    }
}

/*!
Multibuffering implementation.

A layer owns one or more interchangeable GPU resources.  A compute pass reads from one of
them and writes into another, and the result becomes the next pass's input.  This module
is the bookkeeping for that: a ring of a fixed number of slots with a rotating "current"
index.

The slots are fully generic; layers store a texture and an optional render target in each.
A ring may hold fewer slots than its count when allocation stopped early, in which case the
current slot may be missing.
*/

#[derive(Debug)]
pub(crate) struct Multibuffer<T> {
    slots: Vec<T>,
    count: usize,
    index: usize,
}

impl<T> Multibuffer<T> {
    /// An empty ring that rotates over `count` slots.  `count` must be nonzero.
    pub fn new(count: usize) -> Self {
        debug_assert!(count > 0);
        Multibuffer {
            slots: Vec::with_capacity(count),
            count,
            index: 0,
        }
    }

    pub fn push(&mut self, slot: T) {
        debug_assert!(self.slots.len() < self.count);
        self.slots.push(slot);
    }

    /// Advance to the next slot, wrapping around.  Returns the new index.
    pub fn rotate(&mut self) -> usize {
        self.index = (self.index + 1) % self.count;
        self.index
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&T> {
        self.slots.get(self.index)
    }

    /// Slots the ring rotates over, filled or not.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Drop every slot, first to last.  The index is kept.
    pub fn clear(&mut self) {
        for slot in self.slots.drain(..) {
            drop(slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Multibuffer;

    #[test]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn rotation_wraps() {
        let mut m = Multibuffer::new(3);
        m.push('a');
        m.push('b');
        m.push('c');
        assert_eq!(m.current(), Some(&'a'));
        assert_eq!(m.rotate(), 1);
        assert_eq!(m.rotate(), 2);
        assert_eq!(m.rotate(), 0);
        assert_eq!(m.current(), Some(&'a'));
    }

    #[test]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn partially_filled() {
        let mut m = Multibuffer::new(2);
        m.push(7u8);
        assert_eq!(m.rotate(), 1);
        assert_eq!(m.current(), None);
        assert_eq!(m.rotate(), 0);
        assert_eq!(m.current(), Some(&7));
    }

    #[test]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn clear_keeps_index() {
        let mut m = Multibuffer::new(2);
        m.push(1);
        m.push(2);
        m.rotate();
        m.clear();
        assert_eq!(m.index(), 1);
        assert_eq!(m.len(), 0);
        m.push(3);
        m.push(4);
        assert_eq!(m.current(), Some(&4));
    }
}

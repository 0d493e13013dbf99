use std::cell::Cell;
use std::rc::Rc;

/// A zero-sized element, for checking that storage never touches memory for ZSTs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZeroSizedType;

/// An element which increments a shared counter when dropped. Clones share the counter, so a
/// collection filled with clones of one `CountedDrop` reports exactly how many of its elements
/// were dropped.
#[derive(Debug, Clone)]
pub struct CountedDrop(pub Rc<Cell<usize>>);

impl CountedDrop {
    pub fn new() -> CountedDrop {
        CountedDrop(Rc::new(Cell::new(0)))
    }

    /// The number of drops recorded so far, including drops of clones.
    pub fn drops(&self) -> usize {
        self.0.get()
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

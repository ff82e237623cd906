//! FAQ accordion: at most one answer open at a time.

#[derive(Debug, Clone, Default)]
pub struct Accordion {
    open: Option<usize>,
}

impl Accordion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_item(&self) -> Option<usize> {
        self.open
    }

    /// Click on question `index`: close everything, then open `index` unless
    /// it was the one already open.
    pub fn toggle(&mut self, index: usize) -> Option<usize> {
        self.open = match self.open {
            Some(i) if i == index => None,
            _ => Some(index),
        };
        self.open
    }
}

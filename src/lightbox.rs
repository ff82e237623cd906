//! Full-screen image viewer state.

#[derive(Debug, Clone)]
pub struct Lightbox {
    open: Option<usize>,
    total: usize,
}

impl Lightbox {
    pub fn new(total: usize) -> Self {
        Self { open: None, total }
    }

    /// Index of the image on display, if the lightbox is open.
    pub fn current(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Open on image `index`, clamped to the last image. No-op without images.
    pub fn open(&mut self, index: usize) -> Option<usize> {
        if self.total == 0 {
            return None;
        }
        self.open = Some(index.min(self.total - 1));
        self.open
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn next(&mut self) -> Option<usize> {
        let i = self.open?;
        self.open = Some((i + 1) % self.total);
        self.open
    }

    pub fn previous(&mut self) -> Option<usize> {
        let i = self.open?;
        self.open = Some((i + self.total - 1) % self.total);
        self.open
    }

    /// Apply a keyboard key while open. Returns true if the key was handled.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            "Escape" => self.close(),
            "ArrowRight" => {
                self.next();
            }
            "ArrowLeft" => {
                self.previous();
            }
            _ => return false,
        }
        true
    }
}

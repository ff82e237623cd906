//! Step carousel position and touch swipe classification.

/// Result of moving the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub previous: usize,
    pub current: usize,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

#[derive(Debug, Clone)]
pub struct Carousel {
    current: usize,
    total: usize,
}

impl Carousel {
    /// A carousel over `total` steps, showing the first one.
    pub fn new(total: usize) -> Self {
        Self { current: 0, total }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Jump to `index`, clamped into `[0, total - 1]`.
    pub fn go_to(&mut self, index: isize) -> Transition {
        let last = self.total.saturating_sub(1);
        let target = if index < 0 { 0 } else { (index as usize).min(last) };
        self.move_to(target)
    }

    /// Auto-advance: step forward, wrapping after the last step.
    pub fn advance(&mut self) -> Transition {
        if self.total == 0 {
            return self.move_to(0);
        }
        self.move_to((self.current + 1) % self.total)
    }

    /// Step backward, wrapping before the first step.
    pub fn back(&mut self) -> Transition {
        if self.total == 0 {
            return self.move_to(0);
        }
        self.move_to((self.current + self.total - 1) % self.total)
    }

    fn move_to(&mut self, target: usize) -> Transition {
        let previous = self.current;
        self.current = target;
        Transition { previous, current: target }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved left; show the following step.
    Next,
    /// Finger moved right; show the preceding step.
    Previous,
}

/// Tracks one touch gesture from start to end.
#[derive(Debug, Clone, Default)]
pub struct Swipe {
    start: Option<(f64, f64)>,
}

impl Swipe {
    pub fn begin(&mut self, x: f64, y: f64) {
        self.start = Some((x, y));
    }

    /// Finish the gesture. Mostly-horizontal travel of at least `threshold`
    /// pixels counts as a swipe.
    pub fn end(&mut self, x: f64, y: f64, threshold: f64) -> Option<SwipeDirection> {
        let (sx, sy) = self.start.take()?;
        let dx = x - sx;
        let dy = y - sy;
        if dx.abs() < threshold || dx.abs() <= dy.abs() {
            return None;
        }
        Some(if dx < 0.0 {
            SwipeDirection::Next
        } else {
            SwipeDirection::Previous
        })
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }
}

//! Transcript typing animation.
//!
//! The sequencer walks the [`Script`] one timed action at a time: type a
//! character, hold on a blinking cursor, erase a suffix, fade the category
//! label, and so on, looping forever. Each call to [`Sequencer::step`]
//! performs exactly one action and returns how long to wait before the next
//! call. The caller owns the single timer, so two actions can never overlap.

use std::time::Duration;

use fastrand::Rng;

use crate::config::TypingConfig;
use crate::script::{Item, Script};

/// Text output the sequencer drives.
pub trait Transcript {
    /// Append the blinking cursor after the text.
    fn show_cursor(&mut self);
    /// Append one character before the cursor.
    fn push_char(&mut self, ch: char);
    fn pop_char(&mut self);
    /// Drop all text and the cursor.
    fn clear(&mut self);
    /// Restart the cursor's blink animation.
    fn blink_cursor(&mut self);
    /// Start fading the category label out.
    fn fade_label(&mut self);
    /// Replace the label content and fade it back in.
    fn set_label(&mut self, label: &str, icon: &str);
    /// Empty the label and fade it back in.
    fn clear_label(&mut self);
    /// Toggle tagline styling on the transcript.
    fn set_tagline(&mut self, on: bool);
    /// Replace the whole transcript with `text`, without a cursor.
    fn show_text(&mut self, text: &str);
}

/// Which string a [`Phase::Typing`] phase is producing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Text,
    Prefix,
    Suffix,
    Tagline,
}

/// Where to go when a blink hold ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterBlink {
    NextItem,
    /// Erase the suffix, or wrap up the item after its last suffix.
    Suffix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaglineStage {
    FadeLabel,
    Hold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Starting,
    FadingCategory,
    PausedBetweenItems,
    /// `idx` counts characters already typed.
    Typing { target: Target, idx: usize },
    Blinking { then: AfterBlink },
    Erasing { remaining: usize },
    PausedBetweenCategories,
    ShowingTagline(TaglineStage),
}

/// Whole microseconds, so configured millisecond values come back exact.
fn millis(ms: f64) -> Duration {
    Duration::from_micros((ms.max(0.0) * 1000.0).round() as u64)
}

pub struct Sequencer {
    script: Script,
    cfg: TypingConfig,
    compact: bool,
    rng: Rng,
    phase: Phase,
    category: usize,
    item: usize,
    suffix: usize,
    buffer: String,
    cursor_visible: bool,
}

impl Sequencer {
    /// `compact` selects the narrow-viewport tagline, shown without typing.
    pub fn new(script: Script, cfg: TypingConfig, compact: bool, rng: Rng) -> Self {
        Self {
            script,
            cfg,
            compact,
            rng,
            phase: Phase::Starting,
            category: 0,
            item: 0,
            suffix: 0,
            buffer: String::new(),
            cursor_visible: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The text currently on screen, cursor excluded.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn category_index(&self) -> usize {
        self.category
    }

    pub fn item_index(&self) -> usize {
        self.item
    }

    pub fn suffix_index(&self) -> usize {
        self.suffix
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Show the cursor and return the delay before the first [`step`](Self::step).
    pub fn start(&mut self, out: &mut impl Transcript) -> Duration {
        self.phase = Phase::Starting;
        self.show_cursor(out);
        millis(self.cfg.start_delay_ms)
    }

    /// Perform the next timed action and return the wait after it.
    pub fn step(&mut self, out: &mut impl Transcript) -> Duration {
        loop {
            if let Some(delay) = self.tick(out) {
                return delay;
            }
        }
    }

    /// Either perform a timed action (`Some(wait)`) or move to another phase.
    fn tick(&mut self, out: &mut impl Transcript) -> Option<Duration> {
        match self.phase {
            Phase::Starting => self.enter(Phase::FadingCategory, out),
            Phase::FadingCategory => {
                if let Some(cat) = self.script.categories.get(self.category) {
                    out.set_label(&cat.label, &cat.icon);
                }
                self.item = 0;
                self.suffix = 0;
                self.enter(Phase::PausedBetweenItems, out)
            }
            Phase::PausedBetweenItems => {
                let target = match self.current_item() {
                    Some(Item::Text(_)) => Target::Text,
                    Some(Item::Suffixes { .. }) => Target::Prefix,
                    None => return self.enter(Phase::PausedBetweenCategories, out),
                };
                self.clear(out);
                self.show_cursor(out);
                self.suffix = 0;
                self.enter(Phase::Typing { target, idx: 0 }, out)
            }
            Phase::Typing { target, idx } => {
                if let Some(ch) = self.target_text(target).chars().nth(idx) {
                    self.buffer.push(ch);
                    out.push_char(ch);
                    self.phase = Phase::Typing { target, idx: idx + 1 };
                    return Some(self.char_delay());
                }
                match target {
                    Target::Text => self.enter(Phase::Blinking { then: AfterBlink::NextItem }, out),
                    Target::Prefix => {
                        self.suffix = 0;
                        if self.suffix_count() == 0 {
                            return self.after_suffixes(out);
                        }
                        self.enter(Phase::Typing { target: Target::Suffix, idx: 0 }, out)
                    }
                    Target::Suffix => self.enter(Phase::Blinking { then: AfterBlink::Suffix }, out),
                    Target::Tagline => self.enter(Phase::ShowingTagline(TaglineStage::Hold), out),
                }
            }
            Phase::Blinking { then: AfterBlink::NextItem } => self.next_item(out),
            Phase::Blinking { then: AfterBlink::Suffix } => {
                if self.suffix + 1 < self.suffix_count() {
                    let remaining = self.target_text(Target::Suffix).chars().count();
                    self.enter(Phase::Erasing { remaining }, out)
                } else {
                    self.after_suffixes(out)
                }
            }
            Phase::Erasing { remaining } => {
                if remaining > 0 && self.buffer.pop().is_some() {
                    out.pop_char();
                    self.phase = Phase::Erasing { remaining: remaining - 1 };
                    return Some(millis(self.cfg.char_delay_ms * self.cfg.erase_factor));
                }
                self.suffix += 1;
                self.enter(Phase::Typing { target: Target::Suffix, idx: 0 }, out)
            }
            Phase::PausedBetweenCategories => {
                self.clear(out);
                if self.category + 1 >= self.script.categories.len() {
                    self.enter(Phase::ShowingTagline(TaglineStage::FadeLabel), out)
                } else {
                    self.category += 1;
                    self.enter(Phase::FadingCategory, out)
                }
            }
            Phase::ShowingTagline(TaglineStage::FadeLabel) => {
                out.clear_label();
                out.set_tagline(true);
                if self.compact {
                    self.buffer.clone_from(&self.script.tagline);
                    out.show_text(&self.script.tagline);
                    self.cursor_visible = false;
                    self.enter(Phase::ShowingTagline(TaglineStage::Hold), out)
                } else {
                    self.show_cursor(out);
                    self.enter(Phase::Typing { target: Target::Tagline, idx: 0 }, out)
                }
            }
            Phase::ShowingTagline(TaglineStage::Hold) => {
                out.set_tagline(false);
                self.clear(out);
                self.category = 0;
                self.item = 0;
                self.suffix = 0;
                self.enter(Phase::FadingCategory, out)
            }
        }
    }

    /// Switch phase and run its entry action. Timed phases return their hold.
    fn enter(&mut self, phase: Phase, out: &mut impl Transcript) -> Option<Duration> {
        self.phase = phase;
        match phase {
            Phase::FadingCategory | Phase::ShowingTagline(TaglineStage::FadeLabel) => {
                out.fade_label();
                Some(millis(self.cfg.label_fade_ms))
            }
            Phase::Blinking { .. } => {
                out.blink_cursor();
                Some(millis(self.cfg.blink_ms))
            }
            Phase::PausedBetweenCategories => Some(millis(self.cfg.category_pause_ms)),
            Phase::ShowingTagline(TaglineStage::Hold) => Some(millis(self.cfg.tagline_hold_ms)),
            Phase::Starting
            | Phase::PausedBetweenItems
            | Phase::Typing { .. }
            | Phase::Erasing { .. } => None,
        }
    }

    fn next_item(&mut self, out: &mut impl Transcript) -> Option<Duration> {
        if self.is_last_item() {
            self.enter(Phase::PausedBetweenCategories, out)
        } else {
            self.item += 1;
            self.enter(Phase::PausedBetweenItems, out)
        }
    }

    /// The last suffix is done: end the category or blink once more first.
    fn after_suffixes(&mut self, out: &mut impl Transcript) -> Option<Duration> {
        if self.is_last_item() {
            self.enter(Phase::PausedBetweenCategories, out)
        } else {
            self.enter(Phase::Blinking { then: AfterBlink::NextItem }, out)
        }
    }

    fn current_item(&self) -> Option<&Item> {
        self.script
            .categories
            .get(self.category)
            .and_then(|cat| cat.items.get(self.item))
    }

    fn is_last_item(&self) -> bool {
        let len = self
            .script
            .categories
            .get(self.category)
            .map_or(0, |cat| cat.items.len());
        self.item + 1 >= len
    }

    fn suffix_count(&self) -> usize {
        match self.current_item() {
            Some(Item::Suffixes { suffixes, .. }) => suffixes.len(),
            _ => 0,
        }
    }

    fn target_text(&self, target: Target) -> &str {
        let item = self.current_item();
        match (target, item) {
            (Target::Tagline, _) => self.script.tagline.as_str(),
            (Target::Text, Some(Item::Text(text))) => text.as_str(),
            (Target::Prefix, Some(Item::Suffixes { prefix, .. })) => prefix.as_str(),
            (Target::Suffix, Some(Item::Suffixes { suffixes, .. })) => {
                suffixes.get(self.suffix).map_or("", String::as_str)
            }
            _ => "",
        }
    }

    fn char_delay(&mut self) -> Duration {
        millis(self.cfg.char_delay_ms + self.rng.f64() * self.cfg.char_jitter_ms)
    }

    fn show_cursor(&mut self, out: &mut impl Transcript) {
        out.show_cursor();
        self.cursor_visible = true;
    }

    fn clear(&mut self, out: &mut impl Transcript) {
        out.clear();
        self.buffer.clear();
        self.cursor_visible = false;
    }
}

//! Typing state machine
//!
//! Pure, timer-free model of the "type then erase" cycle. Each call to
//! [`TypingMachine::step`] performs one tick and reports the text to show
//! and how long to wait before the next tick.

use std::time::Duration;

use super::TypingError;

/// Ordered, non-empty list of phrases to cycle through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseList {
    phrases: Vec<String>,
}

impl PhraseList {
    /// Build a phrase list, rejecting an empty list or an empty phrase
    pub fn new<I, S>(phrases: I) -> Result<Self, TypingError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();
        if phrases.is_empty() {
            return Err(TypingError::EmptyPhraseList);
        }
        if let Some(index) = phrases.iter().position(|p| p.is_empty()) {
            return Err(TypingError::EmptyPhrase { index });
        }
        Ok(Self { phrases })
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Never true for a constructed list
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.phrases.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }
}

/// Timing constants for one animation instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingConfig {
    /// Delay after each typed character
    pub typing_speed: Duration,
    /// Hold after a phrase is fully typed, before erasing starts
    pub typing_delay: Duration,
    /// Delay after each erased character
    pub erase_speed: Duration,
    /// Pause after a phrase is fully erased, before the next one starts
    pub advance_pause: Duration,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            typing_speed: Duration::from_millis(100),
            typing_delay: Duration::from_millis(2000),
            erase_speed: Duration::from_millis(50),
            advance_pause: Duration::from_millis(500),
        }
    }
}

/// Animation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Adding one character per tick
    #[default]
    Typing,
    /// Full phrase shown; the next tick starts erasing
    ErasingPause,
    /// Removing one character per tick
    Erasing,
    /// Phrase fully erased and index advanced; the next tick starts typing
    AdvancePause,
}

impl Mode {
    /// Whether the next tick removes a character
    pub fn is_deleting(self) -> bool {
        matches!(self, Mode::Erasing | Mode::ErasingPause)
    }
}

/// Result of one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    /// Text to display after this tick
    pub text: String,
    /// Time to wait before the next tick
    pub delay: Duration,
    /// Mode after this tick
    pub mode: Mode,
}

/// The typing animation state
#[derive(Debug, Clone)]
pub struct TypingMachine {
    phrases: PhraseList,
    config: TypingConfig,
    phrase_index: usize,
    char_count: usize,
    mode: Mode,
}

impl TypingMachine {
    pub fn new(phrases: PhraseList, config: TypingConfig) -> Self {
        Self {
            phrases,
            config,
            phrase_index: 0,
            char_count: 0,
            mode: Mode::Typing,
        }
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    pub fn char_count(&self) -> usize {
        self.char_count
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &TypingConfig {
        &self.config
    }

    pub fn current_phrase(&self) -> &str {
        // phrase_index is always reduced modulo the (non-empty) list length
        &self.phrases.phrases[self.phrase_index]
    }

    /// Text currently displayed: the first `char_count` chars of the phrase
    pub fn displayed(&self) -> &str {
        prefix(self.current_phrase(), self.char_count)
    }

    /// Advance the animation by one tick
    pub fn step(&mut self) -> Tick {
        let phrase_len = self.current_phrase().chars().count();

        if self.mode.is_deleting() {
            self.char_count -= 1;
        } else {
            self.char_count += 1;
        }
        let text = prefix(self.current_phrase(), self.char_count).to_string();

        let deleting = self.mode.is_deleting();
        let delay = if !deleting && self.char_count == phrase_len {
            self.mode = Mode::ErasingPause;
            self.config.typing_delay
        } else if deleting && self.char_count == 0 {
            self.mode = Mode::AdvancePause;
            self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
            self.config.advance_pause
        } else if deleting {
            self.mode = Mode::Erasing;
            self.config.erase_speed
        } else {
            self.mode = Mode::Typing;
            self.config.typing_speed
        };

        Tick {
            text,
            delay,
            mode: self.mode,
        }
    }
}

/// First `chars` characters of `s`, never splitting a code point
fn prefix(s: &str, chars: usize) -> &str {
    match s.char_indices().nth(chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn machine(phrases: &[&str]) -> TypingMachine {
        let list = PhraseList::new(phrases.iter().copied()).unwrap();
        TypingMachine::new(list, TypingConfig::default())
    }

    #[test]
    fn test_phrase_list_rejects_empty() {
        let empty: Vec<String> = Vec::new();
        assert!(matches!(
            PhraseList::new(empty),
            Err(TypingError::EmptyPhraseList)
        ));
        assert!(matches!(
            PhraseList::new(["ok", ""]),
            Err(TypingError::EmptyPhrase { index: 1 })
        ));
    }

    #[test]
    fn test_initial_state() {
        let m = machine(&["Hi"]);
        assert_eq!(m.phrase_index(), 0);
        assert_eq!(m.char_count(), 0);
        assert_eq!(m.mode(), Mode::Typing);
        assert_eq!(m.displayed(), "");
    }

    #[test]
    fn test_scenario_trace() {
        let mut m = machine(&["Hi", "Go"]);
        let expected = [
            ("H", 100, 0),
            ("Hi", 2000, 0),
            ("H", 50, 0),
            ("", 500, 1),
            ("G", 100, 1),
            ("Go", 2000, 1),
            ("G", 50, 1),
            ("", 500, 0),
            ("H", 100, 0),
        ];
        for (text, delay, index) in expected {
            let tick = m.step();
            assert_eq!(tick.text, text);
            assert_eq!(tick.delay, ms(delay));
            assert_eq!(m.phrase_index(), index);
        }
    }

    #[test]
    fn test_scenario_modes() {
        let mut m = machine(&["Hi", "Go"]);
        let modes: Vec<Mode> = (0..4).map(|_| m.step().mode).collect();
        assert_eq!(
            modes,
            vec![Mode::Typing, Mode::ErasingPause, Mode::Erasing, Mode::AdvancePause]
        );
    }

    #[test]
    fn test_full_cycle_in_order() {
        let phrases = ["Web Developer", "AI", "Código ✨"];
        let mut m = machine(&phrases);
        let mut shown = Vec::new();
        while shown.len() < phrases.len() * 3 {
            let tick = m.step();
            if tick.mode == Mode::ErasingPause {
                shown.push(tick.text);
            }
        }
        let expected: Vec<String> = phrases
            .iter()
            .cycle()
            .take(phrases.len() * 3)
            .map(|s| s.to_string())
            .collect();
        assert_eq!(shown, expected);
    }

    #[test]
    fn test_char_count_monotonic() {
        let mut m = machine(&["abc", "de"]);
        for _ in 0..200 {
            let before = m.char_count();
            let deleting = m.mode().is_deleting();
            m.step();
            if deleting {
                assert_eq!(m.char_count(), before - 1);
            } else {
                assert_eq!(m.char_count(), before + 1);
            }
        }
    }

    #[test]
    fn test_displayed_is_prefix() {
        let mut m = machine(&["naïve", "日本語", "x"]);
        for _ in 0..300 {
            let tick = m.step();
            let len = m.current_phrase().chars().count();
            assert!(m.char_count() <= len);
            assert_eq!(tick.text.chars().count(), m.char_count());
            assert_eq!(tick.text, m.displayed());
            // After advancing, the erased text is a prefix of every phrase
            assert!(m.current_phrase().starts_with(&tick.text));
        }
    }

    #[test]
    fn test_single_char_phrase() {
        let mut m = machine(&["x"]);
        let tick = m.step();
        assert_eq!((tick.text.as_str(), tick.mode), ("x", Mode::ErasingPause));
        let tick = m.step();
        assert_eq!((tick.text.as_str(), tick.mode), ("", Mode::AdvancePause));
        assert_eq!(m.phrase_index(), 0);
    }

    #[test]
    fn test_custom_timings() {
        let config = TypingConfig {
            typing_speed: ms(7),
            typing_delay: ms(70),
            erase_speed: ms(3),
            advance_pause: ms(30),
        };
        let mut m = TypingMachine::new(PhraseList::new(["ab"]).unwrap(), config);
        let delays: Vec<Duration> = (0..5).map(|_| m.step().delay).collect();
        assert_eq!(delays, vec![ms(7), ms(70), ms(3), ms(30), ms(7)]);
    }

    #[test]
    fn test_prefix_multibyte() {
        assert_eq!(prefix("日本語", 2), "日本");
        assert_eq!(prefix("abc", 0), "");
        assert_eq!(prefix("abc", 5), "abc");
    }
}

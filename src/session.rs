use std::time::{Duration, Instant};

use crate::util::truncate_to_millis;
use crate::COUNTDOWN_SECS;

/// Everything that changes while a round is played. Rebuilt on retry.
#[derive(Debug, Clone)]
pub struct Session {
    pub texts: Vec<String>,
    pub started: bool,
    pub countdown: u32,
    pub mistakes: usize,
    pub mistaking: bool,
    pub current_text_index: usize,
    /// Offset into the current text, counted in chars rather than bytes.
    pub current_char_index: usize,
    pub start_at: Option<Instant>,
    pub end_at: Option<Instant>,
}

impl Session {
    pub fn new(texts: Vec<String>) -> Self {
        Self {
            texts,
            started: false,
            countdown: COUNTDOWN_SECS,
            mistakes: 0,
            mistaking: false,
            current_text_index: 0,
            current_char_index: 0,
            start_at: None,
            end_at: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_text_index == self.texts.len()
    }

    /// Countdown finished and there is still text left to type.
    pub fn is_running(&self) -> bool {
        self.started && self.countdown == 0 && !self.is_complete()
    }

    pub fn current_text(&self) -> Option<&str> {
        self.texts.get(self.current_text_index).map(String::as_str)
    }

    pub fn current_char(&self) -> Option<char> {
        self.current_text()?.chars().nth(self.current_char_index)
    }

    /// Splits the active text into typed / current / remaining parts.
    pub fn split_current(&self) -> (String, Option<char>, String) {
        let Some(text) = self.current_text() else {
            return (String::new(), None, String::new());
        };
        let mut chars = text.chars();
        let typed: String = chars.by_ref().take(self.current_char_index).collect();
        let current = chars.next();
        let remaining: String = chars.collect();
        (typed, current, remaining)
    }

    pub fn total_chars(&self) -> usize {
        self.texts.iter().map(|t| t.chars().count()).sum()
    }

    pub fn elapsed(&self) -> Option<Duration> {
        match (self.start_at, self.end_at) {
            (Some(start), Some(end)) => Some(end.saturating_duration_since(start)),
            _ => None,
        }
    }

    pub fn record(&self) -> Option<Duration> {
        self.elapsed().map(truncate_to_millis)
    }

    /// Time spent typing so far, as seen at `now`.
    pub fn current_record(&self, now: Instant) -> Duration {
        self.start_at
            .map(|start| truncate_to_millis(now.saturating_duration_since(start)))
            .unwrap_or_default()
    }

    /// Characters per minute over the gross elapsed time.
    ///
    /// A zero-length round divides by zero and yields `inf`; callers format it
    /// with a saturating cast rather than treating it as an error.
    pub fn wpm(&self) -> Option<f64> {
        self.elapsed()
            .map(|elapsed| self.total_chars() as f64 / elapsed.as_secs_f64() * 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(texts: &[&str]) -> Session {
        Session::new(texts.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn test_session_new() {
        let s = session(&["hello", "world"]);

        assert!(!s.started);
        assert_eq!(s.countdown, COUNTDOWN_SECS);
        assert_eq!(s.mistakes, 0);
        assert!(!s.mistaking);
        assert_eq!(s.current_text_index, 0);
        assert_eq!(s.current_char_index, 0);
        assert!(s.start_at.is_none());
        assert!(s.end_at.is_none());
        assert!(!s.is_complete());
        assert!(!s.is_running());
    }

    #[test]
    fn test_is_running_after_countdown_until_complete() {
        let mut s = session(&["a"]);
        s.started = true;
        assert!(!s.is_running());

        s.countdown = 0;
        assert!(s.is_running());

        s.current_text_index = 1;
        assert!(s.is_complete());
        assert!(!s.is_running());
    }

    #[test]
    fn test_split_current_excludes_current_from_remaining() {
        let mut s = session(&["hello"]);
        s.current_char_index = 2;

        let (typed, current, remaining) = s.split_current();

        assert_eq!(typed, "he");
        assert_eq!(current, Some('l'));
        assert_eq!(remaining, "lo");
    }

    #[test]
    fn test_split_current_multibyte() {
        let mut s = session(&["café naïve"]);
        s.current_char_index = 3;

        let (typed, current, remaining) = s.split_current();

        assert_eq!(typed, "caf");
        assert_eq!(current, Some('é'));
        assert_eq!(remaining, " naïve");
        assert_eq!(s.current_char(), Some('é'));
    }

    #[test]
    fn test_split_current_when_complete() {
        let mut s = session(&["hi"]);
        s.current_text_index = 1;

        assert_eq!(s.split_current(), (String::new(), None, String::new()));
        assert_eq!(s.current_char(), None);
    }

    #[test]
    fn test_total_chars_counts_code_points() {
        let s = session(&["hi", "日本語", "é"]);
        assert_eq!(s.total_chars(), 6);
    }

    #[test]
    fn test_wpm_sixty_chars_in_a_minute() {
        let text = "a".repeat(60);
        let mut s = session(&[text.as_str()]);
        let start = Instant::now();
        s.start_at = Some(start);
        s.end_at = Some(start + Duration::from_secs(60));

        assert_eq!(s.wpm(), Some(60.0));
    }

    #[test]
    fn test_wpm_zero_duration_is_not_finite() {
        let mut s = session(&["abc"]);
        let now = Instant::now();
        s.start_at = Some(now);
        s.end_at = Some(now);

        assert!(!s.wpm().unwrap().is_finite());
    }

    #[test]
    fn test_wpm_before_completion() {
        let s = session(&["abc"]);
        assert_eq!(s.wpm(), None);
    }

    #[test]
    fn test_record_truncates_to_millis() {
        let mut s = session(&["abc"]);
        let start = Instant::now();
        s.start_at = Some(start);
        s.end_at = Some(start + Duration::from_micros(1_234_567));

        assert_eq!(s.record(), Some(Duration::from_millis(1_234)));
    }

    #[test]
    fn test_current_record() {
        let mut s = session(&["abc"]);
        let start = Instant::now();

        assert_eq!(s.current_record(start), Duration::ZERO);

        s.start_at = Some(start);
        assert_eq!(
            s.current_record(start + Duration::from_micros(2_500_900)),
            Duration::from_millis(2_500)
        );
    }
}

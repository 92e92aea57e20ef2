use std::time::Instant;

use crate::session::Session;

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// Scores one keystroke against the current character and advances on a hit.
///
/// `typed` is `None` for keys that produce no character; those never match.
/// Completing the last text stamps `end_at` with `now`.
pub fn apply_keystroke(session: &mut Session, typed: Option<char>, now: Instant) -> Outcome {
    let expected = session.current_char();
    if typed.is_none() || typed != expected {
        session.mistaking = true;
        session.mistakes += 1;
        return Outcome::Incorrect;
    }

    session.mistaking = false;
    session.current_char_index += 1;

    let text_len = session.current_text().map_or(0, |t| t.chars().count());
    if session.current_char_index == text_len {
        session.current_char_index = 0;
        session.current_text_index += 1;

        if session.is_complete() {
            session.end_at = Some(now);
        }
    }

    Outcome::Correct
}

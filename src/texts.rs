use cgisf_lib::cgisf;
use rand::Rng;

/// Supplies the practice texts for one round.
///
/// Implementations must return exactly `count` non-empty strings.
pub trait TextSource: std::fmt::Debug {
    fn generate(&mut self, count: usize) -> Vec<String>;
}

/// Random short sentences built by cgisf.
#[derive(Debug, Default, Clone, Copy)]
pub struct PhraseSource;

impl PhraseSource {
    fn phrase(rng: &mut impl Rng) -> String {
        loop {
            let s = cgisf(
                rng.gen_range(1..3),
                rng.gen_range(1..3),
                rng.gen_range(1..5),
                rng.gen_bool(0.5),
                rng.gen_range(1..3),
                rng.gen_bool(0.5),
            );
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }
}

impl TextSource for PhraseSource {
    fn generate(&mut self, count: usize) -> Vec<String> {
        let mut rng = rand::thread_rng();
        (0..count).map(|_| Self::phrase(&mut rng)).collect()
    }
}

/// Caller-supplied texts, repeated in order until `count` is reached.
#[derive(Debug, Clone)]
pub struct FixedTexts {
    texts: Vec<String>,
}

impl FixedTexts {
    /// Returns `None` when no non-empty text is left after filtering.
    ///
    /// CRLF and lone CR line endings become `\n`, the char Enter types.
    pub fn new<I, S>(texts: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let texts: Vec<String> = texts
            .into_iter()
            .map(Into::<String>::into)
            .map(|t| t.replace("\r\n", "\n").replace('\r', "\n"))
            .filter(|t| !t.is_empty())
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(Self { texts })
        }
    }
}

impl TextSource for FixedTexts {
    fn generate(&mut self, count: usize) -> Vec<String> {
        self.texts.iter().cycle().take(count).cloned().collect()
    }
}

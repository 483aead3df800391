use rand::RngExt;

use crate::domain::repository::{CounterPort, VerificationCodeGenerator};
use crate::domain::types::{
    CodeStrategy, SHORT_CODE_ALPHABET, SHORT_CODE_LEN, SPEAKABLE_LETTERS, SPEAKABLE_PREFIX_LEN,
    VERIFICATION_CODE_SEQUENCE,
};
use crate::error::TicketingError;

// ── Sequential speakable codes ────────────────────────────────────────────────

/// `<two speakable letters><counter>`, e.g. `GD10042`.
///
/// Uniqueness comes from the counter; the letters only make the code easier to
/// read out over a radio.
#[derive(Clone)]
pub struct SequentialSpeakableCodes<C: CounterPort> {
    pub counter: C,
}

impl<C: CounterPort> VerificationCodeGenerator for SequentialSpeakableCodes<C> {
    async fn generate(&self) -> Result<String, TicketingError> {
        let seq = self
            .counter
            .increment_and_fetch(VERIFICATION_CODE_SEQUENCE)
            .await?;
        Ok(format!("{}{seq}", speakable_prefix()))
    }
}

fn speakable_prefix() -> String {
    let mut rng = rand::rng();
    (0..SPEAKABLE_PREFIX_LEN)
        .map(|_| SPEAKABLE_LETTERS[rng.random_range(0..SPEAKABLE_LETTERS.len())])
        .collect()
}

// ── Random short codes ────────────────────────────────────────────────────────

/// Nine characters drawn uniformly from [`SHORT_CODE_ALPHABET`].
#[derive(Clone, Copy, Default)]
pub struct RandomShortCodes;

impl VerificationCodeGenerator for RandomShortCodes {
    async fn generate(&self) -> Result<String, TicketingError> {
        Ok(short_code())
    }
}

fn short_code() -> String {
    let mut rng = rand::rng();
    (0..SHORT_CODE_LEN)
        .map(|_| SHORT_CODE_ALPHABET[rng.random_range(0..SHORT_CODE_ALPHABET.len())] as char)
        .collect()
}

// ── Configured dispatch ───────────────────────────────────────────────────────

/// Generator selected by `VERIFICATION_CODE_STRATEGY` at startup.
#[derive(Clone)]
pub enum ConfiguredCodes<C: CounterPort> {
    Sequential(SequentialSpeakableCodes<C>),
    Random(RandomShortCodes),
}

impl<C: CounterPort> ConfiguredCodes<C> {
    pub fn new(strategy: CodeStrategy, counter: C) -> Self {
        match strategy {
            CodeStrategy::Sequential => Self::Sequential(SequentialSpeakableCodes { counter }),
            CodeStrategy::Random => Self::Random(RandomShortCodes),
        }
    }
}

impl<C: CounterPort> VerificationCodeGenerator for ConfiguredCodes<C> {
    async fn generate(&self) -> Result<String, TicketingError> {
        match self {
            Self::Sequential(g) => g.generate().await,
            Self::Random(g) => g.generate().await,
        }
    }
}

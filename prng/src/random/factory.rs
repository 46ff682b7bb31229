//! Generator selection
//!
//! Algorithms are chosen explicitly through [`GeneratorKind`], usually carried
//! in a [`GeneratorConfig`] that the caller parses from its own configuration.
//! Nothing here consults the environment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{DefaultRandom, Mcg1Random, Random, RandomError};

/// Available generator algorithms
///
/// Serializes as its canonical name. Deserializes through [`FromStr`], so
/// config files accept every name the parser does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum GeneratorKind {
    /// Hash-based counter generator ([`DefaultRandom`])
    #[default]
    Default,

    /// 63-bit multiplicative congruential generator ([`Mcg1Random`])
    Mcg1,
}

impl GeneratorKind {
    /// All registered kinds, in declaration order
    pub const ALL: [GeneratorKind; 2] = [GeneratorKind::Default, GeneratorKind::Mcg1];

    /// Canonical configuration name
    pub fn name(&self) -> &'static str {
        match self {
            GeneratorKind::Default => "default",
            GeneratorKind::Mcg1 => "mcg1",
        }
    }

    /// Construct a generator of this kind
    ///
    /// # Errors
    /// Returns [`RandomError::ZeroSeed`] if the algorithm rejects `seed`.
    pub fn build(&self, seed: i64) -> Result<Box<dyn Random + Send>, RandomError> {
        tracing::debug!(kind = self.name(), seed, "creating generator");
        let rng: Box<dyn Random + Send> = match self {
            GeneratorKind::Default => Box::new(DefaultRandom::new(seed)),
            GeneratorKind::Mcg1 => Box::new(Mcg1Random::new(seed)?),
        };
        Ok(rng)
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneratorKind {
    type Err = RandomError;

    /// Parse a kind from its canonical name or its legacy algorithm name
    ///
    /// Accepts `default` / `mcg1` in any case, and `DefaultRandom` /
    /// `Mcg1Random`, optionally package-qualified (`a.b.Mcg1Random`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let short = trimmed.rsplit('.').next().unwrap_or(trimmed);
        match short.to_ascii_lowercase().as_str() {
            "default" | "defaultrandom" => Ok(GeneratorKind::Default),
            "mcg1" | "mcg1random" => Ok(GeneratorKind::Mcg1),
            _ => Err(RandomError::UnknownKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for GeneratorKind {
    type Error = RandomError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// Algorithm and seed for one generator
///
/// # Example
/// ```
/// use parallel_prng::{GeneratorConfig, GeneratorKind};
///
/// let config = GeneratorConfig::from_json(r#"{"kind": "mcg1", "seed": 7}"#).unwrap();
/// assert_eq!(config.kind, GeneratorKind::Mcg1);
///
/// let mut rng = config.build().unwrap();
/// let x = rng.next_double();
/// assert!((0.0..1.0).contains(&x));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Algorithm to instantiate
    #[serde(default)]
    pub kind: GeneratorKind,

    /// Initial seed
    pub seed: i64,
}

impl GeneratorConfig {
    pub fn new(kind: GeneratorKind, seed: i64) -> Self {
        Self { kind, seed }
    }

    /// Parse a config from a JSON object
    ///
    /// # Errors
    /// Returns [`RandomError::InvalidConfig`] if the JSON is malformed or the
    /// kind is unknown.
    pub fn from_json(json: &str) -> Result<Self, RandomError> {
        serde_json::from_str(json).map_err(|e| RandomError::InvalidConfig(e.to_string()))
    }

    /// Construct the configured generator
    ///
    /// # Errors
    /// Returns [`RandomError::ZeroSeed`] if the algorithm rejects the seed.
    pub fn build(&self) -> Result<Box<dyn Random + Send>, RandomError> {
        self.kind.build(self.seed)
    }
}

/// Construct a generator of `kind` seeded with `seed`
pub fn create(kind: GeneratorKind, seed: i64) -> Result<Box<dyn Random + Send>, RandomError> {
    kind.build(seed)
}

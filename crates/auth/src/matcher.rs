//! Hashed credential matching.
//!
//! Stored credentials are `hex(D^n(salt || password))`: the salt (if any) is
//! fed ahead of the password, then the digest is re-applied to its own output
//! until `n` rounds have run.

use sha2::Digest;
use subtle::ConstantTimeEq;
use thiserror::Error;

use realmkit_core::{DescribableEnum, describable_enum};

use crate::config::{HashSettings, effective_iterations};

describable_enum! {
    /// One-way hash functions the matcher can apply.
    pub enum HashAlgorithm: &'static str {
        Md5 => ("MD5", "MD5 (128-bit); legacy credential stores only"),
        Sha1 => ("SHA-1", "SHA-1 (160-bit); legacy credential stores only"),
        Sha224 => ("SHA-224", "SHA-224 (224-bit)"),
        Sha256 => ("SHA-256", "SHA-256 (256-bit)"),
        Sha384 => ("SHA-384", "SHA-384 (384-bit)"),
        Sha512 => ("SHA-512", "SHA-512 (512-bit)"),
    }
}

impl HashAlgorithm {
    /// Parse an algorithm identifier.
    ///
    /// Case-insensitive; the dash is optional (`"sha256"` == `"SHA-256"`).
    pub fn parse(id: &str) -> Result<Self, MatcherError> {
        let wanted = normalize(id);
        Self::variants()
            .iter()
            .copied()
            .find(|alg| normalize(alg.value()) == wanted)
            .ok_or_else(|| MatcherError::UnsupportedAlgorithm(id.to_string()))
    }

    fn hash(self, source: &[u8], salt: Option<&[u8]>, iterations: u32) -> Vec<u8> {
        match self {
            HashAlgorithm::Md5 => iterated::<md5::Md5>(source, salt, iterations),
            HashAlgorithm::Sha1 => iterated::<sha1::Sha1>(source, salt, iterations),
            HashAlgorithm::Sha224 => iterated::<sha2::Sha224>(source, salt, iterations),
            HashAlgorithm::Sha256 => iterated::<sha2::Sha256>(source, salt, iterations),
            HashAlgorithm::Sha384 => iterated::<sha2::Sha384>(source, salt, iterations),
            HashAlgorithm::Sha512 => iterated::<sha2::Sha512>(source, salt, iterations),
        }
    }
}

fn normalize(id: &str) -> String {
    id.trim()
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn iterated<D: Digest>(source: &[u8], salt: Option<&[u8]>, iterations: u32) -> Vec<u8> {
    let mut hasher = D::new();
    if let Some(salt) = salt {
        hasher.update(salt);
    }
    hasher.update(source);
    let mut hashed = hasher.finalize().to_vec();

    for _ in 1..iterations {
        hashed = D::digest(&hashed).to_vec();
    }

    hashed
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatcherError {
    #[error("unsupported hash algorithm '{0}'")]
    UnsupportedAlgorithm(String),
}

/// Strategy deciding whether a submitted credential matches the stored one.
///
/// The realm never compares passwords itself; it hands both sides to a matcher.
pub trait CredentialsMatcher: Send + Sync {
    /// `stored` and `salt` come verbatim from the account record.
    fn matches(&self, submitted: &[u8], stored: &str, salt: Option<&[u8]>) -> bool;
}

/// Salted, iterated digest matcher.
///
/// Configuration is fixed at construction and read-only afterwards, so one
/// matcher can be shared by every login in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashedCredentialsMatcher {
    algorithm: HashAlgorithm,
    iterations: u32,
}

impl HashedCredentialsMatcher {
    /// `configured_iterations <= 0` selects
    /// [`DEFAULT_HASH_ITERATIONS`](crate::DEFAULT_HASH_ITERATIONS).
    pub fn new(algorithm: HashAlgorithm, configured_iterations: i32) -> Self {
        Self {
            algorithm,
            iterations: effective_iterations(configured_iterations),
        }
    }

    /// Build from an algorithm identifier such as `"SHA-256"`.
    pub fn from_id(algorithm: &str, configured_iterations: i32) -> Result<Self, MatcherError> {
        Ok(Self::new(HashAlgorithm::parse(algorithm)?, configured_iterations))
    }

    pub fn from_settings(settings: &HashSettings) -> Result<Self, MatcherError> {
        Self::from_id(&settings.algorithm, settings.iterations)
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Effective iteration count (never zero).
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Hash a plaintext credential into its stored (lowercase hex) form.
    pub fn hash_credentials(&self, password: &[u8], salt: Option<&[u8]>) -> String {
        hex::encode(self.algorithm.hash(password, salt, self.iterations))
    }
}

impl CredentialsMatcher for HashedCredentialsMatcher {
    fn matches(&self, submitted: &[u8], stored: &str, salt: Option<&[u8]>) -> bool {
        let Ok(expected) = hex::decode(stored.trim()) else {
            return false;
        };
        let actual = self.algorithm.hash(submitted, salt, self.iterations);
        actual.ct_eq(&expected).into()
    }
}

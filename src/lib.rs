//! This library generates time-based one-time passcodes (TOTP) as per [rfc-6238](https://tools.ietf.org/html/rfc6238),
//! on top of the HMAC-based one-time password construction of [rfc-4226](https://tools.ietf.org/html/rfc4226).
//! Given the shared secret and the time, it reproduces the code a verifying server computes on its side.
//! Digest, number of digits, step and epoch are all configurable, and default to SHA-512, 10 digits, 30 seconds and the Unix epoch.
//!
//! Verifying codes against an acceptance window, provisioning secrets and rendering QR codes are left to the caller.
//!
//! # Examples
//!
//! ```rust
//! use totp_gen::Totp;
//!
//! let totp = Totp::new_default("ninja@example.comHENNGECHALLENGE003");
//! assert_eq!(totp.code_at(1594352095), "0517636551");
//!
//! let token = totp.code_now();
//! println!("{}", token);
//! ```
//!
//! ```rust
//! use totp_gen::{Algorithm, AlgorithmConfig, Totp};
//!
//! let totp = Totp::new(
//!     "12345678901234567890",
//!     AlgorithmConfig {
//!         digits: 8,
//!         epoch: 0,
//!         step: 30,
//!         algorithm: Algorithm::SHA1,
//!     },
//! ).unwrap();
//! assert_eq!(totp.code_at(1111111109), "07081804");
//! ```

mod config;
mod error;
mod rfc;
mod secret;

pub use config::{AlgorithmConfig, DEFAULT_DIGITS, DEFAULT_EPOCH, DEFAULT_STEP};
pub use error::InvalidConfig;
pub use rfc::{Rfc6238, Rfc6238Error};
pub use secret::Secret;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use core::fmt;

use hmac::Mac;
use log::{debug, trace, warn};
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha1 = hmac::Hmac<sha1::Sha1>;
type HmacSha256 = hmac::Hmac<sha2::Sha256>;
type HmacSha512 = hmac::Hmac<sha2::Sha512>;

/// Dynamic truncation reads 4 bytes starting at an offset of at most 15, so byte 18 is the last one it can touch
const MIN_DIGEST_SIZE: usize = 19;

/// Builds a fresh keyed-hash context for every signature
///
/// Implement this to plug a digest that [Algorithm](enum.Algorithm.html) doesn't cover.
/// `sign` must always return exactly `output_size()` bytes.
pub trait KeyedHash {
    /// Sign `data` with `key`
    fn sign(&self, key: &[u8], data: &[u8]) -> Vec<u8>;

    /// Length in bytes of what [sign](trait.KeyedHash.html#tymethod.sign) returns
    fn output_size(&self) -> usize;
}

/// Algorithm enum holds the three standards algorithms for TOTP as per the [reference implementation](https://tools.ietf.org/html/rfc6238#appendix-A)
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum Algorithm {
    SHA1,
    SHA256,
    SHA512,
}

impl std::default::Default for Algorithm {
    fn default() -> Self {
        Algorithm::SHA512
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::SHA1 => f.write_str("SHA1"),
            Algorithm::SHA256 => f.write_str("SHA256"),
            Algorithm::SHA512 => f.write_str("SHA512"),
        }
    }
}

impl Algorithm {
    fn hash<D>(mut digest: D, data: &[u8]) -> Vec<u8>
    where
        D: Mac,
    {
        digest.update(data);
        digest.finalize().into_bytes().to_vec()
    }
}

impl KeyedHash for Algorithm {
    fn sign(&self, key: &[u8], data: &[u8]) -> Vec<u8> {
        // HMAC accepts keys of any length, so building the MAC never fails
        match self {
            Algorithm::SHA1 => Algorithm::hash(
                HmacSha1::new_from_slice(key).expect("HMAC can take a key of any size"),
                data,
            ),
            Algorithm::SHA256 => Algorithm::hash(
                HmacSha256::new_from_slice(key).expect("HMAC can take a key of any size"),
                data,
            ),
            Algorithm::SHA512 => Algorithm::hash(
                HmacSha512::new_from_slice(key).expect("HMAC can take a key of any size"),
                data,
            ),
        }
    }

    fn output_size(&self) -> usize {
        match self {
            Algorithm::SHA1 => 20,
            Algorithm::SHA256 => 32,
            Algorithm::SHA512 => 64,
        }
    }
}

/// Unix time in seconds. A clock set before 1970 gives a negative value
fn system_time() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX),
        Err(err) => i64::try_from(err.duration().as_secs()).map_or(i64::MIN, |secs| -secs),
    }
}

fn saturate(value: i128) -> i64 {
    value.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

/// RFC 4226 dynamic truncation: 31 bits read at the offset given by the low nibble of the last byte
///
/// `None` when the digest is too short to hold the 4 bytes at that offset.
fn truncate(hmac: &[u8]) -> Option<u32> {
    let offset = (hmac.last()? & 0x0f) as usize;
    let word: [u8; 4] = hmac.get(offset..offset + 4)?.try_into().ok()?;
    Some(u32::from_be_bytes(word) & 0x7fff_ffff)
}

/// Keep the last `digits` decimal digits of `code`, left-padded with zeroes
fn format_code(code: u32, digits: usize) -> String {
    let code = match u32::try_from(digits)
        .ok()
        .and_then(|exp| 10_u64.checked_pow(exp))
    {
        Some(modulus) => u64::from(code) % modulus,
        // 10^digits doesn't fit in a u64, let alone in 31 bits
        None => u64::from(code),
    };
    // runtime format widths are capped at u16::MAX, digits isn't
    let code = code.to_string();
    let mut padded = "0".repeat(digits.saturating_sub(code.len()));
    padded.push_str(&code);
    padded
}

/// Totp holds the shared secret and the [configuration](struct.AlgorithmConfig.html) codes are derived with.
/// Both are fixed for the lifetime of the generator.
///
/// Every call builds its own keyed-hash context, so a `Totp` can be shared between threads as-is.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize))]
pub struct Totp<H = Algorithm> {
    secret: Secret,
    config: AlgorithmConfig<H>,
}

impl<H: fmt::Display> fmt::Display for Totp<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "digits: {}; step: {}; epoch: {}; alg: {}",
            self.config.digits, self.config.step, self.config.epoch, self.config.algorithm,
        )
    }
}

/// Goes through [Totp::new](struct.Totp.html#method.new), so a stored configuration gets the same checks as a fresh one
#[cfg(feature = "serde_support")]
impl<'de, H> Deserialize<'de> for Totp<H>
where
    H: KeyedHash + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Fields<H> {
            secret: Secret,
            config: AlgorithmConfig<H>,
        }

        let fields = Fields::deserialize(deserializer)?;
        Totp::new(fields.secret, fields.config).map_err(serde::de::Error::custom)
    }
}

impl Totp {
    /// Will create a new instance of Totp with the [default configuration](struct.AlgorithmConfig.html#impl-Default-for-AlgorithmConfig):
    /// 10 digits, 30 seconds steps counted from the Unix epoch, HMAC-SHA-512
    ///
    /// * `secret`: raw bytes of the shared key. A `&str` is used as its UTF-8 bytes, nothing gets decoded
    pub fn new_default<S: Into<Secret>>(secret: S) -> Totp {
        Totp {
            secret: secret.into(),
            config: AlgorithmConfig::default(),
        }
    }

    /// Will create a new instance of Totp from the given [Rfc6238](struct.Rfc6238.html) struct
    pub fn from_rfc6238(rfc: Rfc6238) -> Result<Totp, InvalidConfig> {
        Totp::try_from(rfc)
    }
}

impl<H: KeyedHash> Totp<H> {
    /// Will create a new instance of Totp with given secret and configuration
    ///
    /// # Errors
    ///
    /// Will return an [InvalidConfig](enum.InvalidConfig.html) when
    /// - `digits` is 0
    /// - `step` is 0
    /// - the keyed hash outputs less than 19 bytes, either by its own account or when actually signing
    pub fn new<S: Into<Secret>>(secret: S, config: AlgorithmConfig<H>) -> Result<Totp<H>, InvalidConfig> {
        let secret = secret.into();
        let checked = if config.digits == 0 {
            Err(InvalidConfig::Digits(config.digits))
        } else if config.step == 0 {
            Err(InvalidConfig::Step(config.step))
        } else {
            let signed = config
                .algorithm
                .sign(secret.as_bytes(), 0_u64.to_be_bytes().as_ref())
                .len();
            let size = config.algorithm.output_size().min(signed);
            if size < MIN_DIGEST_SIZE {
                Err(InvalidConfig::DigestSize(size))
            } else {
                Ok(())
            }
        };
        if let Err(err) = checked {
            debug!("rejecting TOTP configuration: {}", err);
            return Err(err);
        }
        Ok(Totp { secret, config })
    }

    /// The configuration this generator was built with
    pub fn config(&self) -> &AlgorithmConfig<H> {
        &self.config
    }

    /// Number of whole steps between the epoch and `timestamp`.
    ///
    /// The division truncates toward zero, so every timestamp strictly between `epoch - step` and `epoch + step` maps to counter 0,
    /// and earlier timestamps give negative counters. RFC 6238 floors instead, the two only disagree before the epoch.
    /// Saturates at the bounds of `i64`.
    pub fn counter_at(&self, timestamp: i64) -> i64 {
        saturate(self.steps(timestamp))
    }

    fn steps(&self, timestamp: i64) -> i128 {
        (timestamp as i128 - self.config.epoch as i128) / self.config.step as i128
    }

    /// Will sign the given counter, serialized as 8 big-endian bytes
    pub fn sign(&self, counter: u64) -> Vec<u8> {
        self.config
            .algorithm
            .sign(self.secret.as_bytes(), counter.to_be_bytes().as_ref())
    }

    /// Will generate the [rfc-4226](https://tools.ietf.org/html/rfc4226#section-5.3) HOTP value of the given counter
    ///
    /// A [KeyedHash](trait.KeyedHash.html) that signs fewer bytes than truncation needs yields an all-zero code.
    pub fn code_at_counter(&self, counter: u64) -> String {
        let hmac = self.sign(counter);
        let code = truncate(&hmac).unwrap_or_else(|| {
            warn!("keyed hash returned {} bytes, too short to truncate", hmac.len());
            0
        });
        format_code(code, self.config.digits)
    }

    /// Will generate a token given the provided timestamp in seconds
    ///
    /// Any timestamp is accepted. Counters before the epoch are negative and get signed as their two's complement.
    pub fn code_at(&self, timestamp: i64) -> String {
        let counter = self.steps(timestamp);
        trace!("deriving code for counter {}", counter);
        // keep the low 64 bits
        self.code_at_counter(counter as u64)
    }

    /// Generate a token from the current system time
    pub fn code_now(&self) -> String {
        self.code_at(system_time())
    }

    /// Returns the first second at which the counter moves away from the one of `timestamp`
    ///
    /// Saturates at `i64::MAX`.
    pub fn next_step(&self, timestamp: i64) -> i64 {
        saturate(self.config.epoch as i128 + self.boundary(timestamp))
    }

    /// Offset from the epoch of the next counter change
    fn boundary(&self, timestamp: i64) -> i128 {
        let steps = self.steps(timestamp);
        let step = self.config.step as i128;
        if steps < 0 {
            // counter c < 0 covers (c*step - step, c*step]
            steps * step + 1
        } else {
            (steps + 1) * step
        }
    }

    /// Returns the first second of the next step according to system time
    pub fn next_step_current(&self) -> i64 {
        self.next_step(system_time())
    }

    /// Seconds left before the code of `timestamp` changes
    pub fn ttl_at(&self, timestamp: i64) -> u64 {
        let remaining =
            self.config.epoch as i128 + self.boundary(timestamp) - timestamp as i128;
        u64::try_from(remaining).unwrap_or(u64::MAX)
    }

    /// Give the ttl (in seconds) of the current token
    pub fn ttl(&self) -> u64 {
        self.ttl_at(system_time())
    }
}

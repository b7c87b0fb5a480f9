use crate::Algorithm;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Number of digits in a code unless configured otherwise
pub const DEFAULT_DIGITS: usize = 10;
/// Unix time, in seconds, at which counting starts unless configured otherwise
pub const DEFAULT_EPOCH: i64 = 0;
/// Duration of a step, in seconds, unless configured otherwise
pub const DEFAULT_STEP: u64 = 30;

/// How codes are derived: digest, length of the code, and how time maps to the HOTP counter
///
/// This is a plain value. It is only checked when handed to [Totp::new](struct.Totp.html#method.new),
/// which is where an invalid configuration gets rejected.
///
/// # Example
/// ```
/// use totp_gen::{Algorithm, AlgorithmConfig, Totp};
///
/// let config = AlgorithmConfig {
///     digits: 6,
///     algorithm: Algorithm::SHA1,
///     ..AlgorithmConfig::default()
/// };
/// let totp = Totp::new("12345678901234567890", config).unwrap();
/// assert_eq!(totp.code_at(59), "287082");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct AlgorithmConfig<H = Algorithm> {
    /// Number of decimal digits of a code. Defaults to 10, RFC 6238 deployments usually use 6
    pub digits: usize,
    /// `T0`, the Unix time in seconds treated as counter zero
    pub epoch: i64,
    /// `X`, the number of seconds per counter increment
    pub step: u64,
    /// Keyed hash used to sign the counter. Defaults to HMAC-SHA-512
    pub algorithm: H,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        AlgorithmConfig {
            digits: DEFAULT_DIGITS,
            epoch: DEFAULT_EPOCH,
            step: DEFAULT_STEP,
            algorithm: Algorithm::SHA512,
        }
    }
}

impl<H> AlgorithmConfig<H> {
    /// Same timing and length, different keyed hash
    pub fn with_algorithm<K>(self, algorithm: K) -> AlgorithmConfig<K> {
        AlgorithmConfig {
            digits: self.digits,
            epoch: self.epoch,
            step: self.step,
            algorithm,
        }
    }
}

use crate::Algorithm;
use crate::AlgorithmConfig;
use crate::InvalidConfig;
use crate::Secret;
use crate::Totp;

/// Data is not compliant to [rfc-6238](https://tools.ietf.org/html/rfc6238)
#[derive(Debug, Eq, PartialEq)]
pub enum Rfc6238Error {
    /// Implementations MUST extract a 6-digit code at a minimum and possibly 7 and 8-digit code
    InvalidDigits,
    /// The length of the shared secret MUST be at least 128 bits
    SecretTooSmall,
}

impl std::error::Error for Rfc6238Error {}

impl std::fmt::Display for Rfc6238Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rfc6238Error::InvalidDigits => write!(
                f,
                "Implementations MUST extract a 6-digit code at a minimum and possibly 7 and 8-digit code"
            ),
            Rfc6238Error::SecretTooSmall => write!(
                f,
                "The length of the shared secret MUST be at least 128 bits"
            ),
        }
    }
}

fn assert_digits(digits: usize) -> Result<(), Rfc6238Error> {
    if !(6..=8).contains(&digits) {
        Err(Rfc6238Error::InvalidDigits)
    } else {
        Ok(())
    }
}

/// [rfc-6238](https://tools.ietf.org/html/rfc6238) compliant set of options to create a [Totp](struct.Totp.html)
///
/// Unlike [AlgorithmConfig](struct.AlgorithmConfig.html), which accepts any positive digit count,
/// this only allows what authenticator apps are required to support.
///
/// # Example
/// ```
/// use totp_gen::{Algorithm, Rfc6238, Totp};
///
/// let mut rfc = Rfc6238::with_defaults("totp-sercret-123").unwrap();
///
/// // optional, set digits and algorithm
/// rfc.digits(8).unwrap();
/// rfc.algorithm(Algorithm::SHA256);
///
/// let totp = Totp::from_rfc6238(rfc).unwrap();
/// assert_eq!(totp.code_now().len(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct Rfc6238 {
    /// SHA-1 unless told otherwise
    algorithm: Algorithm,
    /// The number of digits composing the auth code. Per [rfc-4226](https://tools.ietf.org/html/rfc4226#section-5.3), this can oscilate between 6 and 8 digits
    digits: usize,
    /// The recommended value per [rfc-6238](https://tools.ietf.org/html/rfc6238#section-5.2) is 30 seconds
    step: u64,
    /// As per [rfc-4226](https://tools.ietf.org/html/rfc4226#section-4) the secret should come from a strong source, most likely a CSPRNG. It should be at least 128 bits, but 160 are recommended
    secret: Secret,
}

impl Rfc6238 {
    /// Create an [rfc-6238](https://tools.ietf.org/html/rfc6238) compliant set of options that can be turned into a [Totp](struct.Totp.html)
    ///
    /// # Errors
    ///
    /// will return a [Rfc6238Error](enum.Rfc6238Error.html) when
    /// - `digits` is lower than 6 or higher than 8
    /// - `secret` is smaller than 128 bits (16 bytes)
    pub fn new<S: Into<Secret>>(digits: usize, secret: S) -> Result<Rfc6238, Rfc6238Error> {
        assert_digits(digits)?;
        let secret = secret.into();
        if secret.len() < 16 {
            return Err(Rfc6238Error::SecretTooSmall);
        }
        Ok(Rfc6238 {
            algorithm: Algorithm::SHA1,
            digits,
            step: 30,
            secret,
        })
    }

    /// Create an [rfc-6238](https://tools.ietf.org/html/rfc6238) compliant set of options with a default value of 6 for `digits`
    ///
    /// # Errors
    ///
    /// will return [Rfc6238Error::SecretTooSmall](enum.Rfc6238Error.html) when `secret` is smaller than 128 bits (16 bytes)
    pub fn with_defaults<S: Into<Secret>>(secret: S) -> Result<Rfc6238, Rfc6238Error> {
        Rfc6238::new(6, secret)
    }

    /// Set the `digits`
    pub fn digits(&mut self, value: usize) -> Result<(), Rfc6238Error> {
        assert_digits(value)?;
        self.digits = value;
        Ok(())
    }

    /// Set the `algorithm`
    pub fn algorithm(&mut self, value: Algorithm) {
        self.algorithm = value;
    }
}

impl TryFrom<Rfc6238> for Totp {
    type Error = InvalidConfig;

    /// Try to create a [Totp](struct.Totp.html) from a [Rfc6238](struct.Rfc6238.html) config
    fn try_from(rfc: Rfc6238) -> Result<Self, Self::Error> {
        let config = AlgorithmConfig {
            digits: rfc.digits,
            epoch: 0,
            step: rfc.step,
            algorithm: rfc.algorithm,
        };
        Totp::new(rfc.secret, config)
    }
}

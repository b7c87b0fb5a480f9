/// A [TOTP](struct.Totp.html) could not be built from the given configuration
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InvalidConfig {
    /// The code must have at least one digit
    Digits(usize),
    /// A time step must last at least one second
    Step(u64),
    /// Dynamic truncation reads up to byte 18 of the digest, so it must be at least 19 bytes long
    DigestSize(usize),
}

impl std::error::Error for InvalidConfig {}

impl std::fmt::Display for InvalidConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidConfig::Digits(digits) => write!(
                f,
                "A code needs at least one digit. {} digits is not allowed",
                digits
            ),
            InvalidConfig::Step(step) => write!(
                f,
                "A time step must last at least one second, not {}",
                step
            ),
            InvalidConfig::DigestSize(size) => write!(
                f,
                "The digest must produce at least 19 bytes. {} bytes is too short",
                size
            ),
        }
    }
}

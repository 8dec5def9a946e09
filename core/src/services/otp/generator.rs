//! Numeric code generation

use rand::{rngs::OsRng, Rng};

/// Generate a fixed-width numeric code using the OS CSPRNG.
///
/// Each digit is drawn independently and uniformly from 0-9, so leading
/// zeros are as likely as any other digit.
pub fn generate_numeric_code(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

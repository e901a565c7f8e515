//! Verhoeff checksum, used to validate 12-digit Aadhaar numbers.

use thiserror::Error;

/// Multiplication table of the dihedral group D5
const D: [[u8; 10]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 2, 3, 4, 0, 6, 7, 8, 9, 5],
    [2, 3, 4, 0, 1, 7, 8, 9, 5, 6],
    [3, 4, 0, 1, 2, 8, 9, 5, 6, 7],
    [4, 0, 1, 2, 3, 9, 5, 6, 7, 8],
    [5, 9, 8, 7, 6, 0, 4, 3, 2, 1],
    [6, 5, 9, 8, 7, 1, 0, 4, 3, 2],
    [7, 6, 5, 9, 8, 2, 1, 0, 4, 3],
    [8, 7, 6, 5, 9, 3, 2, 1, 0, 4],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
];

/// Position-dependent permutation table
const P: [[u8; 10]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 5, 7, 6, 2, 8, 3, 0, 9, 4],
    [5, 8, 0, 3, 7, 9, 6, 1, 4, 2],
    [8, 9, 1, 6, 0, 4, 3, 5, 2, 7],
    [9, 4, 5, 3, 1, 2, 6, 8, 7, 0],
    [4, 2, 8, 6, 5, 7, 3, 9, 0, 1],
    [2, 7, 9, 3, 8, 0, 6, 4, 1, 5],
    [7, 0, 4, 6, 9, 1, 3, 2, 5, 8],
];

const INV: [u8; 10] = [0, 4, 3, 2, 1, 5, 6, 7, 8, 9];

/// Digits in an Aadhaar number
pub const AADHAAR_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AadhaarError {
    #[error("Invalid Aadhaar format")]
    InvalidFormat,

    #[error("Invalid Aadhaar checksum")]
    InvalidChecksum,
}

fn digits(input: &str) -> Option<Vec<u8>> {
    input
        .chars()
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect()
}

/// True when the last digit of `input` is a correct Verhoeff check digit.
/// Non-digit input is never valid.
pub fn verhoeff_check(input: &str) -> bool {
    let Some(digits) = digits(input) else {
        return false;
    };
    if digits.is_empty() {
        return false;
    }

    let c = digits
        .iter()
        .rev()
        .enumerate()
        .fold(0u8, |c, (i, &d)| D[c as usize][P[i % 8][d as usize] as usize]);

    c == 0
}

/// Check digit to append to `input`, or `None` for non-digit input
pub fn verhoeff_digit(input: &str) -> Option<u8> {
    let digits = digits(input)?;

    let c = digits
        .iter()
        .rev()
        .enumerate()
        .fold(0u8, |c, (i, &d)| D[c as usize][P[(i + 1) % 8][d as usize] as usize]);

    Some(INV[c as usize])
}

/// Validate an Aadhaar number: exactly 12 ASCII digits with a valid checksum
pub fn validate_aadhaar(aadhaar: &str) -> Result<(), AadhaarError> {
    if aadhaar.len() != AADHAAR_LEN || !aadhaar.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AadhaarError::InvalidFormat);
    }

    if !verhoeff_check(aadhaar) {
        return Err(AadhaarError::InvalidChecksum);
    }

    Ok(())
}

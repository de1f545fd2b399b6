//! Verification code generator.
//! Eight characters, each drawn uniformly from A-Z0-9. Codes are stamped on
//! the certificate for later eyeball verification; they are not persisted
//! and uniqueness is not guaranteed.

use rand::Rng;

const CODE_LENGTH: usize = 8;
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

// *************** Tests ***************

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_length() {
        assert_eq!(generate_code().len(), 8);
    }

    #[test]
    fn test_code_alphabet() {
        for _ in 0..50 {
            let code = generate_code();
            assert!(
                code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()),
                "unexpected character in code {}",
                code
            );
        }
    }

    #[test]
    fn test_codes_vary_across_calls() {
        // 36^8 possible codes; ten identical draws in a row would mean the
        // generator is stuck, not that we got unlucky.
        let first = generate_code();
        let all_same = (0..9).all(|_| generate_code() == first);
        assert!(!all_same);
    }
}

//! Exit code constants for the scheduler CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config)
//! - 2: Credential decryption failure
//! - 3: Import binary could not be launched
//! - 4: Import binary exited non-zero

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// Decryption failure: malformed ciphertext or the KMS call failed.
pub const DECRYPT_FAILURE: i32 = 2;

/// Launch failure: the import binary is missing or not executable.
pub const LAUNCH_FAILURE: i32 = 3;

/// Import failure: the import binary ran and reported failure.
pub const IMPORT_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            USER_ERROR,
            DECRYPT_FAILURE,
            LAUNCH_FAILURE,
            IMPORT_FAILURE,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn only_success_is_zero() {
        assert_eq!(SUCCESS, 0);
        assert!(USER_ERROR > 0);
        assert!(IMPORT_FAILURE > 0);
    }
}

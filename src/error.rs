//! Error types
//!
//! `Display` output is the user-facing message shown in alerts and message
//! boxes, so keep it readable.

use thiserror::Error;

use crate::consts::{NUMBERS_KEY, ROLLERS_COUNT};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// Guess field empty or not a number
    #[error("Please enter a valid number between {min} and {max}.")]
    InvalidGuess { min: u32, max: u32 },

    /// Guess parsed but lies outside the roller range
    #[error("Your number must be between {min} and {max}.")]
    GuessOutOfRange { value: i64, min: u32, max: u32 },

    /// Target numbers missing or malformed in storage
    #[error(
        "Please store {count} numbers between {min} and {max} in localStorage under key \"{key}\".\n\n\
         Example in console:\n\
         localStorage.setItem(\"{key}\", JSON.stringify([101, 123, 145, 167, 178, 189, 199]));",
        count = ROLLERS_COUNT,
        key = NUMBERS_KEY
    )]
    NotConfigured { min: u32, max: u32 },

    /// Underlying storage read or write failed
    #[error("storage error: {0}")]
    Storage(String),

    /// Setup field empty or not a number
    #[error("All {count} fields must be filled with valid numbers.", count = ROLLERS_COUNT)]
    SetupFieldInvalid { index: usize },

    #[error("Numbers must be between {min} and {max}.")]
    SetupOutOfRange {
        index: usize,
        value: i64,
        min: u32,
        max: u32,
    },

    #[error("All {count} numbers must be unique.", count = ROLLERS_COUNT)]
    SetupDuplicate { value: u32 },

    /// Persisted settings failed validation
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = DrawError::GuessOutOfRange {
            value: 250,
            min: 100,
            max: 199,
        };
        assert_eq!(err.to_string(), "Your number must be between 100 and 199.");

        let err = DrawError::NotConfigured { min: 100, max: 199 };
        assert!(err.to_string().contains("luckyDrawNumbers"));
        assert!(err.to_string().starts_with("Please store 7 numbers"));
        assert!(err.to_string().ends_with(
            "\n\nExample in console:\n\
             localStorage.setItem(\"luckyDrawNumbers\", JSON.stringify([101, 123, 145, 167, 178, 189, 199]));"
        ));

        assert_eq!(
            DrawError::SetupDuplicate { value: 120 }.to_string(),
            "All 7 numbers must be unique."
        );
    }
}

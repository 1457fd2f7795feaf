//! Error types for archetype data loading and validation.

use thiserror::Error;

/// Errors that can occur when loading or validating archetype data.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Directory or file could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A numeric field is outside its allowed range.
    #[error("Archetype '{archetype}': field '{field}' {requirement}, got {value}")]
    OutOfRange {
        archetype: String,
        field: &'static str,
        requirement: &'static str,
        value: f32,
    },

    /// The de-aggro radius must exceed the aggro radius.
    #[error("Archetype '{archetype}': de-aggro radius {deaggro} must be greater than aggro radius {aggro}")]
    RadiusOrder {
        archetype: String,
        aggro: f32,
        deaggro: f32,
    },

    /// Loot range with min above max.
    #[error("Archetype '{archetype}': loot range {min}..={max} is empty")]
    EmptyLootRange { archetype: String, min: u32, max: u32 },

    /// Boss with no attack pattern to cycle through.
    #[error("Archetype '{archetype}': boss attack pattern is empty")]
    EmptyPattern { archetype: String },

    /// Requested archetype is not registered.
    #[error("Unknown archetype '{0}'")]
    UnknownArchetype(String),
}

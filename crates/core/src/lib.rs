//! Core library for romannumeral
//!
//! This crate implements the **Functional Core** of the romannumeral
//! application, following the Functional Core - Imperative Shell
//! architectural pattern.
//!
//! - **`romannumeral_core`** (this crate): Pure validation and conversion
//!   functions with zero I/O
//! - **`romannumeral`**: CLI, HTTP serving and observability (the
//!   Imperative Shell)
//!
//! All functions in this crate are deterministic, side-effect free and
//! testable with plain fixture data. The only shared state is the
//! numeral table, a compile-time constant.
//!
//! # Example Usage
//!
//! ```rust
//! use romannumeral_core::roman::convert_input;
//!
//! let result = convert_input("  42  ").unwrap();
//! assert_eq!(result.input, "42");
//! assert_eq!(result.output, "XLII");
//! ```

pub mod roman;

pub use roman::{
    convert_input, to_roman, validate, ConversionResult, RangeError, ValidationErrorKind,
};

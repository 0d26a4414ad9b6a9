//! Carelog Analysis Library
//!
//! Turns extracted report text into a structured analysis by prompting an
//! external generative-language service and parsing its (possibly
//! malformed) response. The service client sits behind the
//! `GenerativeModel` trait so the composition root owns its lifecycle and
//! tests can substitute a canned model.

pub mod analyzer;
pub mod client;
pub mod error;
pub mod prompt;

pub use analyzer::{parse_model_output, ReportAnalyzer};
pub use client::{GeminiClient, GeminiConfig, GenerativeModel};
pub use error::{AiError, AiResult};

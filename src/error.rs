//! Error types for globalmatrix
//!
//! Matrix resolution itself never fails: absent, detached, and numerically
//! degenerate inputs resolve to documented fallback matrices. The error
//! types here cover the places where a caller can hand us something
//! malformed before resolution starts:
//! - Tree construction (unknown parent ids)
//! - Transform list parsing (bad function names, arity, units)
//! - Position keyword parsing
//!
//! All errors use the `thiserror` crate for minimal boilerplate and
//! proper error trait implementations.

use thiserror::Error;

use crate::style::PositionParseError;
use crate::style::TransformParseError;
use crate::tree::TreeError;

/// Result type alias for globalmatrix operations
///
/// # Examples
///
/// ```
/// use globalmatrix::Result;
///
/// fn build_scene() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for globalmatrix
///
/// Each variant wraps the more specific error type for that subsystem.
#[derive(Error, Debug)]
pub enum Error {
  /// Render tree construction error
  #[error("Tree error: {0}")]
  Tree(#[from] TreeError),

  /// Transform list parsing error
  #[error("Transform parse error: {0}")]
  TransformParse(#[from] TransformParseError),

  /// CSS position keyword parsing error
  #[error("Position parse error: {0}")]
  PositionParse(#[from] PositionParseError),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_display_includes_subsystem() {
    let err = Error::from(TreeError::NodeNotFound(crate::tree::NodeId(42)));
    let message = err.to_string();
    assert!(message.contains("Tree error"), "got: {message}");
    assert!(message.contains("42"), "got: {message}");
  }

  #[test]
  fn test_transform_parse_error_converts() {
    let parse_err = crate::style::parse_transform_list("warp(1)").unwrap_err();
    let err: Error = parse_err.into();
    assert!(err.to_string().contains("warp"));
  }
}

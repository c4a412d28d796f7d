//! CSS Position property
//!
//! The `position` property determines whether an element participates in
//! normal flow and what its offsets are anchored to. For transform
//! resolution the interesting value is `fixed`: a fixed-position node is
//! anchored to the viewport, so the ancestor walk stops there instead of
//! continuing toward the root.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// CSS position property value
///
/// # Examples
///
/// ```
/// use globalmatrix::Position;
///
/// let pos = Position::parse("fixed").unwrap();
/// assert!(pos.is_fixed());
/// assert!(!pos.is_in_flow());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
  /// Static positioning (normal flow, default)
  Static,

  /// Relative positioning (normal flow + offset)
  Relative,

  /// Absolute positioning (out of flow, containing-block relative)
  Absolute,

  /// Fixed positioning (out of flow, viewport-relative)
  ///
  /// The element stays in place during scrolling. Transform resolution
  /// stops ascending at a fixed node.
  Fixed,

  /// Sticky positioning (hybrid between relative and fixed)
  Sticky,
}

impl Default for Position {
  fn default() -> Self {
    Position::Static
  }
}

impl Position {
  /// Returns true if this is a positioned element
  ///
  /// Positioned elements are those with position values other than static.
  pub fn is_positioned(self) -> bool {
    !matches!(self, Position::Static)
  }

  /// Returns true if the element participates in normal flow
  ///
  /// Static, relative, and sticky elements are in-flow. Absolute and fixed
  /// elements are out-of-flow.
  pub fn is_in_flow(self) -> bool {
    matches!(
      self,
      Position::Static | Position::Relative | Position::Sticky
    )
  }

  /// Returns true if the element is fixed positioned
  pub fn is_fixed(self) -> bool {
    matches!(self, Position::Fixed)
  }

  /// Parse a position value from a CSS string
  ///
  /// # Examples
  ///
  /// ```
  /// use globalmatrix::Position;
  ///
  /// assert_eq!(Position::parse("absolute").unwrap(), Position::Absolute);
  /// assert_eq!(Position::parse(" FIXED ").unwrap(), Position::Fixed);
  /// assert!(Position::parse("floating").is_err());
  /// ```
  pub fn parse(s: &str) -> Result<Self, PositionParseError> {
    match s.trim().to_ascii_lowercase().as_str() {
      "static" => Ok(Position::Static),
      "relative" => Ok(Position::Relative),
      "absolute" => Ok(Position::Absolute),
      "fixed" => Ok(Position::Fixed),
      "sticky" => Ok(Position::Sticky),
      other => Err(PositionParseError::InvalidValue(other.to_string())),
    }
  }
}

/// Error when parsing a position value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionParseError {
  /// Invalid position value
  #[error("invalid position value: '{0}'")]
  InvalidValue(String),
}

impl fmt::Display for Position {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Position::Static => write!(f, "static"),
      Position::Relative => write!(f, "relative"),
      Position::Absolute => write!(f, "absolute"),
      Position::Fixed => write!(f, "fixed"),
      Position::Sticky => write!(f, "sticky"),
    }
  }
}

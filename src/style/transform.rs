//! Transform function lists
//!
//! An element's local transform is modeled as an ordered list of 2D
//! transform functions, the parsed form of a CSS `transform` computed value
//! or an SVG `transform` attribute. [`resolve_transform_list`] folds the
//! list into a single [`Matrix2D`] and [`parse_transform_list`] produces
//! the list from its textual form.
//!
//! Only the 2D subset is representable. 3D functions are out of scope for
//! this crate and are reported as unknown functions by the parser.

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::matrix::Matrix2D;

/// A single 2D transform function
///
/// Angles are stored in degrees, matching the textual form, and are
/// converted to radians when the function is resolved to a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransformFunction {
  /// `translate(x, y)` in CSS pixels
  Translate(f64, f64),
  /// `translateX(x)`
  TranslateX(f64),
  /// `translateY(y)`
  TranslateY(f64),
  /// `scale(sx, sy)`
  Scale(f64, f64),
  /// `scaleX(sx)`
  ScaleX(f64),
  /// `scaleY(sy)`
  ScaleY(f64),
  /// `rotate(angle)` in degrees
  Rotate(f64),
  /// `skew(ax, ay)` in degrees
  Skew(f64, f64),
  /// `skewX(ax)` in degrees
  SkewX(f64),
  /// `skewY(ay)` in degrees
  SkewY(f64),
  /// `matrix(a, b, c, d, e, f)`
  Matrix(f64, f64, f64, f64, f64, f64),
}

impl TransformFunction {
  /// Resolve this function to its matrix form
  pub fn to_matrix(self) -> Matrix2D {
    match self {
      TransformFunction::Translate(x, y) => Matrix2D::translate(x, y),
      TransformFunction::TranslateX(x) => Matrix2D::translate(x, 0.0),
      TransformFunction::TranslateY(y) => Matrix2D::translate(0.0, y),
      TransformFunction::Scale(sx, sy) => Matrix2D::scale(sx, sy),
      TransformFunction::ScaleX(sx) => Matrix2D::scale(sx, 1.0),
      TransformFunction::ScaleY(sy) => Matrix2D::scale(1.0, sy),
      TransformFunction::Rotate(deg) => Matrix2D::rotate(deg.to_radians()),
      TransformFunction::Skew(ax, ay) => Matrix2D::skew(ax.to_radians(), ay.to_radians()),
      TransformFunction::SkewX(ax) => Matrix2D::skew(ax.to_radians(), 0.0),
      TransformFunction::SkewY(ay) => Matrix2D::skew(0.0, ay.to_radians()),
      TransformFunction::Matrix(a, b, c, d, e, f) => Matrix2D::new(a, b, c, d, e, f),
    }
  }
}

/// Fold a transform list into a single matrix
///
/// Functions apply left to right, per the CSS transform property: for
/// `translate(10px) scale(2)` a point is scaled first, then translated.
///
/// # Examples
///
/// ```
/// use globalmatrix::style::{resolve_transform_list, TransformFunction};
/// use globalmatrix::Point;
///
/// let list = [
///     TransformFunction::Translate(10.0, 0.0),
///     TransformFunction::Scale(2.0, 2.0),
/// ];
/// let m = resolve_transform_list(&list);
/// assert_eq!(m.transform_point(Point::new(5.0, 0.0)), Point::new(20.0, 0.0));
/// ```
pub fn resolve_transform_list(functions: &[TransformFunction]) -> Matrix2D {
  let mut matrix = Matrix2D::IDENTITY;
  for function in functions {
    matrix = matrix.multiply(&function.to_matrix());
  }
  matrix
}

/// Error when parsing a transform list
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformParseError {
  /// A function name that is not a 2D transform function
  #[error("unknown transform function '{0}'")]
  UnknownFunction(String),

  /// A function was given the wrong number of arguments
  #[error("transform function '{name}' expects {expected} arguments, got {got}")]
  WrongArity {
    /// The function name as written
    name: String,
    /// Human-readable expected arity, e.g. "1 or 2"
    expected: &'static str,
    /// Number of arguments present
    got: usize,
  },

  /// A component that is not a finite number
  #[error("malformed transform component '{0}'")]
  InvalidNumber(String),

  /// Percentages need layout information this crate does not have; the
  /// style collaborator must resolve them before handing the list over
  #[error("percentage component '{0}' must be resolved by the caller")]
  PercentageUnsupported(String),

  /// A unit this crate does not resolve (vw, pt, ...)
  #[error("unsupported unit in transform component '{0}'")]
  UnsupportedUnit(String),

  /// A missing `(` or `)`
  #[error("unbalanced parentheses in transform list")]
  UnbalancedParentheses,
}

#[derive(Clone, Copy)]
enum ScalarKind {
  /// Bare number or `px`
  Length,
  /// Bare number (degrees), `deg`, or `rad`
  Angle,
  /// Bare number only
  Number,
}

fn parse_scalar(token: &str, kind: ScalarKind) -> Result<f64, TransformParseError> {
  let token = token.trim();
  if token.is_empty() {
    return Err(TransformParseError::InvalidNumber(token.to_string()));
  }
  if token.ends_with('%') {
    return Err(TransformParseError::PercentageUnsupported(token.to_string()));
  }

  let mut end = 0;
  for (idx, ch) in token.char_indices() {
    if matches!(ch, '0'..='9' | '+' | '-' | '.' | 'e' | 'E') {
      end = idx + ch.len_utf8();
    } else {
      break;
    }
  }
  if end == 0 {
    return Err(TransformParseError::InvalidNumber(token.to_string()));
  }

  let number = token[..end]
    .parse::<f64>()
    .map_err(|_| TransformParseError::InvalidNumber(token.to_string()))?;
  if !number.is_finite() {
    return Err(TransformParseError::InvalidNumber(token.to_string()));
  }

  let unit = token[end..].trim();
  match kind {
    ScalarKind::Length => {
      if unit.is_empty() || unit.eq_ignore_ascii_case("px") {
        Ok(number)
      } else {
        Err(TransformParseError::UnsupportedUnit(token.to_string()))
      }
    }
    ScalarKind::Angle => {
      if unit.is_empty() || unit.eq_ignore_ascii_case("deg") {
        Ok(number)
      } else if unit.eq_ignore_ascii_case("rad") {
        Ok(number.to_degrees())
      } else {
        Err(TransformParseError::UnsupportedUnit(token.to_string()))
      }
    }
    ScalarKind::Number => {
      if unit.is_empty() {
        Ok(number)
      } else {
        Err(TransformParseError::UnsupportedUnit(token.to_string()))
      }
    }
  }
}

fn build_function(
  name: &str,
  args: &[&str],
) -> Result<TransformFunction, TransformParseError> {
  let arity = |expected: &'static str| TransformParseError::WrongArity {
    name: name.to_string(),
    expected,
    got: args.len(),
  };

  let lower = name.trim().to_ascii_lowercase();
  match lower.as_str() {
    "matrix" => {
      if args.len() != 6 {
        return Err(arity("6"));
      }
      let mut v = [0.0f64; 6];
      for (slot, token) in v.iter_mut().zip(args) {
        *slot = parse_scalar(token, ScalarKind::Number)?;
      }
      Ok(TransformFunction::Matrix(v[0], v[1], v[2], v[3], v[4], v[5]))
    }
    "translate" => match args {
      [x] => Ok(TransformFunction::Translate(
        parse_scalar(x, ScalarKind::Length)?,
        0.0,
      )),
      [x, y] => Ok(TransformFunction::Translate(
        parse_scalar(x, ScalarKind::Length)?,
        parse_scalar(y, ScalarKind::Length)?,
      )),
      _ => Err(arity("1 or 2")),
    },
    "translatex" => match args {
      [x] => Ok(TransformFunction::TranslateX(parse_scalar(
        x,
        ScalarKind::Length,
      )?)),
      _ => Err(arity("1")),
    },
    "translatey" => match args {
      [y] => Ok(TransformFunction::TranslateY(parse_scalar(
        y,
        ScalarKind::Length,
      )?)),
      _ => Err(arity("1")),
    },
    "scale" => match args {
      [s] => {
        let s = parse_scalar(s, ScalarKind::Number)?;
        Ok(TransformFunction::Scale(s, s))
      }
      [sx, sy] => Ok(TransformFunction::Scale(
        parse_scalar(sx, ScalarKind::Number)?,
        parse_scalar(sy, ScalarKind::Number)?,
      )),
      _ => Err(arity("1 or 2")),
    },
    "scalex" => match args {
      [sx] => Ok(TransformFunction::ScaleX(parse_scalar(
        sx,
        ScalarKind::Number,
      )?)),
      _ => Err(arity("1")),
    },
    "scaley" => match args {
      [sy] => Ok(TransformFunction::ScaleY(parse_scalar(
        sy,
        ScalarKind::Number,
      )?)),
      _ => Err(arity("1")),
    },
    "rotate" => match args {
      [a] => Ok(TransformFunction::Rotate(parse_scalar(
        a,
        ScalarKind::Angle,
      )?)),
      _ => Err(arity("1")),
    },
    "skew" => match args {
      [ax] => Ok(TransformFunction::Skew(
        parse_scalar(ax, ScalarKind::Angle)?,
        0.0,
      )),
      [ax, ay] => Ok(TransformFunction::Skew(
        parse_scalar(ax, ScalarKind::Angle)?,
        parse_scalar(ay, ScalarKind::Angle)?,
      )),
      _ => Err(arity("1 or 2")),
    },
    "skewx" => match args {
      [ax] => Ok(TransformFunction::SkewX(parse_scalar(
        ax,
        ScalarKind::Angle,
      )?)),
      _ => Err(arity("1")),
    },
    "skewy" => match args {
      [ay] => Ok(TransformFunction::SkewY(parse_scalar(
        ay,
        ScalarKind::Angle,
      )?)),
      _ => Err(arity("1")),
    },
    _ => Err(TransformParseError::UnknownFunction(name.trim().to_string())),
  }
}

/// Parse a transform list from its textual form
///
/// Accepts the SVG `transform` attribute / CSS computed-value flavor:
/// function names with parenthesized arguments, separated by whitespace
/// and/or commas. Lengths may carry a `px` suffix, angles `deg` or `rad`.
/// `none` and the empty string parse to the empty list (which resolves to
/// the identity matrix).
///
/// # Examples
///
/// ```
/// use globalmatrix::style::{parse_transform_list, TransformFunction};
///
/// let list = parse_transform_list("translate(10px, 20px) rotate(90deg)").unwrap();
/// assert_eq!(list[0], TransformFunction::Translate(10.0, 20.0));
/// assert_eq!(list[1], TransformFunction::Rotate(90.0));
///
/// assert!(parse_transform_list("none").unwrap().is_empty());
/// assert!(parse_transform_list("translate(50%)").is_err());
/// ```
pub fn parse_transform_list(
  input: &str,
) -> Result<Vec<TransformFunction>, TransformParseError> {
  let trimmed = input.trim();
  if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
    return Ok(Vec::new());
  }

  let mut functions = Vec::new();
  let mut rest = trimmed;
  loop {
    rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
    if rest.is_empty() {
      break;
    }
    let open = rest
      .find('(')
      .ok_or(TransformParseError::UnbalancedParentheses)?;
    let close = rest[open + 1..]
      .find(')')
      .map(|i| open + 1 + i)
      .ok_or(TransformParseError::UnbalancedParentheses)?;

    let name = rest[..open].trim();
    let args: Vec<&str> = rest[open + 1..close]
      .split(|c: char| c == ',' || c.is_whitespace())
      .filter(|s| !s.is_empty())
      .collect();
    functions.push(build_function(name, &args)?);
    rest = &rest[close + 1..];
  }

  Ok(functions)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geometry::Point;

  #[test]
  fn test_parse_translate_and_rotate() {
    let list = parse_transform_list("translate(10px, 20px) rotate(45deg)").unwrap();
    assert_eq!(
      list,
      vec![
        TransformFunction::Translate(10.0, 20.0),
        TransformFunction::Rotate(45.0),
      ]
    );
  }

  #[test]
  fn test_parse_svg_attribute_flavor() {
    // SVG attributes use bare numbers and allow comma-or-space separation
    let list = parse_transform_list("translate(5 7),scale(2)").unwrap();
    assert_eq!(
      list,
      vec![
        TransformFunction::Translate(5.0, 7.0),
        TransformFunction::Scale(2.0, 2.0),
      ]
    );
  }

  #[test]
  fn test_parse_matrix() {
    let list = parse_transform_list("matrix(1, 0, 0, 1, 10, 20)").unwrap();
    assert_eq!(
      list,
      vec![TransformFunction::Matrix(1.0, 0.0, 0.0, 1.0, 10.0, 20.0)]
    );
  }

  #[test]
  fn test_parse_none_and_empty() {
    assert!(parse_transform_list("none").unwrap().is_empty());
    assert!(parse_transform_list("  ").unwrap().is_empty());
  }

  #[test]
  fn test_parse_rad_converts_to_degrees() {
    let list = parse_transform_list("rotate(3.141592653589793rad)").unwrap();
    let TransformFunction::Rotate(deg) = list[0] else {
      panic!("expected rotate");
    };
    assert!((deg - 180.0).abs() < 1e-9);
  }

  #[test]
  fn test_parse_single_argument_defaults() {
    assert_eq!(
      parse_transform_list("translate(10)").unwrap(),
      vec![TransformFunction::Translate(10.0, 0.0)]
    );
    assert_eq!(
      parse_transform_list("scale(3)").unwrap(),
      vec![TransformFunction::Scale(3.0, 3.0)]
    );
    assert_eq!(
      parse_transform_list("skew(30)").unwrap(),
      vec![TransformFunction::Skew(30.0, 0.0)]
    );
  }

  #[test]
  fn test_parse_errors() {
    assert!(matches!(
      parse_transform_list("warp(1)"),
      Err(TransformParseError::UnknownFunction(_))
    ));
    assert!(matches!(
      parse_transform_list("rotate(1, 2)"),
      Err(TransformParseError::WrongArity { .. })
    ));
    assert!(matches!(
      parse_transform_list("translate(50%)"),
      Err(TransformParseError::PercentageUnsupported(_))
    ));
    assert!(matches!(
      parse_transform_list("translate(2vw)"),
      Err(TransformParseError::UnsupportedUnit(_))
    ));
    assert!(matches!(
      parse_transform_list("translate(10"),
      Err(TransformParseError::UnbalancedParentheses)
    ));
    assert!(matches!(
      parse_transform_list("scale(x)"),
      Err(TransformParseError::InvalidNumber(_))
    ));
  }

  #[test]
  fn test_resolve_applies_left_to_right() {
    let list = [
      TransformFunction::Translate(10.0, 0.0),
      TransformFunction::Scale(2.0, 2.0),
    ];
    let m = resolve_transform_list(&list);
    // Point is scaled first, then translated
    assert_eq!(m.transform_point(Point::new(5.0, 0.0)), Point::new(20.0, 0.0));
  }

  #[test]
  fn test_resolve_empty_is_identity() {
    assert!(resolve_transform_list(&[]).is_identity());
  }

  #[test]
  fn test_resolve_matches_parsed_matrix_form() {
    let parsed = parse_transform_list("matrix(2, 0, 0, 2, 10, 20)").unwrap();
    let direct = resolve_transform_list(&[
      TransformFunction::Translate(10.0, 20.0),
      TransformFunction::Scale(2.0, 2.0),
    ]);
    assert!(resolve_transform_list(&parsed).approx_eq(&direct, 1e-9));
  }
}

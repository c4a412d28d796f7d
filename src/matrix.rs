//! 2D affine transform matrices
//!
//! [`Matrix2D`] is the value type everything else in this crate composes:
//! element-local CSS transforms, SVG viewBox maps, and the final global
//! matrix are all instances of it. All arithmetic is double precision.

use serde::Deserialize;
use serde::Serialize;

use crate::geometry::Point;
use crate::geometry::Rect;

/// Determinant magnitudes below this threshold are treated as singular.
///
/// Inversion uses a tolerance rather than an exact zero comparison so that
/// near-singular matrices (e.g. from a `scale(1e-9)` ancestor) are caught
/// before the division blows up into non-finite components.
pub const DET_EPSILON: f64 = 1e-12;

/// 2D affine transform matrix
///
/// Represents a 3x3 matrix in the form:
/// ```text
/// [a c e]
/// [b d f]
/// [0 0 1]
/// ```
///
/// mapping `x' = a*x + c*y + e`, `y' = b*x + d*y + f`. Used for
/// translation, rotation, scaling, and skewing. Instances are plain `Copy`
/// values; no operation here mutates its inputs.
///
/// # Examples
///
/// ```
/// use globalmatrix::{Matrix2D, Point};
///
/// let m = Matrix2D::translate(10.0, 20.0);
/// assert_eq!(m.transform_point(Point::ZERO), Point::new(10.0, 20.0));
/// assert_eq!(Matrix2D::default(), Matrix2D::IDENTITY);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix2D {
  /// Scale X (m11)
  pub a: f64,
  /// Skew Y (m12)
  pub b: f64,
  /// Skew X (m21)
  pub c: f64,
  /// Scale Y (m22)
  pub d: f64,
  /// Translate X (m31)
  pub e: f64,
  /// Translate Y (m32)
  pub f: f64,
}

impl Matrix2D {
  /// Identity transform (no transformation)
  pub const IDENTITY: Self = Self {
    a: 1.0,
    b: 0.0,
    c: 0.0,
    d: 1.0,
    e: 0.0,
    f: 0.0,
  };

  /// Create identity transform
  pub fn identity() -> Self {
    Self::IDENTITY
  }

  /// Create a matrix from its six components
  pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
    Self { a, b, c, d, e, f }
  }

  /// Create translation transform
  pub fn translate(x: f64, y: f64) -> Self {
    Self {
      a: 1.0,
      b: 0.0,
      c: 0.0,
      d: 1.0,
      e: x,
      f: y,
    }
  }

  /// Create scale transform
  pub fn scale(sx: f64, sy: f64) -> Self {
    Self {
      a: sx,
      b: 0.0,
      c: 0.0,
      d: sy,
      e: 0.0,
      f: 0.0,
    }
  }

  /// Create uniform scale transform
  pub fn scale_uniform(s: f64) -> Self {
    Self::scale(s, s)
  }

  /// Create rotation transform
  ///
  /// # Arguments
  ///
  /// * `angle` - Rotation angle in radians (positive = clockwise)
  pub fn rotate(angle: f64) -> Self {
    let cos = angle.cos();
    let sin = angle.sin();
    Self {
      a: cos,
      b: sin,
      c: -sin,
      d: cos,
      e: 0.0,
      f: 0.0,
    }
  }

  /// Create skew transform
  ///
  /// # Arguments
  ///
  /// * `ax` - Skew angle in X direction (radians)
  /// * `ay` - Skew angle in Y direction (radians)
  pub fn skew(ax: f64, ay: f64) -> Self {
    Self {
      a: 1.0,
      b: ay.tan(),
      c: ax.tan(),
      d: 1.0,
      e: 0.0,
      f: 0.0,
    }
  }

  /// Multiply two transforms (concatenate)
  ///
  /// The result represents applying `other` first, then `self`. This is the
  /// standard matrix multiplication order, so for an ancestor matrix `m1`
  /// and a descendant matrix `m2`, `m1.multiply(&m2)` maps a point from the
  /// descendant's space through `m2` and then through `m1`:
  ///
  /// ```
  /// use globalmatrix::{Matrix2D, Point};
  ///
  /// let ancestor = Matrix2D::translate(10.0, 0.0);
  /// let child = Matrix2D::scale(2.0, 2.0);
  /// let combined = ancestor.multiply(&child);
  ///
  /// let p = Point::new(5.0, 5.0);
  /// assert_eq!(
  ///     combined.transform_point(p),
  ///     ancestor.transform_point(child.transform_point(p)),
  /// );
  /// ```
  #[allow(clippy::suspicious_operation_groupings)]
  pub fn multiply(&self, other: &Matrix2D) -> Matrix2D {
    // Standard 2D affine matrix multiplication:
    // [a c e]   [a' c' e']   [a*a'+c*b'  a*c'+c*d'  a*e'+c*f'+e]
    // [b d f] * [b' d' f'] = [b*a'+d*b'  b*c'+d*d'  b*e'+d*f'+f]
    // [0 0 1]   [0  0  1 ]   [0          0          1          ]
    Matrix2D {
      a: self.a * other.a + self.c * other.b,
      b: self.b * other.a + self.d * other.b,
      c: self.a * other.c + self.c * other.d,
      d: self.b * other.c + self.d * other.d,
      e: self.a * other.e + self.c * other.f + self.e,
      f: self.b * other.e + self.d * other.f + self.f,
    }
  }

  /// Transform a point
  ///
  /// Applies this transform to a point and returns the result.
  pub fn transform_point(&self, p: Point) -> Point {
    Point {
      x: self.a * p.x + self.c * p.y + self.e,
      y: self.b * p.x + self.d * p.y + self.f,
    }
  }

  /// Transform a rectangle
  ///
  /// Returns the axis-aligned bounding box of the transformed rectangle.
  /// Note: The result may be larger than the original if rotation is
  /// involved.
  pub fn transform_rect(&self, rect: Rect) -> Rect {
    let p1 = self.transform_point(rect.origin);
    let p2 = self.transform_point(Point::new(rect.max_x(), rect.min_y()));
    let p3 = self.transform_point(Point::new(rect.min_x(), rect.max_y()));
    let p4 = self.transform_point(Point::new(rect.max_x(), rect.max_y()));

    let min_x = p1.x.min(p2.x).min(p3.x).min(p4.x);
    let min_y = p1.y.min(p2.y).min(p3.y).min(p4.y);
    let max_x = p1.x.max(p2.x).max(p3.x).max(p4.x);
    let max_y = p1.y.max(p2.y).max(p3.y).max(p4.y);

    Rect::from_xywh(min_x, min_y, max_x - min_x, max_y - min_y)
  }

  /// The determinant of the linear part, `a*d - b*c`
  ///
  /// Zero (within [`DET_EPSILON`]) means the matrix collapses the plane
  /// onto a line or point and cannot be inverted.
  pub fn determinant(&self) -> f64 {
    self.a * self.d - self.b * self.c
  }

  /// Check if this is the identity transform
  pub fn is_identity(&self) -> bool {
    *self == Self::IDENTITY
  }

  /// Get the inverse of this transform, if it exists
  ///
  /// Returns None if the transform is not invertible (determinant within
  /// [`DET_EPSILON`] of zero).
  ///
  /// # Examples
  ///
  /// ```
  /// use globalmatrix::Matrix2D;
  ///
  /// let m = Matrix2D::translate(10.0, 20.0);
  /// let inv = m.inverse().unwrap();
  /// assert!(m.multiply(&inv).approx_eq(&Matrix2D::IDENTITY, 1e-9));
  ///
  /// assert!(Matrix2D::scale(0.0, 0.0).inverse().is_none());
  /// ```
  pub fn inverse(&self) -> Option<Matrix2D> {
    let det = self.determinant();
    if det.abs() < DET_EPSILON {
      return None;
    }

    let inv_det = 1.0 / det;
    Some(Matrix2D {
      a: self.d * inv_det,
      b: -self.b * inv_det,
      c: -self.c * inv_det,
      d: self.a * inv_det,
      e: (self.c * self.f - self.d * self.e) * inv_det,
      f: (self.b * self.e - self.a * self.f) * inv_det,
    })
  }

  /// Component-wise comparison within a tolerance
  ///
  /// Useful for asserting on composed matrices without tripping over
  /// floating point rounding.
  pub fn approx_eq(&self, other: &Matrix2D, epsilon: f64) -> bool {
    (self.a - other.a).abs() <= epsilon
      && (self.b - other.b).abs() <= epsilon
      && (self.c - other.c).abs() <= epsilon
      && (self.d - other.d).abs() <= epsilon
      && (self.e - other.e).abs() <= epsilon
      && (self.f - other.f).abs() <= epsilon
  }
}

impl Default for Matrix2D {
  fn default() -> Self {
    Self::IDENTITY
  }
}

//! SVG viewBox handling
//!
//! An SVG container establishes its own coordinate system: the `viewBox`
//! attribute maps internal user units onto the rendered viewport, scaled
//! and aligned per `preserveAspectRatio`. [`view_box_transform`] produces
//! that map as a [`Matrix2D`] so the resolver can compose it beneath the
//! container's own transform.

use serde::Deserialize;
use serde::Serialize;

use crate::geometry::Size;
use crate::matrix::Matrix2D;

/// The `viewBox` rectangle of an SVG container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SvgViewBox {
  /// Left edge of the internal coordinate system
  pub min_x: f64,
  /// Top edge of the internal coordinate system
  pub min_y: f64,
  /// Width of the internal coordinate system
  pub width: f64,
  /// Height of the internal coordinate system
  pub height: f64,
}

impl SvgViewBox {
  /// Creates a viewBox from its four components
  pub const fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
    Self {
      min_x,
      min_y,
      width,
      height,
    }
  }
}

/// `preserveAspectRatio` alignment keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SvgAlign {
  XMinYMin,
  XMidYMin,
  XMaxYMin,
  XMinYMid,
  XMidYMid,
  XMaxYMid,
  XMinYMax,
  XMidYMax,
  XMaxYMax,
}

/// `preserveAspectRatio` meet-or-slice keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SvgMeetOrSlice {
  /// Scale to fit entirely within the viewport
  Meet,
  /// Scale to cover the viewport, cropping overflow
  Slice,
}

/// Parsed `preserveAspectRatio` value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SvgPreserveAspectRatio {
  /// `none`: stretch non-uniformly to fill the viewport
  pub none: bool,
  /// Alignment of the scaled viewBox within the viewport
  pub align: SvgAlign,
  /// Whether the viewBox meets or slices the viewport
  pub meet_or_slice: SvgMeetOrSlice,
}

impl Default for SvgPreserveAspectRatio {
  /// The SVG default, `xMidYMid meet`
  fn default() -> Self {
    Self {
      none: false,
      align: SvgAlign::XMidYMid,
      meet_or_slice: SvgMeetOrSlice::Meet,
    }
  }
}

impl SvgPreserveAspectRatio {
  /// Parse a `preserveAspectRatio` attribute value
  ///
  /// Absent, empty, and unrecognized values fall back to the SVG defaults
  /// component-wise.
  pub fn parse(value: Option<&str>) -> Self {
    let mut parsed = Self::default();

    let raw = value.unwrap_or("").trim();
    if raw.is_empty() {
      return parsed;
    }
    let mut parts = raw.split_whitespace();
    let first = parts.next().unwrap_or("");
    if first.eq_ignore_ascii_case("none") {
      parsed.none = true;
      return parsed;
    }

    parsed.align = match first {
      "xMinYMin" => SvgAlign::XMinYMin,
      "xMidYMin" => SvgAlign::XMidYMin,
      "xMaxYMin" => SvgAlign::XMaxYMin,
      "xMinYMid" => SvgAlign::XMinYMid,
      "xMidYMid" => SvgAlign::XMidYMid,
      "xMaxYMid" => SvgAlign::XMaxYMid,
      "xMinYMax" => SvgAlign::XMinYMax,
      "xMidYMax" => SvgAlign::XMidYMax,
      "xMaxYMax" => SvgAlign::XMaxYMax,
      _ => SvgAlign::XMidYMid,
    };

    if let Some(second) = parts.next() {
      if second.eq_ignore_ascii_case("slice") {
        parsed.meet_or_slice = SvgMeetOrSlice::Slice;
      } else if second.eq_ignore_ascii_case("meet") {
        parsed.meet_or_slice = SvgMeetOrSlice::Meet;
      }
    }

    parsed
  }
}

/// Parse a `viewBox` attribute value
///
/// Returns `None` for malformed values: fewer than four numbers,
/// non-finite components, or non-positive dimensions.
///
/// # Examples
///
/// ```
/// use globalmatrix::svg::{parse_svg_view_box, SvgViewBox};
///
/// assert_eq!(
///     parse_svg_view_box("0 0 100 50"),
///     Some(SvgViewBox::new(0.0, 0.0, 100.0, 50.0)),
/// );
/// assert_eq!(parse_svg_view_box("0 0 -100 50"), None);
/// ```
pub fn parse_svg_view_box(value: &str) -> Option<SvgViewBox> {
  let mut nums = value
    .split(|c: char| c == ',' || c.is_whitespace())
    .filter(|s| !s.is_empty())
    .filter_map(|s| s.parse::<f64>().ok());
  let min_x = nums.next()?;
  let min_y = nums.next()?;
  let width = nums.next()?;
  let height = nums.next()?;
  if !(min_x.is_finite()
    && min_y.is_finite()
    && width.is_finite()
    && height.is_finite()
    && width > 0.0
    && height > 0.0)
  {
    return None;
  }
  Some(SvgViewBox {
    min_x,
    min_y,
    width,
    height,
  })
}

/// Compute the viewBox-to-viewport matrix for an SVG container
///
/// Maps internal viewBox coordinates onto a viewport of `rendered` size,
/// honoring `preserveAspectRatio`: uniform scale with alignment offsets for
/// meet/slice, per-axis stretch for `none`. An empty rendered size yields a
/// degenerate (zero-scale) matrix rather than a division by the viewBox
/// dimensions ever being zero — [`parse_svg_view_box`] rejects those.
pub fn view_box_transform(
  view_box: SvgViewBox,
  preserve: SvgPreserveAspectRatio,
  rendered: Size,
) -> Matrix2D {
  let sx = rendered.width / view_box.width;
  let sy = rendered.height / view_box.height;
  if preserve.none {
    return Matrix2D::new(
      sx,
      0.0,
      0.0,
      sy,
      -view_box.min_x * sx,
      -view_box.min_y * sy,
    );
  }

  let scale = match preserve.meet_or_slice {
    SvgMeetOrSlice::Meet => sx.min(sy),
    SvgMeetOrSlice::Slice => sx.max(sy),
  };
  let scaled_w = view_box.width * scale;
  let scaled_h = view_box.height * scale;

  let (align_x, align_y) = match preserve.align {
    SvgAlign::XMinYMin => (0.0, 0.0),
    SvgAlign::XMidYMin => ((rendered.width - scaled_w) * 0.5, 0.0),
    SvgAlign::XMaxYMin => (rendered.width - scaled_w, 0.0),
    SvgAlign::XMinYMid => (0.0, (rendered.height - scaled_h) * 0.5),
    SvgAlign::XMidYMid => (
      (rendered.width - scaled_w) * 0.5,
      (rendered.height - scaled_h) * 0.5,
    ),
    SvgAlign::XMaxYMid => (rendered.width - scaled_w, (rendered.height - scaled_h) * 0.5),
    SvgAlign::XMinYMax => (0.0, rendered.height - scaled_h),
    SvgAlign::XMidYMax => ((rendered.width - scaled_w) * 0.5, rendered.height - scaled_h),
    SvgAlign::XMaxYMax => (rendered.width - scaled_w, rendered.height - scaled_h),
  };

  Matrix2D::new(
    scale,
    0.0,
    0.0,
    scale,
    align_x - view_box.min_x * scale,
    align_y - view_box.min_y * scale,
  )
}

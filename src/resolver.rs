//! Global matrix resolution
//!
//! [`get_global_matrix`] walks from an element up through its ancestors,
//! composing each node's local transform into a single [`Matrix2D`] that
//! maps the element's local coordinate space to the root coordinate space.
//!
//! The walk handles the three ways a node can bend the coordinate chain:
//! - SVG containers compose their viewBox map beneath their own transform
//! - SVG group-type nodes can be re-anchored from their bounding-box
//!   origin to their transform origin (`adjust_g_offset`)
//! - fixed-position nodes stop the ascent at the viewport, optionally
//!   adding the document scroll offset (`include_scroll`)
//!
//! Resolution is a pure read over the [`TransformTree`] capability trait:
//! no node state is mutated, and two calls over the same tree snapshot
//! with the same options produce bit-identical results. The caller must
//! not mutate the tree during a call; that precondition is documented, not
//! enforced.

use serde::Deserialize;
use serde::Serialize;
use tracing::trace;
use tracing::warn;

use crate::matrix::Matrix2D;
use crate::tree::NodeId;
use crate::tree::TransformTree;

/// Configuration for [`get_global_matrix`]
///
/// Three independent switches, off by default:
///
/// ```
/// use globalmatrix::GlobalMatrixOptions;
///
/// let options = GlobalMatrixOptions::default()
///     .with_inverse(true)
///     .with_include_scroll(true);
/// assert!(options.inverse);
/// assert!(!options.adjust_g_offset);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlobalMatrixOptions {
  /// Invert the final matrix (root space → element local space)
  pub inverse: bool,
  /// Re-anchor SVG group-type nodes from their bounding-box origin to
  /// their transform origin
  pub adjust_g_offset: bool,
  /// At a fixed-position stop, add the document scroll offset to the
  /// translation components (viewport coordinates → document coordinates)
  pub include_scroll: bool,
}

impl GlobalMatrixOptions {
  /// Sets the `inverse` switch
  pub fn with_inverse(mut self, inverse: bool) -> Self {
    self.inverse = inverse;
    self
  }

  /// Sets the `adjust_g_offset` switch
  pub fn with_adjust_g_offset(mut self, adjust_g_offset: bool) -> Self {
    self.adjust_g_offset = adjust_g_offset;
    self
  }

  /// Sets the `include_scroll` switch
  pub fn with_include_scroll(mut self, include_scroll: bool) -> Self {
    self.include_scroll = include_scroll;
    self
  }
}

/// Compute the matrix mapping an element's local space to the root space
///
/// Walks from `element` upward, composing each node's local transform in
/// ancestor-over-descendant order, so the result applied to a point in the
/// element's local space yields the point in root coordinates.
///
/// Inputs that cannot anchor a walk resolve to the identity matrix rather
/// than failing: an absent element (`None`), a parentless element, the
/// root element itself. A chain that ends without reaching the root (a
/// detached subtree) yields whatever was accumulated up to the break.
///
/// With `options.inverse` set, the composed matrix is inverted before
/// being returned; a singular matrix (e.g. from a zero-scale ancestor)
/// falls back to identity with a warning instead of failing. Callers that
/// need to detect the degenerate case can run with `inverse` off and check
/// [`Matrix2D::determinant`] themselves.
///
/// # Examples
///
/// ```
/// use globalmatrix::tree::{Node, RenderTree};
/// use globalmatrix::{get_global_matrix, GlobalMatrixOptions, Point};
///
/// let mut tree = RenderTree::new();
/// let parent = tree.append_child(tree.root(), Node::element()).unwrap();
/// let child = tree
///     .append_child(parent, Node::element().with_transform_str("translate(10, 20)").unwrap())
///     .unwrap();
///
/// let m = get_global_matrix(&tree, Some(child), GlobalMatrixOptions::default());
/// assert_eq!(m.transform_point(Point::ZERO), Point::new(10.0, 20.0));
/// ```
pub fn get_global_matrix<T>(
  tree: &T,
  element: Option<NodeId>,
  options: GlobalMatrixOptions,
) -> Matrix2D
where
  T: TransformTree + ?Sized,
{
  let root = tree.root_element();
  let Some(start) = element else {
    return Matrix2D::IDENTITY;
  };
  if start == root || tree.parent_of(start).is_none() {
    return Matrix2D::IDENTITY;
  }

  let mut matrix = Matrix2D::IDENTITY;
  let mut current = Some(start);
  while let Some(node) = current {
    if node == root {
      // The root defines the target space; its own transform is not part
      // of any global matrix.
      break;
    }

    let mut local = tree.local_transform_of(node);
    if tree.is_svg_node(node) {
      // viewBox scaling applies before the node's own transform attribute.
      local = local.multiply(&tree.view_box_transform_of(node));
      if options.adjust_g_offset {
        if let Some(origin) = tree.svg_group_origin_of(node) {
          // Re-anchor the group from its bounding-box origin to its
          // transform origin before its transform applies.
          local = local.multiply(&Matrix2D::translate(-origin.x, -origin.y));
        }
      }
    }

    // Ancestor over descendant: the accumulator so far maps the element's
    // space into `node`'s space, and `local` lifts that into the parent's.
    matrix = local.multiply(&matrix);
    trace!(node = %node, "composed local transform");

    if tree.computed_position_of(node).is_fixed() {
      // Fixed nodes anchor to the viewport, not an ancestor.
      if options.include_scroll {
        let scroll = tree.document_scroll_offset();
        matrix.e += scroll.x;
        matrix.f += scroll.y;
      }
      break;
    }
    current = tree.parent_of(node);
  }

  if options.inverse {
    match matrix.inverse() {
      Some(inverted) => inverted,
      None => {
        warn!(
          det = matrix.determinant(),
          "global matrix is singular, falling back to identity"
        );
        Matrix2D::IDENTITY
      }
    }
  } else {
    matrix
  }
}

/// [`get_global_matrix`] with default options
pub fn global_matrix<T>(tree: &T, element: Option<NodeId>) -> Matrix2D
where
  T: TransformTree + ?Sized,
{
  get_global_matrix(tree, element, GlobalMatrixOptions::default())
}

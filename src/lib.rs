//! globalmatrix: cumulative 2D affine transforms for render trees
//!
//! Computes the "global matrix" of a visual element: the single affine
//! transform mapping the element's local coordinate space to the root
//! coordinate space, obtained by walking the element's ancestor chain and
//! composing each node's local transform (CSS transform, SVG transform
//! attribute, viewBox scaling, fixed-position viewport anchoring, document
//! scroll).
//!
//! The tree being walked is owned by the caller and read through the
//! [`tree::TransformTree`] capability trait; [`tree::RenderTree`] is a
//! ready-made arena implementation for tests and embedders without a live
//! DOM.
//!
//! # Examples
//!
//! ```
//! use globalmatrix::tree::{Node, RenderTree};
//! use globalmatrix::{get_global_matrix, GlobalMatrixOptions, Point};
//!
//! let mut tree = RenderTree::new();
//! let parent = tree.append_child(tree.root(), Node::element()).unwrap();
//! let child = tree
//!     .append_child(parent, Node::element().with_transform_str("translate(10px, 20px)").unwrap())
//!     .unwrap();
//!
//! let m = get_global_matrix(&tree, Some(child), GlobalMatrixOptions::default());
//! assert_eq!(m.transform_point(Point::ZERO), Point::new(10.0, 20.0));
//! ```
//!
//! # Preconditions
//!
//! A resolution call is a synchronous, side-effect-free read; the caller
//! guarantees the tree is not mutated during the call. Calls are otherwise
//! independent and reentrant.

pub mod error;
pub mod geometry;
pub mod matrix;
pub mod resolver;
pub mod style;
pub mod svg;
pub mod tree;

pub use error::{Error, Result};
pub use geometry::{Point, Rect, Size};
pub use matrix::{Matrix2D, DET_EPSILON};
pub use resolver::{get_global_matrix, global_matrix, GlobalMatrixOptions};
pub use style::{Position, TransformFunction};
pub use tree::{Node, NodeId, RenderTree, TransformTree};

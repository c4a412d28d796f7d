//! Render tree access
//!
//! The resolver never owns the tree it walks. It reads ancestry, node kind,
//! local transforms, positions, and the document scroll offset through the
//! narrow [`TransformTree`] capability trait, so the affine math stays
//! testable without a real rendering environment behind it.
//!
//! [`RenderTree`] is the crate's own implementation: an arena of nodes
//! addressed by [`NodeId`], built top-down so parents always exist before
//! their children (which also means the structure cannot express cycles).
//! It serves as the scene description for tests and for embedders that do
//! not have a live DOM.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::geometry::Point;
use crate::geometry::Size;
use crate::matrix::Matrix2D;
use crate::style::resolve_transform_list;
use crate::style::Position;
use crate::style::TransformFunction;
use crate::style::TransformParseError;
use crate::svg::view_box_transform;
use crate::svg::SvgPreserveAspectRatio;
use crate::svg::SvgViewBox;

/// Arena handle for a node in a [`RenderTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

/// Error when constructing or addressing a [`RenderTree`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
  /// The referenced node id is not part of this tree
  #[error("no node with id {0}")]
  NodeNotFound(NodeId),
}

/// Read capabilities the resolver needs from a render tree
///
/// One method per primitive the walk consumes. The SVG-only and scroll
/// reads have identity/empty defaults so that purely box-model tree
/// implementations only provide the four core reads.
///
/// Implementations must be side-effect-free during a resolution call; the
/// caller guarantees the tree is not mutated concurrently (see the crate
/// docs for the precondition).
pub trait TransformTree {
  /// The root of the walk, e.g. the document's root element
  fn root_element(&self) -> NodeId;

  /// A node's parent in the render tree, `None` at the top
  fn parent_of(&self, node: NodeId) -> Option<NodeId>;

  /// Whether the node lives in the SVG namespace
  fn is_svg_node(&self, node: NodeId) -> bool;

  /// The node's local transform, resolved from its computed style or
  /// `transform` attribute
  fn local_transform_of(&self, node: NodeId) -> Matrix2D;

  /// The node's computed `position` keyword
  fn computed_position_of(&self, node: NodeId) -> Position;

  /// The viewBox-to-viewport map for SVG containers
  ///
  /// Identity for non-SVG nodes and SVG nodes without a viewBox.
  fn view_box_transform_of(&self, _node: NodeId) -> Matrix2D {
    Matrix2D::IDENTITY
  }

  /// The bounding-box origin of an SVG group-type node, relative to its
  /// transform origin
  ///
  /// `Some` only for group-type nodes; consumed by the resolver's
  /// `adjust_g_offset` correction.
  fn svg_group_origin_of(&self, _node: NodeId) -> Option<Point> {
    None
  }

  /// Current document scroll offset `(scrollX, scrollY)`
  fn document_scroll_offset(&self) -> Point {
    Point::ZERO
  }
}

/// SVG-specific node attributes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SvgData {
  /// `viewBox` attribute of a container, if any
  pub view_box: Option<SvgViewBox>,
  /// `preserveAspectRatio` attribute (SVG defaults when absent)
  pub preserve_aspect_ratio: SvgPreserveAspectRatio,
  /// CSS size of the container's viewport; meaningless without a viewBox
  pub rendered_size: Size,
  /// For group-type nodes: bounding-box origin relative to the transform
  /// origin
  pub group_origin: Option<Point>,
}

impl SvgData {
  /// An SVG container with a viewBox mapped onto a rendered viewport
  pub fn container(
    view_box: SvgViewBox,
    preserve_aspect_ratio: SvgPreserveAspectRatio,
    rendered_size: Size,
  ) -> Self {
    Self {
      view_box: Some(view_box),
      preserve_aspect_ratio,
      rendered_size,
      group_origin: None,
    }
  }

  /// A group-type node (`<g>`) with the given bounding-box origin
  pub fn group(group_origin: Point) -> Self {
    Self {
      group_origin: Some(group_origin),
      ..Self::default()
    }
  }
}

/// Node kind: standard box-model element or SVG node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
  /// Standard box-model element
  Element,
  /// SVG node with its SVG-specific attributes
  Svg(SvgData),
}

/// A node description for [`RenderTree`]
///
/// Built with `Default` plus `with_*` methods:
///
/// ```
/// use globalmatrix::tree::Node;
/// use globalmatrix::Position;
///
/// let node = Node::element()
///     .with_transform_str("translate(10px, 20px)")
///     .unwrap()
///     .with_position(Position::Relative);
/// assert_eq!(node.position, Position::Relative);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
  /// Standard or SVG
  pub kind: NodeKind,
  /// Local transform list, resolved on demand during a walk
  pub transform: Vec<TransformFunction>,
  /// Computed `position` keyword
  pub position: Position,
}

impl Default for Node {
  fn default() -> Self {
    Self {
      kind: NodeKind::Element,
      transform: Vec::new(),
      position: Position::default(),
    }
  }
}

impl Node {
  /// A standard box-model element with no transform
  pub fn element() -> Self {
    Self::default()
  }

  /// An SVG node with the given SVG attributes
  pub fn svg(data: SvgData) -> Self {
    Self {
      kind: NodeKind::Svg(data),
      ..Self::default()
    }
  }

  /// Sets the local transform list
  pub fn with_transform(mut self, transform: Vec<TransformFunction>) -> Self {
    self.transform = transform;
    self
  }

  /// Sets the local transform from its textual form
  pub fn with_transform_str(self, transform: &str) -> Result<Self, TransformParseError> {
    let parsed = crate::style::parse_transform_list(transform)?;
    Ok(self.with_transform(parsed))
  }

  /// Sets the computed `position` keyword
  pub fn with_position(mut self, position: Position) -> Self {
    self.position = position;
    self
  }
}

struct NodeEntry {
  node: Node,
  parent: Option<NodeId>,
  children: Vec<NodeId>,
}

/// Arena-backed render tree
///
/// Created with a root element at [`NodeId`] 0; nodes are appended beneath
/// existing parents. Detached nodes (no ancestor path to the root) can be
/// inserted for orphan scenarios.
///
/// # Examples
///
/// ```
/// use globalmatrix::tree::{Node, RenderTree};
///
/// let mut tree = RenderTree::new();
/// let parent = tree.append_child(tree.root(), Node::element()).unwrap();
/// let child = tree
///     .append_child(parent, Node::element().with_transform_str("translate(10, 20)").unwrap())
///     .unwrap();
///
/// assert_eq!(tree.children_of(parent).unwrap(), &[child]);
/// ```
pub struct RenderTree {
  nodes: Vec<NodeEntry>,
  scroll_offset: Point,
}

impl RenderTree {
  /// Creates a tree holding only the root element
  pub fn new() -> Self {
    Self {
      nodes: vec![NodeEntry {
        node: Node::element(),
        parent: None,
        children: Vec::new(),
      }],
      scroll_offset: Point::ZERO,
    }
  }

  /// The root element's id
  pub fn root(&self) -> NodeId {
    NodeId(0)
  }

  /// Appends `node` as the last child of `parent`
  pub fn append_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId, TreeError> {
    if parent.0 >= self.nodes.len() {
      return Err(TreeError::NodeNotFound(parent));
    }
    let id = NodeId(self.nodes.len());
    self.nodes.push(NodeEntry {
      node,
      parent: Some(parent),
      children: Vec::new(),
    });
    self.nodes[parent.0].children.push(id);
    Ok(id)
  }

  /// Inserts a node with no parent
  ///
  /// The node is part of the arena but has no ancestor path to the root,
  /// like a DOM element that was created but never attached.
  pub fn insert_detached(&mut self, node: Node) -> NodeId {
    let id = NodeId(self.nodes.len());
    self.nodes.push(NodeEntry {
      node,
      parent: None,
      children: Vec::new(),
    });
    id
  }

  /// The node description behind an id
  pub fn get(&self, node: NodeId) -> Option<&Node> {
    self.nodes.get(node.0).map(|entry| &entry.node)
  }

  /// Mutable access to a node description, e.g. to restyle it between
  /// resolutions
  pub fn node_mut(&mut self, node: NodeId) -> Result<&mut Node, TreeError> {
    self
      .nodes
      .get_mut(node.0)
      .map(|entry| &mut entry.node)
      .ok_or(TreeError::NodeNotFound(node))
  }

  /// Child ids of a node, in insertion order
  pub fn children_of(&self, node: NodeId) -> Result<&[NodeId], TreeError> {
    self
      .nodes
      .get(node.0)
      .map(|entry| entry.children.as_slice())
      .ok_or(TreeError::NodeNotFound(node))
  }

  /// Number of nodes in the arena, detached ones included
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  /// Always false: the root exists from construction on
  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Sets the document scroll offset `(scrollX, scrollY)`
  pub fn set_scroll_offset(&mut self, offset: Point) {
    self.scroll_offset = offset;
  }
}

impl Default for RenderTree {
  fn default() -> Self {
    Self::new()
  }
}

impl TransformTree for RenderTree {
  fn root_element(&self) -> NodeId {
    self.root()
  }

  fn parent_of(&self, node: NodeId) -> Option<NodeId> {
    self.nodes.get(node.0).and_then(|entry| entry.parent)
  }

  fn is_svg_node(&self, node: NodeId) -> bool {
    matches!(
      self.nodes.get(node.0).map(|entry| &entry.node.kind),
      Some(NodeKind::Svg(_))
    )
  }

  fn local_transform_of(&self, node: NodeId) -> Matrix2D {
    match self.nodes.get(node.0) {
      Some(entry) => resolve_transform_list(&entry.node.transform),
      None => Matrix2D::IDENTITY,
    }
  }

  fn computed_position_of(&self, node: NodeId) -> Position {
    self
      .nodes
      .get(node.0)
      .map(|entry| entry.node.position)
      .unwrap_or_default()
  }

  fn view_box_transform_of(&self, node: NodeId) -> Matrix2D {
    let Some(NodeKind::Svg(data)) = self.nodes.get(node.0).map(|entry| &entry.node.kind)
    else {
      return Matrix2D::IDENTITY;
    };
    match data.view_box {
      Some(view_box) => {
        view_box_transform(view_box, data.preserve_aspect_ratio, data.rendered_size)
      }
      None => Matrix2D::IDENTITY,
    }
  }

  fn svg_group_origin_of(&self, node: NodeId) -> Option<Point> {
    match self.nodes.get(node.0).map(|entry| &entry.node.kind) {
      Some(NodeKind::Svg(data)) => data.group_origin,
      _ => None,
    }
  }

  fn document_scroll_offset(&self) -> Point {
    self.scroll_offset
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_tree_has_root_only() {
    let tree = RenderTree::new();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.parent_of(tree.root()), None);
    assert!(!tree.is_svg_node(tree.root()));
  }

  #[test]
  fn test_append_child_links_both_ways() {
    let mut tree = RenderTree::new();
    let child = tree.append_child(tree.root(), Node::element()).unwrap();
    assert_eq!(tree.parent_of(child), Some(tree.root()));
    assert_eq!(tree.children_of(tree.root()).unwrap(), &[child]);
  }

  #[test]
  fn test_append_child_unknown_parent_errors() {
    let mut tree = RenderTree::new();
    let err = tree.append_child(NodeId(99), Node::element()).unwrap_err();
    assert_eq!(err, TreeError::NodeNotFound(NodeId(99)));
  }

  #[test]
  fn test_detached_node_has_no_parent() {
    let mut tree = RenderTree::new();
    let orphan = tree.insert_detached(Node::element());
    assert_eq!(tree.parent_of(orphan), None);
    assert_ne!(orphan, tree.root());
  }

  #[test]
  fn test_local_transform_resolution() {
    let mut tree = RenderTree::new();
    let node = tree
      .append_child(
        tree.root(),
        Node::element().with_transform_str("translate(10, 20)").unwrap(),
      )
      .unwrap();
    assert_eq!(
      tree.local_transform_of(node),
      Matrix2D::translate(10.0, 20.0)
    );
    // Untransformed and unknown nodes read as identity
    assert!(tree.local_transform_of(tree.root()).is_identity());
    assert!(tree.local_transform_of(NodeId(99)).is_identity());
  }

  #[test]
  fn test_svg_reads() {
    let mut tree = RenderTree::new();
    let svg = tree
      .append_child(
        tree.root(),
        Node::svg(SvgData::container(
          SvgViewBox::new(0.0, 0.0, 100.0, 100.0),
          SvgPreserveAspectRatio::default(),
          Size::new(200.0, 200.0),
        )),
      )
      .unwrap();
    let group = tree
      .append_child(svg, Node::svg(SvgData::group(Point::new(5.0, 7.0))))
      .unwrap();

    assert!(tree.is_svg_node(svg));
    assert!(tree
      .view_box_transform_of(svg)
      .approx_eq(&Matrix2D::scale(2.0, 2.0), 1e-9));
    assert!(tree.view_box_transform_of(group).is_identity());
    assert_eq!(tree.svg_group_origin_of(group), Some(Point::new(5.0, 7.0)));
    assert_eq!(tree.svg_group_origin_of(svg), None);
  }

  #[test]
  fn test_node_mut_restyles() {
    let mut tree = RenderTree::new();
    let node = tree.append_child(tree.root(), Node::element()).unwrap();
    tree.node_mut(node).unwrap().position = Position::Fixed;
    assert_eq!(tree.computed_position_of(node), Position::Fixed);
    assert!(tree.node_mut(NodeId(99)).is_err());
  }

  #[test]
  fn test_scroll_offset_round_trip() {
    let mut tree = RenderTree::new();
    assert_eq!(tree.document_scroll_offset(), Point::ZERO);
    tree.set_scroll_offset(Point::new(100.0, 50.0));
    assert_eq!(tree.document_scroll_offset(), Point::new(100.0, 50.0));
  }
}

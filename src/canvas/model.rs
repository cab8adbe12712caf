//! Object model of Obsidian's internal canvas engine
//!
//! These types describe the contract the Obsidian-side handler of
//! `/canvas/screenshot` is written against. This server never drives a live
//! canvas through them.
//!
//! Edges refer to their endpoints by node id instead of holding references,
//! and DOM/SVG back-references are left out entirely.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier of a canvas node or edge
pub type CanvasId = String;

/// A point in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned bounding box in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    /// Creates a box from its corner coordinates
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates a box from a top-left position and a size
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point {
            x: (self.min_x + self.max_x) / 2.0,
            y: (self.min_y + self.max_y) / 2.0,
        }
    }

    /// Smallest box containing both `self` and `other`
    pub fn union(&self, other: &BBox) -> BBox {
        BBox::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Edges count as inside
    pub fn contains_point(&self, point: Point) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_y..=self.max_y).contains(&point.y)
    }

    pub fn intersects(&self, other: &BBox) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }
}

/// An element placed on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasNode {
    pub id:                 CanvasId,
    pub x:                  f64,
    pub y:                  f64,
    pub width:              f64,
    pub height:             f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color:              Option<String>,
    /// Whether the node's DOM has been created
    pub initialized:        bool,
    /// Whether full content is rendered, as opposed to a lightweight placeholder
    pub is_content_mounted: bool,
}

impl CanvasNode {
    pub fn bbox(&self) -> BBox {
        BBox::from_rect(self.x, self.y, self.width, self.height)
    }
}

/// A connection between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasEdge {
    pub id:        CanvasId,
    pub from_node: CanvasId,
    pub to_node:   CanvasId,
    /// Whether the edge renders a label element
    pub has_label: bool,
}

/// Viewport state: current position/zoom and the animation target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub x:           f64,
    pub y:           f64,
    pub zoom:        f64,
    pub tx:          f64,
    pub ty:          f64,
    pub t_zoom:      f64,
    pub zoom_center: Option<Point>,
}

/// Something that can be selected on the canvas
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum SelectionItem {
    Node(CanvasId),
    Edge(CanvasId),
}

/// The canvas engine API exposed by a canvas view
pub trait CanvasEngine {
    fn nodes(&self) -> &BTreeMap<CanvasId, CanvasNode>;

    fn edges(&self) -> &BTreeMap<CanvasId, CanvasEdge>;

    /// Bounding box of an edge, including its path and end marker
    fn edge_bbox(&self, id: &str) -> Option<BBox>;

    fn viewport(&self) -> Viewport;

    /// Part of the canvas currently visible
    fn viewport_bbox(&self) -> BBox;

    fn set_viewport(&mut self, tx: f64, ty: f64, t_zoom: f64);

    fn zoom_to_fit(&mut self);

    fn zoom_to_selection(&mut self);

    fn zoom_to_bbox(&mut self, bbox: BBox);

    /// Zooms to `bbox` without the padding `zoom_to_bbox` adds.
    ///
    /// Not every Obsidian version has this, so the default falls back to
    /// [`CanvasEngine::zoom_to_bbox`].
    fn zoom_to_real_bbox(&mut self, bbox: BBox) {
        self.zoom_to_bbox(bbox);
    }

    fn mark_viewport_changed(&mut self);

    /// Screenshot mode forces full text rendering instead of placeholders
    fn screenshotting(&self) -> bool;

    fn set_screenshotting(&mut self, enabled: bool);

    fn selection(&self) -> Vec<SelectionItem>;

    fn select(&mut self, node_id: &str);

    fn deselect_all(&mut self);

    /// Applies several selection changes as one update
    fn update_selection(&mut self, update: &mut dyn FnMut(&mut Self))
    where
        Self: Sized;
}

/// Union of the bounding boxes of every node and edge, `None` when empty
pub fn content_bbox<C: CanvasEngine + ?Sized>(canvas: &C) -> Option<BBox> {
    let nodes = canvas.nodes().values().map(CanvasNode::bbox);
    let edges = canvas.edges().keys().filter_map(|id| canvas.edge_bbox(id));
    nodes.chain(edges).reduce(|acc, bbox| acc.union(&bbox))
}

/// View type string Obsidian uses for canvas views
pub const CANVAS_VIEW_TYPE: &str = "canvas";

/// A workspace view that may hold a canvas
#[derive(Debug, Clone)]
pub struct CanvasView<C> {
    pub view_type: String,
    /// Vault-relative path of the open file, if any
    pub file:      Option<String>,
    pub canvas:    C,
}

impl<C: CanvasEngine> CanvasView<C> {
    pub fn is_canvas_view(&self) -> bool {
        self.view_type == CANVAS_VIEW_TYPE
    }

    /// Returns the canvas only if this is a canvas view
    pub fn canvas(&self) -> Option<&C> {
        self.is_canvas_view().then_some(&self.canvas)
    }

    pub fn canvas_mut(&mut self) -> Option<&mut C> {
        if self.is_canvas_view() { Some(&mut self.canvas) } else { None }
    }
}

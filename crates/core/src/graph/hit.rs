//! Pointer hit testing and the hover/click interaction model.
//!
//! A linear scan over all nodes per pointer event. Acceptable only because
//! node counts are tens, not thousands.

use serde::Serialize;

use crate::types::DbId;

use super::layout::Vec2;
use super::{GraphNode, NodeId};

/// Reference radius for the detection multiplier. Nodes at or above this
/// radius get a 1x threshold; smaller nodes get proportionally more so they
/// remain clickable.
const DETECTION_REF_RADIUS: f64 = 28.0;

/// Upper bound on the detection multiplier for very small nodes.
const DETECTION_MAX_MULTIPLIER: f64 = 3.0;

/// Offset of the tooltip anchor from the pointer, in pixels.
const TOOLTIP_OFFSET: f64 = 12.0;

/// Detection multiplier, inversely scaled to node radius.
pub fn detection_multiplier(radius: f64) -> f64 {
    (DETECTION_REF_RADIUS / radius).clamp(1.0, DETECTION_MAX_MULTIPLIER)
}

/// Find the first node within its scaled detection threshold of the pointer.
pub fn hit_test(nodes: &[GraphNode], pointer: Vec2) -> Option<&GraphNode> {
    nodes.iter().find(|node| {
        let threshold = node.radius * detection_multiplier(node.radius);
        node.pos.distance_to(pointer) <= threshold
    })
}

/// Floating tooltip view-model for a hovered node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub title: String,
    pub description: Option<String>,
    /// Anchor position near the pointer.
    pub x: f64,
    pub y: f64,
}

/// Tooltip contents and placement for a hovered node.
pub fn tooltip_for(node: &GraphNode, pointer: Vec2) -> Tooltip {
    Tooltip {
        title: node.title.clone(),
        description: node.description.clone(),
        x: pointer.x + TOOLTIP_OFFSET,
        y: pointer.y + TOOLTIP_OFFSET,
    }
}

/// Result of clicking a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Open the detail page of the clicked leaf.
    Navigate(DbId),
    /// Category/subcategory clicks are reserved for future filtering.
    None,
}

/// Resolve a click on a node to an action.
pub fn click_action(node: &GraphNode) -> ClickAction {
    match node.id {
        NodeId::Leaf(id) => ClickAction::Navigate(id),
        NodeId::Category(_) | NodeId::Subcategory(_) => ClickAction::None,
    }
}

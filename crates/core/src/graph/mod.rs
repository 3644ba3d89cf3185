//! The node-graph visualization model ("neuron map").
//!
//! The canvas scene is a flat array of node view-models rebuilt from state:
//! the [`builder`] turns skills plus the category tree into typed nodes with
//! links, [`layout`] scatters them and advances the bounce animation one
//! frame at a time, and [`hit`] resolves pointer events to hover/click
//! actions. Rendering itself is a client concern; this model is what the
//! `/api/graph` endpoint serves.

pub mod builder;
pub mod hit;
pub mod layout;

use serde::{Deserialize, Serialize};

use crate::types::DbId;

pub use builder::{build_graph, GraphCategory, GraphFilter, GraphItem, GraphSubcategory};
pub use hit::{click_action, hit_test, tooltip_for, ClickAction, Tooltip};
pub use layout::{step, CanvasBounds, Vec2, CANVAS_PADDING};

/// Grouping label assigned to leaves with no category or subcategory.
pub const MISC_GROUP: &str = "Misc";

/// Node variant on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Category,
    Subcategory,
    Leaf,
}

/// Stable node identity, unique across rebuilds of the same scene.
///
/// Category and leaf ids come from different tables and may collide as raw
/// integers, so identity carries the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum NodeId {
    Category(DbId),
    Subcategory(DbId),
    Leaf(DbId),
}

impl NodeId {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeId::Category(_) => NodeKind::Category,
            NodeId::Subcategory(_) => NodeKind::Subcategory,
            NodeId::Leaf(_) => NodeKind::Leaf,
        }
    }
}

/// Display radius in pixels per node kind.
pub fn radius_for(kind: NodeKind) -> f64 {
    match kind {
        NodeKind::Category => 28.0,
        NodeKind::Subcategory => 20.0,
        NodeKind::Leaf => 14.0,
    }
}

/// View-model for a single canvas node.
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub title: String,
    pub description: Option<String>,
    pub color: String,
    /// Display grouping label (category name, legacy label, or [`MISC_GROUP`]).
    pub group: String,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f64,
    /// Connected node ids; bidirectional after back-link synthesis.
    pub links: Vec<NodeId>,
}

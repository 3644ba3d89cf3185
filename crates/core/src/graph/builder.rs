//! Builds the flat node set for the canvas from skills plus the category tree.

use std::collections::HashMap;

use rand::Rng;

use crate::search::{matches_query, normalize_query};
use crate::types::DbId;

use super::layout::{random_velocity, CanvasBounds, Vec2};
use super::{radius_for, GraphNode, NodeId, MISC_GROUP};

/// One item (skill/neuron) to place on the canvas.
#[derive(Debug, Clone)]
pub struct GraphItem {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// Rich-text body, searched but not displayed on the canvas.
    pub body: Option<String>,
    pub color: String,
    /// Legacy free-text category label (pre-taxonomy records).
    pub category_label: Option<String>,
    pub category_id: Option<DbId>,
    pub subcategory_id: Option<DbId>,
    /// Persisted canvas position, overrides the random scatter.
    pub position: Option<Vec2>,
}

#[derive(Debug, Clone)]
pub struct GraphSubcategory {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub position: Option<Vec2>,
}

#[derive(Debug, Clone)]
pub struct GraphCategory {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub position: Option<Vec2>,
    pub subcategories: Vec<GraphSubcategory>,
}

/// Active category filter for the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphFilter {
    /// "Show all" -- every category appears even without leaves, unless a
    /// search is active.
    #[default]
    All,
    /// Only the selected category subtree and its leaves.
    Category(DbId),
}

/// Build the scene: typed nodes with positions, velocities, and
/// bidirectional links.
///
/// Inclusion rules:
/// - A category node is included if it has at least one associated leaf, or
///   the filter is [`GraphFilter::All`] with no active search, or it is the
///   explicitly selected filter.
/// - A subcategory node follows the identical rule relative to its own
///   leaves.
/// - A leaf is always included (subject to the filter and search) and links
///   to its subcategory if present, else its category, else stands unlinked.
/// - Parent-to-child back-links are synthesized after the forward links so
///   traversal works in both directions.
///
/// Categories and subcategories with blank names are filtered here at read
/// time; legacy rows are not prevented at write time.
pub fn build_graph(
    items: &[GraphItem],
    categories: &[GraphCategory],
    filter: GraphFilter,
    query: Option<&str>,
    bounds: &CanvasBounds,
    rng: &mut impl Rng,
) -> Vec<GraphNode> {
    let query = query.and_then(normalize_query);
    let searching = query.is_some();

    // Subcategory -> parent category, and category name lookups.
    let mut parent_of: HashMap<DbId, DbId> = HashMap::new();
    let mut category_names: HashMap<DbId, &str> = HashMap::new();
    for category in categories {
        category_names.insert(category.id, category.name.as_str());
        for sub in &category.subcategories {
            parent_of.insert(sub.id, category.id);
        }
    }

    // Resolve an item's effective category id (direct, or via subcategory).
    let category_of = |item: &GraphItem| -> Option<DbId> {
        item.category_id
            .or_else(|| item.subcategory_id.and_then(|s| parent_of.get(&s).copied()))
    };

    let visible: Vec<&GraphItem> = items
        .iter()
        .filter(|item| match filter {
            GraphFilter::All => true,
            GraphFilter::Category(id) => category_of(item) == Some(id),
        })
        .filter(|item| match &query {
            None => true,
            Some(q) => matches_query(
                q,
                &[
                    Some(item.title.as_str()),
                    item.category_label.as_deref(),
                    item.description.as_deref(),
                    item.body.as_deref(),
                ],
            ),
        })
        .collect();

    // Leaf counts drive category/subcategory inclusion.
    let mut leaves_per_category: HashMap<DbId, usize> = HashMap::new();
    let mut leaves_per_subcategory: HashMap<DbId, usize> = HashMap::new();
    for item in &visible {
        if let Some(category_id) = category_of(item) {
            *leaves_per_category.entry(category_id).or_default() += 1;
        }
        if let Some(subcategory_id) = item.subcategory_id {
            *leaves_per_subcategory.entry(subcategory_id).or_default() += 1;
        }
    }

    let show_all = matches!(filter, GraphFilter::All) && !searching;

    let mut nodes: Vec<GraphNode> = Vec::new();

    for category in categories {
        if category.name.trim().is_empty() {
            continue;
        }
        let has_leaves = leaves_per_category.get(&category.id).copied().unwrap_or(0) > 0;
        let selected = filter == GraphFilter::Category(category.id);
        if !(has_leaves || show_all || selected) {
            continue;
        }
        nodes.push(make_node(
            NodeId::Category(category.id),
            &category.name,
            None,
            &category.color,
            &category.name,
            category.position,
            bounds,
            rng,
        ));

        for sub in &category.subcategories {
            if sub.name.trim().is_empty() {
                continue;
            }
            let has_leaves = leaves_per_subcategory.get(&sub.id).copied().unwrap_or(0) > 0;
            if !(has_leaves || show_all) {
                continue;
            }
            nodes.push(make_node(
                NodeId::Subcategory(sub.id),
                &sub.name,
                None,
                &sub.color,
                &category.name,
                sub.position,
                bounds,
                rng,
            ));
        }
    }

    // Node index for link resolution and back-link synthesis.
    let mut index_of: HashMap<NodeId, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id, i))
        .collect();

    let mut forward_links: Vec<(NodeId, NodeId)> = Vec::new();

    for item in &visible {
        let group = category_of(item)
            .and_then(|id| category_names.get(&id).copied())
            .filter(|name| !name.trim().is_empty())
            .map(str::to_string)
            .or_else(|| {
                item.category_label
                    .as_deref()
                    .map(str::trim)
                    .filter(|label| !label.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| MISC_GROUP.to_string());

        let leaf_id = NodeId::Leaf(item.id);
        let mut node = make_node(
            leaf_id,
            &item.title,
            item.description.as_deref(),
            &item.color,
            &group,
            item.position,
            bounds,
            rng,
        );

        // Link to the subcategory when present, else the category, else
        // stand unlinked.
        let target = item
            .subcategory_id
            .map(NodeId::Subcategory)
            .filter(|id| index_of.contains_key(id))
            .or_else(|| {
                category_of(item)
                    .map(NodeId::Category)
                    .filter(|id| index_of.contains_key(id))
            });

        if let Some(target) = target {
            node.links.push(target);
            forward_links.push((target, leaf_id));
        }

        index_of.insert(leaf_id, nodes.len());
        nodes.push(node);
    }

    // Back-links: parents point at their children too.
    for (parent, child) in forward_links {
        if let Some(&i) = index_of.get(&parent) {
            nodes[i].links.push(child);
        }
    }

    nodes
}

#[allow(clippy::too_many_arguments)]
fn make_node(
    id: NodeId,
    title: &str,
    description: Option<&str>,
    color: &str,
    group: &str,
    position: Option<Vec2>,
    bounds: &CanvasBounds,
    rng: &mut impl Rng,
) -> GraphNode {
    let kind = id.kind();
    let pos = match position {
        Some(p) => bounds.clamp(p),
        None => bounds.random_point(rng),
    };
    GraphNode {
        id,
        kind,
        title: title.to_string(),
        description: description.map(str::to_string),
        color: color.to_string(),
        group: group.to_string(),
        pos,
        vel: random_velocity(kind, rng),
        radius: radius_for(kind),
        links: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::graph::CANVAS_PADDING;

    fn bounds() -> CanvasBounds {
        CanvasBounds::new(800.0, 600.0)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(99)
    }

    fn category(id: DbId, name: &str, subcategories: Vec<GraphSubcategory>) -> GraphCategory {
        GraphCategory {
            id,
            name: name.to_string(),
            color: "#aa00aa".to_string(),
            position: None,
            subcategories,
        }
    }

    fn subcategory(id: DbId, name: &str) -> GraphSubcategory {
        GraphSubcategory {
            id,
            name: name.to_string(),
            color: "#00aaaa".to_string(),
            position: None,
        }
    }

    fn item(id: DbId, title: &str) -> GraphItem {
        GraphItem {
            id,
            title: title.to_string(),
            description: None,
            body: None,
            color: "#123456".to_string(),
            category_label: None,
            category_id: None,
            subcategory_id: None,
            position: None,
        }
    }

    fn find(nodes: &[GraphNode], id: NodeId) -> Option<&GraphNode> {
        nodes.iter().find(|n| n.id == id)
    }

    #[test]
    fn show_all_includes_empty_categories() {
        let categories = vec![category(1, "Programming", vec![]), category(2, "Music", vec![])];
        let mut leaf = item(10, "Rust");
        leaf.category_id = Some(1);

        let nodes = build_graph(
            &[leaf],
            &categories,
            GraphFilter::All,
            None,
            &bounds(),
            &mut rng(),
        );

        assert!(find(&nodes, NodeId::Category(1)).is_some());
        assert!(
            find(&nodes, NodeId::Category(2)).is_some(),
            "empty category must appear under show-all with no search"
        );
        assert!(find(&nodes, NodeId::Leaf(10)).is_some());
    }

    #[test]
    fn active_search_hides_categories_without_matching_leaves() {
        let categories = vec![category(1, "Programming", vec![]), category(2, "Music", vec![])];
        let mut leaf = item(10, "Rust");
        leaf.category_id = Some(1);

        let nodes = build_graph(
            &[leaf],
            &categories,
            GraphFilter::All,
            Some("does-not-match-anything"),
            &bounds(),
            &mut rng(),
        );

        assert!(find(&nodes, NodeId::Category(2)).is_none());
        assert!(find(&nodes, NodeId::Category(1)).is_none());
        assert!(nodes.is_empty());
    }

    #[test]
    fn search_keeps_matching_leaves_and_their_category() {
        let categories = vec![category(1, "Programming", vec![]), category(2, "Music", vec![])];
        let mut a = item(10, "JavaScript basics");
        a.category_id = Some(1);
        let mut b = item(11, "Guitar");
        b.category_id = Some(2);

        let nodes = build_graph(
            &[a, b],
            &categories,
            GraphFilter::All,
            Some("java"),
            &bounds(),
            &mut rng(),
        );

        assert!(find(&nodes, NodeId::Leaf(10)).is_some());
        assert!(find(&nodes, NodeId::Category(1)).is_some());
        assert!(find(&nodes, NodeId::Leaf(11)).is_none());
        assert!(find(&nodes, NodeId::Category(2)).is_none());
    }

    #[test]
    fn selected_filter_keeps_its_empty_category() {
        let categories = vec![category(1, "Programming", vec![]), category(2, "Music", vec![])];

        let nodes = build_graph(
            &[],
            &categories,
            GraphFilter::Category(2),
            None,
            &bounds(),
            &mut rng(),
        );

        assert!(find(&nodes, NodeId::Category(2)).is_some());
        assert!(find(&nodes, NodeId::Category(1)).is_none());
    }

    #[test]
    fn leaf_prefers_subcategory_link_over_category() {
        let categories = vec![category(1, "Programming", vec![subcategory(5, "Backend")])];
        let mut leaf = item(10, "Rust");
        leaf.category_id = Some(1);
        leaf.subcategory_id = Some(5);

        let nodes = build_graph(
            &[leaf],
            &categories,
            GraphFilter::All,
            None,
            &bounds(),
            &mut rng(),
        );

        let leaf_node = find(&nodes, NodeId::Leaf(10)).unwrap();
        assert_eq!(leaf_node.links, vec![NodeId::Subcategory(5)]);

        // Back-link synthesized on the parent.
        let sub_node = find(&nodes, NodeId::Subcategory(5)).unwrap();
        assert!(sub_node.links.contains(&NodeId::Leaf(10)));
    }

    #[test]
    fn subcategory_resolves_parent_category_for_filter_and_group() {
        let categories = vec![category(1, "Programming", vec![subcategory(5, "Backend")])];
        // Legacy row: subcategory set, category_id missing.
        let mut leaf = item(10, "Rust");
        leaf.subcategory_id = Some(5);

        let nodes = build_graph(
            &[leaf.clone()],
            &categories,
            GraphFilter::Category(1),
            None,
            &bounds(),
            &mut rng(),
        );
        assert!(
            find(&nodes, NodeId::Leaf(10)).is_some(),
            "filter must resolve the parent category through the subcategory"
        );
        assert_eq!(find(&nodes, NodeId::Leaf(10)).unwrap().group, "Programming");
    }

    #[test]
    fn uncategorized_leaf_gets_misc_group_and_no_links() {
        let nodes = build_graph(
            &[item(10, "Orphan")],
            &[],
            GraphFilter::All,
            None,
            &bounds(),
            &mut rng(),
        );

        let leaf = find(&nodes, NodeId::Leaf(10)).unwrap();
        assert_eq!(leaf.group, MISC_GROUP);
        assert!(leaf.links.is_empty());
        // Misc is a grouping label, not a synthetic node.
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn legacy_free_text_label_beats_misc() {
        let mut leaf = item(10, "Old note");
        leaf.category_label = Some("Legacy".to_string());

        let nodes = build_graph(
            &[leaf],
            &[],
            GraphFilter::All,
            None,
            &bounds(),
            &mut rng(),
        );

        assert_eq!(nodes[0].group, "Legacy");
        assert!(nodes[0].links.is_empty());
    }

    #[test]
    fn blank_named_categories_are_filtered_at_read_time() {
        let categories = vec![category(1, "   ", vec![]), category(2, "Music", vec![])];

        let nodes = build_graph(
            &[],
            &categories,
            GraphFilter::All,
            None,
            &bounds(),
            &mut rng(),
        );

        assert!(find(&nodes, NodeId::Category(1)).is_none());
        assert!(find(&nodes, NodeId::Category(2)).is_some());
    }

    #[test]
    fn persisted_position_overrides_scatter_and_is_clamped() {
        let mut leaf = item(10, "Pinned");
        leaf.position = Some(Vec2::new(-50.0, 120.0));

        let nodes = build_graph(
            &[leaf],
            &[],
            GraphFilter::All,
            None,
            &bounds(),
            &mut rng(),
        );

        assert_eq!(nodes[0].pos, Vec2::new(CANVAS_PADDING, 120.0));
    }

    #[test]
    fn whitespace_query_is_no_active_search() {
        let categories = vec![category(2, "Music", vec![])];

        let nodes = build_graph(
            &[],
            &categories,
            GraphFilter::All,
            Some("   "),
            &bounds(),
            &mut rng(),
        );

        assert!(
            find(&nodes, NodeId::Category(2)).is_some(),
            "a blank query must behave like no search at all"
        );
    }
}

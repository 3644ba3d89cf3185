//! HTTP-level integration tests for the `/graph` scene endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth};
use sqlx::PgPool;

/// Create a category through the API and return its id.
async fn create_category(pool: &PgPool, token: &str, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": name });
    let response = post_json_auth(app, "/api/categories", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a skill attached to a category and return its id.
async fn create_categorized_skill(
    pool: &PgPool,
    token: &str,
    name: &str,
    category_id: i64,
) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "name": name,
        "category": "whatever",
        "category_id": category_id
    });
    let response = post_json_auth(app, "/api/skills", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

fn nodes_of_kind<'a>(
    nodes: &'a [serde_json::Value],
    kind: &str,
) -> Vec<&'a serde_json::Value> {
    nodes
        .iter()
        .filter(|n| n["kind"].as_str() == Some(kind))
        .collect()
}

/// With filter "all" and no search, both a populated and an empty category
/// appear; leaves link to their category.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_show_all_includes_empty_categories(pool: PgPool) {
    let (token, _) = common::register_user(&pool, "alice").await;
    let programming = create_category(&pool, &token, "Programming").await;
    let _music = create_category(&pool, &token, "Music").await;
    create_categorized_skill(&pool, &token, "Rust", programming).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/graph", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let nodes = json["data"].as_array().unwrap().clone();

    assert_eq!(nodes_of_kind(&nodes, "category").len(), 2);
    let leaves = nodes_of_kind(&nodes, "leaf");
    assert_eq!(leaves.len(), 1);
    assert_eq!(leaves[0]["title"], "Rust");
    assert_eq!(
        leaves[0]["links"].as_array().unwrap().len(),
        1,
        "the leaf must link to its category"
    );
}

/// A search query that matches nothing removes the empty categories from
/// the scene.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_search_hides_unmatched_categories(pool: PgPool) {
    let (token, _) = common::register_user(&pool, "alice").await;
    let programming = create_category(&pool, &token, "Programming").await;
    let _music = create_category(&pool, &token, "Music").await;
    create_categorized_skill(&pool, &token, "Rust", programming).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/graph?query=zzz-no-match", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);

    // A matching query keeps the leaf and its category only.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/graph?query=rust", &token).await;
    let json = body_json(response).await;
    let nodes = json["data"].as_array().unwrap().clone();
    assert_eq!(nodes_of_kind(&nodes, "leaf").len(), 1);
    let categories = nodes_of_kind(&nodes, "category");
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["title"], "Programming");
}

/// The selected category filter keeps that category even when empty.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_selected_filter_keeps_empty_category(pool: PgPool) {
    let (token, _) = common::register_user(&pool, "alice").await;
    let music = create_category(&pool, &token, "Music").await;
    let programming = create_category(&pool, &token, "Programming").await;
    create_categorized_skill(&pool, &token, "Rust", programming).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/graph?category={music}"), &token).await;
    let json = body_json(response).await;
    let nodes = json["data"].as_array().unwrap().clone();

    let categories = nodes_of_kind(&nodes, "category");
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["title"], "Music");
    assert_eq!(nodes_of_kind(&nodes, "leaf").len(), 0);
}

/// Uncategorized skills render unlinked with the "Misc" grouping label, and
/// every node position lies inside the padded canvas.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_misc_grouping_and_bounds(pool: PgPool) {
    let (token, _) = common::register_user(&pool, "alice").await;

    // No category_id/subcategory_id and a blank legacy label.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": "Orphan", "category": "  " });
    let response = post_json_auth(app, "/api/skills", body, &token).await;
    // Blank category label is rejected by validation...
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // ...so create with a label but no taxonomy links; the label groups it.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": "Orphan", "category": "Legacy" });
    let response = post_json_auth(app, "/api/skills", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/graph?width=640&height=480", &token).await;
    let json = body_json(response).await;
    let nodes = json["data"].as_array().unwrap().clone();

    let leaves = nodes_of_kind(&nodes, "leaf");
    assert_eq!(leaves.len(), 1);
    assert_eq!(leaves[0]["group"], "Legacy");
    assert_eq!(leaves[0]["links"].as_array().unwrap().len(), 0);

    for node in &nodes {
        let x = node["pos"]["x"].as_f64().unwrap();
        let y = node["pos"]["y"].as_f64().unwrap();
        assert!((16.0..=624.0).contains(&x), "x out of padded bounds: {x}");
        assert!((16.0..=464.0).contains(&y), "y out of padded bounds: {y}");
    }
}

/// The graph endpoint requires authentication.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_graph_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/graph").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

use axum::http::StatusCode;
use insta::assert_snapshot;
use ontology_service::{
    app::AppContext,
    controller::{self, ontologies::SuperclassesResponse, INTERNAL_ERROR_DETAIL},
    tests_cfg, TestServer,
};
use rstest::rstest;
use serde_json::Value;

fn server(ctx: AppContext) -> TestServer {
    TestServer::new(controller::router(ctx).into_make_service()).expect("start test server")
}

#[tokio::test]
async fn root_redirects_to_docs() {
    let server = server(tests_cfg::app::get_app_context());

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "/docs");
}

#[tokio::test]
async fn docs_lists_endpoints_and_loaded_ontologies() {
    let server = server(tests_cfg::app::get_app_context());

    let response = server.get("/docs").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let page = response.text();
    assert!(page.contains("/ontologies/{ontology_name}/superclasses/{class_name}"));
    assert!(page.contains("<code>animals</code>"));
}

#[tokio::test]
async fn lists_available_ontologies() {
    let server = server(tests_cfg::app::get_app_context());

    let response = server.get("/ontologies").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        serde_json::json!({ "available_ontologies": ["animals"] })
    );
}

#[tokio::test]
async fn empty_store_explains_where_to_put_files() {
    let server = server(tests_cfg::app::get_empty_app_context());

    let response = server.get("/ontologies").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        serde_json::json!({
            "message": "No ontologies found or loaded. Please add .owl files to the 'ontologies' directory."
        })
    );
}

#[rstest]
#[case("Dog", &["Animal", "Dog", "Mammal", "Thing"])]
#[case("BullDog", &["Animal", "Bulldog", "Dog", "Mammal", "Thing"])]
#[case("Animal_003", &["Animal", "Animal_003", "Thing"])]
#[case("animals%23Dog", &["Animal", "Dog", "Mammal", "Thing"])]
#[tokio::test]
async fn superclasses_are_sorted_labels(#[case] class: &str, #[case] expected: &[&str]) {
    let server = server(tests_cfg::app::get_app_context());

    let response = server
        .get(&format!("/ontologies/animals/superclasses/{class}"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<SuperclassesResponse>().superclasses, expected);
}

#[tokio::test]
async fn superclasses_body_shape() {
    let server = server(tests_cfg::app::get_app_context());

    let response = server.get("/ontologies/animals/superclasses/BullDog").await;

    assert_snapshot!(
        "bulldog_superclasses",
        serde_json::to_string_pretty(&response.json::<Value>()).expect("serialize body")
    );
}

#[tokio::test]
async fn unknown_ontology_is_not_found() {
    let server = server(tests_cfg::app::get_app_context());

    let response = server.get("/ontologies/plants/superclasses/Dog").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        serde_json::json!({
            "detail": "Ontology 'plants' not found. Available ontologies: [\"animals\"]"
        })
    );
}

#[tokio::test]
async fn unknown_class_is_not_found() {
    let server = server(tests_cfg::app::get_app_context());

    let response = server.get("/ontologies/animals/superclasses/Unicorn").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["detail"],
        "Class 'Unicorn' not found in the ontology 'animals'."
    );
    assert_ne!(response.json::<Value>()["detail"], INTERNAL_ERROR_DETAIL);
}

#[tokio::test]
async fn readiness_reports_loaded_ontologies() {
    let server = server(tests_cfg::app::get_app_context());

    let response = server.get("/_readiness").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        serde_json::json!({
            "ok": true,
            "ontologies": 1,
            "reasoning": { "status": "skipped" }
        })
    );
}

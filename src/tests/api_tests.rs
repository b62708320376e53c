//! tests/api_tests.rs
//! Pruebas de los endpoints HTTP sin proveedores configurados.

use std::time::Duration;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use serde_json::{json, Value};

use super::test_context;
use crate::app;
use crate::config::app_config::RateLimitSettings;
use crate::handlers::health_handler;
use crate::middleware::rate_limit::RateLimiter;

macro_rules! test_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .configure(|cfg| $ctx.services.register(cfg))
                .configure(app::init_app),
        )
        .await
    };
}

#[actix_rt::test]
async fn root_reports_running() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "TUX Backend API is running");
    assert_eq!(body["status"], "ok");
}

#[actix_rt::test]
async fn health_reports_fallback_services() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    for uri in ["/health", "/api/health"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["ai_services"]["llm_service"], "fallback");
        assert_eq!(body["ai_services"]["vision_service"], "fallback");
        assert_eq!(body["ai_services"]["huggingface"], "not_configured");
        assert_eq!(body["ai_services"]["replicate"], "not_configured");
    }
}

#[actix_rt::test]
async fn generate_questions_rejects_blank_idea() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    for payload in [json!({ "app_idea": "   " }), json!({})] {
        let req = test::TestRequest::post()
            .uri("/api/generate-questions")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "App idea cannot be empty");
    }
}

#[actix_rt::test]
async fn generate_questions_rejects_too_long_idea() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/generate-questions")
        .set_json(json!({ "app_idea": "a".repeat(1001) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_rt::test]
async fn malformed_json_is_unprocessable() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/generate-questions")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["detail"].is_string());
}

#[actix_rt::test]
async fn generate_questions_uses_smart_set_without_provider() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/generate-questions")
        .set_json(json!({ "app_idea": "  An online store for handmade crafts " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["app_idea"], "An online store for handmade crafts");
    let questions = body["questions"].as_array().expect("questions");
    assert_eq!(questions.len(), 5);
    assert_eq!(questions[0]["id"], "target_audience");
    assert!(questions.iter().any(|q| q["id"] == "product_types"));
    assert_eq!(body["metadata"]["total_questions"], 5);
    assert_eq!(body["metadata"]["app_type"], "e-commerce");
}

#[actix_rt::test]
async fn test_questions_returns_three_samples() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/test-questions/fitness")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["app_idea"],
        "A personal fitness tracking app with workout plans"
    );
    assert_eq!(body["question_count"], 5);
    assert_eq!(body["sample_questions"].as_array().map(Vec::len), Some(3));
}

#[actix_rt::test]
async fn process_requirements_normalizes_and_classifies() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/process-requirements")
        .set_json(json!({
            "purpose": "A marketplace for local artists",
            "audience": "artists, collectors",
            "goals": ["sell art"],
            "useCases": ["browse", "buy", "list items"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "processed");
    assert_eq!(body["data"]["app_type"], "e-commerce");
    assert_eq!(body["data"]["complexity"], "moderate");
    assert_eq!(body["data"]["audience_segments"], 2);
    assert_eq!(
        body["data"]["requirements"]["audience"],
        json!(["artists", "collectors"])
    );
    assert!(body["suggestions"].is_array());
}

#[actix_rt::test]
async fn process_requirements_requires_core_fields() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/process-requirements")
        .set_json(json!({ "audience": ["students"], "goals": "learn" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Missing required fields: purpose");
}

#[actix_rt::test]
async fn validate_requirements_reports_missing_fields() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/validate-requirements")
        .set_json(json!({ "purpose": "Short" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["is_valid"], false);
    assert_eq!(body["missing_fields"], json!(["audience", "goals"]));
    assert_eq!(body["completeness_score"], 20);
    assert!(body["warnings"]
        .as_array()
        .expect("warnings")
        .contains(&json!("Purpose description is very short")));
}

#[actix_rt::test]
async fn generate_design_uses_templates_without_provider() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/generate-design")
        .set_json(json!({
            "purpose": "A social community for runners",
            "audience": ["runners"],
            "goals": ["share routes"],
            "useCases": ["post a run"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let screens = body["screens"].as_array().expect("screens");
    assert_eq!(screens[0]["id"], "landing");
    assert!(screens.iter().any(|s| s["id"] == "feed"));
    assert_eq!(
        body["componentLibrary"]["primaryLibrary"]["name"],
        "Ant Design"
    );
    assert!(body["roleInsights"]["designer"].is_string());
    assert!(body["dataModel"]["entities"].is_array());
    assert!(body["responsiveDesign"]["breakpoints"].is_object());
}

#[actix_rt::test]
async fn generate_design_skips_roles_when_disabled() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/generate-design-with-model?model=mistralai/Mistral-7B-Instruct-v0.1")
        .set_json(json!({
            "purpose": "Internal business dashboard",
            "audience": "managers",
            "goals": "track sales",
            "simulateRoles": false
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["screens"]
        .as_array()
        .expect("screens")
        .iter()
        .any(|s| s["id"] == "dashboard"));
}

#[actix_rt::test]
async fn generate_design_with_unknown_model_is_unprocessable() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/generate-design-with-model?model=nope")
        .set_json(json!({ "purpose": "A todo app", "audience": "me", "goals": "focus" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Unknown model: nope");
}

fn login_screen() -> Value {
    json!({
        "name": "Login Page",
        "description": "Sign in to the app",
        "elements": ["Email input", "Submit button"]
    })
}

#[actix_rt::test]
async fn generate_screens_html_mode_uses_local_template() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/generate-screens")
        .set_json(json!({ "screens": [login_screen()], "generation_mode": "html" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total_screens"], 1);
    assert_eq!(body["generation_method"], "html");
    assert_eq!(body["mockup_images"], json!([]));

    let screen = &body["screens"][0];
    assert_eq!(screen["id"], "screen_login_page");
    let html = screen["html_layout"].as_str().expect("html_layout");
    assert!(html.contains("Login Page"));
    assert!(html.contains("<button"));
    assert_eq!(screen["elements"][0]["type"], "input");
    assert_eq!(screen["elements"][1]["type"], "button");
    assert_eq!(screen["elements"][1]["position"], json!({ "x": 70, "y": 180 }));
}

#[actix_rt::test]
async fn generate_screens_hybrid_attaches_html_mockups() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/generate-screens")
        .set_json(json!({ "screens": [login_screen()] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["generation_method"], "hybrid");
    assert_eq!(body["screens"][0]["generation_method"], "hybrid");
    assert!(body["screens"][0].get("mockup_url").is_none());

    let mockup = &body["mockup_images"][0];
    assert_eq!(mockup["generation_method"], "html_fallback");
    assert_eq!(mockup["screen_id"], "screen_login_page");
}

#[actix_rt::test]
async fn generate_screens_image_mode_builds_screens_from_mockups() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/generate-screens")
        .set_json(json!({ "screens": [login_screen()], "generation_mode": "image" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let screen = &body["screens"][0];
    assert_eq!(screen["generation_method"], "html_fallback");
    assert!(screen["html_layout"]
        .as_str()
        .expect("html_layout")
        .contains("mockup-container"));
}

#[actix_rt::test]
async fn generate_screens_rejects_unknown_mode_and_empty_list() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/generate-screens")
        .set_json(json!({ "screens": [login_screen()], "generation_mode": "video" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::post()
        .uri("/api/generate-screens")
        .set_json(json!({ "screens": [], "generation_mode": "html" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Failed to generate any screens");
}

#[actix_rt::test]
async fn screen_html_and_element_update_echo_back() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/screens/screen_home/html")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["screen_id"], "screen_home");
    assert!(body["html"].is_string());

    let req = test::TestRequest::post()
        .uri("/api/screens/screen_home/update-element")
        .set_json(json!({ "element_id": "element_0_title", "content": "Hola" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["updated"], true);
    assert_eq!(body["changes"]["content"], "Hola");
}

#[actix_rt::test]
async fn image_variations_are_empty_without_replicate() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/generate-image-variations?screen_id=screen_login_page")
        .set_json(json!({ "screen_data": login_screen() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["screen_id"], "screen_login_page");
    assert_eq!(body["total_variations"], 0);
}

#[actix_rt::test]
async fn models_endpoint_reports_demo_mode() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/api/models").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["llm_models"][0]["id"], "demo-llm");
    assert_eq!(body["llm_models"][0]["status"], "demo_mode");
    assert_eq!(body["vision_models"][0]["id"], "demo-vision");
    assert_eq!(body["recommended_llm"], "demo-llm");
    assert_eq!(body["api_keys_configured"]["replicate"], false);
    assert!(body.get("local_models").is_none());
}

#[actix_rt::test]
async fn session_lifecycle_over_http() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/sessions")
        .set_json(json!({ "requirements": { "purpose": "Recipe sharing" } }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Session created successfully");
    let id = body["session_id"].as_str().expect("session_id").to_string();

    let req = test::TestRequest::get().uri("/api/sessions").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["sessions"][0]["app_idea"], "Recipe sharing");

    let req = test::TestRequest::put()
        .uri(&format!("/api/sessions/{}", id))
        .set_json(json!({ "screens": [{ "name": "Home" }] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/sessions/{}", id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["requirements"]["purpose"], "Recipe sharing");
    assert_eq!(body["data"]["screens"][0]["name"], "Home");

    let req = test::TestRequest::get()
        .uri(&format!("/api/sessions/{}/export", id))
        .to_request();
    let export: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(export["export_version"], "1.0");

    let req = test::TestRequest::post()
        .uri("/api/sessions/import")
        .set_json(&export)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Session imported successfully");
    assert_ne!(body["session_id"], json!(id));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/sessions/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/sessions/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Session not found");
}

#[actix_rt::test]
async fn session_errors_map_to_status_codes() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::delete()
        .uri("/api/sessions/00000000-0000-4000-8000-000000000000")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::get()
        .uri("/api/sessions/not-a-uuid")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::put()
        .uri("/api/sessions/00000000-0000-4000-8000-000000000000")
        .set_json(json!({ "screens": [] }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::post()
        .uri("/api/sessions/import")
        .set_json(json!({ "export_version": "1.0" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Invalid export data");
}

#[actix_rt::test]
async fn html_export_download_is_an_attachment() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/export/html")
        .set_json(json!({
            "screens": [{ "name": "Home", "html_layout": "<main>hi</main>" }],
            "project_name": "My Shop"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("My_Shop_export.html"));

    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let body = test::read_body(resp).await;
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("<main>hi</main>"));

    let saved = std::fs::read_dir(ctx.dir.path().join("exports"))
        .expect("exports dir")
        .count();
    assert_eq!(saved, 1);
}

#[actix_rt::test]
async fn inline_exports_set_content_type() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/export/json/inline")
        .set_json(json!({ "screens": [{ "name": "Home" }], "requirements": { "purpose": "x" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["export_version"], "1.0");
    assert_eq!(body["tux_version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["data"]["requirements"]["purpose"], "x");

    let req = test::TestRequest::post()
        .uri("/api/export/svg/inline")
        .set_json(json!({ "screen": { "name": "Home Page", "elements": ["Logo"] } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.starts_with("inline"));
    assert!(disposition.contains("Home_Page_export.svg"));
    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("<svg"));
}

#[actix_rt::test]
async fn analytics_track_and_list() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/analytics/track")
        .set_json(json!({ "event": "page_view", "user_id": "u1", "metadata": { "page": "home" } }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Event tracked successfully");
    assert!(body["event_id"].is_string());

    let req = test::TestRequest::get()
        .uri("/api/analytics/events?limit=5")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let events = body["events"].as_array().expect("events");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event"], "page_view");
    assert_eq!(events[0]["metadata"]["page"], "home");

    let req = test::TestRequest::post()
        .uri("/api/analytics/track")
        .set_json(json!({ "event": " " }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[actix_rt::test]
async fn cost_endpoints_start_empty() {
    let ctx = test_context().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/api/costs/daily").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total_requests"], 0);

    let req = test::TestRequest::get()
        .uri("/api/costs/daily?date=14-10-2026")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Invalid date format. Use YYYY-MM-DD");

    let req = test::TestRequest::get().uri("/api/costs/projection").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["projection_confidence"], "low");

    let req = test::TestRequest::get().uri("/api/costs/suggestions").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["suggestions"][0]["type"], "info");

    let req = test::TestRequest::get().uri("/api/costs/stats").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["tracking_enabled"], true);
    assert_eq!(body["total_events"], 0);
}

#[actix_rt::test]
async fn rate_limiter_rejects_after_limit() {
    let ctx = test_context().await;
    let limiter = RateLimiter::new(RateLimitSettings {
        enabled: true,
        max_requests: 2,
        window: Duration::from_secs(60),
    });
    let app = test::init_service(
        App::new()
            .wrap(limiter)
            .app_data(web::Data::new(ctx.services.health.clone()))
            .route("/", web::get().to(health_handler::root_endpoint))
            .route("/health", web::get().to(health_handler::health_endpoint)),
    )
    .await;

    for remaining in ["1", "0"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok()),
            Some(remaining)
        );
    }

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(resp.headers().contains_key(header::RETRY_AFTER));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Too many requests. Please try again later.");

    // /health no cuenta contra el límite
    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

//! tests/screen_tests.rs
//! Elementos editables, plantillas locales y prompts de mockups.

use std::time::Duration;

use crate::models::catalog_model::VisionModel;
use crate::models::screen_model::{GenerationMode, ScreenGenerationRequest, ScreenSpec};
use crate::services::cost_tracker::CostTracker;
use crate::services::llm_service::LlmService;
use crate::services::request_cache::RequestCache;
use crate::services::screen_service::{
    create_editable_elements, determine_element_type, fallback_screen_html, screen_id,
    ScreenService,
};
use crate::services::vision_service::{build_mockup_prompt, html_fallback_mockup, VisionService};

fn offline_screens() -> ScreenService {
    let tracker = CostTracker::new(true);
    let llm = LlmService::new(None, 1, RequestCache::disabled(), tracker.clone());
    let vision = VisionService::new(
        None,
        VisionModel::StableDiffusionXl,
        Duration::from_secs(5),
        tracker,
    )
    .expect("vision service");
    ScreenService::new(llm, vision)
}

#[test]
fn element_type_follows_first_matching_keyword() {
    assert_eq!(determine_element_type("Submit Button"), "button");
    assert_eq!(determine_element_type("Search field"), "input");
    // button se evalúa antes que input
    assert_eq!(determine_element_type("Text button"), "button");
    assert_eq!(determine_element_type("Hero image"), "image");
    assert_eq!(determine_element_type("Page title"), "header");
    assert_eq!(determine_element_type("Side menu"), "navigation");
    assert_eq!(determine_element_type("Product card"), "container");
    assert_eq!(determine_element_type("Footer"), "text");
}

#[test]
fn editable_elements_get_ids_positions_and_styles() {
    let elements = create_editable_elements(&[
        "Main Header".to_string(),
        "Buy button".to_string(),
        "Price".to_string(),
    ]);
    assert_eq!(elements.len(), 3);

    assert_eq!(elements[0].id, "element_0_main_header");
    assert_eq!(elements[0].element_type, "header");
    assert_eq!((elements[0].position.x, elements[0].position.y), (50, 100));

    let button = &elements[1];
    assert_eq!(button.element_type, "button");
    assert_eq!(button.styles["backgroundColor"], "#3b82f6");
    assert_eq!(button.styles["color"], "#ffffff");

    let price = &elements[2];
    assert_eq!((price.position.x, price.position.y), (90, 260));
    assert_eq!(price.styles["backgroundColor"], "#ffffff");
    assert_eq!(price.styles.len(), 7);
}

#[test]
fn screen_ids_are_snake_cased() {
    assert_eq!(screen_id("User Profile"), "screen_user_profile");
    assert_eq!(screen_id("home"), "screen_home");
}

#[test]
fn fallback_html_escapes_user_text() {
    let spec = ScreenSpec::new(
        "<Admin> Panel",
        "Manage \"everything\"",
        &["Save button", "Email input", "Intro text", "Stats"],
    );
    let html = fallback_screen_html(&spec);
    assert!(html.contains("&lt;Admin&gt; Panel"));
    assert!(!html.contains("<Admin>"));
    assert!(html.contains("#10b981"));
    assert!(html.contains("placeholder=\"Enter email input\""));
    assert!(html.contains("Intro text: Lorem ipsum"));
    assert!(html.contains("Placeholder content for Stats"));
}

#[test]
fn mockup_prompt_includes_style_modifier_and_quality_phrases() {
    let elements: Vec<String> = (0..12).map(|i| format!("el{}", i)).collect();
    let spec = ScreenSpec {
        elements,
        ..ScreenSpec::new("Checkout", "Pay for your order", &[])
    };
    let prompt = build_mockup_prompt(&spec, "dark mode");
    assert!(prompt.starts_with("dark mode UI mockup design, screen name: Checkout, Pay for your order"));
    assert!(prompt.contains("el9"));
    assert!(!prompt.contains("el10"));
    assert!(prompt.contains("dark theme UI"));
    assert!(prompt.ends_with("consistent design system"));

    let unnamed = build_mockup_prompt(&ScreenSpec::default(), "sketch");
    assert!(unnamed.contains("screen name: App Screen"));
}

#[test]
fn html_mockup_keeps_screen_identity() {
    let spec = ScreenSpec {
        id: Some("screen_cart".to_string()),
        ..ScreenSpec::new("Cart", "Items <selected>", &["Total"])
    };
    let mockup = html_fallback_mockup(&spec);
    assert_eq!(mockup.screen_id, "screen_cart");
    assert_eq!(mockup.generation_method, "html_fallback");
    assert!(mockup.image_url.is_none());
    let html = mockup.html_content.expect("html");
    assert!(html.contains("Items &lt;selected&gt;"));
    assert!(html.contains("<div class=\"element\">Total</div>"));
}

#[test]
fn element_objects_are_reduced_to_labels() {
    let spec: ScreenSpec = serde_json::from_value(serde_json::json!({
        "name": "Home",
        "elements": [{ "type": "button", "content": "Go" }, { "type": "image" }, "Logo", null]
    }))
    .expect("spec");
    assert_eq!(spec.elements, ["Go", "image", "Logo"]);
    assert_eq!(spec.slug(), "home");
}

#[actix_rt::test]
async fn offline_generation_covers_every_mode() {
    let service = offline_screens();
    let spec = ScreenSpec::new("Dashboard", "Overview", &["Summary card", "Refresh button"]);

    for mode in [GenerationMode::Html, GenerationMode::Image, GenerationMode::Hybrid] {
        let req = ScreenGenerationRequest {
            screens: vec![spec.clone()],
            ui_standards: "modern".to_string(),
            generation_mode: mode,
            image_style: "clean wireframe".to_string(),
        };
        let resp = service.generate_screens(&req).await.expect("screens");
        assert_eq!(resp.total_screens, 1);
        assert_eq!(resp.generation_method, mode.as_str());
        assert_eq!(resp.screens[0].id, "screen_dashboard");
        assert_eq!(resp.screens[0].elements.len(), 2);
        assert_eq!(resp.mockup_images.len(), if mode.wants_images() { 1 } else { 0 });
    }

    let variations = service.image_variations(&spec, None).await;
    assert!(variations.is_empty());
}

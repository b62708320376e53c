//! app.rs
//! Rutas y servicios compartidos por los workers.

use anyhow::Result;
use actix_web::web;
use sqlx::{Pool, Sqlite};

use crate::config::app_config::Settings;
use crate::error::{json_error_handler, query_error_handler};
use crate::models::catalog_model::VisionModel;
use crate::services::analytics_service::AnalyticsService;
use crate::services::cost_tracker::CostTracker;
use crate::services::export_service::ExportService;
use crate::services::health_service::HealthService;
use crate::services::llm_client::LlmClient;
use crate::services::llm_service::LlmService;
use crate::services::model_catalog::ModelCatalog;
use crate::services::question_service::QuestionService;
use crate::services::request_cache::RequestCache;
use crate::services::requirements_service::RequirementsService;
use crate::services::screen_service::ScreenService;
use crate::services::session_service::SessionService;
use crate::services::ux_generator::UxGenerator;
use crate::services::vision_service::VisionService;

use crate::handlers::{
    analytics_handler, cost_handler, design_handler, export_handler, health_handler,
    model_handler, question_handler, requirements_handler, screen_handler, session_handler,
};

/// Límite del body JSON
const JSON_LIMIT: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct Services {
    pub health: HealthService,
    pub questions: QuestionService,
    pub requirements: RequirementsService,
    pub ux_generator: UxGenerator,
    pub screens: ScreenService,
    pub catalog: ModelCatalog,
    pub sessions: SessionService,
    pub exports: ExportService,
    pub analytics: AnalyticsService,
    pub cost_tracker: CostTracker,
}

impl Services {
    /// Construye los servicios. La base de datos ya debe estar migrada.
    pub fn build(settings: &Settings, db_pool: Pool<Sqlite>) -> Result<Self> {
        let cost_tracker = CostTracker::new(settings.enable_cost_tracking);
        let cache = RequestCache::new(settings.enable_request_caching, settings.cache_duration);

        let llm = LlmService::new(
            LlmClient::from_settings(settings)?,
            settings.max_concurrent_requests,
            cache,
            cost_tracker.clone(),
        );

        let vision_model = VisionModel::from_id(&settings.default_vision_model).unwrap_or_else(|| {
            log::warn!(
                "DEFAULT_VISION_MODEL desconocido ({}), se usa stable-diffusion-xl",
                settings.default_vision_model
            );
            VisionModel::StableDiffusionXl
        });
        let mut vision = VisionService::new(
            settings.api_keys.replicate.clone(),
            vision_model,
            settings.request_timeout,
            cost_tracker.clone(),
        )?;
        if let Some(url) = settings.base_urls.replicate.as_deref() {
            vision = vision.with_base_url(url);
        }

        let health = HealthService::new(
            llm.is_available(),
            vision.is_available(),
            settings.api_keys.huggingface.is_some(),
        );
        let catalog = ModelCatalog::new(settings, llm.provider_name().zip(llm.active_model()));

        Ok(Services {
            health,
            questions: QuestionService::new(llm.clone()),
            requirements: RequirementsService::new(),
            ux_generator: UxGenerator::new(llm.clone()),
            screens: ScreenService::new(llm, vision),
            catalog,
            sessions: SessionService::new(settings.session_storage_path.clone())?,
            exports: ExportService::new(settings.export_storage_path.clone())?,
            analytics: AnalyticsService::new(db_pool),
            cost_tracker,
        })
    }

    /// Registra cada servicio como `web::Data` y los extractores JSON/query.
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(
            web::JsonConfig::default()
                .limit(JSON_LIMIT)
                .error_handler(json_error_handler),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::Data::new(self.health.clone()))
        .app_data(web::Data::new(self.questions.clone()))
        .app_data(web::Data::new(self.requirements.clone()))
        .app_data(web::Data::new(self.ux_generator.clone()))
        .app_data(web::Data::new(self.screens.clone()))
        .app_data(web::Data::new(self.catalog.clone()))
        .app_data(web::Data::new(self.sessions.clone()))
        .app_data(web::Data::new(self.exports.clone()))
        .app_data(web::Data::new(self.analytics.clone()))
        .app_data(web::Data::new(self.cost_tracker.clone()));
    }
}

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health_handler::root_endpoint))
        .route("/health", web::get().to(health_handler::health_endpoint))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health_handler::health_endpoint))
                .route(
                    "/generate-questions",
                    web::post().to(question_handler::generate_questions_endpoint),
                )
                .route(
                    "/test-questions/{app_type}",
                    web::get().to(question_handler::test_questions_endpoint),
                )
                .route(
                    "/process-requirements",
                    web::post().to(requirements_handler::process_requirements_endpoint),
                )
                .route(
                    "/validate-requirements",
                    web::post().to(requirements_handler::validate_requirements_endpoint),
                )
                .route(
                    "/generate-design",
                    web::post().to(design_handler::generate_design_endpoint),
                )
                .route(
                    "/generate-design-with-model",
                    web::post().to(design_handler::generate_design_with_model_endpoint),
                )
                .route(
                    "/generate-screens",
                    web::post().to(screen_handler::generate_screens_endpoint),
                )
                .route(
                    "/screens/{screen_id}/html",
                    web::get().to(screen_handler::screen_html_endpoint),
                )
                .route(
                    "/screens/{screen_id}/update-element",
                    web::post().to(screen_handler::update_element_endpoint),
                )
                .route(
                    "/generate-image-variations",
                    web::post().to(screen_handler::image_variations_endpoint),
                )
                .route("/models", web::get().to(model_handler::list_models_endpoint))
                .service(
                    web::scope("/sessions")
                        .route("", web::post().to(session_handler::create_session_endpoint))
                        .route("", web::get().to(session_handler::list_sessions_endpoint))
                        // antes que /{id} para que no se tome "import" como id
                        .route(
                            "/import",
                            web::post().to(session_handler::import_session_endpoint),
                        )
                        .route("/{id}", web::get().to(session_handler::get_session_endpoint))
                        .route("/{id}", web::put().to(session_handler::update_session_endpoint))
                        .route(
                            "/{id}",
                            web::delete().to(session_handler::delete_session_endpoint),
                        )
                        .route(
                            "/{id}/export",
                            web::get().to(session_handler::export_session_endpoint),
                        ),
                )
                .service(
                    web::scope("/export")
                        .route("/html", web::post().to(export_handler::export_html_endpoint))
                        .route("/json", web::post().to(export_handler::export_json_endpoint))
                        .route("/svg", web::post().to(export_handler::export_svg_endpoint))
                        .route(
                            "/html/inline",
                            web::post().to(export_handler::export_html_inline_endpoint),
                        )
                        .route(
                            "/json/inline",
                            web::post().to(export_handler::export_json_inline_endpoint),
                        )
                        .route(
                            "/svg/inline",
                            web::post().to(export_handler::export_svg_inline_endpoint),
                        ),
                )
                .service(
                    web::scope("/analytics")
                        .route("/track", web::post().to(analytics_handler::track_event_endpoint))
                        .route("/events", web::get().to(analytics_handler::list_events_endpoint)),
                )
                .service(
                    web::scope("/costs")
                        .route("/daily", web::get().to(cost_handler::daily_costs_endpoint))
                        .route(
                            "/projection",
                            web::get().to(cost_handler::cost_projection_endpoint),
                        )
                        .route(
                            "/suggestions",
                            web::get().to(cost_handler::cost_suggestions_endpoint),
                        )
                        .route("/stats", web::get().to(cost_handler::cost_stats_endpoint)),
                ),
        );
}

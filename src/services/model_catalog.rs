//! services/model_catalog.rs
//! Catálogo de modelos según las llaves configuradas.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::app_config::{ApiKeys, Settings};
use crate::models::catalog_model::{
    AiModel, LocalModelEntry, ModelEntry, ModelsResponse, VisionModel,
};

/// (nombre, caso de uso, descripción)
const LOCAL_MODELS: [(&str, &str, &str); 3] = [
    (
        "Phi-3-mini-4k-instruct",
        "requirements_analysis",
        "Efficient instruction-following model for analysis",
    ),
    (
        "StableLM-Zephyr-3B",
        "ux_generation",
        "Optimized for creative UX content generation",
    ),
    (
        "Qwen2-1.5B-Instruct",
        "html_generation",
        "Precise HTML/CSS code generation",
    ),
];

#[derive(Clone, Debug)]
pub struct ModelCatalog {
    huggingface: bool,
    together: bool,
    replicate: bool,
    anthropic: bool,
    openai: bool,
    // proveedor de texto activo: (proveedor, modelo)
    active_llm: Option<(String, String)>,
    local_models_path: Option<PathBuf>,
}

impl ModelCatalog {
    pub fn new(settings: &Settings, active_llm: Option<(&str, &str)>) -> Self {
        let ApiKeys {
            anthropic,
            openai,
            huggingface,
            together,
            replicate,
        } = &settings.api_keys;
        ModelCatalog {
            huggingface: huggingface.is_some(),
            together: together.is_some(),
            replicate: replicate.is_some(),
            anthropic: anthropic.is_some(),
            openai: openai.is_some(),
            active_llm: active_llm.map(|(p, m)| (p.to_string(), m.to_string())),
            local_models_path: settings
                .use_local_models
                .then(|| settings.local_models_path.clone()),
        }
    }

    pub fn available_models(&self) -> ModelsResponse {
        let mut llm_models = Vec::new();
        let mut vision_models = Vec::new();

        if self.together {
            llm_models.extend(
                [AiModel::Llama3_70b, AiModel::Llama3_8b]
                    .iter()
                    .map(|m| ModelEntry::new(m.display_name(), m.id(), "Together.ai", "available")),
            );
        }
        if self.huggingface {
            llm_models.extend(
                [
                    AiModel::Mistral7b,
                    AiModel::Mixtral8x7b,
                    AiModel::Phi3Mini,
                    AiModel::Qwen2_72b,
                ]
                .iter()
                .map(|m| ModelEntry::new(m.display_name(), m.id(), "HuggingFace", "available")),
            );
        }
        if let Some((provider, model)) = &self.active_llm {
            llm_models.push(ModelEntry::new(model, model, provider, "available"));
        }
        if self.replicate {
            vision_models.extend(
                [VisionModel::StableDiffusionXl, VisionModel::PlaygroundV2]
                    .iter()
                    .map(|m| ModelEntry::new(m.display_name(), m.id(), "Replicate", "available")),
            );
        }

        if llm_models.is_empty() && vision_models.is_empty() {
            llm_models.push(ModelEntry::new("Demo LLM", "demo-llm", "Demo", "demo_mode"));
            vision_models.push(ModelEntry::new("Demo Vision", "demo-vision", "Demo", "demo_mode"));
        }

        let recommended_llm = if self.together {
            AiModel::Llama3_70b.id()
        } else if self.huggingface {
            AiModel::Mistral7b.id()
        } else {
            "demo-llm"
        };
        let recommended_vision = if self.replicate {
            VisionModel::StableDiffusionXl.id()
        } else {
            "demo-vision"
        };

        let api_keys_configured: BTreeMap<String, bool> = [
            ("huggingface", self.huggingface),
            ("together", self.together),
            ("replicate", self.replicate),
            ("anthropic", self.anthropic),
            ("openai", self.openai),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect();

        ModelsResponse {
            llm_models,
            vision_models,
            api_keys_configured,
            recommended_llm: recommended_llm.to_string(),
            recommended_vision: recommended_vision.to_string(),
            local_models: self.local_models_path.as_ref().map(|p| local_inventory(p)),
        }
    }
}

/// `installed` si existe `<path>/<nombre>` como directorio.
fn local_inventory(base: &Path) -> Vec<LocalModelEntry> {
    LOCAL_MODELS
        .iter()
        .map(|(name, use_case, description)| {
            let path = base.join(name);
            let status = if path.is_dir() { "installed" } else { "missing" };
            LocalModelEntry {
                name: name.to_string(),
                use_case: use_case.to_string(),
                description: description.to_string(),
                path: path.display().to_string(),
                status: status.to_string(),
            }
        })
        .collect()
}

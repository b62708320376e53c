//! models/catalog_model.rs
//! Modelos de IA conocidos y la respuesta de `GET /api/models`.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiModel {
    Llama3_70b,
    Llama3_8b,
    Mistral7b,
    Mixtral8x7b,
    Phi3Mini,
    Qwen2_72b,
}

impl AiModel {
    pub const ALL: [AiModel; 6] = [
        AiModel::Llama3_70b,
        AiModel::Llama3_8b,
        AiModel::Mistral7b,
        AiModel::Mixtral8x7b,
        AiModel::Phi3Mini,
        AiModel::Qwen2_72b,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            AiModel::Llama3_70b => "meta-llama/Llama-3-70b-chat-hf",
            AiModel::Llama3_8b => "meta-llama/Llama-3-8b-chat-hf",
            AiModel::Mistral7b => "mistralai/Mistral-7B-Instruct-v0.1",
            AiModel::Mixtral8x7b => "mistralai/Mixtral-8x7B-Instruct-v0.1",
            AiModel::Phi3Mini => "microsoft/Phi-3-mini-4k-instruct",
            AiModel::Qwen2_72b => "Qwen/Qwen2-72B-Instruct",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AiModel::Llama3_70b => "Llama 3 70B",
            AiModel::Llama3_8b => "Llama 3 8B",
            AiModel::Mistral7b => "Mistral 7B",
            AiModel::Mixtral8x7b => "Mistral 8x7B",
            AiModel::Phi3Mini => "Phi-3 Mini",
            AiModel::Qwen2_72b => "Qwen2 72B",
        }
    }

    pub fn from_id(id: &str) -> Option<AiModel> {
        AiModel::ALL.iter().copied().find(|m| m.id() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisionModel {
    StableDiffusionXl,
    PlaygroundV2,
}

impl VisionModel {
    pub fn id(&self) -> &'static str {
        match self {
            VisionModel::StableDiffusionXl => "stable-diffusion-xl",
            VisionModel::PlaygroundV2 => "playground-v2",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VisionModel::StableDiffusionXl => "Stable Diffusion XL",
            VisionModel::PlaygroundV2 => "Playground v2",
        }
    }

    pub fn from_id(id: &str) -> Option<VisionModel> {
        match id {
            "stable-diffusion-xl" => Some(VisionModel::StableDiffusionXl),
            "playground-v2" => Some(VisionModel::PlaygroundV2),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelEntry {
    pub name: String,
    pub id: String,
    pub provider: String,
    pub status: String,
}

impl ModelEntry {
    pub fn new(name: &str, id: &str, provider: &str, status: &str) -> Self {
        ModelEntry {
            name: name.to_string(),
            id: id.to_string(),
            provider: provider.to_string(),
            status: status.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LocalModelEntry {
    pub name: String,
    pub use_case: String,
    pub description: String,
    pub path: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelsResponse {
    pub llm_models: Vec<ModelEntry>,
    pub vision_models: Vec<ModelEntry>,
    pub api_keys_configured: BTreeMap<String, bool>,
    pub recommended_llm: String,
    pub recommended_vision: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_models: Option<Vec<LocalModelEntry>>,
}

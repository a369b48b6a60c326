use std::env;
use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::GenerationError;
use crate::hosted::HostedBackend;
use crate::local::LocalBackend;

const DEFAULT_OLLAMA_HOST: &str = "http://127.0.0.1";
const DEFAULT_OLLAMA_PORT: u16 = 11434;
const DEFAULT_OLLAMA_MODEL: &str = "tinyllama";
const DEFAULT_HOSTED_API_URL: &str = "https://api-inference.huggingface.co";
const DEFAULT_HOSTED_MODEL: &str = "HuggingFaceH4/zephyr-7b-beta";
const DEFAULT_HOSTED_TIMEOUT_SECONDS: u64 = 120;

/// Produces text from a single free-text prompt.
pub trait ContentGenerator: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;
}

/// Sampling settings sent with every request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.6,
            top_p: 0.9,
            max_tokens: 512,
        }
    }
}

impl GenerationParams {
    pub(crate) fn max_tokens_i32(&self) -> i32 {
        i32::try_from(self.max_tokens).unwrap_or(i32::MAX)
    }
}

#[derive(Clone, Debug)]
enum Backend {
    Local(LocalBackend),
    Hosted(HostedBackend),
}

#[derive(Clone, Debug)]
pub struct LlmService {
    backend: Backend,
    params: GenerationParams,
}

impl LlmService {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the service from configuration values resolved by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let defaults = GenerationParams::default();
        let params = GenerationParams {
            temperature: parse_or(&read, "LLM_TEMPERATURE", defaults.temperature),
            top_p: parse_or(&read, "LLM_TOP_P", defaults.top_p),
            max_tokens: parse_or(&read, "LLM_MAX_TOKENS", defaults.max_tokens),
        };

        let backend_name = read("TUTOR_BACKEND").unwrap_or_else(|| "local".to_owned());
        let backend = match backend_name.to_ascii_lowercase().as_str() {
            "local" | "ollama" => {
                let host = read("OLLAMA_HOST").unwrap_or_else(|| DEFAULT_OLLAMA_HOST.to_owned());
                let port = parse_or(&read, "OLLAMA_PORT", DEFAULT_OLLAMA_PORT);
                let model =
                    read("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_owned());

                Backend::Local(LocalBackend::new(host, port, model))
            }
            "hosted" => {
                let Some(token) = read("HOSTED_API_TOKEN") else {
                    anyhow::bail!("TUTOR_BACKEND=hosted requires HOSTED_API_TOKEN");
                };
                let base_url =
                    read("HOSTED_API_URL").unwrap_or_else(|| DEFAULT_HOSTED_API_URL.to_owned());
                let model =
                    read("HOSTED_MODEL").unwrap_or_else(|| DEFAULT_HOSTED_MODEL.to_owned());
                let timeout = Duration::from_secs(parse_or(
                    &read,
                    "HOSTED_TIMEOUT_SECONDS",
                    DEFAULT_HOSTED_TIMEOUT_SECONDS,
                ));

                Backend::Hosted(HostedBackend::new(&base_url, model, token, timeout)?)
            }
            other => anyhow::bail!("unknown TUTOR_BACKEND `{other}` (expected `local` or `hosted`)"),
        };

        let service = Self { backend, params };
        info!(
            backend = service.backend_name(),
            model = service.model(),
            temperature = params.temperature,
            top_p = params.top_p,
            max_tokens = params.max_tokens,
            "content generator configured"
        );
        Ok(service)
    }

    pub fn backend_name(&self) -> &'static str {
        match &self.backend {
            Backend::Local(_) => "local",
            Backend::Hosted(_) => "hosted",
        }
    }

    pub fn model(&self) -> &str {
        match &self.backend {
            Backend::Local(backend) => backend.model(),
            Backend::Hosted(backend) => backend.model(),
        }
    }

    pub fn params(&self) -> GenerationParams {
        self.params
    }
}

impl ContentGenerator for LlmService {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        match &self.backend {
            Backend::Local(backend) => backend.generate(prompt, &self.params).await,
            Backend::Hosted(backend) => backend.generate(prompt, &self.params).await,
        }
    }
}

fn parse_or<T>(read: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    match read(key) {
        Some(raw) => raw.parse::<T>().unwrap_or_else(|_| {
            warn!(key, value = %raw, "ignoring unparsable setting; using default");
            default
        }),
        None => default,
    }
}

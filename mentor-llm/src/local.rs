use ollama_rs::{
    Ollama,
    generation::chat::{ChatMessage, request::ChatMessageRequest},
    models::ModelOptions,
};
use tracing::debug;

use crate::client::GenerationParams;
use crate::error::{GenerationError, non_empty};

/// Model served by a local Ollama daemon.
#[derive(Clone, Debug)]
pub(crate) struct LocalBackend {
    client: Ollama,
    model: String,
}

impl LocalBackend {
    pub(crate) fn new(host: String, port: u16, model: String) -> Self {
        Self {
            client: Ollama::new(host, port),
            model,
        }
    }

    pub(crate) fn model(&self) -> &str {
        &self.model
    }

    pub(crate) async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        let messages = vec![
            ChatMessage::system(crate::prompt::system_prompt()),
            ChatMessage::user(prompt.to_owned()),
        ];

        let request = ChatMessageRequest::new(self.model.clone(), messages).options(
            ModelOptions::default()
                .temperature(params.temperature)
                .top_p(params.top_p)
                .num_predict(params.max_tokens_i32()),
        );

        debug!(model = %self.model, prompt_chars = prompt.len(), "sending local generation request");
        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|err| GenerationError::Local(err.to_string()))?;

        non_empty(&response.message.content)
    }
}

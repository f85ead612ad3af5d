//! 生成边界 - 基础设施层
//!
//! 持有唯一的 AI 客户端，只暴露"生成文本"与"生成结构化 JSON"两种能力。
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 通过 OpenAI 兼容端点访问 Gemini 模型
//! - 上层只依赖 [`TextGenerator`] trait，测试中可替换为脚本化实现

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
        ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;

/// 普通文本生成请求
#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    pub model: String,
    pub prompt: String,
    pub system_instruction: Option<String>,
    pub temperature: f32,
}

/// 结构化输出请求（JSON Schema 约束）
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRequest {
    pub model: String,
    pub prompt: String,
    pub schema_name: String,
    pub schema: serde_json::Value,
}

/// 外部生成服务
///
/// 返回 `Ok(None)` 表示调用成功但没有文本内容。
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, request: TextRequest) -> Result<Option<String>>;

    async fn generate_structured(&self, request: StructuredRequest) -> Result<Option<String>>;
}

/// 基于 async-openai 的生成客户端
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    max_tokens: u32,
}

impl LlmClient {
    /// 创建新的 LLM 客户端
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            max_tokens: config.max_tokens,
        }
    }

    fn build_messages(
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<Vec<ChatCompletionRequestMessage>> {
        let mut messages = Vec::new();

        if let Some(sys_msg) = system_instruction {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        Ok(messages)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate_text(&self, request: TextRequest) -> Result<Option<String>> {
        debug!("调用 LLM API，模型: {}", request.model);
        debug!("提示词长度: {} 字符", request.prompt.len());

        let messages =
            Self::build_messages(&request.prompt, request.system_instruction.as_deref())?;

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .messages(messages)
            .temperature(request.temperature)
            .max_tokens(self.max_tokens)
            .build()?;

        let response = self.client.chat().create(chat_request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            anyhow::anyhow!("LLM API 调用失败: {}", e)
        })?;

        debug!("LLM API 调用成功");

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }

    async fn generate_structured(&self, request: StructuredRequest) -> Result<Option<String>> {
        debug!(
            "调用 LLM 结构化输出，模型: {}, schema: {}",
            request.model, request.schema_name
        );

        let messages = Self::build_messages(&request.prompt, None)?;

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .messages(messages)
            .response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    description: None,
                    name: request.schema_name.clone(),
                    schema: Some(request.schema),
                    strict: Some(true),
                },
            })
            .max_tokens(self.max_tokens)
            .build()?;

        let response = self.client.chat().create(chat_request).await.map_err(|e| {
            warn!("LLM 结构化输出调用失败: {}", e);
            anyhow::anyhow!("LLM 结构化输出调用失败: {}", e)
        })?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_messages_with_system() {
        let messages = LlmClient::build_messages("Hãy tạo 4 câu hỏi", Some("Bạn là chuyên gia")).unwrap();
        assert_eq!(messages.len(), 2);
        assert!(matches!(messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(messages[1], ChatCompletionRequestMessage::User(_)));
    }

    #[test]
    fn test_client_behind_trait_object() {
        let generator: std::sync::Arc<dyn TextGenerator> =
            std::sync::Arc::new(LlmClient::new(&Config::default()));
        assert_eq!(std::sync::Arc::strong_count(&generator), 1);
    }

    #[test]
    fn test_build_messages_without_system() {
        let messages = LlmClient::build_messages("prompt", None).unwrap();
        assert_eq!(messages.len(), 1);
    }

    /// 测试真实 API 连通性
    ///
    /// 运行方式：
    /// ```bash
    /// LLM_API_KEY=... cargo test test_llm_api_connectivity -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_llm_api_connectivity() {
        let _ = tracing_subscriber::fmt::try_init();

        let client = LlmClient::new(&Config::from_env());
        let result = client
            .generate_text(TextRequest {
                model: "gemini-2.5-flash".to_string(),
                prompt: "Xin chào".to_string(),
                system_instruction: Some("Trả lời ngắn gọn.".to_string()),
                temperature: 0.6,
            })
            .await;

        match result {
            Ok(text) => {
                println!("✅ LLM 响应: {:?}", text);
                assert!(text.is_some());
            }
            Err(e) => panic!("LLM 调用失败: {}", e),
        }
    }
}

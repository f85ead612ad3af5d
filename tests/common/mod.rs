//! 测试用的脚本化生成服务

#![allow(dead_code)]

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use exam7991::{QuestionType, StructuredRequest, TextGenerator, TextRequest};

/// 分区请求的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Reply,
    Empty,
    Fail,
    Panic,
}

/// 按题型返回预设内容，并记录所有请求
pub struct ScriptedGenerator {
    mcq: Behavior,
    tf: Behavior,
    sa: Behavior,
    structured: Result<Option<String>, String>,
    pub text_calls: Mutex<Vec<TextRequest>>,
    pub structured_calls: Mutex<Vec<StructuredRequest>>,
}

impl ScriptedGenerator {
    pub fn replying() -> Self {
        Self {
            mcq: Behavior::Reply,
            tf: Behavior::Reply,
            sa: Behavior::Reply,
            structured: Err("structured output not scripted".to_string()),
            text_calls: Mutex::new(Vec::new()),
            structured_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with(mut self, question_type: QuestionType, behavior: Behavior) -> Self {
        match question_type {
            QuestionType::Mcq => self.mcq = behavior,
            QuestionType::Tf => self.tf = behavior,
            QuestionType::Sa => self.sa = behavior,
        }
        self
    }

    pub fn with_structured(mut self, payload: Result<Option<String>, String>) -> Self {
        self.structured = payload;
        self
    }

    /// 已请求过的题型（按记录顺序）
    pub fn requested_types(&self) -> Vec<QuestionType> {
        self.text_calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|req| request_type(&req.prompt))
            .collect()
    }

    pub fn text_call_count(&self) -> usize {
        self.text_calls.lock().unwrap().len()
    }

    pub fn structured_call_count(&self) -> usize {
        self.structured_calls.lock().unwrap().len()
    }
}

/// 预设的分区返回内容
pub fn reply_for(question_type: QuestionType) -> String {
    format!("Câu 1: [{} content]", question_type)
}

fn request_type(prompt: &str) -> Option<QuestionType> {
    QuestionType::ALL
        .into_iter()
        .find(|t| prompt.contains(&format!(" câu hỏi {} cho môn", t.code())))
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate_text(&self, request: TextRequest) -> Result<Option<String>> {
        let question_type = request_type(&request.prompt).expect("prompt names a question type");
        self.text_calls.lock().unwrap().push(request);

        let behavior = match question_type {
            QuestionType::Mcq => self.mcq,
            QuestionType::Tf => self.tf,
            QuestionType::Sa => self.sa,
        };

        match behavior {
            Behavior::Reply => Ok(Some(reply_for(question_type))),
            Behavior::Empty => Ok(None),
            Behavior::Fail => anyhow::bail!("network unreachable"),
            Behavior::Panic => panic!("generator exploded for {question_type}"),
        }
    }

    async fn generate_structured(&self, request: StructuredRequest) -> Result<Option<String>> {
        self.structured_calls.lock().unwrap().push(request);
        match &self.structured {
            Ok(payload) => Ok(payload.clone()),
            Err(reason) => Err(anyhow::anyhow!(reason.clone())),
        }
    }
}

use crate::error::ConfigError;
use crate::models::exam::{coerce_grade, ExamConfig, ModelType, OutputFormat};
use crate::models::subject::Subject;
use std::str::FromStr;
use tracing::warn;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    /// OpenAI 兼容接口地址
    pub llm_api_base_url: String,
    pub model: ModelType,
    /// 生成题目时的温度（偏向稳定）
    pub generation_temperature: f32,
    pub max_tokens: u32,
    // --- 出题配置 ---
    pub subject: String,
    pub grade: String,
    pub output_format: OutputFormat,
    /// 矩阵 TOML 文件（为空时使用示例矩阵）
    pub plan_file: Option<String>,
    /// 启动时是否先让 AI 推荐矩阵
    pub auto_suggest: bool,
    /// 试卷输出目录
    pub output_dir: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        let exam = ExamConfig::default();
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            model: exam.model,
            generation_temperature: 0.6,
            max_tokens: 8192,
            subject: exam.subject,
            grade: exam.grade,
            output_format: exam.output_format,
            plan_file: None,
            auto_suggest: false,
            output_dir: "output".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源构建配置，解析失败的值回退到默认值
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();
        Self {
            llm_api_key: lookup("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: lookup("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            model: lookup("EXAM_MODEL")
                .and_then(|v| parse_or_warn("EXAM_MODEL", &v, "ModelType", ModelType::from_id))
                .unwrap_or(default.model),
            generation_temperature: parse_env(&lookup, "GENERATION_TEMPERATURE")
                .unwrap_or(default.generation_temperature),
            max_tokens: parse_env(&lookup, "MAX_TOKENS").unwrap_or(default.max_tokens),
            subject: lookup("EXAM_SUBJECT")
                .map(|v| normalize_subject(&v))
                .unwrap_or(default.subject),
            grade: lookup("EXAM_GRADE")
                .map(|v| coerce_grade(&v))
                .unwrap_or(default.grade),
            output_format: lookup("OUTPUT_FORMAT")
                .and_then(|v| parse_or_warn("OUTPUT_FORMAT", &v, "OutputFormat", OutputFormat::parse))
                .unwrap_or(default.output_format),
            plan_file: lookup("PLAN_FILE").filter(|v| !v.trim().is_empty()),
            auto_suggest: parse_env(&lookup, "AUTO_SUGGEST").unwrap_or(default.auto_suggest),
            output_dir: lookup("OUTPUT_DIR").unwrap_or(default.output_dir),
            verbose_logging: parse_env(&lookup, "VERBOSE_LOGGING")
                .unwrap_or(default.verbose_logging),
        }
    }

    /// 当前会话的出题配置
    pub fn exam_config(&self) -> ExamConfig {
        ExamConfig {
            grade: self.grade.clone(),
            subject: self.subject.clone(),
            model: self.model,
            output_format: self.output_format,
        }
    }
}

/// 已知科目统一成标准写法，未知科目原样保留
fn normalize_subject(value: &str) -> String {
    match Subject::find(value) {
        Some(subject) => subject.name().to_string(),
        None => {
            warn!("未知科目 '{}'，按原样使用", value.trim());
            value.trim().to_string()
        }
    }
}

fn parse_env<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, var_name: &str) -> Option<T> {
    let value = lookup(var_name)?;
    parse_or_warn(var_name, &value, std::any::type_name::<T>(), |v| {
        v.trim().parse::<T>().ok()
    })
}

fn parse_or_warn<T>(
    var_name: &str,
    value: &str,
    expected_type: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let parsed = parse(value);
    if parsed.is_none() {
        warn!(
            "{}，使用默认值",
            ConfigError::env_parse_failed(var_name, value, expected_type)
        );
    }
    parsed
}

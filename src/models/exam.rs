use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::plan::PlanAggregate;

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// LaTeX（ex_test 宏包）
    #[default]
    Latex,
    /// Word / 纯文本
    Word,
}

impl OutputFormat {
    /// 下载文件扩展名
    pub fn file_extension(self) -> &'static str {
        match self {
            OutputFormat::Latex => "tex",
            OutputFormat::Word => "doc",
        }
    }

    /// 提示词中使用的格式名称
    pub fn display_name(self) -> &'static str {
        match self {
            OutputFormat::Latex => "LaTeX",
            OutputFormat::Word => "Word",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latex" | "tex" => Some(OutputFormat::Latex),
            "word" | "doc" | "text" => Some(OutputFormat::Word),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Latex => f.write_str("latex"),
            OutputFormat::Word => f.write_str("word"),
        }
    }
}

/// 支持的模型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelType {
    /// 快速
    #[default]
    #[serde(rename = "gemini-2.5-flash")]
    Gemini25Flash,
    /// 效果最好
    #[serde(rename = "gemini-3-pro-preview")]
    Gemini3ProPreview,
}

impl ModelType {
    pub const ALL: [ModelType; 2] = [ModelType::Gemini25Flash, ModelType::Gemini3ProPreview];

    /// API 中的模型标识
    pub fn id(self) -> &'static str {
        match self {
            ModelType::Gemini25Flash => "gemini-2.5-flash",
            ModelType::Gemini3ProPreview => "gemini-3-pro-preview",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ModelType::Gemini25Flash => "Gemini 2.5 Flash (Nhanh)",
            ModelType::Gemini3ProPreview => "Gemini 3.0 Pro (Tốt nhất)",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|model| model.id() == id.trim())
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// 当前会话的出题配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamConfig {
    pub grade: String,
    pub subject: String,
    pub model: ModelType,
    pub output_format: OutputFormat,
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            grade: DEFAULT_GRADE.to_string(),
            subject: "Toán".to_string(),
            model: ModelType::default(),
            output_format: OutputFormat::default(),
        }
    }
}

/// 默认年级
pub const DEFAULT_GRADE: &str = "9";

/// 解析年级输入，只接受 1–12，其余回退到默认年级
pub fn coerce_grade(input: &str) -> String {
    match input.trim().parse::<u8>() {
        Ok(grade) if (1..=12).contains(&grade) => grade.to_string(),
        _ => DEFAULT_GRADE.to_string(),
    }
}

/// 一次完整生成的结果
///
/// 创建后不再修改，下一次生成时整体替换。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedExam {
    pub content: String,
    /// 展示用时间（HH:MM:SS）
    pub timestamp: String,
    /// 生成时刻各题型题量
    pub counts: PlanAggregate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse_and_extension() {
        assert_eq!(OutputFormat::parse("LaTeX"), Some(OutputFormat::Latex));
        assert_eq!(OutputFormat::parse("word"), Some(OutputFormat::Word));
        assert_eq!(OutputFormat::parse("pdf"), None);
        assert_eq!(OutputFormat::Latex.file_extension(), "tex");
        assert_eq!(OutputFormat::Word.file_extension(), "doc");
    }

    #[test]
    fn test_coerce_grade() {
        assert_eq!(coerce_grade("12"), "12");
        assert_eq!(coerce_grade(" 1"), "1");
        assert_eq!(coerce_grade("13"), "9");
        assert_eq!(coerce_grade("0"), "9");
        assert_eq!(coerce_grade("lop 9"), "9");
    }

    #[test]
    fn test_model_ids() {
        assert_eq!(ModelType::from_id("gemini-3-pro-preview"), Some(ModelType::Gemini3ProPreview));
        assert_eq!(ModelType::from_id("gpt-4o"), None);
        let json = serde_json::to_string(&ModelType::Gemini25Flash).unwrap();
        assert_eq!(json, "\"gemini-2.5-flash\"");
    }
}

//! 单个分区的生成流程 - 流程层
//!
//! 一种题型一次请求。请求失败在这里就地降级成行内错误文本，
//! 不影响其他两个分区。

use std::sync::LazyLock;

use regex::Regex;
use tracing::{error, info, warn};

use crate::infrastructure::{TextGenerator, TextRequest};
use crate::models::exam::{ModelType, OutputFormat};
use crate::models::plan::{QuestionType, TopicPlanEntry};
use crate::services::prompt_builder::build_prompt;

/// 生成温度：偏向稳定而非发散
pub const GENERATION_TEMPERATURE: f32 = 0.6;

/// 分区失败时放进试卷的提示文本
pub fn part_error_marker(question_type: QuestionType) -> String {
    format!("Lỗi khi tạo phần {}. Vui lòng thử lại.", question_type)
}

/// 单个分区的生成参数
#[derive(Debug, Clone)]
pub struct PartRequest {
    pub model: ModelType,
    pub question_type: QuestionType,
    pub output_format: OutputFormat,
    pub subject: String,
    pub temperature: f32,
}

/// 生成一个分区的原文
///
/// - 记录为空时直接返回空字符串，不发请求
/// - 返回内容缺失时返回空字符串
/// - 调用失败时返回 [`part_error_marker`]
pub async fn generate_part(
    generator: &dyn TextGenerator,
    plans: &[TopicPlanEntry],
    request: &PartRequest,
) -> String {
    if plans.is_empty() {
        return String::new();
    }

    let prompt = build_prompt(
        plans,
        request.question_type,
        request.output_format,
        &request.subject,
    );

    info!(
        "📝 [{}] 请求生成 {} 道题（{} 条记录）",
        request.question_type,
        prompt.total_count,
        plans.len()
    );

    let text_request = TextRequest {
        model: request.model.id().to_string(),
        prompt: prompt.user_prompt,
        system_instruction: Some(prompt.system_instruction),
        temperature: request.temperature,
    };

    match generator.generate_text(text_request).await {
        Ok(text) => {
            let text = text.unwrap_or_default();
            check_block_count(&text, request.question_type, request.output_format, prompt.total_count);
            text
        }
        Err(e) => {
            error!("❌ [{}] 生成失败: {:#}", request.question_type, e);
            part_error_marker(request.question_type)
        }
    }
}

static LATEX_BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\begin\{ex\}").expect("Invalid LaTeX block regex"));
static WORD_BLOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*Câu\s+\d+\s*:").expect("Invalid Word block regex")
});

/// 统计返回文本中的题目块数
pub fn count_blocks(text: &str, output_format: OutputFormat) -> usize {
    let regex = match output_format {
        OutputFormat::Latex => &LATEX_BLOCK_REGEX,
        OutputFormat::Word => &WORD_BLOCK_REGEX,
    };
    regex.find_iter(text).count()
}

/// 题目块数与要求不符时只记录警告，不改动内容
fn check_block_count(
    text: &str,
    question_type: QuestionType,
    output_format: OutputFormat,
    expected: u32,
) {
    let actual = count_blocks(text, output_format);
    if actual == expected as usize {
        info!("✓ [{}] 返回 {} 道题", question_type, actual);
    } else {
        warn!(
            "⚠️ [{}] 要求 {} 道题，实际识别到 {} 道",
            question_type, expected, actual
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_latex_blocks() {
        let text = "\\begin{ex} %Câu 1\n...\n\\end{ex}\n\\begin{ex} %Câu 2\n...\n\\end{ex}";
        assert_eq!(count_blocks(text, OutputFormat::Latex), 2);
        assert_eq!(count_blocks("", OutputFormat::Latex), 0);
    }

    #[test]
    fn test_count_word_blocks() {
        let text = "Câu 1: [Hàm số - NB] ...\nA. 1\nCâu 2: [Hàm số - TH] ...\n  Câu 3: ...";
        assert_eq!(count_blocks(text, OutputFormat::Word), 3);
    }

    #[test]
    fn test_block_patterns_compile() {
        assert!(LATEX_BLOCK_REGEX.is_match(r"\begin{ex}"));
        assert!(WORD_BLOCK_REGEX.is_match("Câu 12: ..."));
        assert_eq!(count_blocks("Câu 1: a\nCâu 2: b", OutputFormat::Latex), 0);
    }

    #[test]
    fn test_error_marker_names_section() {
        assert_eq!(part_error_marker(QuestionType::Tf), "Lỗi khi tạo phần TF. Vui lòng thử lại.");
    }
}

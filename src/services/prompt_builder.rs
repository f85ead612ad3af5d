//! 提示词构建 - 业务能力层
//!
//! 把某一题型的矩阵记录转换为系统指令和用户提示词。
//! 主题文本按原样插入，不做转义（单用户、自己的请求）。

use crate::models::exam::OutputFormat;
use crate::models::plan::{QuestionType, TopicPlanEntry};
use crate::services::templates::{format_instructions, template_for, DIFFICULTY_GUIDE};

/// 一次分区生成所需的提示词
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system_instruction: String,
    pub user_prompt: String,
    /// 本分区要求生成的题目总数
    pub total_count: u32,
}

/// 每条记录一行：题量、主题、难度
pub fn summarize_topics(plans: &[TopicPlanEntry]) -> String {
    plans
        .iter()
        .map(|p| format!("- {} câu về \"{}\" mức độ {}", p.count, p.topic, p.level))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 构建提示词
///
/// # 参数
/// - `plans`: 已按 `question_type` 筛选的记录（调用方保证非空时才会真正请求）
/// - `question_type`: 题型
/// - `output_format`: 输出格式
/// - `subject`: 科目名称
pub fn build_prompt(
    plans: &[TopicPlanEntry],
    question_type: QuestionType,
    output_format: OutputFormat,
    subject: &str,
) -> PromptPair {
    let total_count = plans
        .iter()
        .fold(0u32, |acc, p| acc.saturating_add(p.count));
    let topics_summary = summarize_topics(plans);
    let template = template_for(question_type, output_format);
    let instructions = format_instructions(output_format);

    let system_instruction = format!(
        r#"Bạn là chuyên gia ra đề thi môn {subject}, thành thạo kỹ năng sư phạm.
Nhiệm vụ: Sinh ra CHÍNH XÁC {total_count} khối câu hỏi loại {question_type} ({format_name}).
{instructions}
Mẫu định dạng:
{template}

Hướng dẫn mức độ:
{DIFFICULTY_GUIDE}

Quy tắc:
1. Luôn có lời giải chi tiết.
2. Tiếng Việt chuẩn mực.
3. Nội dung phong phú, không trùng lặp."#,
        format_name = output_format.display_name(),
    );

    let user_prompt = format!(
        "Hãy tạo {total_count} câu hỏi {question_type} cho môn {subject} với phân bổ:\n{topics_summary}"
    );

    PromptPair {
        system_instruction,
        user_prompt,
        total_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::DifficultyLevel;

    fn mcq_plans() -> Vec<TopicPlanEntry> {
        vec![
            TopicPlanEntry::new("1", "Kim loại kiềm", QuestionType::Mcq, 4, DifficultyLevel::Nb),
            TopicPlanEntry::new("2", "Este - Lipit", QuestionType::Mcq, 3, DifficultyLevel::Th),
        ]
    }

    #[test]
    fn test_total_count_is_baked_into_instruction() {
        let prompt = build_prompt(&mcq_plans(), QuestionType::Mcq, OutputFormat::Latex, "Hóa học");
        assert_eq!(prompt.total_count, 7);
        assert!(prompt.system_instruction.contains("CHÍNH XÁC 7 khối câu hỏi loại MCQ (LaTeX)"));
        assert!(prompt.system_instruction.contains("môn Hóa học"));
        assert!(prompt.system_instruction.contains(r"\begin{ex}"));
        assert!(prompt.system_instruction.contains("VDC (Vận dụng cao)"));
        assert!(prompt.user_prompt.starts_with("Hãy tạo 7 câu hỏi MCQ cho môn Hóa học"));
    }

    #[test]
    fn test_summary_keeps_order() {
        let summary = summarize_topics(&mcq_plans());
        assert_eq!(
            summary,
            "- 4 câu về \"Kim loại kiềm\" mức độ NB\n- 3 câu về \"Este - Lipit\" mức độ TH"
        );
    }

    #[test]
    fn test_word_format_uses_word_template() {
        let prompt = build_prompt(&mcq_plans(), QuestionType::Mcq, OutputFormat::Word, "Toán");
        assert!(prompt.system_instruction.contains("(Word)"));
        assert!(prompt.system_instruction.contains("(Đáp án đúng: D)"));
        assert!(!prompt.system_instruction.contains(r"\begin{ex}"));
    }

    #[test]
    fn test_total_count_saturates() {
        let plans = vec![
            TopicPlanEntry::new("1", "Kim loại kiềm", QuestionType::Mcq, u32::MAX, DifficultyLevel::Nb),
            TopicPlanEntry::new("2", "Este - Lipit", QuestionType::Mcq, 1, DifficultyLevel::Th),
        ];
        let prompt = build_prompt(&plans, QuestionType::Mcq, OutputFormat::Word, "Hóa học");
        assert_eq!(prompt.total_count, u32::MAX);
        assert!(prompt
            .user_prompt
            .starts_with(&format!("Hãy tạo {} câu hỏi MCQ", u32::MAX)));
    }

    #[test]
    fn test_topic_text_is_not_escaped() {
        let plans = vec![TopicPlanEntry::new(
            "x",
            r#"Hàm số "y = ax^2" {đặc biệt}"#,
            QuestionType::Sa,
            1,
            DifficultyLevel::Vd,
        )];
        let prompt = build_prompt(&plans, QuestionType::Sa, OutputFormat::Latex, "Toán");
        assert!(prompt.user_prompt.contains(r#""Hàm số "y = ax^2" {đặc biệt}""#));
    }
}

//! 矩阵推荐服务 - 业务能力层
//!
//! 让 AI 按科目和年级给出一整套 7991 矩阵（22 题：12 / 4 / 6）。
//! 任何失败都回退到固定形状的 7 行矩阵，调用方永远拿得到一份矩阵。

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::error::SuggestionError;
use crate::infrastructure::{StructuredRequest, TextGenerator};
use crate::models::exam::ModelType;
use crate::models::plan::{DifficultyLevel, PlanId, QuestionType, TopicPlan, TopicPlanEntry};
use crate::models::subject::{Subject, SubjectFamily};

/// AI 返回的单条记录（不带 id）
#[derive(Debug, Clone, Deserialize)]
struct SuggestedEntry {
    topic: String,
    #[serde(rename = "type")]
    question_type: QuestionType,
    count: u32,
    level: DifficultyLevel,
}

/// 矩阵推荐服务
pub struct SuggestionService {
    generator: Arc<dyn TextGenerator>,
}

impl SuggestionService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// 推荐一整套矩阵，结果应整体替换现有矩阵
    pub async fn suggest(&self, grade: &str, subject: &str, model: ModelType) -> TopicPlan {
        info!("🤖 正在为 {} 第 {} 年级推荐矩阵...", subject, grade);

        match self.try_suggest(grade, subject, model).await {
            Ok(plan) => {
                info!("✓ AI 推荐了 {} 条矩阵记录", plan.len());
                plan
            }
            Err(e) => {
                warn!("⚠️ 推荐矩阵失败，使用默认矩阵: {}", e);
                fallback_plan(subject)
            }
        }
    }

    async fn try_suggest(
        &self,
        grade: &str,
        subject: &str,
        model: ModelType,
    ) -> Result<TopicPlan, SuggestionError> {
        let request = StructuredRequest {
            model: model.id().to_string(),
            prompt: build_suggestion_prompt(grade, subject),
            schema_name: "topic_plan".to_string(),
            schema: plan_schema(),
        };

        let raw = self
            .generator
            .generate_structured(request)
            .await
            .map_err(|source| SuggestionError::Boundary { source })?;

        let entries = parse_suggestion(raw.as_deref().unwrap_or("[]"))?;
        debug!("解析到 {} 条推荐记录", entries.len());

        Ok(entries
            .into_iter()
            .map(|e| TopicPlanEntry {
                id: PlanId::generate(),
                topic: e.topic,
                question_type: e.question_type,
                count: e.count,
                level: e.level,
            })
            .collect())
    }
}

/// 结构化输出的根对象字段
const PLAN_KEY: &str = "plan";

/// 解析结构化返回内容
///
/// 正常形状为 `{"plan": [...]}`，也接受直接返回的数组。
fn parse_suggestion(raw: &str) -> Result<Vec<SuggestedEntry>, SuggestionError> {
    let mut value: serde_json::Value =
        serde_json::from_str(raw.trim()).map_err(|source| SuggestionError::Parse { source })?;

    if let Some(plan) = value.get_mut(PLAN_KEY) {
        value = plan.take();
    }
    if !value.is_array() {
        return Err(SuggestionError::NotAnArray);
    }

    let entries: Vec<SuggestedEntry> =
        serde_json::from_value(value).map_err(|source| SuggestionError::Parse { source })?;

    if entries.is_empty() {
        return Err(SuggestionError::Empty);
    }

    Ok(entries)
}

/// 推荐结果的 JSON Schema
///
/// strict 模式要求根节点是对象，矩阵数组放在 `plan` 字段里。
pub fn plan_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "plan": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "topic": { "type": "string", "description": "Tên bài học/chủ đề cụ thể" },
                        "type": { "type": "string", "enum": ["MCQ", "TF", "SA"] },
                        "count": { "type": "integer" },
                        "level": { "type": "string", "enum": ["NB", "TH", "VD", "VDC"] }
                    },
                    "required": ["topic", "type", "count", "level"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["plan"],
        "additionalProperties": false
    })
}

/// 构建推荐提示词
pub fn build_suggestion_prompt(grade: &str, subject: &str) -> String {
    let focus = match Subject::find(subject).map(Subject::family) {
        Some(SubjectFamily::NaturalScience) => {
            "\n  Môn này thuộc nhóm TỰ NHIÊN: ưu tiên định luật, hiện tượng, bài toán đặc trưng."
        }
        Some(SubjectFamily::SocialStudies) => {
            "\n  Môn này thuộc nhóm XÃ HỘI: ưu tiên sự kiện, vùng kinh tế, bài học đạo đức cụ thể."
        }
        Some(SubjectFamily::Literature) => {
            "\n  Môn này là NGỮ VĂN: ưu tiên tác phẩm, giai đoạn văn học, tiếng Việt."
        }
        Some(SubjectFamily::Other) | None => "",
    };

    format!(
        r#"Bạn là tổ trưởng chuyên môn môn {subject} lớp {grade} theo chương trình GDPT 2018 (Việt Nam).
  Hãy lập một MA TRẬN ĐỀ THI mẫu cấu trúc 7991 (22 câu: 12 Trắc nghiệm, 4 Đúng/Sai, 6 Trả lời ngắn).

  YÊU CẦU QUAN TRỌNG VỀ NỘI DUNG:
  1. Các chủ đề (topic) phải là tên BÀI HỌC/CHƯƠNG cụ thể trong sách giáo khoa {subject} lớp {grade}.
  2. KHÔNG sử dụng tên chủ đề chung chung (như "Chủ đề 1", "Lý thuyết", "Bài tập").
  3. Nếu là môn TỰ NHIÊN (Lý, Hóa, Sinh), tập trung vào các định luật, hiện tượng, bài toán đặc trưng.
  4. Nếu là môn XÃ HỘI (Sử, Địa, GDCD), tập trung vào các sự kiện, vùng kinh tế, bài học đạo đức cụ thể.
  5. Nếu là môn NGỮ VĂN, tập trung vào tên tác phẩm, giai đoạn văn học, tiếng Việt.{focus}

  Ví dụ mong đợi:
  - Vật lí: "Định luật Ohm", "Thấu kính hội tụ", "Điện từ trường"...
  - Địa lí: "Vùng Đông Nam Bộ", "Địa lí dân cư", "Kinh tế biển"...
  - Hóa học: "Kim loại kiềm", "Este - Lipit", "Bảng tuần hoàn"...

  Phân bổ mức độ (NB, TH, VD, VDC) hợp lý để phân loại học sinh."#
    )
}

/// 推荐失败时的默认矩阵，主题名由科目拼出
pub fn fallback_plan(subject: &str) -> TopicPlan {
    use DifficultyLevel::*;
    use QuestionType::*;

    let shapes = [
        (Mcq, 4, Nb),
        (Mcq, 4, Th),
        (Mcq, 4, Nb),
        (Tf, 2, Th),
        (Tf, 2, Vd),
        (Sa, 3, Vd),
        (Sa, 3, Vdc),
    ];

    shapes
        .into_iter()
        .enumerate()
        .map(|(idx, (question_type, count, level))| {
            let n = idx + 1;
            TopicPlanEntry::new(
                n.to_string(),
                format!("Chủ đề {} {}", subject, n),
                question_type,
                count,
                level,
            )
        })
        .collect()
}

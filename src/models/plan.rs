//! 命题矩阵（Topic Plan）数据模型
//!
//! 一条矩阵记录描述"某个主题、某种题型、出几道、什么难度"。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 题型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    /// 选择题（Trắc nghiệm）
    #[serde(rename = "MCQ")]
    Mcq,
    /// 判断题（Đúng/Sai）
    #[serde(rename = "TF")]
    Tf,
    /// 简答题（Trả lời ngắn）
    #[serde(rename = "SA")]
    Sa,
}

impl QuestionType {
    /// 固定顺序：选择 → 判断 → 简答
    pub const ALL: [QuestionType; 3] = [QuestionType::Mcq, QuestionType::Tf, QuestionType::Sa];

    /// 题型代码（MCQ / TF / SA）
    pub fn code(self) -> &'static str {
        match self {
            QuestionType::Mcq => "MCQ",
            QuestionType::Tf => "TF",
            QuestionType::Sa => "SA",
        }
    }

    /// 展示名称
    pub fn label(self) -> &'static str {
        match self {
            QuestionType::Mcq => "Trắc nghiệm (TNKQ)",
            QuestionType::Tf => "Đúng/Sai (Đ/S)",
            QuestionType::Sa => "Trả lời ngắn (TL)",
        }
    }

    /// 试卷中的分区标题
    pub fn section_title(self) -> &'static str {
        match self {
            QuestionType::Mcq => "[PHẦN TRẮC NGHIỆM]",
            QuestionType::Tf => "[PHẦN ĐÚNG SAI]",
            QuestionType::Sa => "[PHẦN TRẢ LỜI NGẮN]",
        }
    }

    /// 7991 结构下该题型的目标题量
    pub fn quota(self) -> u32 {
        match self {
            QuestionType::Mcq => 12,
            QuestionType::Tf => 4,
            QuestionType::Sa => 6,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// 认知难度等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyLevel {
    /// 识记（Nhận biết）
    #[serde(rename = "NB")]
    Nb,
    /// 理解（Thông hiểu）
    #[serde(rename = "TH")]
    Th,
    /// 应用（Vận dụng）
    #[serde(rename = "VD")]
    Vd,
    /// 高阶应用（Vận dụng cao）
    #[serde(rename = "VDC")]
    Vdc,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 4] = [
        DifficultyLevel::Nb,
        DifficultyLevel::Th,
        DifficultyLevel::Vd,
        DifficultyLevel::Vdc,
    ];

    pub fn code(self) -> &'static str {
        match self {
            DifficultyLevel::Nb => "NB",
            DifficultyLevel::Th => "TH",
            DifficultyLevel::Vd => "VD",
            DifficultyLevel::Vdc => "VDC",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DifficultyLevel::Nb => "Nhận biết",
            DifficultyLevel::Th => "Thông hiểu",
            DifficultyLevel::Vd => "Vận dụng",
            DifficultyLevel::Vdc => "Vận dụng cao",
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// 矩阵记录 ID（不透明字符串）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(String);

impl PlanId {
    /// 生成新的唯一 ID
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlanId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PlanId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 矩阵中的一条记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicPlanEntry {
    pub id: PlanId,
    pub topic: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub count: u32,
    pub level: DifficultyLevel,
}

impl TopicPlanEntry {
    pub fn new(
        id: impl Into<PlanId>,
        topic: impl Into<String>,
        question_type: QuestionType,
        count: u32,
        level: DifficultyLevel,
    ) -> Self {
        Self {
            id: id.into(),
            topic: topic.into(),
            question_type,
            count,
            level,
        }
    }

    /// 新增行的默认值：空主题、选择题、1 道、识记
    pub fn blank() -> Self {
        Self::new(PlanId::generate(), "", QuestionType::Mcq, 1, DifficultyLevel::Nb)
    }
}

/// 命题矩阵（有序）
pub type TopicPlan = Vec<TopicPlanEntry>;

/// 按题型筛选，保持原有顺序
pub fn partition(plan: &[TopicPlanEntry], question_type: QuestionType) -> Vec<TopicPlanEntry> {
    plan.iter()
        .filter(|entry| entry.question_type == question_type)
        .cloned()
        .collect()
}

/// 各题型题量汇总
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanAggregate {
    pub total: u32,
    pub mcq: u32,
    pub tf: u32,
    pub sa: u32,
}

impl PlanAggregate {
    /// 按题型累加；题量之和超出 `u32` 时停在 `u32::MAX`
    pub fn from_plan(plan: &[TopicPlanEntry]) -> Self {
        plan.iter().fold(Self::default(), |mut acc, entry| {
            acc.total = acc.total.saturating_add(entry.count);
            let slot = match entry.question_type {
                QuestionType::Mcq => &mut acc.mcq,
                QuestionType::Tf => &mut acc.tf,
                QuestionType::Sa => &mut acc.sa,
            };
            *slot = slot.saturating_add(entry.count);
            acc
        })
    }

    pub fn count_for(&self, question_type: QuestionType) -> u32 {
        match question_type {
            QuestionType::Mcq => self.mcq,
            QuestionType::Tf => self.tf,
            QuestionType::Sa => self.sa,
        }
    }
}

/// 各难度等级题量分布
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelDistribution {
    pub nb: u32,
    pub th: u32,
    pub vd: u32,
    pub vdc: u32,
}

impl LevelDistribution {
    pub fn from_plan(plan: &[TopicPlanEntry]) -> Self {
        plan.iter().fold(Self::default(), |mut acc, entry| {
            let slot = match entry.level {
                DifficultyLevel::Nb => &mut acc.nb,
                DifficultyLevel::Th => &mut acc.th,
                DifficultyLevel::Vd => &mut acc.vd,
                DifficultyLevel::Vdc => &mut acc.vdc,
            };
            *slot = slot.saturating_add(entry.count);
            acc
        })
    }

    pub fn count_for(&self, level: DifficultyLevel) -> u32 {
        match level {
            DifficultyLevel::Nb => self.nb,
            DifficultyLevel::Th => self.th,
            DifficultyLevel::Vd => self.vd,
            DifficultyLevel::Vdc => self.vdc,
        }
    }
}

/// 7991 结构总题量
pub const TOTAL_QUOTA: u32 = 22;

/// 单项配额对比
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaLine {
    pub actual: u32,
    pub target: u32,
}

impl QuotaLine {
    pub fn is_met(&self) -> bool {
        self.actual == self.target
    }
}

/// 矩阵与 12/4/6/22 目标的偏差报告
///
/// 只作提示，不阻止生成。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaReport {
    pub mcq: QuotaLine,
    pub tf: QuotaLine,
    pub sa: QuotaLine,
    pub total: QuotaLine,
}

impl QuotaReport {
    pub fn from_aggregate(aggregate: &PlanAggregate) -> Self {
        let line = |question_type: QuestionType| QuotaLine {
            actual: aggregate.count_for(question_type),
            target: question_type.quota(),
        };
        Self {
            mcq: line(QuestionType::Mcq),
            tf: line(QuestionType::Tf),
            sa: line(QuestionType::Sa),
            total: QuotaLine {
                actual: aggregate.total,
                target: TOTAL_QUOTA,
            },
        }
    }

    pub fn line_for(&self, question_type: QuestionType) -> QuotaLine {
        match question_type {
            QuestionType::Mcq => self.mcq,
            QuestionType::Tf => self.tf,
            QuestionType::Sa => self.sa,
        }
    }

    pub fn is_met(&self) -> bool {
        self.mcq.is_met() && self.tf.is_met() && self.sa.is_met() && self.total.is_met()
    }
}

/// 输入框允许的单行题量范围
pub const MIN_COUNT: u32 = 1;
pub const MAX_COUNT: u32 = 20;

/// 将任意整数收敛到 [1, 20]
pub fn clamp_count(value: i64) -> u32 {
    value.clamp(MIN_COUNT as i64, MAX_COUNT as i64) as u32
}

/// 解析用户输入的题量；无法解析时回退为 1
pub fn coerce_count(input: &str) -> u32 {
    input
        .trim()
        .parse::<i64>()
        .map(clamp_count)
        .unwrap_or(MIN_COUNT)
}

/// 启动时的示例矩阵（9 年级数学）
pub fn seed_plan() -> TopicPlan {
    use DifficultyLevel::*;
    use QuestionType::*;
    vec![
        TopicPlanEntry::new("1", "Phương trình bậc hai", Mcq, 4, Nb),
        TopicPlanEntry::new("2", "Hệ phương trình", Mcq, 4, Th),
        TopicPlanEntry::new("3", "Hệ thức lượng trong tam giác vuông", Mcq, 4, Nb),
        TopicPlanEntry::new("4", "Đường tròn và góc", Tf, 2, Th),
        TopicPlanEntry::new("5", "Hàm số y = ax^2", Tf, 2, Vd),
        TopicPlanEntry::new("6", "Giải bài toán bằng cách lập hệ PT", Sa, 3, Vd),
        TopicPlanEntry::new("7", "Hình học tổng hợp", Sa, 3, Vdc),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_example_plan() {
        let aggregate = PlanAggregate::from_plan(&seed_plan());
        assert_eq!(
            aggregate,
            PlanAggregate {
                total: 22,
                mcq: 12,
                tf: 4,
                sa: 6
            }
        );
        assert!(QuotaReport::from_aggregate(&aggregate).is_met());
    }

    #[test]
    fn test_quota_report_flags_deviation() {
        let mut plan = seed_plan();
        plan[0].count = 1;
        let report = QuotaReport::from_aggregate(&PlanAggregate::from_plan(&plan));
        assert!(!report.mcq.is_met());
        assert_eq!(report.mcq.actual, 9);
        assert!(report.tf.is_met());
        assert!(!report.total.is_met());
        assert!(!report.is_met());
    }

    #[test]
    fn test_level_distribution() {
        let dist = LevelDistribution::from_plan(&seed_plan());
        assert_eq!(dist.nb, 8);
        assert_eq!(dist.th, 6);
        assert_eq!(dist.vd, 5);
        assert_eq!(dist.vdc, 3);
    }

    #[test]
    fn test_partition_keeps_order() {
        let mut plan = seed_plan();
        plan.swap(0, 5);
        let sa = partition(&plan, QuestionType::Sa);
        let ids: Vec<&str> = sa.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["6", "7"]);
        assert!(partition(&[], QuestionType::Mcq).is_empty());
    }

    #[test]
    fn test_entry_serde_uses_wire_names() {
        let entry = TopicPlanEntry::new("a", "Este - Lipit", QuestionType::Tf, 2, DifficultyLevel::Vdc);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "TF");
        assert_eq!(json["level"], "VDC");
        assert_eq!(json["id"], "a");
    }

    #[test]
    fn test_huge_counts_saturate() {
        let plan = vec![
            TopicPlanEntry::new("a", "Hàm số", QuestionType::Mcq, u32::MAX, DifficultyLevel::Nb),
            TopicPlanEntry::new("b", "Hình học", QuestionType::Mcq, 1, DifficultyLevel::Nb),
            TopicPlanEntry::new("c", "Xác suất", QuestionType::Sa, 3, DifficultyLevel::Vd),
        ];

        let aggregate = PlanAggregate::from_plan(&plan);
        assert_eq!(aggregate.mcq, u32::MAX);
        assert_eq!(aggregate.sa, 3);
        assert_eq!(aggregate.total, u32::MAX);

        let dist = LevelDistribution::from_plan(&plan);
        assert_eq!(dist.nb, u32::MAX);
        assert_eq!(dist.vd, 3);
        assert!(!QuotaReport::from_aggregate(&aggregate).is_met());
    }

    #[test]
    fn test_coerce_count() {
        assert_eq!(coerce_count("5"), 5);
        assert_eq!(coerce_count(" 20 "), 20);
        assert_eq!(coerce_count("35"), 20);
        assert_eq!(coerce_count("0"), 1);
        assert_eq!(coerce_count("-3"), 1);
        assert_eq!(coerce_count("abc"), 1);
        assert_eq!(coerce_count(""), 1);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(PlanId::generate(), PlanId::generate());
    }
}

use crate::models::plan::{
    clamp_count, DifficultyLevel, PlanId, QuestionType, TopicPlan, TopicPlanEntry,
};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// TOML 矩阵文件结构
///
/// ```toml
/// [[plan]]
/// topic = "Phương trình bậc hai"
/// type = "MCQ"
/// count = 4
/// level = "NB"
/// ```
#[derive(Debug, Deserialize)]
struct PlanFile {
    #[serde(default)]
    plan: Vec<PlanFileEntry>,
}

#[derive(Debug, Deserialize)]
struct PlanFileEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    topic: String,
    #[serde(rename = "type")]
    question_type: QuestionType,
    count: i64,
    level: DifficultyLevel,
}

impl From<PlanFileEntry> for TopicPlanEntry {
    fn from(entry: PlanFileEntry) -> Self {
        let id = entry
            .id
            .filter(|id| !id.trim().is_empty())
            .map(PlanId::from)
            .unwrap_or_else(PlanId::generate);
        TopicPlanEntry {
            id,
            topic: entry.topic,
            question_type: entry.question_type,
            count: clamp_count(entry.count),
            level: entry.level,
        }
    }
}

/// 解析 TOML 文本为命题矩阵
pub fn parse_plan_toml(content: &str) -> Result<TopicPlan> {
    let file: PlanFile = toml::from_str(content).context("无法解析矩阵 TOML")?;
    let mut plan: TopicPlan = file.plan.into_iter().map(TopicPlanEntry::from).collect();

    // 文件中重复的 id 重新分配，保证矩阵内唯一
    let mut seen = std::collections::HashSet::new();
    for entry in plan.iter_mut() {
        if !seen.insert(entry.id.clone()) {
            let fresh = PlanId::generate();
            tracing::warn!("矩阵文件中 id 重复: {}，已重新分配为 {}", entry.id, fresh);
            entry.id = fresh.clone();
            seen.insert(fresh);
        }
    }

    Ok(plan)
}

/// 从 TOML 文件加载命题矩阵
pub async fn load_plan_file(path: &Path) -> Result<TopicPlan> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", path.display()))?;

    let plan = parse_plan_toml(&content)
        .with_context(|| format!("无法解析TOML文件: {}", path.display()))?;

    tracing::info!(
        "成功加载 {} 条矩阵记录: {}",
        plan.len(),
        path.file_name().unwrap_or_default().to_string_lossy()
    );

    Ok(plan)
}

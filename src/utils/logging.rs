/// 日志工具模块
///
/// 初始化 tracing 订阅器，并提供日志格式化和输出的辅助函数
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::models::exam::ExamConfig;
use crate::models::plan::{DifficultyLevel, LevelDistribution, PlanAggregate, QuestionType, QuotaReport};

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info。重复调用无副作用。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &ExamConfig) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 7991 出题模式");
    info!(
        "📚 科目: {} | 年级: {} | 模型: {} ({}) | 格式: {}",
        config.subject,
        config.grade,
        config.model.label(),
        config.model,
        config.output_format.display_name()
    );
    info!("{}", "=".repeat(60));
}

/// 记录矩阵汇总与配额偏差
pub fn log_plan_summary(
    entries: usize,
    aggregate: &PlanAggregate,
    quota: &QuotaReport,
    levels: &LevelDistribution,
) {
    info!("\n{}", "─".repeat(60));
    info!("📋 矩阵共 {} 条记录，{} 道题", entries, aggregate.total);

    for question_type in QuestionType::ALL {
        let line = quota.line_for(question_type);
        let mark = if line.is_met() { "✓" } else { "⚠️" };
        info!(
            "{} {}: {}/{}",
            mark,
            question_type.label(),
            line.actual,
            line.target
        );
    }

    if quota.is_met() {
        info!("✓ 总题量: {}/{}", quota.total.actual, quota.total.target);
    } else {
        warn!(
            "⚠️ 总题量 {}/{}，与 7991 结构不一致（仍继续生成）",
            quota.total.actual, quota.total.target
        );
    }

    let distribution = DifficultyLevel::ALL
        .iter()
        .filter(|level| levels.count_for(**level) > 0)
        .map(|level| format!("{} {}", level.label(), levels.count_for(*level)))
        .collect::<Vec<_>>()
        .join(" | ");
    info!("📊 难度分布: {}", distribution);
    info!("{}", "─".repeat(60));
}

/// 打印最终结果
pub fn print_final_stats(counts: &PlanAggregate, output_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 生成完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!(
        "MCQ {} | TF {} | SA {} | 共 {}",
        counts.mcq, counts.tf, counts.sa, counts.total
    );
    info!("{}", "=".repeat(60));
    info!("\n试卷已保存至: {}", output_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

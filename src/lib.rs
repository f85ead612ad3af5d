//! # exam7991
//!
//! 按命题矩阵（主题 × 题型 × 题量 × 难度）调用生成式 AI 出题的工具，
//! 输出 LaTeX（ex_test 宏包）或 Word 文本格式的 7991 结构试卷（22 题：12 / 4 / 6）。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有 AI 客户端，只暴露生成能力
//! - `TextGenerator` - 生成边界 trait，`LlmClient` 为 async-openai 实现
//!
//! ### ② 业务能力层（Services）
//! - `templates` - 题型 × 格式的模板登记表
//! - `prompt_builder` - 把一个分区的矩阵记录转成提示词
//! - `SuggestionService` - AI 推荐矩阵，失败时回退到默认矩阵
//! - `ExamWriter` - 把试卷写到文件
//!
//! ### ③ 流程层（Workflow）
//! - `PlanStore` - 矩阵状态与命令（新增 / 编辑 / 删除 / 替换）
//! - `part_flow` - 单个分区的生成（失败就地降级）
//!
//! ### ④ 编排层（Orchestration）
//! - `ExamOrchestrator` - 三个分区并发生成并拼接整卷
//! - `App` - 会话驱动：加载矩阵 → 推荐 → 提示配额 → 生成 → 写出

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, GenerationError, SuggestionError};
pub use infrastructure::{LlmClient, StructuredRequest, TextGenerator, TextRequest};
pub use models::{
    DifficultyLevel, ExamConfig, GeneratedExam, ModelType, OutputFormat, PlanAggregate, PlanId,
    QuestionType, TopicPlan, TopicPlanEntry,
};
pub use orchestrator::{App, ExamOrchestrator};
pub use services::{ExamWriter, SuggestionService};
pub use workflow::{generate_part, PartRequest, PlanCommand, PlanEdit, PlanStore};

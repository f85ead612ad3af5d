//! 会话驱动 - 编排层
//!
//! ## 核心流程
//!
//! 1. **加载矩阵**：`PLAN_FILE` 指定的 TOML，否则使用示例矩阵
//! 2. **推荐矩阵**：开启 `AUTO_SUGGEST` 或矩阵为空时，让 AI 推荐并整体替换
//! 3. **配额提示**：输出 12/4/6/22 偏差与难度分布（只提示，不阻止）
//! 4. **整卷生成**：三个分区并发生成
//! 5. **写出文件**：`Exam_{科目}_{年级}_{时间戳}.{tex|doc}`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{LlmClient, TextGenerator};
use crate::models::exam::{ExamConfig, GeneratedExam};
use crate::models::loaders::load_plan_file;
use crate::models::plan::seed_plan;
use crate::orchestrator::exam_orchestrator::ExamOrchestrator;
use crate::services::{ExamWriter, SuggestionService};
use crate::utils::logging;
use crate::workflow::plan_store::{PlanCommand, PlanStore};

/// 应用主结构
pub struct App {
    config: Config,
    exam_config: ExamConfig,
    store: PlanStore,
    orchestrator: ExamOrchestrator,
    suggestion: SuggestionService,
    writer: ExamWriter,
    /// 最近一次生成结果，下一次生成开始时丢弃
    last_exam: Option<GeneratedExam>,
}

impl App {
    /// 使用真实 AI 客户端初始化
    pub async fn initialize(config: Config) -> Result<Self> {
        if config.llm_api_key.is_empty() {
            warn!("⚠️ LLM_API_KEY 未设置，请求可能被拒绝");
        }
        let generator: Arc<dyn TextGenerator> = Arc::new(LlmClient::new(&config));
        Self::with_generator(config, generator).await
    }

    /// 使用指定的生成服务初始化
    pub async fn with_generator(config: Config, generator: Arc<dyn TextGenerator>) -> Result<Self> {
        let exam_config = config.exam_config();
        logging::log_startup(&exam_config);

        let plan = match &config.plan_file {
            Some(path) => {
                info!("\n📁 正在加载矩阵文件: {}", path);
                load_plan_file(Path::new(path)).await?
            }
            None => {
                info!("\n📁 未指定矩阵文件，使用示例矩阵");
                seed_plan()
            }
        };

        Ok(Self {
            orchestrator: ExamOrchestrator::new(Arc::clone(&generator))
                .with_temperature(config.generation_temperature),
            suggestion: SuggestionService::new(generator),
            writer: ExamWriter::new(&config.output_dir),
            store: PlanStore::new(plan),
            exam_config,
            config,
            last_exam: None,
        })
    }

    pub fn store(&self) -> &PlanStore {
        &self.store
    }

    /// 执行一条矩阵命令
    pub fn apply(&mut self, command: PlanCommand) {
        self.store.apply(command);
    }

    pub fn last_exam(&self) -> Option<&GeneratedExam> {
        self.last_exam.as_ref()
    }

    /// 请求 AI 推荐矩阵并整体替换
    pub async fn suggest_plan(&mut self) {
        let plan = self
            .suggestion
            .suggest(
                &self.exam_config.grade,
                &self.exam_config.subject,
                self.exam_config.model,
            )
            .await;
        self.store.apply(PlanCommand::Replace(plan));
    }

    /// 生成整卷；失败时不保留任何结果
    pub async fn generate(&mut self) -> AppResult<&GeneratedExam> {
        self.last_exam = None;
        let exam = self
            .orchestrator
            .generate(&self.exam_config, self.store.entries())
            .await?;
        Ok(self.last_exam.insert(exam))
    }

    /// 运行完整流程，返回写出的文件路径
    pub async fn run(&mut self) -> Result<PathBuf> {
        if self.config.auto_suggest || self.store.is_empty() {
            self.suggest_plan().await;
        }

        logging::log_plan_summary(
            self.store.len(),
            &self.store.aggregate(),
            &self.store.quota_report(),
            &self.store.level_distribution(),
        );

        let exam = self.generate().await.context("无法生成试卷")?.clone();

        if self.config.verbose_logging {
            info!("试卷预览: {}", logging::truncate_text(&exam.content, 200));
        }

        let path = self.writer.write(&exam, &self.exam_config).await?;
        logging::print_final_stats(&exam.counts, &path.display().to_string());

        Ok(path)
    }
}

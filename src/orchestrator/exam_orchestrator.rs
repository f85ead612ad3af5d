//! 整卷生成编排器 - 编排层
//!
//! ## 职责
//!
//! 1. 按题型把矩阵拆成三个分区（保持原有顺序）
//! 2. 三个分区同时发起请求，等待全部结束
//! 3. 按固定顺序拼接：卷头 → 选择 → 判断 → 简答
//!
//! ## 失败语义
//!
//! - 分区内部的调用失败由 [`generate_part`] 转成行内错误文本
//! - 分区任务本身异常（panic 等无法归属的失败）会让整卷放弃，不返回半成品

use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::join3;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::error::GenerationError;
use crate::infrastructure::TextGenerator;
use crate::models::exam::{ExamConfig, GeneratedExam, ModelType, OutputFormat};
use crate::models::plan::{partition, PlanAggregate, QuestionType, TopicPlanEntry};
use crate::workflow::part_flow::{generate_part, PartRequest, GENERATION_TEMPERATURE};

const RULE_WIDTH: usize = 36;

/// 卷头（含科目大写与生成日期）
pub fn exam_header(subject: &str, output_format: OutputFormat, date: NaiveDate) -> String {
    let subject_upper = subject.to_uppercase();
    let date = date.format("%d/%m/%Y");
    match output_format {
        OutputFormat::Latex => {
            let rule = "=".repeat(RULE_WIDTH);
            format!("% {rule}\n% ĐỀ THI 7991 ({subject_upper}) - {date}\n% {rule}\n")
        }
        OutputFormat::Word => format!(
            "ĐỀ THI 7991 ({subject_upper})\nNgày tạo: {date}\n{}\n",
            "-".repeat(RULE_WIDTH)
        ),
    }
}

/// 拼接整卷
pub fn assemble_document(header: &str, mcq: &str, tf: &str, sa: &str) -> String {
    format!(
        "{header}\n\n{}\n{mcq}\n\n{}\n{tf}\n\n{}\n{sa}",
        QuestionType::Mcq.section_title(),
        QuestionType::Tf.section_title(),
        QuestionType::Sa.section_title(),
    )
}

/// 整卷生成编排器
pub struct ExamOrchestrator {
    generator: Arc<dyn TextGenerator>,
    temperature: f32,
}

impl ExamOrchestrator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            temperature: GENERATION_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// 生成整卷并记录生成时刻与题量
    pub async fn generate(
        &self,
        config: &ExamConfig,
        plan: &[TopicPlanEntry],
    ) -> Result<GeneratedExam, GenerationError> {
        let counts = PlanAggregate::from_plan(plan);
        let content = self
            .generate_full_exam(config.model, plan, config.output_format, &config.subject)
            .await?;

        Ok(GeneratedExam {
            content,
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            counts,
        })
    }

    /// 生成整卷原文（日期取本地当天）
    pub async fn generate_full_exam(
        &self,
        model: ModelType,
        plan: &[TopicPlanEntry],
        output_format: OutputFormat,
        subject: &str,
    ) -> Result<String, GenerationError> {
        let today = chrono::Local::now().date_naive();
        self.generate_full_exam_on(model, plan, output_format, subject, today)
            .await
    }

    /// 生成整卷原文（指定卷头日期）
    pub async fn generate_full_exam_on(
        &self,
        model: ModelType,
        plan: &[TopicPlanEntry],
        output_format: OutputFormat,
        subject: &str,
        date: NaiveDate,
    ) -> Result<String, GenerationError> {
        info!(
            "🚀 开始生成整卷: {} / {} / {}（{} 条记录）",
            subject,
            output_format,
            model,
            plan.len()
        );

        let [mcq, tf, sa] = QuestionType::ALL.map(|question_type| {
            self.spawn_part(
                partition(plan, question_type),
                PartRequest {
                    model,
                    question_type,
                    output_format,
                    subject: subject.to_string(),
                    temperature: self.temperature,
                },
            )
        });

        // 等待三个分区全部结束
        let (mcq, tf, sa) = join3(mcq, tf, sa).await;

        let mcq = settle(QuestionType::Mcq, mcq)?;
        let tf = settle(QuestionType::Tf, tf)?;
        let sa = settle(QuestionType::Sa, sa)?;

        let header = exam_header(subject, output_format, date);
        let document = assemble_document(&header, &mcq, &tf, &sa);

        info!("✅ 整卷生成完成，共 {} 字符", document.chars().count());

        Ok(document)
    }

    fn spawn_part(&self, plans: Vec<TopicPlanEntry>, request: PartRequest) -> JoinHandle<String> {
        let generator = Arc::clone(&self.generator);
        tokio::spawn(async move { generate_part(generator.as_ref(), &plans, &request).await })
    }
}

fn settle(
    question_type: QuestionType,
    joined: Result<String, tokio::task::JoinError>,
) -> Result<String, GenerationError> {
    joined.map_err(|e| {
        error!("❌ [{}] 分区任务异常，整卷放弃: {}", question_type, e);
        GenerationError::aborted(format!("{} 分区任务异常: {}", question_type, e))
    })
}

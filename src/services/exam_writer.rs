//! 试卷写出服务 - 业务能力层
//!
//! 只负责把生成结果落盘，文件名 `Exam_{科目}_{年级}_{时间戳}.{tex|doc}`

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::error::{AppResult, FileError};
use crate::models::exam::{ExamConfig, GeneratedExam, OutputFormat};

/// 试卷写出服务
pub struct ExamWriter {
    output_dir: PathBuf,
}

impl ExamWriter {
    /// 使用输出目录创建
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 下载文件名
    pub fn file_name(
        subject: &str,
        grade: &str,
        output_format: OutputFormat,
        timestamp_millis: i64,
    ) -> String {
        format!(
            "Exam_{}_{}_{}.{}",
            subject,
            grade,
            timestamp_millis,
            output_format.file_extension()
        )
    }

    /// 写入试卷原文
    ///
    /// # 返回
    /// 返回写入的文件路径
    pub async fn write(&self, exam: &GeneratedExam, config: &ExamConfig) -> AppResult<PathBuf> {
        let timestamp = chrono::Local::now().timestamp_millis();
        self.write_at(exam, config, timestamp).await
    }

    /// 使用指定时间戳写入
    pub async fn write_at(
        &self,
        exam: &GeneratedExam,
        config: &ExamConfig,
        timestamp_millis: i64,
    ) -> AppResult<PathBuf> {
        ensure_dir(&self.output_dir).await?;

        let name = Self::file_name(
            &config.subject,
            &config.grade,
            config.output_format,
            timestamp_millis,
        );
        let path = self.output_dir.join(name);

        debug!("写入试卷: {} ({} 字节)", path.display(), exam.content.len());

        fs::write(&path, exam.content.as_bytes())
            .await
            .map_err(|e| FileError::write_failed(path.display().to_string(), e))?;

        Ok(path)
    }
}

async fn ensure_dir(dir: &Path) -> AppResult<()> {
    fs::create_dir_all(dir)
        .await
        .map_err(|e| FileError::create_dir_failed(dir.display().to_string(), e))?;
    Ok(())
}

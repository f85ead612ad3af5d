use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 整卷生成错误
    #[error("生成错误: {0}")]
    Generation(#[from] GenerationError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

/// 整卷生成错误
///
/// 单个分区的失败在分区内部被转成行内错误文本，
/// 只有无法归属到某个分区的失败才会走到这里。
#[derive(Debug, Error)]
pub enum GenerationError {
    /// 并发汇合阶段出现意外失败，整卷放弃
    #[error("整卷生成中止: {reason}")]
    Aborted { reason: String },
}

/// 推荐矩阵失败原因
#[derive(Debug, Error)]
pub enum SuggestionError {
    /// AI 调用失败
    #[error("AI 调用失败: {source}")]
    Boundary {
        #[source]
        source: anyhow::Error,
    },
    /// 返回内容不是合法 JSON
    #[error("JSON解析失败: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
    /// 返回内容不是数组
    #[error("返回结果不是数组")]
    NotAnArray,
    /// 返回数组为空
    #[error("返回结果为空")]
    Empty,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 创建目录失败
    #[error("创建目录失败 ({path}): {source}")]
    CreateDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ========== 便捷构造函数 ==========

impl GenerationError {
    /// 创建整卷中止错误
    pub fn aborted(reason: impl Into<String>) -> Self {
        GenerationError::Aborted {
            reason: reason.into(),
        }
    }
}

impl ConfigError {
    /// 创建环境变量解析错误
    pub fn env_parse_failed(
        var_name: impl Into<String>,
        value: impl Into<String>,
        expected_type: impl Into<String>,
    ) -> Self {
        ConfigError::EnvVarParseFailed {
            var_name: var_name.into(),
            value: value.into(),
            expected_type: expected_type.into(),
        }
    }
}

impl FileError {
    pub fn write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        FileError::WriteFailed {
            path: path.into(),
            source,
        }
    }

    pub fn create_dir_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        FileError::CreateDirFailed {
            path: path.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_display() {
        let err = AppError::from(GenerationError::aborted("任务 panic"));
        assert_eq!(err.to_string(), "生成错误: 整卷生成中止: 任务 panic");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::env_parse_failed("EXAM_GRADE", "abc", "u8");
        assert!(err.to_string().contains("EXAM_GRADE"));
        assert!(err.to_string().contains("abc"));
    }
}

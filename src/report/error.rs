// ==========================================
// 单品盈利分析 - 报表层错误类型
// ==========================================

use thiserror::Error;

/// 报表/图表导出错误类型
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("文件写入失败: {0}")]
    FileWriteError(String),

    #[error("CSV 写入失败: {0}")]
    CsvWriteError(String),

    #[error("JSON 序列化失败: {0}")]
    SerializeError(String),

    #[error("序列数据不一致: {0}")]
    InconsistentSeries(String),
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::FileWriteError(err.to_string())
    }
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        ReportError::CsvWriteError(err.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::SerializeError(err.to_string())
    }
}

/// Result 类型别名
pub type ReportResult<T> = Result<T, ReportError>;

// ==========================================
// 单品盈利分析 - 报表层
// ==========================================
// 职责: 图表数据输出与分析报告渲染
// 红线: 报表层只消费计算结果，不参与计算
// ==========================================

pub mod chart_sink;
pub mod csv_exporter;
pub mod error;
pub mod summary;

pub use chart_sink::{ChartSink, NoOpChartSink, OptionalChartSink};
pub use csv_exporter::CsvChartExporter;
pub use error::{ReportError, ReportResult};
pub use summary::{render_text, write_json};

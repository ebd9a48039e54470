// ==========================================
// 单品盈利分析 - 导入层
// ==========================================
// 职责: 从 CSV / Excel 物料清单构建 CostAggregator
// ==========================================

pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod line_item_importer;

pub use error::{ImportError, ImportResult};
pub use field_mapper::LineItemFieldMapper;
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRow, UniversalFileParser};
pub use line_item_importer::{ImportSummary, LineItemImporter};

// ==========================================
// 单品盈利分析 - 物料清单导入器
// ==========================================
// 导入流程:
// 1. 文件读取与解析（CSV / Excel）
// 2. 字段映射与类型转换
// 3. 逐行加入 CostAggregator（任一行非法即整体失败，不留半成品）
// ==========================================

use crate::domain::line_item::LineItemInput;
use crate::engine::cost_aggregator::CostAggregator;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::LineItemFieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};
use uuid::Uuid;

/// 导入汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub batch_id: String,
    pub source_file: String,
    pub rows_read: usize,
    pub items_added: usize,
    pub material_cost_added: f64,
}

pub struct LineItemImporter {
    parser: UniversalFileParser,
    mapper: LineItemFieldMapper,
}

impl Default for LineItemImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl LineItemImporter {
    pub fn new() -> Self {
        Self {
            parser: UniversalFileParser,
            mapper: LineItemFieldMapper,
        }
    }

    /// 读取文件为录入参数列表（不做业务校验）
    pub fn read_inputs<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<LineItemInput>> {
        let records = self.parser.parse(file_path.as_ref())?;
        records
            .iter()
            .enumerate()
            // 表头占第 1 行
            .map(|(idx, row)| self.mapper.map_to_input(row, idx + 2))
            .collect()
    }

    /// 导入文件中的物料行到 aggregator
    ///
    /// 先在副本上校验全部行，成功后整体追加
    #[instrument(skip(self, file_path, aggregator), fields(file = %file_path.as_ref().display()))]
    pub fn import_into<P: AsRef<Path>>(
        &self,
        file_path: P,
        aggregator: &mut CostAggregator,
    ) -> ImportResult<ImportSummary> {
        let path = file_path.as_ref();
        let inputs = self.read_inputs(path)?;

        let mut staged = aggregator.clone();
        for (idx, input) in inputs.iter().enumerate() {
            staged
                .add_input(input)
                .map_err(|source| ImportError::InvalidLineItem {
                    row: idx + 2,
                    source,
                })?;
        }

        let material_cost_added = staged.total_material_cost() - aggregator.total_material_cost();
        *aggregator = staged;

        let summary = ImportSummary {
            batch_id: Uuid::new_v4().to_string(),
            source_file: path.display().to_string(),
            rows_read: inputs.len(),
            items_added: inputs.len(),
            material_cost_added,
        };
        info!(
            batch_id = %summary.batch_id,
            items_added = summary.items_added,
            material_cost_added,
            "物料清单导入完成"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::EngineError;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_import_csv_into_aggregator() {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "Item,Price,Weight (g),Weight_in_recipe (g)").unwrap();
        writeln!(temp_file, "Tomato Paste,1.5,340,170").unwrap();
        writeln!(temp_file, "Chile Ancho,1.99,56,56").unwrap();

        let mut aggregator = CostAggregator::new();
        let summary = LineItemImporter::new()
            .import_into(temp_file.path(), &mut aggregator)
            .unwrap();

        assert_eq!(summary.items_added, 2);
        assert_eq!(aggregator.len(), 2);
        assert!((aggregator.total_material_cost() - 2.74).abs() < 1e-9);
        assert!((summary.material_cost_added - 2.74).abs() < 1e-9);
    }

    #[test]
    fn test_import_is_all_or_nothing() {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "name,unit_price,package_weight,recipe_weight").unwrap();
        writeln!(temp_file, "Good,1.0,10,5").unwrap();
        writeln!(temp_file, "Broken,1.0,0,5").unwrap();

        let mut aggregator = CostAggregator::new();
        let result = LineItemImporter::new().import_into(temp_file.path(), &mut aggregator);

        assert!(matches!(
            result,
            Err(ImportError::InvalidLineItem {
                row: 3,
                source: EngineError::DivisionByZero(_)
            })
        ));
        assert!(aggregator.is_empty());
    }
}

// ==========================================
// 单品盈利分析 - 字段映射器实现
// ==========================================
// 职责: 源字段 → 物料行录入参数 + 类型转换
// 表头: 支持英文 / snake_case / 中文别名
// ==========================================

use crate::domain::line_item::LineItemInput;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRow;

// 标准字段
pub const FIELD_NAME: &str = "name";
pub const FIELD_UNIT_PRICE: &str = "unit_price";
pub const FIELD_PACKAGE_WEIGHT: &str = "package_weight";
pub const FIELD_RECIPE_WEIGHT: &str = "recipe_weight";

pub struct LineItemFieldMapper;

impl LineItemFieldMapper {
    /// 原始行 → 物料行录入参数
    ///
    /// # 参数
    /// - row: 表头 → 值
    /// - row_number: 源文件行号（用于错误定位）
    pub fn map_to_input(&self, row: &RawRow, row_number: usize) -> ImportResult<LineItemInput> {
        let name = self
            .get_string(row, FIELD_NAME)
            .ok_or_else(|| ImportError::MissingField {
                row: row_number,
                field: FIELD_NAME.to_string(),
            })?;

        Ok(LineItemInput {
            name,
            unit_price: self.parse_required_f64(row, FIELD_UNIT_PRICE, row_number)?,
            package_weight: self.parse_required_f64(row, FIELD_PACKAGE_WEIGHT, row_number)?,
            recipe_weight: self.parse_required_f64(row, FIELD_RECIPE_WEIGHT, row_number)?,
        })
    }

    /// 标准字段的可接受列名
    fn aliases(key: &str) -> &'static [&'static str] {
        match key {
            FIELD_NAME => &["name", "Item", "item", "物料", "品名"],
            FIELD_UNIT_PRICE => &["unit_price", "Price", "price", "单价"],
            FIELD_PACKAGE_WEIGHT => &["package_weight", "Weight (g)", "weight_g", "包装重量"],
            FIELD_RECIPE_WEIGHT => &[
                "recipe_weight",
                "Weight_in_recipe (g)",
                "weight_in_recipe_g",
                "配方用量",
            ],
            _ => &[],
        }
    }

    /// 提取字符串字段（空白视为缺失）
    fn get_string(&self, row: &RawRow, key: &str) -> Option<String> {
        Self::aliases(key).iter().find_map(|alias| {
            row.get(*alias)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string())
        })
    }

    /// 解析必填浮点数（允许货币符号与千分位）
    fn parse_required_f64(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<f64> {
        let value = self
            .get_string(row, key)
            .ok_or_else(|| ImportError::MissingField {
                row: row_number,
                field: key.to_string(),
            })?;

        let cleaned: String = value.chars().filter(|c| *c != '$' && *c != ',').collect();
        cleaned
            .trim()
            .parse::<f64>()
            .map_err(|_| ImportError::TypeConversionError {
                row: row_number,
                field: key.to_string(),
                message: format!("无法解析为浮点数: {}", value),
            })
    }
}

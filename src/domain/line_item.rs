// ==========================================
// 单品盈利分析 - 物料行领域模型
// ==========================================
// 职责: 单个原料/物料对单位产品成本的贡献
// 红线: 物料行一经加入不可修改
// ==========================================

use serde::{Deserialize, Serialize};

/// 克 → 盎司换算系数
pub const GRAMS_TO_OUNCES: f64 = 0.03527396;

// ==========================================
// LineItem - 物料行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    // ===== 录入字段 =====
    pub name: String,        // 物料名称（不参与计算）
    pub unit_price: f64,     // 采购单价（每包装）
    pub package_weight: f64, // 包装重量 (g)
    pub recipe_weight: f64,  // 单位产品消耗重量 (g)

    // ===== 派生字段 =====
    pub cost_per_mass: f64,    // 每克成本 = unit_price / package_weight
    pub item_cost: f64,        // 单位产品物料成本 = cost_per_mass * recipe_weight
    pub recipe_weight_oz: f64, // 配方用量 (oz)
}

impl LineItem {
    /// 由录入字段构造物料行
    ///
    /// 调用方负责保证 `package_weight != 0` 且各数值有限，
    /// 校验在 `CostAggregator::add_line_item` 中完成
    pub(crate) fn derive(
        name: String,
        unit_price: f64,
        package_weight: f64,
        recipe_weight: f64,
    ) -> Self {
        let cost_per_mass = unit_price / package_weight;
        Self {
            name,
            unit_price,
            package_weight,
            recipe_weight,
            cost_per_mass,
            item_cost: cost_per_mass * recipe_weight,
            recipe_weight_oz: recipe_weight * GRAMS_TO_OUNCES,
        }
    }
}

/// 物料行录入参数（导入器/配置层 → CostAggregator）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemInput {
    pub name: String,
    pub unit_price: f64,
    pub package_weight: f64,
    pub recipe_weight: f64,
}

impl LineItemInput {
    pub fn new(name: &str, unit_price: f64, package_weight: f64, recipe_weight: f64) -> Self {
        Self {
            name: name.to_string(),
            unit_price,
            package_weight,
            recipe_weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_costs() {
        let item = LineItem::derive("Tomato Paste".to_string(), 1.5, 340.0, 170.0);
        assert_eq!(item.cost_per_mass, 1.5 / 340.0);
        assert_eq!(item.item_cost, (1.5 / 340.0) * 170.0);
        assert!((item.item_cost - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_recipe_weight_ounces() {
        let item = LineItem::derive("Cilantro".to_string(), 0.99, 119.0, 100.0);
        assert!((item.recipe_weight_oz - 3.527396).abs() < 1e-9);
    }
}

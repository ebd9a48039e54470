// ==========================================
// 单品盈利分析 - 测算结果领域模型
// ==========================================
// 职责: 单位成本构成、保本点、按产量索引的序列、利润曲面
// 说明: 全部为纯数值对象，供报表与图表适配器消费
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// UnitCosts - 单位成本构成
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitCosts {
    pub material_cost_per_unit: f64, // 单位物料成本（构造时快照）
    pub labor_cost_per_unit: f64,    // 单位人工 = 时薪 * 单位工时
    pub fixed_cost_per_unit: f64,    // 单位固定分摊 = 固定费用 / 总件数
    pub total_cost_per_unit: f64,    // 单位总成本
    pub total_items: u32,            // 分摊所用总件数
}

impl UnitCosts {
    /// 单位变动成本（物料 + 人工）
    pub fn variable_cost_per_unit(&self) -> f64 {
        self.material_cost_per_unit + self.labor_cost_per_unit
    }
}

// ==========================================
// BreakevenPoint - 保本点
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakevenPoint {
    pub units: u64,    // 保本件数（向上取整）
    pub revenue: f64,  // 保本收入 = units * 售价
}

// ==========================================
// ProfitSeries - 按产量索引的收支序列
// ==========================================
// 用途: 图表适配器输入（折线图）
// 约束: 所有序列与 volume_range 等长且一一对应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitSeries {
    pub sale_price_per_unit: f64,
    pub volume_range: Vec<u32>,
    pub total_expenses: Vec<f64>,
    /// 固定费用 + 物料成本 * v（含固定费用的支出线）
    pub expenses_with_fixed_overheads: Vec<f64>,
    pub total_income: Vec<f64>,
    pub net_profit: Vec<f64>,
}

impl ProfitSeries {
    pub fn len(&self) -> usize {
        self.volume_range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volume_range.is_empty()
    }

    /// 满产时是否盈利（净利润曲线末端 > 0）
    pub fn is_profitable_at_capacity(&self) -> bool {
        self.net_profit.last().map(|p| *p > 0.0).unwrap_or(false)
    }
}

// ==========================================
// ProfitabilitySurface - 时薪 × 售价 利润曲面
// ==========================================
// 索引: net_profit_per_unit[售价下标][时薪下标]
// 行对应售价，列对应时薪（与等高线图的行列约定一致）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilitySurface {
    pub wages: Vec<f64>,
    pub sale_prices: Vec<f64>,
    pub hours_per_unit: f64,
    pub total_items: u32,
    pub net_profit_per_unit: Vec<Vec<f64>>,
}

impl ProfitabilitySurface {
    /// 读取单元格
    pub fn value_at(&self, sale_price_index: usize, wage_index: usize) -> Option<f64> {
        self.net_profit_per_unit
            .get(sale_price_index)
            .and_then(|row| row.get(wage_index))
            .copied()
    }

    /// 曲面上盈利（> 0）的单元格数量
    pub fn profitable_cell_count(&self) -> usize {
        self.net_profit_per_unit
            .iter()
            .flatten()
            .filter(|v| **v > 0.0)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profitable_at_capacity() {
        let series = ProfitSeries {
            sale_price_per_unit: 2.0,
            volume_range: vec![0, 1, 2],
            total_expenses: vec![0.0, 3.0, 6.0],
            expenses_with_fixed_overheads: vec![1.0, 2.0, 3.0],
            total_income: vec![0.0, 2.0, 4.0],
            net_profit: vec![0.0, -1.0, -2.0],
        };
        assert_eq!(series.len(), 3);
        assert!(!series.is_profitable_at_capacity());
    }

    #[test]
    fn test_surface_lookup() {
        let surface = ProfitabilitySurface {
            wages: vec![10.0, 20.0],
            sale_prices: vec![50.0],
            hours_per_unit: 1.0,
            total_items: 10,
            net_profit_per_unit: vec![vec![5.0, -5.0]],
        };
        assert_eq!(surface.value_at(0, 1), Some(-5.0));
        assert_eq!(surface.value_at(1, 0), None);
        assert_eq!(surface.profitable_cell_count(), 1);
    }
}

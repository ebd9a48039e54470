// ==========================================
// 单品盈利分析 - 物料成本汇总引擎
// ==========================================
// 职责: 累积物料行，汇总单位产品物料成本
// 输入: 物料行（名称/单价/包装重量/配方用量）
// 输出: total_material_cost
// ==========================================

use crate::domain::line_item::{LineItem, LineItemInput};
use crate::engine::error::{ensure_finite, ensure_nonzero, EngineResult};
use tracing::debug;

// ==========================================
// CostAggregator - 物料成本汇总
// ==========================================
// 红线: 只追加，不提供修改/删除
#[derive(Debug, Clone, Default)]
pub struct CostAggregator {
    items: Vec<LineItem>,
}

impl CostAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加物料行
    ///
    /// # 参数
    /// - `name`: 物料名称
    /// - `unit_price`: 每包装单价
    /// - `package_weight`: 包装重量 (g)，不得为 0
    /// - `recipe_weight`: 单位产品消耗重量 (g)
    ///
    /// # 错误
    /// - `InvalidInput`: 任一数值非有限
    /// - `DivisionByZero`: package_weight 为 0
    pub fn add_line_item(
        &mut self,
        name: &str,
        unit_price: f64,
        package_weight: f64,
        recipe_weight: f64,
    ) -> EngineResult<()> {
        ensure_finite("unit_price", unit_price)?;
        ensure_finite("package_weight", package_weight)?;
        ensure_finite("recipe_weight", recipe_weight)?;
        ensure_nonzero("package_weight", package_weight)?;

        let item = LineItem::derive(name.to_string(), unit_price, package_weight, recipe_weight);
        debug!(
            name = %item.name,
            cost_per_mass = item.cost_per_mass,
            item_cost = item.item_cost,
            "物料行已加入"
        );
        self.items.push(item);
        Ok(())
    }

    /// 以录入参数追加物料行
    pub fn add_input(&mut self, input: &LineItemInput) -> EngineResult<()> {
        self.add_line_item(
            &input.name,
            input.unit_price,
            input.package_weight,
            input.recipe_weight,
        )
    }

    /// 批量构造（任一物料行非法即整体失败）
    pub fn from_inputs<'a, I>(inputs: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = &'a LineItemInput>,
    {
        let mut aggregator = Self::new();
        for input in inputs {
            aggregator.add_input(input)?;
        }
        Ok(aggregator)
    }

    /// 单位产品物料总成本（无物料行时为 0）
    pub fn total_material_cost(&self) -> f64 {
        self.items.iter().map(|item| item.item_cost).sum()
    }

    /// 物料行只读视图（按加入顺序）
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

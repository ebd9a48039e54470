// ==========================================
// 单品盈利分析 - 盈利测算引擎
// ==========================================
// 职责: 单位成本构成 → 按产量索引的支出/收入/净利润序列
//       → 保本点 / 目标利润件数 / 利润曲面
// 状态机: Initialized → CostsReady → IncomeReady
// 红线: 乱序调用返回 NotReady，不读取未计算的派生值
// ==========================================

use crate::domain::projection::{BreakevenPoint, ProfitSeries, ProfitabilitySurface, UnitCosts};
use crate::domain::types::ProjectorState;
use crate::engine::cost_aggregator::CostAggregator;
use crate::engine::error::{ensure_finite, EngineError, EngineResult};
use crate::engine::ratios;
use tracing::{debug, info, instrument, warn};

// ==========================================
// 内部状态
// ==========================================

/// 单位成本阶段的派生值
#[derive(Debug, Clone)]
struct CostProjection {
    unit_costs: UnitCosts,
    volume_range: Vec<u32>,
    total_expenses: Vec<f64>,
}

/// 收入阶段的派生值
#[derive(Debug, Clone)]
struct IncomeProjection {
    sale_price_per_unit: f64,
    total_income: Vec<f64>,
    net_profit: Vec<f64>,
}

#[derive(Debug, Clone)]
enum Stage {
    Initialized,
    CostsReady(CostProjection),
    IncomeReady(CostProjection, IncomeProjection),
}

// ==========================================
// 单位成本公式
// ==========================================

/// 组合单位成本
///
/// 测算器与利润曲面共用此函数，保证两条路径逐位一致
fn compose_unit_costs(
    material_cost_per_unit: f64,
    fixed_overheads: f64,
    hourly_labor_cost: f64,
    hours_per_unit: f64,
    total_items: u32,
) -> EngineResult<UnitCosts> {
    ensure_finite("hourly_labor_cost", hourly_labor_cost)?;
    ensure_finite("hours_per_unit", hours_per_unit)?;
    if total_items == 0 {
        return Err(EngineError::DivisionByZero(
            "total_items 为 0，无法分摊固定费用".to_string(),
        ));
    }

    let labor_cost_per_unit = hourly_labor_cost * hours_per_unit;
    let fixed_cost_per_unit = fixed_overheads / f64::from(total_items);
    let total_cost_per_unit = material_cost_per_unit + labor_cost_per_unit + fixed_cost_per_unit;

    Ok(UnitCosts {
        material_cost_per_unit,
        labor_cost_per_unit,
        fixed_cost_per_unit,
        total_cost_per_unit,
        total_items,
    })
}

/// 件数商向上取整为 u64
///
/// 商为负时取 0；超出 u64 表示范围时报错，不做饱和截断
fn ceil_units(label: &str, quotient: f64) -> EngineResult<u64> {
    let units = quotient.ceil().max(0.0);
    // u64::MAX as f64 == 2^64，不可表示
    if !units.is_finite() || units >= u64::MAX as f64 {
        return Err(EngineError::InvalidInput(format!(
            "{} 件数 {} 超出可表示范围",
            label, quotient
        )));
    }
    Ok(units as u64)
}

// ==========================================
// ProfitabilityProjector - 盈利测算器
// ==========================================
#[derive(Debug, Clone)]
pub struct ProfitabilityProjector {
    /// 构造时的物料成本快照，之后追加的物料行不会反映
    total_material_cost: f64,
    fixed_overheads: f64,
    stage: Stage,
}

impl ProfitabilityProjector {
    /// 构造测算器（快照当前物料总成本）
    ///
    /// # 参数
    /// - `aggregator`: 物料成本汇总
    /// - `fixed_overheads`: 期间固定费用总额
    pub fn new(aggregator: &CostAggregator, fixed_overheads: f64) -> EngineResult<Self> {
        ensure_finite("fixed_overheads", fixed_overheads)?;
        let total_material_cost = aggregator.total_material_cost();
        info!(
            total_material_cost,
            fixed_overheads,
            line_items = aggregator.len(),
            "盈利测算器已初始化"
        );

        Ok(Self {
            total_material_cost,
            fixed_overheads,
            stage: Stage::Initialized,
        })
    }

    /// 当前状态标签
    pub fn state(&self) -> ProjectorState {
        match self.stage {
            Stage::Initialized => ProjectorState::Initialized,
            Stage::CostsReady(_) => ProjectorState::CostsReady,
            Stage::IncomeReady(_, _) => ProjectorState::IncomeReady,
        }
    }

    pub fn total_material_cost(&self) -> f64 {
        self.total_material_cost
    }

    pub fn fixed_overheads(&self) -> f64 {
        self.fixed_overheads
    }

    // ==========================================
    // 状态迁移
    // ==========================================

    /// 覆写固定费用（任意状态可调用）
    ///
    /// 已计算的派生值依赖旧的固定费用，覆写后状态回到 Initialized
    pub fn update_fixed_overheads(&mut self, fixed_overheads: f64) -> EngineResult<()> {
        ensure_finite("fixed_overheads", fixed_overheads)?;
        self.fixed_overheads = fixed_overheads;
        if self.state() != ProjectorState::Initialized {
            debug!(from = %self.state(), "固定费用变更，派生值失效");
            self.stage = Stage::Initialized;
        }
        info!(fixed_overheads, "固定费用已更新");
        Ok(())
    }

    /// 重新快照物料成本，状态回到 Initialized
    pub fn resync_material_cost(&mut self, aggregator: &CostAggregator) {
        self.total_material_cost = aggregator.total_material_cost();
        self.stage = Stage::Initialized;
        info!(
            total_material_cost = self.total_material_cost,
            "物料成本已重新快照"
        );
    }

    /// 计算单位成本与支出序列 → CostsReady
    ///
    /// # 错误
    /// - `DivisionByZero`: total_items 为 0
    /// - `InvalidInput`: 时薪或工时非有限
    #[instrument(skip(self), fields(fixed_overheads = self.fixed_overheads))]
    pub fn compute_unit_costs(
        &mut self,
        hourly_labor_cost: f64,
        hours_per_unit: f64,
        total_items: u32,
    ) -> EngineResult<UnitCosts> {
        let unit_costs = compose_unit_costs(
            self.total_material_cost,
            self.fixed_overheads,
            hourly_labor_cost,
            hours_per_unit,
            total_items,
        )?;

        let volume_range: Vec<u32> = (0..=total_items).collect();
        let total_expenses = volume_range
            .iter()
            .map(|v| unit_costs.total_cost_per_unit * f64::from(*v))
            .collect();

        debug!(
            labor_cost_per_unit = unit_costs.labor_cost_per_unit,
            fixed_cost_per_unit = unit_costs.fixed_cost_per_unit,
            total_cost_per_unit = unit_costs.total_cost_per_unit,
            "单位成本已计算"
        );

        self.stage = Stage::CostsReady(CostProjection {
            unit_costs,
            volume_range,
            total_expenses,
        });
        Ok(unit_costs)
    }

    /// 按售价投影收入与净利润序列 → IncomeReady
    ///
    /// 可在 IncomeReady 下以新售价重新投影
    #[instrument(skip(self))]
    pub fn project_income(&mut self, sale_price_per_unit: f64) -> EngineResult<()> {
        ensure_finite("sale_price_per_unit", sale_price_per_unit)?;
        let costs = match std::mem::replace(&mut self.stage, Stage::Initialized) {
            Stage::CostsReady(costs) | Stage::IncomeReady(costs, _) => costs,
            Stage::Initialized => {
                return Err(EngineError::NotReady {
                    required: ProjectorState::CostsReady,
                    actual: ProjectorState::Initialized,
                })
            }
        };

        let total_income: Vec<f64> = costs
            .volume_range
            .iter()
            .map(|v| sale_price_per_unit * f64::from(*v))
            .collect();
        let net_profit = total_income
            .iter()
            .zip(costs.total_expenses.iter())
            .map(|(income, expense)| income - expense)
            .collect();

        self.stage = Stage::IncomeReady(
            costs,
            IncomeProjection {
                sale_price_per_unit,
                total_income,
                net_profit,
            },
        );
        Ok(())
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 保本点（需 CostsReady）
    ///
    /// 保本件数 = ceil(固定费用 / (售价 - 单位变动成本))
    ///
    /// # 错误
    /// - `NotProfitable`: 售价 <= 单位变动成本
    pub fn breakeven_point(&self, sale_price_per_unit: f64) -> EngineResult<BreakevenPoint> {
        ensure_finite("sale_price_per_unit", sale_price_per_unit)?;
        let costs = self.costs()?;
        let variable_cost_per_unit = costs.unit_costs.variable_cost_per_unit();

        if sale_price_per_unit <= variable_cost_per_unit {
            warn!(
                sale_price_per_unit,
                variable_cost_per_unit, "售价不覆盖单位变动成本"
            );
            return Err(EngineError::NotProfitable(format!(
                "售价 {} 不高于单位变动成本 {}",
                sale_price_per_unit, variable_cost_per_unit
            )));
        }

        let contribution_margin = sale_price_per_unit - variable_cost_per_unit;
        let units = ceil_units("breakeven", self.fixed_overheads / contribution_margin)?;
        Ok(BreakevenPoint {
            units,
            revenue: units as f64 * sale_price_per_unit,
        })
    }

    /// 单位净利润（在产量 1 处采样：total_income[1] - total_expenses[1]）
    pub fn net_profit_per_unit(&self) -> EngineResult<f64> {
        let (costs, income) = self.income()?;
        match (income.total_income.get(1), costs.total_expenses.get(1)) {
            (Some(income), Some(expense)) => Ok(income - expense),
            // total_items >= 1 保证下标 1 存在
            _ => Err(EngineError::InvalidInput("产量序列长度不足 2".to_string())),
        }
    }

    /// 达到目标净利润所需件数（需 IncomeReady）
    ///
    /// 目标 <= 0 时返回 0
    ///
    /// # 错误
    /// - `NotProfitable`: 单位净利润 <= 0
    pub fn units_for_target_profit(&self, target_net_profit: f64) -> EngineResult<u64> {
        ensure_finite("target_net_profit", target_net_profit)?;
        let net_profit_per_unit = self.net_profit_per_unit()?;
        if net_profit_per_unit <= 0.0 {
            return Err(EngineError::NotProfitable(format!(
                "单位净利润 {} <= 0，无法达到目标利润",
                net_profit_per_unit
            )));
        }

        let units = ceil_units("target_profit", target_net_profit / net_profit_per_unit)?;
        info!(target_net_profit, units, "目标利润所需件数");
        Ok(units)
    }

    /// 时薪 × 售价 利润曲面
    ///
    /// 每个单元格以当前固定费用重新组合单位成本，
    /// 值 = 售价 * 1 - 单位总成本。不改变测算器状态
    ///
    /// # 返回
    /// 网格索引为 [售价下标][时薪下标]
    #[instrument(skip(self, wage_range, sale_price_range), fields(
        wages = wage_range.len(),
        sale_prices = sale_price_range.len()
    ))]
    pub fn profitability_surface(
        &self,
        wage_range: &[f64],
        sale_price_range: &[f64],
        hours_per_unit: f64,
        total_items: u32,
    ) -> EngineResult<ProfitabilitySurface> {
        if total_items == 0 {
            return Err(EngineError::DivisionByZero(
                "total_items 为 0，无法分摊固定费用".to_string(),
            ));
        }
        ensure_finite("hours_per_unit", hours_per_unit)?;
        for sale_price in sale_price_range {
            ensure_finite("sale_price", *sale_price)?;
        }

        let mut grid = vec![vec![0.0; wage_range.len()]; sale_price_range.len()];

        for (i, wage) in wage_range.iter().enumerate() {
            let unit_costs = compose_unit_costs(
                self.total_material_cost,
                self.fixed_overheads,
                *wage,
                hours_per_unit,
                total_items,
            )?;
            for (j, sale_price) in sale_price_range.iter().enumerate() {
                grid[j][i] = sale_price * 1.0 - unit_costs.total_cost_per_unit * 1.0;
            }
        }

        Ok(ProfitabilitySurface {
            wages: wage_range.to_vec(),
            sale_prices: sale_price_range.to_vec(),
            hours_per_unit,
            total_items,
            net_profit_per_unit: grid,
        })
    }

    /// 毛利率（使用快照物料成本）
    pub fn gross_profit_margin(&self, sale_price_per_unit: f64, total_items: u32) -> EngineResult<f64> {
        ratios::gross_profit_margin(sale_price_per_unit, self.total_material_cost, total_items)
    }

    // ==========================================
    // 派生值读取
    // ==========================================

    pub fn unit_costs(&self) -> EngineResult<UnitCosts> {
        Ok(self.costs()?.unit_costs)
    }

    pub fn volume_range(&self) -> EngineResult<&[u32]> {
        Ok(&self.costs()?.volume_range)
    }

    pub fn total_expenses(&self) -> EngineResult<&[f64]> {
        Ok(&self.costs()?.total_expenses)
    }

    pub fn total_income(&self) -> EngineResult<&[f64]> {
        Ok(&self.income()?.1.total_income)
    }

    pub fn net_profit(&self) -> EngineResult<&[f64]> {
        Ok(&self.income()?.1.net_profit)
    }

    /// 导出完整收支序列（图表适配器输入）
    pub fn profit_series(&self) -> EngineResult<ProfitSeries> {
        let (costs, income) = self.income()?;
        let expenses_with_fixed_overheads = costs
            .volume_range
            .iter()
            .map(|v| self.fixed_overheads + self.total_material_cost * f64::from(*v))
            .collect();

        Ok(ProfitSeries {
            sale_price_per_unit: income.sale_price_per_unit,
            volume_range: costs.volume_range.clone(),
            total_expenses: costs.total_expenses.clone(),
            expenses_with_fixed_overheads,
            total_income: income.total_income.clone(),
            net_profit: income.net_profit.clone(),
        })
    }

    fn costs(&self) -> EngineResult<&CostProjection> {
        match &self.stage {
            Stage::CostsReady(costs) | Stage::IncomeReady(costs, _) => Ok(costs),
            Stage::Initialized => Err(EngineError::NotReady {
                required: ProjectorState::CostsReady,
                actual: ProjectorState::Initialized,
            }),
        }
    }

    fn income(&self) -> EngineResult<(&CostProjection, &IncomeProjection)> {
        match &self.stage {
            Stage::IncomeReady(costs, income) => Ok((costs, income)),
            _ => Err(EngineError::NotReady {
                required: ProjectorState::IncomeReady,
                actual: self.state(),
            }),
        }
    }
}

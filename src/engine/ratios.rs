// ==========================================
// 单品盈利分析 - 财务比率公式
// ==========================================
// 职责: 毛利率 / 净利率 / ROI / 营业利润率 / 营收增长率
// 说明: 纯函数，分母为零返回 DivisionByZero，不做其他校验
// ==========================================

use crate::engine::error::{ensure_nonzero, EngineResult};

/// 毛利率 = (售价*件数 - 物料成本*件数) / (售价*件数)
pub fn gross_profit_margin(
    sale_price_per_unit: f64,
    total_material_cost: f64,
    total_items: u32,
) -> EngineResult<f64> {
    let units = f64::from(total_items);
    let total_income = sale_price_per_unit * units;
    ensure_nonzero("总收入 (售价 * 件数)", total_income)?;
    let cost_of_goods_sold = total_material_cost * units;
    Ok((total_income - cost_of_goods_sold) / total_income)
}

/// 净利率 = 净利润 / 总收入
pub fn net_profit_margin(net_profit: f64, total_income: f64) -> EngineResult<f64> {
    ensure_nonzero("总收入", total_income)?;
    Ok(net_profit / total_income)
}

/// 投资回报率 (%) = 净利润 / 总投资 * 100
pub fn return_on_investment(net_profit: f64, total_investment: f64) -> EngineResult<f64> {
    ensure_nonzero("总投资", total_investment)?;
    Ok((net_profit / total_investment) * 100.0)
}

/// 营业利润率 = 营业利润 / 总收入
pub fn operating_margin(operating_profit: f64, total_income: f64) -> EngineResult<f64> {
    ensure_nonzero("总收入", total_income)?;
    Ok(operating_profit / total_income)
}

/// 营收增长率 (%) = (本期营收 - 上期营收) / 上期营收 * 100
pub fn revenue_growth_rate(current_revenue: f64, previous_revenue: f64) -> EngineResult<f64> {
    ensure_nonzero("上期营收", previous_revenue)?;
    Ok((current_revenue - previous_revenue) / previous_revenue * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::EngineError;

    #[test]
    fn test_gross_profit_margin() {
        // (100*1000 - 10*1000) / (100*1000) = 0.9
        assert_eq!(gross_profit_margin(100.0, 10.0, 1000).unwrap(), 0.9);
    }

    #[test]
    fn test_gross_profit_margin_zero_income() {
        assert!(matches!(
            gross_profit_margin(100.0, 10.0, 0),
            Err(EngineError::DivisionByZero(_))
        ));
        assert!(matches!(
            gross_profit_margin(0.0, 10.0, 1000),
            Err(EngineError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_margins() {
        assert_eq!(net_profit_margin(70_000.0, 100_000.0).unwrap(), 0.7);
        assert_eq!(operating_margin(25_000.0, 100_000.0).unwrap(), 0.25);
        assert!(net_profit_margin(1.0, 0.0).is_err());
        assert!(operating_margin(1.0, 0.0).is_err());
    }

    #[test]
    fn test_return_on_investment() {
        assert_eq!(return_on_investment(5_000.0, 20_000.0).unwrap(), 25.0);
        assert!(matches!(
            return_on_investment(5_000.0, 0.0),
            Err(EngineError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_revenue_growth_rate() {
        let rate = revenue_growth_rate(100_000.0, 70_000.0).unwrap();
        assert!((rate - 42.857142857142854).abs() < 1e-9);
        assert_eq!(revenue_growth_rate(50.0, 100.0).unwrap(), -50.0);
        assert!(matches!(
            revenue_growth_rate(100_000.0, 0.0),
            Err(EngineError::DivisionByZero(_))
        ));
    }
}

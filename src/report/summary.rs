// ==========================================
// 单品盈利分析 - 分析报告输出
// ==========================================
// 职责: 报告的文本渲染与 JSON 落盘
// ==========================================

use crate::domain::report::{BreakevenOutcome, ProfitabilityReport, TargetProfitOutcome};
use crate::report::error::ReportResult;
use std::fs;
use std::path::Path;
use tracing::info;

/// 比率格式化（None 显示为 N/A）
fn format_ratio(value: Option<f64>, scale: f64) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * scale),
        None => "N/A".to_string(),
    }
}

/// 渲染为逐行文本（供命令行打印）
pub fn render_text(report: &ProfitabilityReport) -> Vec<String> {
    let inputs = &report.inputs;
    let costs = &report.unit_costs;
    let mut lines = vec![
        format!("Hourly Labor Cost: ${} (Input)", inputs.hourly_labor_cost),
        format!("Hours per Unit: {} (Input)", inputs.hours_per_unit),
        format!("Total Items: {} (Input)", inputs.total_items),
        format!("Sale Price per Item: ${} (Input)", inputs.sale_price_per_unit),
        format!("Target Net Profit: ${} (Input)", inputs.target_net_profit),
        format!("Fixed Overheads: ${} (Input)", inputs.fixed_overheads),
        format!(
            "Material Cost per Item: ${:.2} ({} line items)",
            report.total_material_cost, report.line_item_count
        ),
        format!(
            "Cost per Item: ${:.2} (material ${:.2} + labor ${:.2} + fixed ${:.2})",
            costs.total_cost_per_unit,
            costs.material_cost_per_unit,
            costs.labor_cost_per_unit,
            costs.fixed_cost_per_unit
        ),
        format!("Net Profit per Item: ${:.2}", report.net_profit_per_unit),
    ];

    match &report.breakeven {
        BreakevenOutcome::Reached(point) => {
            lines.push(format!(
                "Breakeven Units: {} (Fixed Costs / (Sale Price - Variable Cost per Unit))",
                point.units
            ));
            lines.push(format!(
                "Breakeven Revenue: ${:.2} (Breakeven Units * Sale Price)",
                point.revenue
            ));
        }
        BreakevenOutcome::NotProfitable {
            sale_price_per_unit,
            variable_cost_per_unit,
        } => lines.push(format!(
            "Breakeven: not reachable (sale price ${} <= variable cost ${:.2})",
            sale_price_per_unit, variable_cost_per_unit
        )),
    }

    match &report.target_profit {
        TargetProfitOutcome::Reachable { units } => lines.push(format!(
            "Items required to earn ${}: {} (Target Net Profit / Net Profit per Unit)",
            inputs.target_net_profit, units
        )),
        TargetProfitOutcome::NotProfitable { .. } => {
            lines.push("Not profitable at the given sale price.".to_string())
        }
    }

    let ratios = &report.ratios;
    lines.push(format!(
        "Gross Profit Margin: {} ((Gross Profit / Revenue) * 100)",
        format_ratio(ratios.gross_profit_margin, 100.0)
    ));
    lines.push(format!(
        "Net Profit Margin: {} ((Net Profit / Revenue) * 100)",
        format_ratio(ratios.net_profit_margin, 100.0)
    ));
    lines.push(format!(
        "ROI: {} ((Net Profit / Investment) * 100)",
        format_ratio(ratios.roi_pct, 1.0)
    ));
    lines.push(format!(
        "Operating Margin: {} ((Operating Income / Revenue) * 100)",
        format_ratio(ratios.operating_margin, 100.0)
    ));
    lines.push(format!(
        "Revenue Growth Rate: {} ((Current Revenue - Previous Revenue) / Previous Revenue * 100)",
        format_ratio(ratios.revenue_growth_rate_pct, 1.0)
    ));
    lines
}

/// 报告写为格式化 JSON
pub fn write_json(report: &ProfitabilityReport, path: &Path) -> ReportResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(report)?;
    fs::write(path, content)?;
    info!(path = %path.display(), report_id = %report.report_id, "分析报告已写出");
    Ok(())
}

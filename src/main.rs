// ==========================================
// 单品盈利分析 - 命令行入口
// ==========================================
// 用法:
//   item-profitability [--items <csv|xlsx>] [--scenario <json>]
//                      [--charts <dir>] [--report <json>] [--json-log]
//
// 未指定 --items 时使用内置示例物料清单；
// 未指定 --scenario 时读取用户配置目录下的 scenario.json（不存在则使用默认场景）
// ==========================================

use anyhow::{Context, Result};
use clap::Parser;
use item_profitability::config::{sample_line_items, ScenarioConfig};
use item_profitability::engine::{CostAggregator, ProfitabilityAnalysis};
use item_profitability::importer::LineItemImporter;
use item_profitability::report::{render_text, write_json, CsvChartExporter};
use item_profitability::{logging, APP_NAME, VERSION};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "item-profitability")]
#[command(about = "Unit cost, breakeven and profitability analysis for a single item")]
#[command(version)]
struct Cli {
    /// Bill of materials (.csv / .xlsx / .xls)
    #[arg(long)]
    items: Option<PathBuf>,

    /// Scenario JSON file
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Directory for profit series / surface CSV output
    #[arg(long)]
    charts: Option<PathBuf>,

    /// Write the report as JSON to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_log: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.json_log {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!("{} v{}", APP_NAME, VERSION);

    // 场景配置
    let scenario = match (&cli.scenario, ScenarioConfig::default_path()) {
        (Some(path), _) => ScenarioConfig::load(path)?,
        (None, Some(path)) => ScenarioConfig::load_or_default(&path)?,
        (None, None) => ScenarioConfig::default(),
    };

    // 物料清单
    let mut aggregator = CostAggregator::new();
    match &cli.items {
        Some(path) => {
            let summary = LineItemImporter::new()
                .import_into(path, &mut aggregator)
                .with_context(|| format!("物料清单导入失败: {}", path.display()))?;
            tracing::info!(batch_id = %summary.batch_id, "使用物料文件");
        }
        None => {
            for input in sample_line_items() {
                aggregator.add_input(&input)?;
            }
            tracing::info!("使用内置示例物料清单");
        }
    }

    // 分析
    let analysis = match &cli.charts {
        Some(dir) => ProfitabilityAnalysis::with_chart_sink(Arc::new(CsvChartExporter::new(dir))),
        None => ProfitabilityAnalysis::new(),
    };
    let outcome = analysis.run(&aggregator, &scenario)?;

    for line in render_text(&outcome.report) {
        println!("{}", line);
    }

    if let Some(path) = &cli.report {
        write_json(&outcome.report, path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["item-profitability"]).unwrap();
        assert!(cli.items.is_none());
        assert!(cli.scenario.is_none());
        assert!(!cli.json_log);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "item-profitability",
            "--items",
            "recipe.csv",
            "--charts",
            "out",
            "--json-log",
        ])
        .unwrap();
        assert_eq!(cli.items, Some(PathBuf::from("recipe.csv")));
        assert_eq!(cli.charts, Some(PathBuf::from("out")));
        assert!(cli.json_log);
    }

    #[test]
    fn test_cli_rejects_unknown_flag_and_missing_value() {
        assert!(Cli::try_parse_from(["item-profitability", "--bogus"]).is_err());
        assert!(Cli::try_parse_from(["item-profitability", "--items"]).is_err());
    }
}

// ==========================================
// 物料清单导入集成测试
// ==========================================
// 职责: 验证 文件 → 字段映射 → CostAggregator → 完整分析
// ==========================================


use item_profitability::config::sample_line_items;
use item_profitability::engine::{CostAggregator, EngineError, ProfitabilityAnalysis};
use item_profitability::importer::{ImportError, LineItemImporter};
use std::io::Write;
use tempfile::{Builder, NamedTempFile};
use test_helpers::reference_scenario;

fn write_csv(lines: &[&str]) -> NamedTempFile {
    let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
    for line in lines {
        writeln!(temp_file, "{}", line).unwrap();
    }
    temp_file
}

#[test]
fn test_import_sample_recipe_csv_matches_builtin() {
    // 以原始表头写出内置示例物料清单
    let mut lines = vec!["Item,Price,Weight (g),Weight_in_recipe (g)".to_string()];
    for input in sample_line_items() {
        lines.push(format!(
            "{},{},{},{}",
            input.name, input.unit_price, input.package_weight, input.recipe_weight
        ));
    }
    let refs: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
    let file = write_csv(&refs);

    let mut imported = CostAggregator::new();
    let summary = LineItemImporter::new()
        .import_into(file.path(), &mut imported)
        .unwrap();
    let builtin = CostAggregator::from_inputs(&sample_line_items()).unwrap();

    assert_eq!(summary.items_added, 11);
    assert_eq!(imported.items(), builtin.items());
    assert_eq!(imported.total_material_cost(), builtin.total_material_cost());
}

#[test]
fn test_import_appends_to_existing_items() {
    let file = write_csv(&["name,unit_price,package_weight,recipe_weight", "Salt,2,4,1"]);

    let mut aggregator = CostAggregator::new();
    aggregator.add_line_item("Flour", 12.0, 2.0, 1.0).unwrap();
    LineItemImporter::new()
        .import_into(file.path(), &mut aggregator)
        .unwrap();

    assert_eq!(aggregator.len(), 2);
    assert_eq!(aggregator.items()[0].name, "Flour");
    assert_eq!(aggregator.total_material_cost(), 6.5);
}

#[test]
fn test_import_reports_row_of_bad_value() {
    let file = write_csv(&[
        "name,unit_price,package_weight,recipe_weight",
        "Flour,12,2,1",
        "Sugar,eight,4,2",
    ]);

    let mut aggregator = CostAggregator::new();
    let result = LineItemImporter::new().import_into(file.path(), &mut aggregator);

    match result {
        Err(ImportError::TypeConversionError { row, field, .. }) => {
            assert_eq!(row, 3);
            assert_eq!(field, "unit_price");
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(aggregator.is_empty());
}

#[test]
fn test_import_rejects_non_finite_values() {
    let file = write_csv(&["name,unit_price,package_weight,recipe_weight", "Flour,inf,2,1"]);

    let mut aggregator = CostAggregator::new();
    let result = LineItemImporter::new().import_into(file.path(), &mut aggregator);

    assert!(matches!(
        result,
        Err(ImportError::InvalidLineItem {
            row: 2,
            source: EngineError::InvalidInput(_)
        })
    ));
}

#[test]
fn test_imported_items_drive_full_analysis() {
    let file = write_csv(&[
        "Item,Price,Weight (g),Weight_in_recipe (g)",
        "Flour,12,2,1",
        "Sugar,8,4,2",
    ]);

    let mut aggregator = CostAggregator::new();
    LineItemImporter::new()
        .import_into(file.path(), &mut aggregator)
        .unwrap();

    let outcome = ProfitabilityAnalysis::new()
        .run(&aggregator, &reference_scenario())
        .unwrap();

    assert_eq!(outcome.report.line_item_count, 2);
    assert_eq!(outcome.report.total_material_cost, 10.0);
    assert_eq!(outcome.report.target_profit.units(), Some(143));
}

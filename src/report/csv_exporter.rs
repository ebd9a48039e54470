// ==========================================
// 单品盈利分析 - CSV 图表数据导出
// ==========================================
// 职责: 将收支序列与利润曲面写为 CSV，供任意绘图工具读取
// 输出: <dir>/profit_series.csv, <dir>/profitability_surface.csv
// ==========================================

use crate::domain::projection::{ProfitSeries, ProfitabilitySurface};
use crate::report::chart_sink::ChartSink;
use crate::report::error::{ReportError, ReportResult};
use csv::Writer;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const PROFIT_SERIES_FILE: &str = "profit_series.csv";
pub const SURFACE_FILE: &str = "profitability_surface.csv";

/// 折线序列行
#[derive(Debug, Serialize)]
struct SeriesRow {
    volume: u32,
    total_expenses: f64,
    expenses_with_fixed_overheads: f64,
    total_income: f64,
    net_profit: f64,
}

/// 曲面行（长表格式）
#[derive(Debug, Serialize)]
struct SurfaceRow {
    sale_price: f64,
    hourly_labor_cost: f64,
    net_profit_per_unit: f64,
}

// ==========================================
// CsvChartExporter
// ==========================================
pub struct CsvChartExporter {
    output_dir: PathBuf,
}

impl CsvChartExporter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn series_path(&self) -> PathBuf {
        self.output_dir.join(PROFIT_SERIES_FILE)
    }

    pub fn surface_path(&self) -> PathBuf {
        self.output_dir.join(SURFACE_FILE)
    }

    fn open_writer(&self, path: &Path) -> ReportResult<Writer<fs::File>> {
        fs::create_dir_all(&self.output_dir)?;
        Ok(Writer::from_path(path)?)
    }
}

impl ChartSink for CsvChartExporter {
    fn publish_profit_series(&self, series: &ProfitSeries) -> ReportResult<()> {
        let n = series.len();
        if series.total_expenses.len() != n
            || series.expenses_with_fixed_overheads.len() != n
            || series.total_income.len() != n
            || series.net_profit.len() != n
        {
            return Err(ReportError::InconsistentSeries(format!(
                "序列长度与 volume_range ({}) 不一致",
                n
            )));
        }

        let path = self.series_path();
        let mut writer = self.open_writer(&path)?;
        for i in 0..n {
            writer.serialize(SeriesRow {
                volume: series.volume_range[i],
                total_expenses: series.total_expenses[i],
                expenses_with_fixed_overheads: series.expenses_with_fixed_overheads[i],
                total_income: series.total_income[i],
                net_profit: series.net_profit[i],
            })?;
        }
        writer.flush()?;

        info!(path = %path.display(), rows = n, "收支序列已导出");
        Ok(())
    }

    fn publish_profitability_surface(&self, surface: &ProfitabilitySurface) -> ReportResult<()> {
        if surface.net_profit_per_unit.len() != surface.sale_prices.len() {
            return Err(ReportError::InconsistentSeries(
                "曲面行数与售价数量不一致".to_string(),
            ));
        }

        let path = self.surface_path();
        let mut writer = self.open_writer(&path)?;
        let mut rows = 0usize;
        for (sale_price, row) in surface.sale_prices.iter().zip(&surface.net_profit_per_unit) {
            if row.len() != surface.wages.len() {
                return Err(ReportError::InconsistentSeries(
                    "曲面列数与时薪数量不一致".to_string(),
                ));
            }
            for (wage, value) in surface.wages.iter().zip(row) {
                writer.serialize(SurfaceRow {
                    sale_price: *sale_price,
                    hourly_labor_cost: *wage,
                    net_profit_per_unit: *value,
                })?;
                rows += 1;
            }
        }
        writer.flush()?;

        info!(path = %path.display(), rows, "利润曲面已导出");
        Ok(())
    }

    fn name(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_series() -> ProfitSeries {
        ProfitSeries {
            sale_price_per_unit: 10.0,
            volume_range: vec![0, 1, 2],
            total_expenses: vec![0.0, 6.0, 12.0],
            expenses_with_fixed_overheads: vec![2.0, 6.0, 10.0],
            total_income: vec![0.0, 10.0, 20.0],
            net_profit: vec![0.0, 4.0, 8.0],
        }
    }

    #[test]
    fn test_export_profit_series() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvChartExporter::new(dir.path());
        exporter.publish_profit_series(&sample_series()).unwrap();

        let content = fs::read_to_string(exporter.series_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "volume,total_expenses,expenses_with_fixed_overheads,total_income,net_profit"
        );
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "1,6.0,6.0,10.0,4.0");
    }

    #[test]
    fn test_export_rejects_inconsistent_series() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvChartExporter::new(dir.path());
        let mut series = sample_series();
        series.net_profit.pop();

        assert!(matches!(
            exporter.publish_profit_series(&series),
            Err(ReportError::InconsistentSeries(_))
        ));
    }

    #[test]
    fn test_export_surface_long_format() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvChartExporter::new(dir.path().join("charts"));
        let surface = ProfitabilitySurface {
            wages: vec![10.0, 20.0],
            sale_prices: vec![50.0, 60.0],
            hours_per_unit: 1.0,
            total_items: 10,
            net_profit_per_unit: vec![vec![1.0, -9.0], vec![11.0, 1.0]],
        };
        exporter.publish_profitability_surface(&surface).unwrap();

        let mut reader = csv::Reader::from_path(exporter.surface_path()).unwrap();
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 4);
        assert_eq!(&records[1][0], "50.0");
        assert_eq!(&records[1][1], "20.0");
        assert_eq!(&records[1][2], "-9.0");
    }
}

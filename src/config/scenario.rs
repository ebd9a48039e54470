// ==========================================
// 单品盈利分析 - 场景配置
// ==========================================
// 职责: 分析场景输入的加载、默认值与校验
// 存储: JSON 文件（默认位于用户配置目录）
// ==========================================

use crate::domain::report::ScenarioInputs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 默认配置目录名
pub const CONFIG_DIR_NAME: &str = "item-profitability";

/// 默认配置文件名
pub const SCENARIO_FILE_NAME: &str = "scenario.json";

/// 计划总件数上限（产量序列长度 = total_items + 1）
pub const MAX_TOTAL_ITEMS: u32 = 100_000;

/// 单个扫描区间的点数上限
pub const MAX_SWEEP_STEPS: usize = 1_000;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读写失败 ({path}): {message}")]
    IoError { path: String, message: String },

    #[error("配置文件解析失败 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值无效 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

// ==========================================
// SweepRange - 等间距扫描区间
// ==========================================
// 语义: 闭区间 [start, end] 上取 steps 个等间距点，末点精确等于 end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    pub start: f64,
    pub end: f64,
    pub steps: usize,
}

impl SweepRange {
    pub fn new(start: f64, end: f64, steps: usize) -> Self {
        Self { start, end, steps }
    }

    /// 展开为取值序列
    pub fn values(&self) -> Vec<f64> {
        match self.steps {
            0 => Vec::new(),
            1 => vec![self.start],
            n => {
                let step = (self.end - self.start) / (n - 1) as f64;
                let mut values: Vec<f64> = (0..n).map(|i| self.start + i as f64 * step).collect();
                values[n - 1] = self.end;
                values
            }
        }
    }

    fn validate(&self, key: &str) -> Result<(), ConfigError> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("区间端点必须为有限数值: [{}, {}]", self.start, self.end),
            });
        }
        if self.steps == 0 {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: "steps 必须 >= 1".to_string(),
            });
        }
        if self.steps > MAX_SWEEP_STEPS {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("steps 不得超过 {}，实际 {}", MAX_SWEEP_STEPS, self.steps),
            });
        }
        if self.steps == 1 && self.start != self.end {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: "steps = 1 时 start 必须等于 end".to_string(),
            });
        }
        Ok(())
    }
}

// ==========================================
// ScenarioConfig - 分析场景
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// 时薪
    pub hourly_labor_cost: f64,
    /// 单位产品工时
    pub hours_per_unit: f64,
    /// 计划总件数（固定费用分摊基数）
    pub total_items: u32,
    /// 售价
    pub sale_price_per_unit: f64,
    /// 目标净利润
    pub target_net_profit: f64,
    /// 期间固定费用
    pub fixed_overheads: f64,
    /// 上期营收（营收增长率基数）
    pub previous_revenue: f64,
    /// 利润曲面时薪区间
    pub wage_sweep: SweepRange,
    /// 利润曲面售价区间
    pub sale_price_sweep: SweepRange,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            hourly_labor_cost: 30.0,
            hours_per_unit: 0.5,
            total_items: 1000,
            sale_price_per_unit: 100.0,
            target_net_profit: 10_000.0,
            fixed_overheads: 5_000.0,
            previous_revenue: 70_000.0,
            wage_sweep: SweepRange::new(10.0, 50.0, 50),
            sale_price_sweep: SweepRange::new(50.0, 150.0, 50),
        }
    }
}

impl ScenarioConfig {
    /// 默认配置文件路径: <config_dir>/item-profitability/scenario.json
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(SCENARIO_FILE_NAME))
    }

    /// 从 JSON 文件加载并校验
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        info!(path = %path.display(), "场景配置已加载");
        Ok(config)
    }

    /// 文件存在则加载，否则使用默认场景
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "场景配置不存在，使用默认值");
            Ok(Self::default())
        }
    }

    /// 写出为格式化 JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_error = |message: String| ConfigError::IoError {
            path: path.display().to_string(),
            message,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|e| write_error(e.to_string()))?;
        fs::write(path, content).map_err(|e| write_error(e.to_string()))
    }

    /// 校验配置值
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("hourly_labor_cost", self.hourly_labor_cost),
            ("hours_per_unit", self.hours_per_unit),
            ("sale_price_per_unit", self.sale_price_per_unit),
            ("target_net_profit", self.target_net_profit),
            ("fixed_overheads", self.fixed_overheads),
            ("previous_revenue", self.previous_revenue),
        ];
        for (key, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("必须为有限数值，实际 {}", value),
                });
            }
        }
        if self.total_items == 0 {
            return Err(ConfigError::InvalidValue {
                key: "total_items".to_string(),
                message: "必须 > 0".to_string(),
            });
        }
        if self.total_items > MAX_TOTAL_ITEMS {
            return Err(ConfigError::InvalidValue {
                key: "total_items".to_string(),
                message: format!("不得超过 {}，实际 {}", MAX_TOTAL_ITEMS, self.total_items),
            });
        }
        self.wage_sweep.validate("wage_sweep")?;
        self.sale_price_sweep.validate("sale_price_sweep")?;
        Ok(())
    }

    /// 转为报告中的输入快照
    pub fn inputs(&self) -> ScenarioInputs {
        ScenarioInputs {
            hourly_labor_cost: self.hourly_labor_cost,
            hours_per_unit: self.hours_per_unit,
            total_items: self.total_items,
            sale_price_per_unit: self.sale_price_per_unit,
            target_net_profit: self.target_net_profit,
            fixed_overheads: self.fixed_overheads,
            previous_revenue: self.previous_revenue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_sweep_values() {
        let values = SweepRange::new(10.0, 50.0, 5).values();
        assert_eq!(values, vec![10.0, 20.0, 30.0, 40.0, 50.0]);

        let values = SweepRange::new(10.0, 50.0, 50).values();
        assert_eq!(values.len(), 50);
        assert_eq!(values[0], 10.0);
        assert_eq!(values[49], 50.0);

        assert_eq!(SweepRange::new(7.0, 7.0, 1).values(), vec![7.0]);
        assert!(SweepRange::new(1.0, 2.0, 0).values().is_empty());
    }

    #[test]
    fn test_default_scenario_is_valid() {
        let config = ScenarioConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.inputs().total_items, 1000);
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"{{ "sale_price_per_unit": 80.0, "total_items": 500 }}"#).unwrap();

        let config = ScenarioConfig::load(temp_file.path()).unwrap();
        assert_eq!(config.sale_price_per_unit, 80.0);
        assert_eq!(config.total_items, 500);
        assert_eq!(config.hourly_labor_cost, 30.0);
    }

    #[test]
    fn test_load_rejects_zero_items() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"{{ "total_items": 0 }}"#).unwrap();

        let result = ScenarioConfig::load(temp_file.path());
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_validate_rejects_oversized_volume() {
        let config = ScenarioConfig {
            total_items: u32::MAX,
            ..ScenarioConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "total_items"
        ));

        let config = ScenarioConfig {
            total_items: MAX_TOTAL_ITEMS,
            ..ScenarioConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_sweep() {
        let config = ScenarioConfig {
            wage_sweep: SweepRange::new(10.0, 50.0, MAX_SWEEP_STEPS + 1),
            ..ScenarioConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "wage_sweep"
        ));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "not json").unwrap();

        let result = ScenarioConfig::load(temp_file.path());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScenarioConfig::load_or_default(&dir.path().join("missing.json")).unwrap();
        assert_eq!(config, ScenarioConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SCENARIO_FILE_NAME);
        let mut config = ScenarioConfig::default();
        config.fixed_overheads = 7_500.0;

        config.save(&path).unwrap();
        assert_eq!(ScenarioConfig::load(&path).unwrap(), config);
    }
}

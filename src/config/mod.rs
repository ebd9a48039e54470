// ==========================================
// 单品盈利分析 - 配置层
// ==========================================
// 职责: 分析场景配置与内置示例物料清单
// 存储: JSON 文件，缺省时使用内置默认值
// ==========================================

pub mod sample_recipe;
pub mod scenario;

// 重导出核心配置类型
pub use sample_recipe::sample_line_items;
pub use scenario::{ConfigError, ScenarioConfig, SweepRange, MAX_SWEEP_STEPS, MAX_TOTAL_ITEMS};

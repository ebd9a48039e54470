// ==========================================
// 单品盈利分析 - 内置示例物料清单
// ==========================================
// 用途: 未提供物料文件时的默认物料清单
// 单位: 单价 $/包装，重量 g
// ==========================================

use crate::domain::line_item::LineItemInput;

/// 内置示例物料清单（按录入顺序）
pub fn sample_line_items() -> Vec<LineItemInput> {
    vec![
        LineItemInput::new("Beef Chuck", 28.12, 1596.64, 1596.64),
        LineItemInput::new("Beef Broth", 3.69, 946.35, 946.35),
        LineItemInput::new("Tomato Paste", 1.5, 340.0, 170.0),
        LineItemInput::new("Cheese Oaxaca", 6.62, 458.13, 458.13),
        LineItemInput::new("Cilantro", 0.99, 119.0, 59.5),
        LineItemInput::new("Bay Leaves", 1.49, 14.0, 0.07142857143),
        LineItemInput::new("Chile Guajillo", 1.99, 56.0, 56.0),
        LineItemInput::new("Chile Ancho", 1.99, 56.0, 56.0),
        LineItemInput::new("Garlic", 2.39, 362.87, 23.0),
        LineItemInput::new("Onion Brown", 2.13, 1397.06, 698.53),
        LineItemInput::new("Tortilla Corn", 3.99, 1410.0, 1410.0),
    ]
}

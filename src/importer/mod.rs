// ==========================================
// OpenCart 商品导入工具 - 输入层
// ==========================================
// 职责: 将外部文件（JSON/CSV）解析为商品记录集合
// 红线: 只做解析与字段回落，不触碰数据库
// ==========================================

pub mod csv_loader;
pub mod json_loader;

// 重导出加载入口
pub use csv_loader::load_products_from_csv;
pub use json_loader::load_products_from_json;

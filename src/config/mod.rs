// ==========================================
// OpenCart 商品导入工具 - 配置层
// ==========================================
// 职责: 导入过程的全局参数（表前缀/语言/店铺/布局）
// 红线: 不使用全局可变状态，配置对象显式传入各仓储
// ==========================================

pub mod settings;

// 重导出核心配置对象
pub use settings::ImportSettings;

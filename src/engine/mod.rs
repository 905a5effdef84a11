// ==========================================
// OpenCart 商品导入工具 - 引擎层
// ==========================================
// 职责: 导入编排（外键解析 + 多表写入顺序）
// 红线: 所有数据库操作通过 Repository 的事务内辅助函数
// ==========================================

pub mod importer;

// 重导出导入引擎
pub use importer::{ImportFailure, ImportReport, ImportSummary, ProductImporter};

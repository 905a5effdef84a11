// ==========================================
// OpenCart 商品导入工具 - 领域层
// ==========================================
// 职责: 导入记录的实体定义与字段缺省值
// 红线: 领域层不触碰数据库
// ==========================================

pub mod product;

// 重导出领域实体
pub use product::{AttributeEntry, ProductDescription, ProductImage, ProductRecord};

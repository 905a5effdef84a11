// ==========================================
// OpenCart 商品导入工具 - 数据仓储层
// ==========================================
// 职责: 提供目标平台各表的数据访问接口，屏蔽 SQL 细节
// 约束: 所有查询使用参数化，防止 SQL 注入（表名前缀除外，来自配置）
// 红线: Repository 不含业务逻辑
// ==========================================

pub mod attribute_repo;
pub mod category_repo;
pub mod error;
pub mod language_repo;
pub mod product_repo;

// 重导出核心仓储
pub use attribute_repo::AttributeRepository;
pub use category_repo::CategoryRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use language_repo::LanguageRepository;
pub use product_repo::ProductRepository;

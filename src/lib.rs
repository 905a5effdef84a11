// ==========================================
// OpenCart 商品导入工具 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 职责: 将结构化商品记录写入 OpenCart 式目录 schema，
//       解析语言/分类路径/属性组等外键并保持引用完整性
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与缺省值
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 导入编排
pub mod engine;

// 输入层 - 外部文件解析
pub mod importer;

// 配置层 - 进程级参数
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 配置
pub use config::ImportSettings;

// 领域实体
pub use domain::{AttributeEntry, ProductDescription, ProductImage, ProductRecord};

// 仓储
pub use repository::{
    AttributeRepository, CategoryRepository, LanguageRepository, ProductRepository,
    RepositoryError, RepositoryResult,
};

// 引擎
pub use engine::{ImportFailure, ImportReport, ImportSummary, ProductImporter};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "OpenCart 商品导入工具";

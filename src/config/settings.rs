// ==========================================
// OpenCart 商品导入工具 - 导入配置
// ==========================================
// 职责: 承载一次导入运行的全部进程级参数
// 存储: JSON 配置文件（可选），缺省值见 Default 实现
// ==========================================

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 默认表前缀（OpenCart 安装默认值）
pub const DEFAULT_TABLE_PREFIX: &str = "oc_";

/// 属性缺省归属的属性组名称
pub const DEFAULT_ATTRIBUTE_GROUP: &str = "Specification";

/// 导入配置
///
/// 表前缀、语言/店铺/布局标识在一次运行开始时固定，
/// 之后只读。language_id 为 None 时，由 LanguageRepository
/// 按平台 setting 表的 config_language 解析。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// 数据库文件路径
    pub db_path: String,

    /// 表名前缀，例如 "oc_"
    pub table_prefix: String,

    /// 激活语言 id；None 表示从 setting 表解析
    pub language_id: Option<i64>,

    /// 店铺 id（product_to_store / product_to_layout）
    pub store_id: i64,

    /// 布局 id（product_to_layout）
    pub layout_id: i64,

    /// 属性缺省归属的属性组名称
    pub default_attribute_group: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            db_path: "opencart.db".to_string(),
            table_prefix: DEFAULT_TABLE_PREFIX.to_string(),
            language_id: None,
            store_id: 0,
            layout_id: 0,
            default_attribute_group: DEFAULT_ATTRIBUTE_GROUP.to_string(),
        }
    }
}

impl ImportSettings {
    /// 从 JSON 配置文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        let settings: ImportSettings = serde_json::from_str(&content)
            .with_context(|| format!("配置文件格式错误: {}", path.display()))?;
        Ok(settings)
    }

    /// 拼接带前缀的表名
    pub fn table(&self, name: &str) -> String {
        format!("{}{}", self.table_prefix, name)
    }
}

// ==========================================
// OpenCart 商品导入工具 - 语言仓储
// ==========================================
// 职责: 解析激活语言 id（language 表 + setting 表 config_language）
// ==========================================

use crate::config::ImportSettings;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

/// 语言仓储
///
/// 平台在 setting 表中以 `config_language` 键记录激活语言代码，
/// language 表按 code 映射到 language_id。
pub struct LanguageRepository {
    conn: Arc<Mutex<Connection>>,
    settings: Arc<ImportSettings>,
}

impl LanguageRepository {
    /// 从已有连接创建仓储实例
    pub fn new(conn: Arc<Mutex<Connection>>, settings: Arc<ImportSettings>) -> Self {
        Self { conn, settings }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询激活语言 id
    ///
    /// # 返回
    /// - `Ok(Some(language_id))`: 找到激活语言
    /// - `Ok(None)`: setting 表无 config_language 或 language 表无匹配行
    /// - `Err`: 数据库错误
    pub fn active_language_id(&self) -> RepositoryResult<Option<i64>> {
        let conn = self.get_conn()?;
        let sql = format!(
            r#"
            SELECT language_id
            FROM {language}
            WHERE code = (
                SELECT value
                FROM {setting}
                WHERE `key` = 'config_language' AND code = 'config'
            )
            "#,
            language = self.settings.table("language"),
            setting = self.settings.table("setting"),
        );

        let language_id = conn
            .query_row(&sql, [], |row| row.get::<_, i64>(0))
            .optional()?;

        Ok(language_id)
    }
}

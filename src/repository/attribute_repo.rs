// ==========================================
// OpenCart 商品导入工具 - 属性/属性组仓储
// ==========================================
// 职责: 属性组与属性的"查找或创建"（get-or-insert）
// 口径: 按本地化名称精确匹配（区分大小写与空白）；
//       未命中时创建，排序值取 MAX(sort_order)+1（空表取 0）
// 约束: 查找与创建在同一事务内完成，避免读后写竞态
// 说明: 属性查找与属性组查找一样按语言限定，并额外按属性组限定
//       （允许不同组下出现同名属性）
// ==========================================

use crate::config::ImportSettings;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

/// 属性/属性组仓储
pub struct AttributeRepository {
    conn: Arc<Mutex<Connection>>,
    settings: Arc<ImportSettings>,
}

impl AttributeRepository {
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

    // ==========================================
    // 属性组
    // ==========================================

    /// 按名称查找属性组，不存在则创建
    ///
    /// # 参数
    /// - `language_id`: 激活语言 id
    /// - `name`: 属性组本地化名称
    ///
    /// # 返回
    /// - `Ok(attribute_group_id)`: 既有或新建的属性组 id
    ///
    /// # 副作用
    /// 创建路径写入 attribute_group 与 attribute_group_description 两表
    pub fn get_or_create_group(&self, language_id: i64, name: &str) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        let group_id = Self::get_or_create_group_tx(&tx, &self.settings, language_id, name)?;
        tx.commit()?;
        Ok(group_id)
    }

    /// 事务内版本（供导入引擎在商品事务中复用）
    pub(crate) fn get_or_create_group_tx(
        conn: &Connection,
        settings: &ImportSettings,
        language_id: i64,
        name: &str,
    ) -> RepositoryResult<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepositoryError::ValidationError(
                "属性组名称不能为空".to_string(),
            ));
        }

        // === 查找既有属性组 ===
        let lookup_sql = format!(
            r#"
            SELECT attribute_group_id
            FROM {group_description}
            WHERE name = ?1 AND language_id = ?2
            "#,
            group_description = settings.table("attribute_group_description"),
        );
        let existing = conn
            .query_row(&lookup_sql, params![name, language_id], |row| {
                row.get::<_, i64>(0)
            })
            .optional()?;

        if let Some(group_id) = existing {
            return Ok(group_id);
        }

        // === 创建：排序值 = MAX+1（空表取 0） ===
        let sort_order = next_sort_order(conn, &settings.table("attribute_group"))?;

        let insert_sql = format!(
            "INSERT INTO {group_table} (sort_order) VALUES (?1)",
            group_table = settings.table("attribute_group"),
        );
        conn.execute(&insert_sql, params![sort_order])?;
        let group_id = conn.last_insert_rowid();

        let insert_description_sql = format!(
            r#"
            INSERT INTO {group_description} (attribute_group_id, language_id, name)
            VALUES (?1, ?2, ?3)
            "#,
            group_description = settings.table("attribute_group_description"),
        );
        conn.execute(&insert_description_sql, params![group_id, language_id, name])?;

        tracing::debug!(group_id, name, "已创建属性组");
        Ok(group_id)
    }

    // ==========================================
    // 属性
    // ==========================================

    /// 按名称在指定属性组下查找属性，不存在则创建
    ///
    /// # 返回
    /// - `Ok(attribute_id)`: 既有或新建的属性 id
    pub fn get_or_create_attribute(
        &self,
        language_id: i64,
        group_id: i64,
        name: &str,
    ) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        let attribute_id =
            Self::get_or_create_attribute_tx(&tx, &self.settings, language_id, group_id, name)?;
        tx.commit()?;
        Ok(attribute_id)
    }

    /// 事务内版本（供导入引擎在商品事务中复用）
    pub(crate) fn get_or_create_attribute_tx(
        conn: &Connection,
        settings: &ImportSettings,
        language_id: i64,
        group_id: i64,
        name: &str,
    ) -> RepositoryResult<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepositoryError::ValidationError(
                "属性名称不能为空".to_string(),
            ));
        }

        // === 查找既有属性（按语言 + 属性组限定） ===
        let lookup_sql = format!(
            r#"
            SELECT a.attribute_id
            FROM {attribute} a
            JOIN {attribute_description} ad ON ad.attribute_id = a.attribute_id
            WHERE ad.name = ?1 AND ad.language_id = ?2 AND a.attribute_group_id = ?3
            "#,
            attribute = settings.table("attribute"),
            attribute_description = settings.table("attribute_description"),
        );
        let existing = conn
            .query_row(&lookup_sql, params![name, language_id, group_id], |row| {
                row.get::<_, i64>(0)
            })
            .optional()?;

        if let Some(attribute_id) = existing {
            return Ok(attribute_id);
        }

        // === 创建：排序值 = MAX+1（空表取 0） ===
        let sort_order = next_sort_order(conn, &settings.table("attribute"))?;

        let insert_sql = format!(
            "INSERT INTO {attribute} (attribute_group_id, sort_order) VALUES (?1, ?2)",
            attribute = settings.table("attribute"),
        );
        conn.execute(&insert_sql, params![group_id, sort_order])?;
        let attribute_id = conn.last_insert_rowid();

        let insert_description_sql = format!(
            r#"
            INSERT INTO {attribute_description} (attribute_id, language_id, name)
            VALUES (?1, ?2, ?3)
            "#,
            attribute_description = settings.table("attribute_description"),
        );
        conn.execute(
            &insert_description_sql,
            params![attribute_id, language_id, name],
        )?;

        tracing::debug!(attribute_id, group_id, name, "已创建属性");
        Ok(attribute_id)
    }
}

/// 计算表内下一个排序值：COALESCE(MAX(sort_order)+1, 0)
fn next_sort_order(conn: &Connection, table: &str) -> RepositoryResult<i64> {
    let sql = format!("SELECT COALESCE(MAX(sort_order) + 1, 0) FROM {table}");
    let next = conn.query_row(&sql, [], |row| row.get::<_, i64>(0))?;
    Ok(next)
}

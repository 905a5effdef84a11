// ==========================================
// OpenCart 商品导入工具 - 分类仓储（路径解析）
// ==========================================
// 职责: 将斜杠分隔的分类路径逐级解析为叶子分类 id
// 口径: 从根（parent_id=0）出发，按本地化名称 + 当前父级逐段匹配；
//       任一段未命中即视为"未找到"，不是错误
// 说明: 父子边由数据库维护为树边，无需环检测
// ==========================================

use crate::config::ImportSettings;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

/// 分类树根的父级 id
const ROOT_PARENT_ID: i64 = 0;

/// 分类仓储
pub struct CategoryRepository {
    conn: Arc<Mutex<Connection>>,
    settings: Arc<ImportSettings>,
}

impl CategoryRepository {
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

    /// 解析分类路径
    ///
    /// # 参数
    /// - `language_id`: 激活语言 id（分类名称按该语言匹配）
    /// - `path`: 斜杠分隔的分类路径，例如 "Electronics / Mobile Phones"
    ///
    /// # 返回
    /// - `Ok(Some(category_id))`: 最深一段的分类 id
    /// - `Ok(None)`: 路径为空，或任一段在当前父级下无匹配子分类
    /// - `Err`: 数据库错误
    pub fn resolve_path(&self, language_id: i64, path: &str) -> RepositoryResult<Option<i64>> {
        let conn = self.get_conn()?;
        Self::resolve_path_tx(&conn, &self.settings, language_id, path)
    }

    /// 事务内版本（供导入引擎在商品事务中复用）
    pub(crate) fn resolve_path_tx(
        conn: &Connection,
        settings: &ImportSettings,
        language_id: i64,
        path: &str,
    ) -> RepositoryResult<Option<i64>> {
        let segments: Vec<String> = path.split('/').map(normalize_segment).collect();

        // 空路径或含空段（如 "A//B"）都不可能命中任何分类名
        if segments.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return Ok(None);
        }

        let sql = format!(
            r#"
            SELECT c.category_id
            FROM {category} c
            JOIN {category_description} cd ON cd.category_id = c.category_id
            WHERE cd.name = ?1 AND cd.language_id = ?2 AND c.parent_id = ?3
            "#,
            category = settings.table("category"),
            category_description = settings.table("category_description"),
        );
        let mut stmt = conn.prepare(&sql)?;

        // 逐段下钻：命中的 id 成为下一段的父级
        let mut parent_id = ROOT_PARENT_ID;
        for segment in &segments {
            let child_id = stmt
                .query_row(params![segment, language_id, parent_id], |row| {
                    row.get::<_, i64>(0)
                })
                .optional()?;

            match child_id {
                Some(id) => parent_id = id,
                None => return Ok(None),
            }
        }

        Ok(Some(parent_id))
    }
}

/// 规整单个路径段：压缩内部连续空白为单个空格并去除首尾空白
pub(crate) fn normalize_segment(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}

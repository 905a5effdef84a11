// ==========================================
// OpenCart 商品导入工具 - 商品仓储
// ==========================================
// 职责: 商品及其关联表（描述/店铺/布局/分类/图片/属性）的写入，
//       以及全量清空（deleteAllProducts 对应操作）
// 红线: Repository 不含业务逻辑；多表写入顺序由导入引擎编排
// ==========================================

use crate::config::ImportSettings;
use crate::domain::product::{ProductDescription, ProductImage, ProductRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

/// 全量清空涉及的商品相关表（不带前缀）
pub const PRODUCT_TABLES: &[&str] = &[
    "product",
    "product_attribute",
    "product_description",
    "product_discount",
    "product_filter",
    "product_image",
    "product_option",
    "product_option_value",
    "product_related",
    "product_reward",
    "product_special",
    "product_to_category",
    "product_to_download",
    "product_to_layout",
    "product_to_store",
];

/// 商品仓储
pub struct ProductRepository {
    conn: Arc<Mutex<Connection>>,
    settings: Arc<ImportSettings>,
}

impl ProductRepository {
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

    /// 查询商品表下一个排序值
    ///
    /// 每次插入前重新扫描，不跨批次缓存。
    pub fn next_sort_order(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        Self::next_sort_order_tx(&conn, &self.settings)
    }

    /// 事务内版本
    pub(crate) fn next_sort_order_tx(
        conn: &Connection,
        settings: &ImportSettings,
    ) -> RepositoryResult<i64> {
        let sql = format!(
            "SELECT COALESCE(MAX(sort_order) + 1, 0) FROM {product}",
            product = settings.table("product"),
        );
        let next = conn.query_row(&sql, [], |row| row.get::<_, i64>(0))?;
        Ok(next)
    }

    // ==========================================
    // 事务内写入操作（由导入引擎在单商品事务中调用）
    // ==========================================

    /// 插入商品基础行，返回自增 product_id
    ///
    /// 缺失的可选字段已在领域层回落到缺省值；
    /// 日期字段缺失时按当前时间写入。
    pub(crate) fn insert_product_tx(
        conn: &Connection,
        settings: &ImportSettings,
        record: &ProductRecord,
        sort_order: i64,
    ) -> RepositoryResult<i64> {
        let now = chrono::Local::now().naive_local();
        let date_available = record
            .date_available
            .unwrap_or_else(|| now.date())
            .format("%Y-%m-%d")
            .to_string();
        let date_added = record
            .date_added
            .unwrap_or(now)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        let date_modified = record
            .date_modified
            .unwrap_or(now)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();

        let sql = format!(
            r#"
            INSERT INTO {product} (
                model, sku, upc, ean, jan, isbn, mpn, location,
                quantity, stock_status_id, image, manufacturer_id,
                shipping, price, points, tax_class_id, date_available,
                weight, weight_class_id, length, width, height, length_class_id,
                subtract, minimum, sort_order, status, viewed,
                date_added, date_modified
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8,
                ?9, ?10, ?11, ?12,
                ?13, ?14, ?15, ?16, ?17,
                ?18, ?19, ?20, ?21, ?22, ?23,
                ?24, ?25, ?26, ?27, ?28,
                ?29, ?30
            )
            "#,
            product = settings.table("product"),
        );

        conn.execute(
            &sql,
            params![
                record.model,
                record.sku,
                record.upc,
                record.ean,
                record.jan,
                record.isbn,
                record.mpn,
                record.location,
                record.quantity,
                record.stock_status_id,
                record.image,
                record.manufacturer_id,
                record.shipping,
                record.price,
                record.points,
                record.tax_class_id,
                date_available,
                record.weight,
                record.weight_class_id,
                record.length,
                record.width,
                record.height,
                record.length_class_id,
                record.subtract,
                record.minimum,
                sort_order,
                record.status,
                record.viewed,
                date_added,
                date_modified,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// 插入商品本地化描述行（每商品在激活语言下恰好一行）
    pub(crate) fn insert_description_tx(
        conn: &Connection,
        settings: &ImportSettings,
        product_id: i64,
        language_id: i64,
        description: &ProductDescription,
    ) -> RepositoryResult<()> {
        let sql = format!(
            r#"
            INSERT INTO {product_description} (
                product_id, language_id, name, description, tag,
                meta_title, meta_description, meta_keyword
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            product_description = settings.table("product_description"),
        );
        conn.execute(
            &sql,
            params![
                product_id,
                language_id,
                description.name,
                description.description,
                description.tag,
                description.meta_title,
                description.meta_description,
                description.meta_keyword,
            ],
        )?;
        Ok(())
    }

    /// 插入商品-店铺关联行
    pub(crate) fn insert_store_link_tx(
        conn: &Connection,
        settings: &ImportSettings,
        product_id: i64,
        store_id: i64,
    ) -> RepositoryResult<()> {
        let sql = format!(
            "INSERT INTO {product_to_store} (product_id, store_id) VALUES (?1, ?2)",
            product_to_store = settings.table("product_to_store"),
        );
        conn.execute(&sql, params![product_id, store_id])?;
        Ok(())
    }

    /// 插入商品-布局关联行
    pub(crate) fn insert_layout_link_tx(
        conn: &Connection,
        settings: &ImportSettings,
        product_id: i64,
        store_id: i64,
        layout_id: i64,
    ) -> RepositoryResult<()> {
        let sql = format!(
            r#"
            INSERT INTO {product_to_layout} (product_id, store_id, layout_id)
            VALUES (?1, ?2, ?3)
            "#,
            product_to_layout = settings.table("product_to_layout"),
        );
        conn.execute(&sql, params![product_id, store_id, layout_id])?;
        Ok(())
    }

    /// 插入商品-分类关联行
    ///
    /// main_category 每商品至多一行为 1。
    pub(crate) fn insert_category_link_tx(
        conn: &Connection,
        settings: &ImportSettings,
        product_id: i64,
        category_id: i64,
        main_category: bool,
    ) -> RepositoryResult<()> {
        let sql = format!(
            r#"
            INSERT INTO {product_to_category} (product_id, category_id, main_category)
            VALUES (?1, ?2, ?3)
            "#,
            product_to_category = settings.table("product_to_category"),
        );
        conn.execute(
            &sql,
            params![product_id, category_id, main_category as i64],
        )?;
        Ok(())
    }

    /// 插入商品图片行（显式排序值）
    pub(crate) fn insert_image_tx(
        conn: &Connection,
        settings: &ImportSettings,
        product_id: i64,
        image: &ProductImage,
    ) -> RepositoryResult<()> {
        let sql = format!(
            r#"
            INSERT INTO {product_image} (product_id, image, sort_order)
            VALUES (?1, ?2, ?3)
            "#,
            product_image = settings.table("product_image"),
        );
        conn.execute(&sql, params![product_id, image.image, image.sort_order])?;
        Ok(())
    }

    /// 插入商品属性行（本地化文本值）
    pub(crate) fn insert_attribute_tx(
        conn: &Connection,
        settings: &ImportSettings,
        product_id: i64,
        attribute_id: i64,
        language_id: i64,
        text: &str,
    ) -> RepositoryResult<()> {
        let sql = format!(
            r#"
            INSERT INTO {product_attribute} (product_id, attribute_id, language_id, text)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            product_attribute = settings.table("product_attribute"),
        );
        conn.execute(&sql, params![product_id, attribute_id, language_id, text])?;
        Ok(())
    }

    // ==========================================
    // 全量清空
    // ==========================================

    /// 清空所有商品相关表（单事务）
    ///
    /// # 返回
    /// - `Ok(total)`: 删除的总行数
    ///
    /// # 说明
    /// 全量重置，不按子集过滤；表为空时也成功。
    pub fn delete_all_products(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut total = 0usize;
        for table in PRODUCT_TABLES {
            let sql = format!("DELETE FROM {}", self.settings.table(table));
            total += tx.execute(&sql, [])?;
        }

        tx.commit()?;
        tracing::info!(total, "已清空全部商品相关表");
        Ok(total)
    }
}

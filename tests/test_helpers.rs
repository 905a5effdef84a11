// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、基础数据播种等功能
// ==========================================

#![allow(dead_code)]

use opencart_import::config::ImportSettings;
use opencart_import::db;
use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// 测试用激活语言 id
pub const TEST_LANGUAGE_ID: i64 = 1;

/// 创建临时测试数据库并初始化 OpenCart 子集 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = open_test_connection(&db_path)?;
    init_schema(&conn)?;
    seed_language(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开测试连接（应用统一 PRAGMA）
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    let conn = db::open_sqlite_connection(db_path)?;
    Ok(conn)
}

/// 测试用导入配置（表前缀 oc_，语言从 setting 表解析）
pub fn test_settings(db_path: &str) -> Arc<ImportSettings> {
    Arc::new(ImportSettings {
        db_path: db_path.to_string(),
        table_prefix: "oc_".to_string(),
        language_id: None,
        store_id: 0,
        layout_id: 0,
        default_attribute_group: "Specification".to_string(),
    })
}

/// 初始化数据库 schema（OpenCart 表子集）
pub fn init_schema(conn: &Connection) -> Result<(), Box<dyn Error>> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS oc_language (
            language_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            code TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS oc_setting (
            setting_id INTEGER PRIMARY KEY AUTOINCREMENT,
            store_id INTEGER NOT NULL DEFAULT 0,
            code TEXT NOT NULL,
            `key` TEXT NOT NULL,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS oc_category (
            category_id INTEGER PRIMARY KEY AUTOINCREMENT,
            parent_id INTEGER NOT NULL DEFAULT 0,
            sort_order INTEGER NOT NULL DEFAULT 0,
            status INTEGER NOT NULL DEFAULT 1,
            date_added TEXT,
            date_modified TEXT
        );

        CREATE TABLE IF NOT EXISTS oc_category_description (
            category_id INTEGER NOT NULL,
            language_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            PRIMARY KEY (category_id, language_id)
        );

        CREATE TABLE IF NOT EXISTS oc_attribute_group (
            attribute_group_id INTEGER PRIMARY KEY AUTOINCREMENT,
            sort_order INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS oc_attribute_group_description (
            attribute_group_id INTEGER NOT NULL,
            language_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            PRIMARY KEY (attribute_group_id, language_id)
        );

        CREATE TABLE IF NOT EXISTS oc_attribute (
            attribute_id INTEGER PRIMARY KEY AUTOINCREMENT,
            attribute_group_id INTEGER NOT NULL,
            sort_order INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS oc_attribute_description (
            attribute_id INTEGER NOT NULL,
            language_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            PRIMARY KEY (attribute_id, language_id)
        );

        CREATE TABLE IF NOT EXISTS oc_product (
            product_id INTEGER PRIMARY KEY AUTOINCREMENT,
            model TEXT NOT NULL,
            sku TEXT,
            upc TEXT,
            ean TEXT,
            jan TEXT,
            isbn TEXT,
            mpn TEXT,
            location TEXT,
            quantity INTEGER NOT NULL DEFAULT 0,
            stock_status_id INTEGER NOT NULL DEFAULT 0,
            image TEXT,
            manufacturer_id INTEGER NOT NULL DEFAULT 0,
            shipping INTEGER NOT NULL DEFAULT 1,
            price REAL NOT NULL DEFAULT 0,
            points INTEGER NOT NULL DEFAULT 0,
            tax_class_id INTEGER NOT NULL DEFAULT 0,
            date_available TEXT,
            weight REAL NOT NULL DEFAULT 0,
            weight_class_id INTEGER NOT NULL DEFAULT 0,
            length REAL NOT NULL DEFAULT 0,
            width REAL NOT NULL DEFAULT 0,
            height REAL NOT NULL DEFAULT 0,
            length_class_id INTEGER NOT NULL DEFAULT 0,
            subtract INTEGER NOT NULL DEFAULT 1,
            minimum INTEGER NOT NULL DEFAULT 1,
            sort_order INTEGER NOT NULL DEFAULT 0,
            status INTEGER NOT NULL DEFAULT 0,
            viewed INTEGER NOT NULL DEFAULT 0,
            date_added TEXT,
            date_modified TEXT
        );

        CREATE TABLE IF NOT EXISTS oc_product_description (
            product_id INTEGER NOT NULL,
            language_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            tag TEXT,
            meta_title TEXT,
            meta_description TEXT,
            meta_keyword TEXT,
            PRIMARY KEY (product_id, language_id)
        );

        CREATE TABLE IF NOT EXISTS oc_product_to_store (
            product_id INTEGER NOT NULL,
            store_id INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (product_id, store_id)
        );

        CREATE TABLE IF NOT EXISTS oc_product_to_layout (
            product_id INTEGER NOT NULL,
            store_id INTEGER NOT NULL DEFAULT 0,
            layout_id INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (product_id, store_id)
        );

        CREATE TABLE IF NOT EXISTS oc_product_to_category (
            product_id INTEGER NOT NULL,
            category_id INTEGER NOT NULL,
            main_category INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (product_id, category_id)
        );

        CREATE TABLE IF NOT EXISTS oc_product_image (
            product_image_id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL,
            image TEXT,
            sort_order INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS oc_product_attribute (
            product_id INTEGER NOT NULL,
            attribute_id INTEGER NOT NULL,
            language_id INTEGER NOT NULL,
            text TEXT NOT NULL,
            PRIMARY KEY (product_id, attribute_id, language_id)
        );

        CREATE TABLE IF NOT EXISTS oc_product_discount (
            product_discount_id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 0,
            priority INTEGER NOT NULL DEFAULT 1,
            price REAL NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS oc_product_filter (
            product_id INTEGER NOT NULL,
            filter_id INTEGER NOT NULL,
            PRIMARY KEY (product_id, filter_id)
        );

        CREATE TABLE IF NOT EXISTS oc_product_option (
            product_option_id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL,
            option_id INTEGER NOT NULL,
            required INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS oc_product_option_value (
            product_option_value_id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_option_id INTEGER NOT NULL,
            product_id INTEGER NOT NULL,
            option_value_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS oc_product_related (
            product_id INTEGER NOT NULL,
            related_id INTEGER NOT NULL,
            PRIMARY KEY (product_id, related_id)
        );

        CREATE TABLE IF NOT EXISTS oc_product_reward (
            product_reward_id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL,
            customer_group_id INTEGER NOT NULL DEFAULT 0,
            points INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS oc_product_special (
            product_special_id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL,
            priority INTEGER NOT NULL DEFAULT 1,
            price REAL NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS oc_product_to_download (
            product_id INTEGER NOT NULL,
            download_id INTEGER NOT NULL,
            PRIMARY KEY (product_id, download_id)
        );
        "#,
    )?;

    Ok(())
}

/// 播种激活语言（language 表 + setting 表 config_language）
pub fn seed_language(conn: &Connection) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT INTO oc_language (language_id, name, code) VALUES (?1, 'English', 'en-gb')",
        params![TEST_LANGUAGE_ID],
    )?;
    conn.execute(
        r#"
        INSERT INTO oc_setting (store_id, code, `key`, value)
        VALUES (0, 'config', 'config_language', 'en-gb')
        "#,
        [],
    )?;
    Ok(())
}

/// 插入分类及其本地化描述，返回 category_id
pub fn insert_category(
    conn: &Connection,
    parent_id: i64,
    language_id: i64,
    name: &str,
) -> Result<i64, Box<dyn Error>> {
    conn.execute(
        r#"
        INSERT INTO oc_category (parent_id, sort_order, status, date_added, date_modified)
        VALUES (?1, 0, 1, datetime('now'), datetime('now'))
        "#,
        params![parent_id],
    )?;
    let category_id = conn.last_insert_rowid();
    conn.execute(
        "INSERT INTO oc_category_description (category_id, language_id, name) VALUES (?1, ?2, ?3)",
        params![category_id, language_id, name],
    )?;
    Ok(category_id)
}

/// 查询表行数
pub fn count_rows(conn: &Connection, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    conn.query_row(&sql, [], |row| row.get(0)).unwrap()
}

// ==========================================
// OpenCart 商品导入工具 - 导入引擎
// ==========================================
// 职责: 逐商品编排多表写入，满足外键依赖顺序
//       商品 → 描述/店铺/布局/分类/图片/属性
// 约束: 每个商品一个事务；单商品失败回滚并记录，不中断整批
// 红线: 不含 UI 逻辑；不做业务规则校验
// ==========================================

use crate::config::ImportSettings;
use crate::domain::product::ProductRecord;
use crate::repository::attribute_repo::AttributeRepository;
use crate::repository::category_repo::CategoryRepository;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::language_repo::LanguageRepository;
use crate::repository::product_repo::ProductRepository;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

// ==========================================
// 导入结果结构
// ==========================================

/// 单商品导入失败记录
#[derive(Debug, Clone)]
pub struct ImportFailure {
    /// 输入集合中的序号（从 0 开始）
    pub index: usize,
    /// 商品 model 字段（便于定位输入行）
    pub model: String,
    /// 错误描述
    pub message: String,
}

/// 导入统计
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    /// 输入商品总数
    pub total: usize,
    /// 成功导入数
    pub imported: usize,
    /// 失败（已回滚）数
    pub failed: usize,
    /// 分类路径未解析到叶子分类的商品数
    pub categories_missing: usize,
}

/// 导入报告
#[derive(Debug)]
pub struct ImportReport {
    pub summary: ImportSummary,
    /// 成功导入商品的自增 id，按输入顺序
    pub product_ids: Vec<i64>,
    pub failures: Vec<ImportFailure>,
    pub elapsed: Duration,
}

// ==========================================
// ProductImporter - 导入引擎
// ==========================================

/// 商品导入引擎
///
/// # 流程（每商品一个事务）
/// 1. 插入商品基础行（缺省值回落，排序值即时计算）
/// 2. 插入激活语言的描述行
/// 3. 插入店铺/布局关联行（进程级 store_id / layout_id）
/// 4. 解析分类路径并插入主分类关联；未解析到只告警
/// 5. 按显式排序值逐条插入图片行
/// 6. 属性在缺省属性组下查找或创建，插入商品属性行
pub struct ProductImporter {
    conn: Arc<Mutex<Connection>>,
    settings: Arc<ImportSettings>,
}

/// 单商品导入结果（内部）
struct ProductOutcome {
    product_id: i64,
    category_resolved: bool,
}

impl ProductImporter {
    /// 从已有连接创建导入引擎
    pub fn new(conn: Arc<Mutex<Connection>>, settings: Arc<ImportSettings>) -> Self {
        Self { conn, settings }
    }

    /// 按配置打开数据库并创建导入引擎
    pub fn open(settings: Arc<ImportSettings>) -> RepositoryResult<Self> {
        let conn = crate::db::open_shared_connection(&settings.db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self::new(conn, settings))
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 解析激活语言 id
    ///
    /// 配置显式给定时直接使用，否则从平台 setting 表解析。
    pub fn resolve_language_id(&self) -> RepositoryResult<i64> {
        if let Some(language_id) = self.settings.language_id {
            return Ok(language_id);
        }

        let repo = LanguageRepository::new(self.conn.clone(), self.settings.clone());
        repo.active_language_id()?
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "language".to_string(),
                id: "config_language".to_string(),
            })
    }

    /// 导入商品集合（主入口）
    ///
    /// # 参数
    /// - `products`: 待导入商品记录
    ///
    /// # 返回
    /// - `ImportReport`: 统计 + 成功 id 列表 + 失败明细
    ///
    /// # 失败语义
    /// 单商品数据库错误回滚该商品的全部行并继续下一条；
    /// 语言解析失败属于运行级错误，直接返回 Err。
    pub fn import(&self, products: &[ProductRecord]) -> RepositoryResult<ImportReport> {
        let start = Instant::now();
        let language_id = self.resolve_language_id()?;

        tracing::info!(
            total = products.len(),
            language_id,
            store_id = self.settings.store_id,
            "开始导入商品"
        );

        let mut summary = ImportSummary {
            total: products.len(),
            ..Default::default()
        };
        let mut product_ids = Vec::new();
        let mut failures = Vec::new();

        for (index, record) in products.iter().enumerate() {
            match self.import_one(language_id, record) {
                Ok(outcome) => {
                    summary.imported += 1;
                    if !outcome.category_resolved {
                        summary.categories_missing += 1;
                    }
                    product_ids.push(outcome.product_id);
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::warn!(index, model = %record.model, error = %e, "商品导入失败，已回滚");
                    failures.push(ImportFailure {
                        index,
                        model: record.model.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        let elapsed = start.elapsed();
        tracing::info!(
            imported = summary.imported,
            failed = summary.failed,
            categories_missing = summary.categories_missing,
            ?elapsed,
            "商品导入完成"
        );

        Ok(ImportReport {
            summary,
            product_ids,
            failures,
            elapsed,
        })
    }

    /// 导入单个商品（一个事务）
    fn import_one(&self, language_id: i64, record: &ProductRecord) -> RepositoryResult<ProductOutcome> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        let settings = &*self.settings;

        // === 步骤 1: 商品基础行 ===
        let sort_order = ProductRepository::next_sort_order_tx(&tx, settings)?;
        let product_id = ProductRepository::insert_product_tx(&tx, settings, record, sort_order)?;

        // === 步骤 2: 本地化描述行 ===
        ProductRepository::insert_description_tx(
            &tx,
            settings,
            product_id,
            language_id,
            &record.description,
        )?;

        // === 步骤 3: 店铺/布局关联 ===
        ProductRepository::insert_store_link_tx(&tx, settings, product_id, settings.store_id)?;
        ProductRepository::insert_layout_link_tx(
            &tx,
            settings,
            product_id,
            settings.store_id,
            settings.layout_id,
        )?;

        // === 步骤 4: 分类路径解析 + 主分类关联 ===
        let mut category_resolved = true;
        if let Some(path) = record.category.as_deref() {
            match CategoryRepository::resolve_path_tx(&tx, settings, language_id, path)? {
                Some(category_id) => {
                    ProductRepository::insert_category_link_tx(
                        &tx, settings, product_id, category_id, true,
                    )?;
                }
                None => {
                    // 未解析到叶子分类视为"未找到"，不中断该商品
                    category_resolved = false;
                    tracing::warn!(model = %record.model, path, "分类路径未找到，跳过分类关联");
                }
            }
        }

        // === 步骤 5: 图片行 ===
        for image in &record.images {
            ProductRepository::insert_image_tx(&tx, settings, product_id, image)?;
        }

        // === 步骤 6: 属性（缺省属性组下查找或创建） ===
        if !record.attributes.is_empty() {
            let group_id = AttributeRepository::get_or_create_group_tx(
                &tx,
                settings,
                language_id,
                &settings.default_attribute_group,
            )?;

            for entry in &record.attributes {
                let attribute_id = AttributeRepository::get_or_create_attribute_tx(
                    &tx,
                    settings,
                    language_id,
                    group_id,
                    &entry.name,
                )?;
                ProductRepository::insert_attribute_tx(
                    &tx,
                    settings,
                    product_id,
                    attribute_id,
                    language_id,
                    &entry.text,
                )?;
            }
        }

        tx.commit()?;
        tracing::debug!(product_id, model = %record.model, "商品已导入");

        Ok(ProductOutcome {
            product_id,
            category_resolved,
        })
    }

    /// 清空所有商品相关表（配套的全量重置操作）
    pub fn delete_all_products(&self) -> RepositoryResult<usize> {
        let repo = ProductRepository::new(self.conn.clone(), self.settings.clone());
        repo.delete_all_products()
    }
}

// ==========================================
// OpenCart 商品导入工具 - 商品记录实体
// ==========================================
// 职责: 描述一条待导入商品及其嵌套集合（图片/属性）
// 口径: 缺失的可选字段回落到平台文档缺省值
//       quantity=0, shipping=1, subtract=1, minimum=1, status=0, viewed=0
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// 商品图片描述符
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    /// 图片路径（相对于 image/ 目录）
    pub image: String,

    /// 显示排序
    #[serde(default)]
    pub sort_order: i64,
}

/// 单个属性名-值对
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeEntry {
    /// 属性本地化名称
    pub name: String,

    /// 属性文本值（本地化）
    pub text: String,
}

/// 商品本地化描述块（product_description 表）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDescription {
    pub name: String,
    pub description: String,
    pub tag: String,
    pub meta_title: String,
    pub meta_description: String,
    pub meta_keyword: String,
}

/// 待导入商品记录
///
/// 所有可选字段缺失时按平台缺省值写入（见模块头注释）。
/// category 为斜杠分隔的分类路径，例如 "Electronics / Phones"。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductRecord {
    // ===== product 表基础字段 =====
    pub model: String,
    pub sku: String,
    pub upc: String,
    pub ean: String,
    pub jan: String,
    pub isbn: String,
    pub mpn: String,
    pub location: String,

    pub quantity: i64,
    pub stock_status_id: i64,
    pub image: String,
    pub manufacturer_id: i64,

    #[serde(default = "default_one")]
    pub shipping: i64,

    pub price: f64,
    pub points: i64,
    pub tax_class_id: i64,

    pub date_available: Option<NaiveDate>,

    pub weight: f64,
    pub weight_class_id: i64,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub length_class_id: i64,

    #[serde(default = "default_one")]
    pub subtract: i64,

    #[serde(default = "default_one")]
    pub minimum: i64,

    pub status: i64,
    pub viewed: i64,

    pub date_added: Option<NaiveDateTime>,
    pub date_modified: Option<NaiveDateTime>,

    // ===== 关联数据 =====
    /// 本地化描述（product_description 表，激活语言写一行）
    pub description: ProductDescription,

    /// 分类路径，斜杠分隔；None 表示不建立分类关联
    pub category: Option<String>,

    /// 图片列表（product_image 表）
    pub images: Vec<ProductImage>,

    /// 属性名-值对列表（product_attribute 表）
    pub attributes: Vec<AttributeEntry>,
}

fn default_one() -> i64 {
    1
}

impl Default for ProductRecord {
    fn default() -> Self {
        Self {
            model: String::new(),
            sku: String::new(),
            upc: String::new(),
            ean: String::new(),
            jan: String::new(),
            isbn: String::new(),
            mpn: String::new(),
            location: String::new(),
            quantity: 0,
            stock_status_id: 0,
            image: String::new(),
            manufacturer_id: 0,
            shipping: 1,
            price: 0.0,
            points: 0,
            tax_class_id: 0,
            date_available: None,
            weight: 0.0,
            weight_class_id: 0,
            length: 0.0,
            width: 0.0,
            height: 0.0,
            length_class_id: 0,
            subtract: 1,
            minimum: 1,
            status: 0,
            viewed: 0,
            date_added: None,
            date_modified: None,
            description: ProductDescription::default(),
            category: None,
            images: Vec::new(),
            attributes: Vec::new(),
        }
    }
}

// ==========================================
// OpenCart 商品导入工具 - CSV 输入解析
// ==========================================
// 职责: 解析商品 CSV 文件（一行一商品）
// 列序（含表头，按位置取值）:
//   0 model | 1 sku | 2 price | 3 quantity | 4 status
//   5 name | 6 description | 7 category
//   8 images     打包格式 path:sort;path:sort（sort 缺省 0）
//   9 attributes 打包格式 name=value;name=value
// 口径: 缺失/不可解析的单元格回落到领域缺省值
// ==========================================

use crate::domain::product::{AttributeEntry, ProductImage, ProductRecord};
use anyhow::Context;
use csv::StringRecord;
use std::path::Path;

/// 从 CSV 文件加载商品记录
pub fn load_products_from_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ProductRecord>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("无法读取商品文件: {}", path.display()))?;

    let mut products = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let row_number = row_idx + 2; // 行号从 1 开始，且跳过 header
        let record = result.with_context(|| format!("CSV 第 {row_number} 行解析失败"))?;

        let mut product = ProductRecord {
            model: get_string_field(&record, 0),
            sku: get_string_field(&record, 1),
            ..Default::default()
        };
        if let Some(price) = get_f64_field(&record, 2) {
            product.price = price;
        }
        if let Some(quantity) = get_i64_field(&record, 3) {
            product.quantity = quantity;
        }
        if let Some(status) = get_i64_field(&record, 4) {
            product.status = status;
        }
        product.description.name = get_string_field(&record, 5);
        product.description.description = get_string_field(&record, 6);

        let category = get_string_field(&record, 7);
        if !category.is_empty() {
            product.category = Some(category);
        }

        product.images = parse_packed_images(&get_string_field(&record, 8));
        product.attributes = parse_packed_attributes(&get_string_field(&record, 9));

        products.push(product);
    }

    tracing::info!(count = products.len(), file = %path.display(), "已解析 CSV 商品文件");
    Ok(products)
}

/// 取字符串单元格（缺失返回空串）
fn get_string_field(record: &StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or_default().trim().to_string()
}

/// 取浮点单元格（缺失或不可解析返回 None）
fn get_f64_field(record: &StringRecord, idx: usize) -> Option<f64> {
    record.get(idx)?.trim().parse().ok()
}

/// 取整数单元格（缺失或不可解析返回 None）
fn get_i64_field(record: &StringRecord, idx: usize) -> Option<i64> {
    record.get(idx)?.trim().parse().ok()
}

/// 解析打包图片列: path:sort;path:sort
///
/// 末段冒号后不是整数时，整段视为路径，sort 取 0。
fn parse_packed_images(cell: &str) -> Vec<ProductImage> {
    cell.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.rsplit_once(':') {
            Some((image, sort)) if sort.trim().parse::<i64>().is_ok() => ProductImage {
                image: image.trim().to_string(),
                sort_order: sort.trim().parse().unwrap_or(0),
            },
            _ => ProductImage {
                image: part.to_string(),
                sort_order: 0,
            },
        })
        .collect()
}

/// 解析打包属性列: name=value;name=value
///
/// 无等号的段丢弃。
fn parse_packed_attributes(cell: &str) -> Vec<AttributeEntry> {
    cell.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| {
            part.split_once('=').map(|(name, text)| AttributeEntry {
                name: name.trim().to_string(),
                text: text.trim().to_string(),
            })
        })
        .collect()
}

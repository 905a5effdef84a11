// ==========================================
// OpenCart 商品导入工具 - JSON 输入解析
// ==========================================
// 职责: 解析商品记录 JSON 数组
// 口径: 缺失可选字段由 serde 缺省值回落（见 domain::product）
// ==========================================

use crate::domain::product::ProductRecord;
use anyhow::Context;
use std::fs;
use std::path::Path;

/// 从 JSON 文件加载商品记录
///
/// 文件内容为 `ProductRecord` 的 JSON 数组。
pub fn load_products_from_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ProductRecord>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("无法读取商品文件: {}", path.display()))?;
    let products: Vec<ProductRecord> = serde_json::from_str(&content)
        .with_context(|| format!("商品文件格式错误: {}", path.display()))?;

    tracing::info!(count = products.len(), file = %path.display(), "已解析 JSON 商品文件");
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_json_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"model": "M-1", "price": 9.9, "description": {{"name": "One"}}}},
                {{"model": "M-2", "category": "A/B"}}
            ]"#
        )
        .unwrap();

        let products = load_products_from_json(file.path()).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].model, "M-1");
        assert_eq!(products[0].description.name, "One");
        assert_eq!(products[1].category.as_deref(), Some("A/B"));
    }

    #[test]
    fn test_load_json_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(load_products_from_json(file.path()).is_err());
    }
}

// ==========================================
// OpenCart 商品导入工具 - 命令行入口
// ==========================================
// 用法: opencart-import <settings.json> <products.json|products.csv> [--reset]
//   --reset: 导入前清空全部商品相关表
// ==========================================

use anyhow::{bail, Context};
use opencart_import::engine::ProductImporter;
use opencart_import::importer::{load_products_from_csv, load_products_from_json};
use opencart_import::{logging, ImportSettings};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", opencart_import::APP_NAME, opencart_import::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        bail!("用法: {} <settings.json> <products.json|products.csv> [--reset]", args[0]);
    }
    let settings_path = &args[1];
    let products_path = &args[2];
    let reset = args.iter().skip(3).any(|a| a == "--reset");

    // 加载配置
    let settings = Arc::new(ImportSettings::from_file(settings_path)?);
    tracing::info!(
        db_path = %settings.db_path,
        table_prefix = %settings.table_prefix,
        "配置已加载"
    );

    // 解析商品文件（按扩展名选择解析器）
    let products = if products_path.ends_with(".csv") {
        load_products_from_csv(products_path)?
    } else {
        load_products_from_json(products_path)?
    };

    // 打开数据库并执行导入
    let importer = ProductImporter::open(settings).context("打开数据库失败")?;

    if reset {
        let deleted = importer.delete_all_products()?;
        tracing::info!(deleted, "已执行全量重置");
    }

    let report = importer.import(&products)?;

    tracing::info!(
        total = report.summary.total,
        imported = report.summary.imported,
        failed = report.summary.failed,
        categories_missing = report.summary.categories_missing,
        elapsed = ?report.elapsed,
        "导入结束"
    );

    for failure in &report.failures {
        tracing::warn!(
            index = failure.index,
            model = %failure.model,
            "失败明细: {}",
            failure.message
        );
    }

    if report.summary.failed > 0 {
        bail!("{} 条商品导入失败", report.summary.failed);
    }
    Ok(())
}

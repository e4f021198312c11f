//! 数据生成器
//!
//! 生成启动时填充到内存仓储的种子目录

pub mod seed_catalog;

pub use seed_catalog::SeedCatalog;

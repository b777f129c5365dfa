//! 基础设施层
//!
//! 持有稀缺资源（本地 blob 数据），只暴露能力

pub mod blob_store;

pub use blob_store::BlobStore;

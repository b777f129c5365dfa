pub mod download_writer;
pub mod error_classifier;
pub mod payload_builder;
pub mod result_manager;

pub use download_writer::DownloadWriter;
pub use error_classifier::ErrorClassifier;
pub use payload_builder::PayloadBuilder;
pub use result_manager::ResultManager;

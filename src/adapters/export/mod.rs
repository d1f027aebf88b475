mod json_file_exporter;

pub use json_file_exporter::JsonFileExporter;

mod extract;

pub use extract::build_extract_config;

pub mod chunk_matcher;
pub mod table_extractor;

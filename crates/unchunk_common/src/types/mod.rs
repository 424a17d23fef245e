pub mod chunk_id;
pub mod factory_slots;
pub mod import_record;
pub mod module_id;
pub mod module_key;
pub mod module_meta;
pub mod raw_idx;
pub mod resolved_module_id;
pub mod variable_annotation;

pub mod normalize_options;
pub mod parse_to_ecma_ast;
pub mod rename_applier;
pub mod render_module;
pub mod resolve_id;
pub mod slot_matcher;
pub mod symbol_table;

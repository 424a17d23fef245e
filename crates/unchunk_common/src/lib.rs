mod types;
mod unpack_options;

pub use crate::{
  types::{
    chunk_id::ChunkId,
    factory_slots::{FactorySlots, SlotError},
    import_record::RawImportRecord,
    module_id::ModuleId,
    module_key::ModuleKey,
    module_meta::ModuleMeta,
    raw_idx::ModuleIdx,
    resolved_module_id::ResolvedModuleId,
    variable_annotation::VariableAnnotation,
  },
  unpack_options::{
    UnpackOptions,
    module_override::{ModuleOverride, ModuleOverrides},
    normalized_unpack_options::NormalizedUnpackOptions,
    output_format::OutputFormat,
  },
};

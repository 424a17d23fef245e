pub mod module_factory;
pub mod module_record;
pub mod unpack_output;

use std::sync::Arc;

use oxc_index::IndexVec;
use unchunk_common::{ModuleIdx, NormalizedUnpackOptions};

use self::module_record::ModuleRecord;

pub type IndexModules = IndexVec<ModuleIdx, ModuleRecord>;

pub type SharedOptions = Arc<NormalizedUnpackOptions>;

pub mod alias;
pub mod entity;
pub mod normalize;
pub mod record;
pub mod status;
pub mod tokenize;

pub use alias::normalize_alias;
pub use entity::{Category, Task, Update};
pub use normalize::{NormalizedBatch, RecordWarning, normalize_batch};
pub use record::{RawBatch, RawCategory, RawTask, RawUpdate};
pub use status::TaskStatus;
pub use tokenize::{token_set, tokenize};

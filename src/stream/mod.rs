//! Entity stream: the data-fetch descriptor and the records it selects.
//!
//! | Module       | Purpose                                          |
//! |--------------|--------------------------------------------------|
//! | `descriptor` | `[stream]` descriptor (fields, filter, locales)  |
//! | `record`     | `EntityRecord` and its linked-entity shapes      |
//! | `load`       | Reading `.json` / `.jsonl` stream exports        |

mod descriptor;
mod load;
mod record;

pub use descriptor::{Localization, StreamConfig, StreamFilter};
pub use load::{StreamError, load_stream};
pub use record::{Address, EntityId, EntityMeta, EntityRecord, LinkedEntity, Photo, SiteContext};

//! Command implementations

mod commit;
mod emit;
mod serve;
mod spool;

pub use commit::commit;
pub use emit::emit;
pub use serve::serve;
pub use spool::spool_list;

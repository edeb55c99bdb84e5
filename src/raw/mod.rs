mod arena;
mod handle;
mod node;
mod raw_tally_tree;

pub(crate) use handle::Handle;
pub(crate) use raw_tally_tree::RawTallyTree;

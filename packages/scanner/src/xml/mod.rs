//! XML navigation helpers shared by the reader and the extractor.

mod utils;

pub use utils::{
    direct_text, element_children, find_children, find_descendant, find_descendants,
    flatten_text, get_tag_name, has_name,
};

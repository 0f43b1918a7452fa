//! Parsers for the markdown constructs migration depends on.

pub mod block_id;
pub mod code_block;
pub mod frontmatter;
pub mod heading;
pub mod link;
pub mod list_item;

pub use block_id::{parse_block_ids, strip_trailing_block_id, trailing_block_id};
pub use code_block::{find_code_block_ranges, CodeBlockRange};
pub use frontmatter::{frontmatter_aliases, parse_frontmatter_with_path, split_frontmatter};
pub use heading::parse_headings;
pub use link::{strip_trailing_block_link, trailing_block_link, BlockLink, LinkStyle};
pub use list_item::{parse_list_items, task_marker, with_task_marker};

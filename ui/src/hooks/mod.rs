pub mod use_infinite_list;

pub use use_infinite_list::{InfiniteListHookReturn, use_infinite_list};

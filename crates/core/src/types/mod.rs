pub mod date_range;
pub mod duration;
pub mod export_format;
pub mod slug;
pub mod topic;

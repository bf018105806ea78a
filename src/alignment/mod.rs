pub mod matcher;
pub mod report;
pub mod tracks;
pub mod trim;
pub mod wrap;

pub mod commit;
pub mod feed;

pub use commit::CommitRecord;
pub use feed::{CommitFeed, FeedError};

pub mod dedup;
pub mod normalize;
pub mod score;
pub mod search;

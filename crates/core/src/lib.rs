pub mod preference;
pub mod reactive;
pub mod shared;
pub mod storage;

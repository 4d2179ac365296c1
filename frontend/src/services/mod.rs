pub mod controls;
pub mod localize;
pub mod page;
pub mod storage;

pub mod conv;
pub mod pad;
pub mod pool;

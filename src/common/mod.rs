pub mod compositor;
pub mod deps;
pub mod exec;
pub mod lock;
pub mod notify;
pub mod paths;
pub mod poll;

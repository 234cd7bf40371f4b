pub mod browse;
pub mod dispatch;
pub mod page;
pub mod schema;
pub mod search;

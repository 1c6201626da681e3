pub mod connect;
pub mod passage;
pub mod query;
pub mod route;

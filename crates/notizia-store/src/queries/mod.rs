pub mod case;
pub mod client;
pub mod row;
pub mod session;

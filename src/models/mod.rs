pub mod contact;
pub mod node;
pub mod session;
pub mod signal;

pub mod balance;
pub mod session;
pub mod state;
pub mod token;

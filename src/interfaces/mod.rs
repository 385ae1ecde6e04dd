pub mod function;
pub mod http;

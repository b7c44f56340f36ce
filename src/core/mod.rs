pub mod adapter;
pub mod resolver;

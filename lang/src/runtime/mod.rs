pub mod operations;
pub mod string;
pub mod value;

pub mod imports;
pub mod printer;

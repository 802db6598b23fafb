
pub mod ray;
pub mod bbox;
pub mod probe;
pub mod numeric;
pub mod interval;
pub mod json_structs;
pub mod json_parser;

pub mod prelude;

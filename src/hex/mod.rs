pub mod byte_source;
pub mod hex_reader;
pub mod hex_record;

pub mod byte_store;
pub mod fragment;
pub mod pages;
pub mod sparse_file;

mod local_store_file;

pub use local_store_file::*;

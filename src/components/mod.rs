pub mod file_input;
pub mod file_list;
pub mod uploader;

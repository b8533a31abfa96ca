pub mod media;
pub mod message;
pub mod notify;
pub mod send_to_json_file;

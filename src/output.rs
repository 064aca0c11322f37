mod response;

pub use response::{map_cmd_result_to_json, print_error_human, print_json_result};

pub mod fs_atomic;
pub mod headers;
pub mod paths;
pub mod suggest;
pub mod tool_errors;

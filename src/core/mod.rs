pub mod openlist;
pub mod path;

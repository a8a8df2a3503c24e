pub mod copy;
pub mod sha1;

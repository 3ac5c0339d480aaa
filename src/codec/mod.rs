pub mod text;

pub use text::{decode, encode, read_from, write_to, FORMAT_VERSION};

mod arbitrary;
pub mod utils;

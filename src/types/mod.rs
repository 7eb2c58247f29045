pub mod buffer;
pub mod set;

pub use buffer::Buffer;
pub use set::MultiSet;

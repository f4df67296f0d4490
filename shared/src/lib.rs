pub mod protocol;
pub mod elements;
pub mod bosses;
pub mod abilities;
pub mod content;

pub use protocol::*;
pub use elements::*;
pub use bosses::*;
pub use abilities::*;
pub use content::*;

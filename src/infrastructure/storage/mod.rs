//! Session storage trait and implementations

mod file;
mod memory;
mod traits;

pub use file::FileSessionStorage;
pub use memory::InMemorySessionStorage;
pub use traits::SessionStorage;

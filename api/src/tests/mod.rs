pub mod memory;

mod pagination;
mod streak;

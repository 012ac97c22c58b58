//! Menu domain module: restaurants, menu items and their read-access trait.

mod model;
mod repository;

pub use model::{MenuFilter, MenuItem, Restaurant};
pub use repository::MenuRepository;

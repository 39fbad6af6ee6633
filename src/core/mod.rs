pub mod error;
pub mod pagination;

pub use error::{AppError, Result};
pub use pagination::{Direction, Page, PageRequest, Sort, SortProperty};

// Coach record model and the category/skill table

pub mod category;
pub mod record;

pub use category::*;
pub use record::*;

pub mod indicator;
pub mod item;
pub mod string_list;

pub use indicator::Indicator;
pub use item::Item;
pub use string_list::StringList;

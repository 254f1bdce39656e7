pub mod assistant;
pub mod docs;
pub mod model;
pub mod reminder;
pub mod routine;
pub mod skin;

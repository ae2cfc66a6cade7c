mod content_item;
mod follow;
mod user;

pub use content_item::ContentItem;
pub use follow::Follow;
pub use user::User;

//! Database Models

// Serde helpers
pub mod serde_helpers;

// Catalog (collaborator surface)
pub mod menu_item;
pub mod restaurant;

// Table sessions
pub mod qr_code;

// Orders
pub mod order;

// Feedback
pub mod feedback;

// Re-exports
pub use feedback::{Feedback, FeedbackCreate, SentimentType};
pub use menu_item::{MenuItem, MenuItemCreate};
pub use order::{Order, OrderLine};
pub use qr_code::{QrCode, QrCodeCreate};
pub use restaurant::{Restaurant, RestaurantCreate};

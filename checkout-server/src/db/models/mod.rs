//! Database Models

pub mod course;
pub mod enrollment;
pub mod food_item;
pub mod order;
pub mod promo;
pub mod serde_thing;
pub mod user;

pub use course::{CompletionRequirement, Course};
pub use enrollment::{Certificate, Enrollment, EnrollmentStatus, PaymentSnapshot, Progress};
pub use food_item::FoodItem;
pub use order::{Order, OrderItem, OrderStatus, OrderType};
pub use promo::{DiscountType, Promo, PromoCreate, PromoUpdate, PromoUsage, UNLIMITED_USAGE};
pub use user::{User, UserRole};

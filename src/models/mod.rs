pub mod book;
pub mod loan;
pub mod review;
pub mod user;

pub use book::{Author, Book, Genre};
pub use loan::{BorrowDuration, BorrowRequest};
pub use review::{NewReview, Review};
pub use user::{AuthStatus, LoginRequest, LoginResponse, RegisterRequest};

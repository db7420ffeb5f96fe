pub mod dashboard;
pub mod landing;
pub mod modals;
pub mod toast;

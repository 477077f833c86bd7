pub mod credentials;
pub mod dispatch;
pub mod response;

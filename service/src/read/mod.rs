//! Read entities definitions.

pub mod question;
pub mod session;

pub use self::session::Step;

#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use arpoints_cloud as cloud;

#[doc(inline)]
pub use arpoints_session as session;

//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, page
//! location) behind small traits so the session gate can be tested natively.

pub mod navigation;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;

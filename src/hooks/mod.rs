//! Field hooks run while a draft is validated, before persistence.
//!
//! Both hooks are pure, synchronous, and total: absence flows in as
//! `None` and comes out as `None` or a pass-through, never as an error.

pub mod price;
pub mod slug;

//! VC platform integration

mod client;

pub use client::{bearer_header, VcClient};

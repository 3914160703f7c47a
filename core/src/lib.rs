//! # relaygen core
//!
//! The stages of a relay list run, from the raw VPN Gate feed to the written
//! server document. [`pipeline::Pipeline`] chains them.

pub mod assembler;
pub mod feed;
pub mod filter;
pub mod openvpn;
pub mod parser;
pub mod pipeline;
pub mod prober;

//! Adapters: concrete implementations of the collaborator ports plus the
//! HTTP transport.

pub mod ai;
pub mod http;
pub mod knowledge;
pub mod storage;
pub mod ticketing;

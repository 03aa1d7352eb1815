//! HTTP adapters - the keep-alive listener.

pub mod keepalive;

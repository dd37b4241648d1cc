//! Use-case services built on the ports.

mod post_service;

pub use post_service::PostService;

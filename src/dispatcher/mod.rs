//! # Dispatcher Module
//!
//! Request, response and handler-chain types shared by the router and the registrar.
//!
//! ## Overview
//!
//! A route is bound to a [`HandlerChain`]: an ordered list of [`Handler`]s, each of which
//! either answers the request or passes it on with [`Outcome::Next`]. Any closure of the
//! form `Fn(&mut HandlerRequest) -> HandlerResponse` (or `-> Outcome`) is a handler:
//!
//! ```rust
//! use routespec::dispatcher::{HandlerChain, HandlerRequest, HandlerResponse, Outcome};
//! use serde_json::json;
//!
//! let chain = HandlerChain::new()
//!     .with(|req: &mut HandlerRequest| {
//!         req.locals.insert("user".into(), json!("u1"));
//!         Outcome::Next
//!     })
//!     .with(|req: &mut HandlerRequest| HandlerResponse::json(200, req.locals["user"].clone()));
//!
//! let mut req = HandlerRequest::new(http::Method::GET, "/me");
//! assert_eq!(chain.run(&mut req).map(|r| r.status), Some(200));
//! ```
//!
//! Handlers never see the document registry. The registrar forwards chains to the router
//! untouched.

mod core;

pub use core::{
    Handler, HandlerChain, HandlerRequest, HandlerResponse, HeaderVec, Outcome,
    MAX_INLINE_HEADERS,
};

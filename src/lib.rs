//! # folio
//!
//! Client-side behavior for a single-page portfolio site, compiled to
//! WebAssembly. The page markup is static; this crate binds to it at load and
//! drives theme switching, navigation state, reveal animations, lazy images,
//! the typing headline, the contact form and the resume download guard.
//!
//! Every manager talks to the page through the [`dom::Dom`] capability, so
//! the whole coordinator runs natively in tests against an in-memory fake.
//! The `hydrate` feature adds the browser bindings in [`browser`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | Composition root: handler table and single `dispatch` entry point |
//! | [`events`] | UI events, effects, timer tasks and watcher configuration |
//! | [`dom`] | DOM access capability |
//! | [`nav`] | Scroll position tracker, navbar, mobile menu, back-to-top |
//! | [`reveal`] | Intersection reveal engine and skill bar fill sequence |
//! | [`lazy_image`] | Deferred image loading |
//! | [`theme`] | Light/dark preference |
//! | [`storage`] | Persisted key/value preference store |
//! | [`typing`] | Typing headline state machine |
//! | [`contact`] | Contact form submission flow |
//! | [`resume`] | Resume download guard |
//! | [`notify`] | Toast notifications |
//! | [`config`] | Tunable constants with serde defaults |
//! | [`consts`] | Selectors and class names of the page contract |
//! | [`error`] | Error types |

pub mod app;
pub mod config;
pub mod consts;
pub mod contact;
pub mod dom;
pub mod error;
pub mod events;
pub mod lazy_image;
pub mod nav;
pub mod notify;
pub mod resume;
pub mod reveal;
pub mod storage;
pub mod theme;
pub mod typing;

#[cfg(feature = "hydrate")]
pub mod browser;

#[cfg(test)]
mod test_support;

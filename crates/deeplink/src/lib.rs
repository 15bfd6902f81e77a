//! # Deeplink
//!
//! Hash-fragment navigation engine for single-page applications.
//!
//! The matching itself lives in the [`deeplink_router`] companion crate;
//! this crate wires it into an application: a [`Router`] owning the route
//! registries and navigation state, listener dispatch in registration
//! order, page-title assembly from a localization [`Lexicon`], lifecycle
//! events, and TOML-loadable [`DeeplinkConfig`].
//!
//! ## Model
//!
//! Everything runs on one logical thread. The host feeds location changes
//! into [`Router::execute_route`]; matched patterns fire their listeners
//! synchronously; the host calls [`Router::loaded`] when the work behind a
//! route finishes, which releases the after-navigate registry. A path no
//! pattern matches raises a single error event carrying `not_found` and
//! the offending path. Nothing retries and nothing panics.
//!
//! ## Example
//!
//! ```
//! use deeplink::{Activation, JsonLexicon, Router};
//! use serde_json::json;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let lexicon = JsonLexicon::new(json!({
//!     "deeplink": { "baseTitle": "Notes", "pages": { "inbox": { "/": "Inbox" } } }
//! }));
//!
//! let mut router = Router::new().with_lexicon(lexicon);
//! router.activate("", Activation::new());
//!
//! let opened = Rc::new(RefCell::new(false));
//! let flag = opened.clone();
//! router.route("inbox", move |_caps, _query| {
//!     *flag.borrow_mut() = true;
//! });
//!
//! router.execute_route("#/inbox");
//! assert!(*opened.borrow());
//! assert_eq!(router.document_title(), "Inbox - Notes");
//! ```

mod config;
mod error;
mod events;
mod history;
mod lexicon;
mod router;
mod title;

pub use config::DeeplinkConfig;
pub use error::{ConfigError, LexiconError, NavigateError};
pub use events::RouterEvent;
pub use history::{HistoryBackend, MemoryHistory, NullHistory};
pub use lexicon::{JsonLexicon, Lexicon};
pub use router::{Activation, EventListener, RouteListener, Router};

// The matcher's vocabulary, re-exported so hosts need only one import.
pub use deeplink_router::{
    match_to_url, CaptureKey, CaptureMap, MatchOptions, MatchSet, Pattern, QueryMap, UrlOptions,
};

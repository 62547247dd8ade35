//! gopass store backend for passbridge
//!
//! Talks to a local [gopass](https://www.gopass.pw) password store through
//! its CLI: `gopass ls --flat` for listing and `gopass show` for reads.
//! Requires a working gopass setup (initialized store, usable GPG keys);
//! interactive PIN or touch prompts from the key backend block the calling
//! operation for as long as the prompt is up.
//!
//! ```no_run
//! use passbridge_gopass::GopassBackend;
//! use passbridge_secrets::StoreClient;
//! use std::sync::Arc;
//!
//! # async fn example() -> passbridge_secrets::Result<()> {
//! let client = StoreClient::new(Arc::new(GopassBackend::new()));
//! let password = client.get_secret("infra/db/password").await?;
//! # drop(password);
//! # Ok(())
//! # }
//! ```

mod backend;
mod store;

pub use backend::{DEFAULT_BINARY, GopassBackend};
pub use store::GopassStore;

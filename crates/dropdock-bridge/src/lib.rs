//! # Dropdock Bridge
//!
//! The background integration core: Dropbox client and auth flow, VC
//! backend client, local download materialization, and the message
//! router UI contexts talk to.
//!
//! ## Modules
//!
//! - `config` - provider endpoints, directories, timers
//! - `dropbox` - OAuth2 implicit grant + v2 file API client
//! - `vc` - VC platform REST client
//! - `downloads` - local download materialization with spool cleanup
//! - `router` - mailbox actor dispatching tagged requests
//! - `startup` - service wiring and logging init

pub mod config;
pub mod downloads;
pub mod dropbox;
pub mod router;
pub mod startup;
pub mod vc;

pub use config::{BridgeConfig, DownloadsConfig, DropboxConfig, VcConfig};
pub use downloads::{DownloadRecord, DownloadsService};
pub use dropbox::{AuthFlowController, AuthFlowLauncher, AuthFlowState, DropboxClient};
pub use router::{BridgeServices, Request, Response, Router, RouterHandle};
pub use startup::{init_tracing, Bridge, BridgeHandle};
pub use vc::{bearer_header, VcClient};

//! inframe-client: backend and asset host client library
//!
//! Provides the HTTP client for the Inframe REST backend, the asset uploader,
//! and configuration loading. Every failure, whatever its origin, surfaces as
//! one normalized [`ApiError`].
//!
//! # Examples
//!
//! ## Listing records
//!
//! ```no_run
//! use inframe_api::{Company, Resource};
//! use inframe_client::HttpClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new("http://localhost:5000")?;
//!
//! match client.list::<Company>().await {
//!     Ok(partners) => {
//!         let records: Vec<_> = partners.iter().filter_map(Resource::to_record).collect();
//!         println!("{} partners", records.len());
//!     }
//!     Err(err) => {
//!         for line in err.display_lines() {
//!             eprintln!("{line}");
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Uploading an asset
//!
//! ```no_run
//! use std::path::Path;
//!
//! use inframe_client::{Asset, AssetStore, DashboardConfig, HostedUploader};
//!
//! # async fn example() -> eyre::Result<()> {
//! let config = DashboardConfig::resolve(None)?;
//! let uploader = HostedUploader::new(config.upload);
//!
//! let asset = Asset::from_path(Path::new("logo.png")).await?;
//! let stored = uploader.upload(asset).await?;
//! println!("{}", stored.secure_url);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod normalize;
pub mod upload;

pub use config::{ApiConfig, DashboardConfig, UiConfig, UploadConfig};
pub use error::{ApiError, Cause, ErrorKind, Result};
pub use http::HttpClient;
pub use normalize::{Failure, normalize, unwrap_envelope};
pub use upload::{Asset, AssetKind, AssetStore, HostedUploader, check_asset};

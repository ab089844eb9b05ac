//! mockd
//!
//! A configuration-driven HTTP mock server. Reads a declarative JSON list
//! of route descriptions and serves each as a static, independently
//! configured endpoint. Useful for stubbing backend APIs in integration
//! tests without writing server code.
//!
//! # Features
//!
//! - **Static Routes**: One fixed response per configured URI, exact-match
//!   dispatch, last-wins on duplicates
//! - **Latency Simulation**: Per-request randomized delay from an
//!   (average, delta) pair
//! - **Pre-rendered Bodies**: JSON bodies are serialized once at startup
//!   and served byte-identical on every request
//!
//! # Example Configuration
//!
//! ```json
//! [
//!   {
//!     "uri": "/api/ping",
//!     "statusCode": 200,
//!     "header": {"X-Custom": "value"},
//!     "body": {"message": "pong"},
//!     "latency": {"average": 50, "delta": 20}
//!   }
//! ]
//! ```

pub mod config;
pub mod latency;
pub mod router;
pub mod server;

pub use config::RouteDescriptor;
pub use latency::Latency;
pub use router::{MockRoute, MockRouter};

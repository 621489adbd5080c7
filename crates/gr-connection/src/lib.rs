//! gr-connection: Christoffel symbols of the second kind.
//!
//! `compute_christoffel` evaluates one coefficient from scratch.
//! [`Connection`] caches the inverse metric and all first derivatives so
//! a full enumeration inverts the metric once.
//!
//! # Example
//!
//! ```no_run
//! use gr_connection::{Connection, EnumerationConfig};
//! use gr_metric::{PhysicalConstants, schwarzschild_metric};
//!
//! let spacetime = schwarzschild_metric(&PhysicalConstants::new());
//! let connection = Connection::from_spacetime(&spacetime).unwrap();
//! for entry in connection.christoffel_symbols(&EnumerationConfig::default()).unwrap() {
//!     println!("{entry}");
//! }
//! ```

pub mod christoffel;
pub mod connection;
pub mod enumerate;
pub mod error;

// Re-exports
pub use christoffel::{compute_christoffel, partial_metric_component};
pub use connection::Connection;
pub use enumerate::{ChristoffelEntry, EnumerationConfig, enumerate_christoffel};
pub use error::{ConnectionError, ConnectionResult};

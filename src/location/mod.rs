//! Korean place-name handling
//!
//! - Hangul romanization for geocoder queries
//! - English to Korean administrative name conversion
//! - Display name and address resolution for geocoding results

pub mod names;
pub mod resolver;
pub mod romanize;
pub mod tables;

pub use names::{province_name, to_korean};
pub use resolver::{NameResolver, ResolvedName, search_term};
pub use romanize::{contains_hangul, romanize};

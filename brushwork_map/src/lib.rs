#![warn(clippy::all, clippy::pedantic)]
// map coordinates are compared exactly in tests
#![cfg_attr(test, allow(clippy::float_cmp))]

//! Parser and writer for id-style `.map` files.
//!
//! ```
//! let map = brushwork_map::from_str(
//!     r#"
//! {
//! "classname" "worldspawn"
//! {
//! ( 0 0 0 ) ( 0 1 0 ) ( 1 0 0 ) floor 0 0 0 1 1
//! }
//! }
//! "#,
//! );
//! assert_eq!(map.worldspawn().unwrap().brushes.len(), 1);
//! ```

mod de;
mod error;
mod map;
mod parsers;
mod plane;
mod ser;
mod tokens;

pub use de::{from_str, load_from_file};
pub use error::{Error, PlaneError, Result};
pub use map::{Brush, Entity, Map, WORLDSPAWN};
pub use plane::{Plane, TextureAlignment};
pub use ser::to_string;

//! # nanojson
//!
//! A self-contained JSON document model: parse JSON text into a tree of
//! [`Value`]s, inspect and rearrange the tree, and serialize it back out.
//!
//! ## Operating on untyped JSON values
//!
//! Any valid JSON data can be manipulated in the following recursive enum
//! representation. This data structure is [`nanojson::Value`][Value].
//!
//! ```
//! # use nanojson::Map;
//! #
//! # #[allow(dead_code)]
//! enum Value {
//!     Null,
//!     Bool(bool),
//!     Number(f64),
//!     String(String),
//!     Array(Vec<Value>),
//!     Object(Map<String, Value>),
//! }
//! ```
//!
//! A string of JSON data can be parsed into a `nanojson::Value` by the
//! [`nanojson::from_str`][from_str] function. If the text is not valid
//! JSON, the error names what went wrong and where:
//!
//! ```
//! use nanojson::{from_str, Value};
//!
//! fn untyped_example() -> nanojson::Result<()> {
//!     // Some JSON input data as a &str. Maybe this comes from the user.
//!     let data = r#"
//!         {
//!             "name": "John Doe",
//!             "age": 43,
//!             "phones": [
//!                 "+44 1234567",
//!                 "+44 2345678"
//!             ]
//!         }"#;
//!
//!     // Parse the string of data into nanojson::Value.
//!     let v: Value = from_str(data)?;
//!
//!     // Access parts of the data by indexing with square brackets.
//!     println!("Please call {} at the number {}", v["name"], v["phones"][0]);
//!
//!     Ok(())
//! }
//! #
//! # untyped_example().unwrap();
//! ```
//!
//! ## Constructing JSON values
//!
//! The [`json!`] macro builds a `nanojson::Value` with very natural JSON
//! syntax, and [`to_string`] turns any value back into compact JSON text.
//!
//! ```
//! use nanojson::{json, to_string};
//!
//! // The type of `john` is `nanojson::Value`.
//! let john = json!({
//!     "name": "John Doe",
//!     "age": 43,
//!     "phones": [
//!         "+44 1234567",
//!         "+44 2345678"
//!     ]
//! });
//!
//! println!("first phone number: {}", john["phones"][0]);
//!
//! // Convert to a String of JSON and print it out.
//! println!("{}", to_string(&john));
//! ```

#![allow(clippy::comparison_chain, clippy::float_cmp, clippy::needless_doctest_main)]

#[doc(inline)]
pub use crate::de::from_str;
#[doc(inline)]
pub use crate::error::{Error, ErrorCode, Result};
#[doc(inline)]
pub use crate::map::Map;
#[doc(inline)]
pub use crate::ser::{to_string, to_string_pretty, to_vec, to_vec_pretty};
#[doc(inline)]
pub use crate::value::{Index, Value};

pub mod de;
pub mod error;
pub mod map;
pub mod ser;
pub mod value;

mod macros;
mod scratch;

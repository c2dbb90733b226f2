//! Compile-time endpoint map.
//!
//! An endpoint map ties a verb and a path to a request/response type pair.
//! It exists only in the type system: `Rest::post_as::<Users>(&body)` only
//! compiles when `body` has the declared request type, and the returned
//! `RestResponse` decodes into the declared response type. Nothing here checks
//! payload shape at runtime.
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use typed_rest::endpoints;
//!
//! #[derive(Serialize)]
//! struct NewUser { name: String }
//!
//! #[derive(Clone, Deserialize)]
//! struct Created { id: u64 }
//!
//! struct Users;
//!
//! endpoints! {
//!     Post Users => "users": NewUser => Created;
//!     Get Users => "users": () => Vec<Created>;
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::http::HttpMethod;

/// An HTTP verb lifted to the type level.
pub trait Verb {
    const METHOD: HttpMethod;
}

pub struct Get;
pub struct Post;
pub struct Put;
pub struct Delete;

impl Verb for Get {
    const METHOD: HttpMethod = HttpMethod::Get;
}

impl Verb for Post {
    const METHOD: HttpMethod = HttpMethod::Post;
}

impl Verb for Put {
    const METHOD: HttpMethod = HttpMethod::Put;
}

impl Verb for Delete {
    const METHOD: HttpMethod = HttpMethod::Delete;
}

/// A path reachable with verb `V`, and the payload types it exchanges.
///
/// `Request` is ignored for `Get` and `Delete`; declare it as `()`.
pub trait Endpoint<V: Verb> {
    /// Path relative to the `Rest` base URL.
    const PATH: &'static str;
    type Request: Serialize;
    type Response: DeserializeOwned;
}

/// Declare several `Endpoint` impls in one block.
///
/// Each line reads `Verb Marker => "path": Request => Response;`.
#[macro_export]
macro_rules! endpoints {
    ($($verb:ident $marker:ty => $path:literal : $req:ty => $resp:ty;)*) => {
        $(
            impl $crate::endpoint::Endpoint<$crate::endpoint::$verb> for $marker {
                const PATH: &'static str = $path;
                type Request = $req;
                type Response = $resp;
            }
        )*
    };
}

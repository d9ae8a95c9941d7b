// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Keeps deploy ids, service ids, image references and endpoints apart at compile time.

mod api_key;
mod endpoint;
mod id;
mod image_ref;

pub use api_key::ApiKey;
pub use endpoint::{EndpointError, ServiceEndpoint};
pub use id::{DeployId, ServiceId};
pub use image_ref::{ImageRef, ParseImageRefError};

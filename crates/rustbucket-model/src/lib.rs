//! Vendor-neutral S3 data model.
//!
//! Every vendor answers list and configuration requests in the same XML
//! dialect with small deviations. The XML layer reads those answers into the
//! types defined here so callers never see vendor differences: ETags without
//! quotes, a storage class that is always set, and a pagination cursor that
//! only carries a token while more results exist.

pub mod cors;
pub mod error;
pub mod lifecycle;
pub mod listing;
pub mod media;
pub mod object;
pub mod results;

pub use cors::{CorsConfiguration, CorsMethod, CorsRule};
pub use error::ModelError;
pub use lifecycle::{LifecycleConfiguration, LifecycleRule, LifecycleStatus, Transition};
pub use listing::{ListBucketsOutput, ListObjectsOutput, PageCursor};
pub use media::{GuessMimeResolver, MimeCategory, MimeResolver};
pub use object::{NormalizedBucket, NormalizedObject, ObjectMetadata, Owner};
pub use results::{BucketLocation, CopyObjectResult, DeleteError, DeleteResult, DeletedObject};

//! Block targeting: fixed-step ray marching through chunks and the
//! candidate-chunk prefilter that bounds it.

pub mod march;
pub mod prefilter;
pub mod ray;

pub use march::{RayHit, raycast, raycast_world};
pub use prefilter::{PrefilterParams, VOTE_DISTANCE_CAP, close_chunks};
pub use ray::{MAX_RAY_STEPS, Ray, RayError};

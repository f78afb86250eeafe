//! Built-in compilation passes.

mod optimize;
mod translation;
mod validation;

pub use optimize::MergeRotations;
pub use translation::NativeTranslation;
pub use validation::{ConnectivityCheck, ProtoquilCheck, QubitValidation};

//! Authentication: the Firebase identity client and the session gate.

mod firebase;
mod gate;
mod storage;

pub use firebase::FirebaseAuth;
pub use gate::{SessionGate, SessionStream};

//! # Database module — Firestore REST client
//!
//! Records are created with a single `documents:commit` call per submission.
//! See [`FirestoreClient`] for the request shape.

mod firestore;

pub use firestore::FirestoreClient;

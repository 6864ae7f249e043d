use dioxus::prelude::*;
use portfolio::{AcceptPolicy, MediaFile, ValidationError};

/// Read every file picked in a file input into memory. The browser's file
/// engine reports names only, so media types are guessed from them.
pub(crate) async fn read_picked(evt: &FormEvent) -> Vec<MediaFile> {
    let Some(engine) = evt.files() else {
        return Vec::new();
    };
    let mut picked = Vec::new();
    for name in engine.files() {
        match engine.read_file(&name).await {
            Some(bytes) => picked.push(MediaFile::new(name, None, bytes)),
            None => tracing::error!("could not read {name}"),
        }
    }
    picked
}

/// Read a single picked file and check it right away, so a wrong type or an
/// oversized file is reported before submit. `None` when nothing was picked.
pub(crate) async fn pick_one(
    evt: &FormEvent,
    policy: AcceptPolicy,
    field: &str,
) -> Option<Result<MediaFile, ValidationError>> {
    let file = read_picked(evt).await.into_iter().next()?;
    Some(file.check(policy, field).map(|()| file))
}

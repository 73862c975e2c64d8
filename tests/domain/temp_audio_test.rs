use std::io::Write;

use speechlens::domain::TempAudioResource;

fn staged_file() -> TempAudioResource {
    let mut file = tempfile::Builder::new()
        .suffix(".wav")
        .tempfile()
        .unwrap();
    file.write_all(b"audio").unwrap();
    TempAudioResource::new(file.into_temp_path())
}

#[test]
fn given_staged_file_when_released_then_file_is_deleted() {
    let resource = staged_file();
    let path = resource.path().to_path_buf();
    assert!(path.exists());

    resource.release().unwrap();

    assert!(!path.exists());
}

#[test]
fn given_staged_file_when_dropped_then_file_is_deleted() {
    let resource = staged_file();
    let path = resource.path().to_path_buf();

    drop(resource);

    assert!(!path.exists());
}

#[test]
fn given_staged_file_when_scope_unwinds_then_file_is_deleted() {
    let resource = staged_file();
    let path = resource.path().to_path_buf();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
        let _held = resource;
        panic!("transcription blew up");
    }));

    assert!(result.is_err());
    assert!(!path.exists());
}

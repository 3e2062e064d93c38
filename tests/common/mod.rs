#![allow(dead_code)]

use ctrlrouter::metadata::{ClassDef, ClassId, MetadataRegistry};
use ctrlrouter::schema::TypeDescriptor;
use ctrlrouter::spec::Parameter;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// `TestController.greet(prefix: string, message: string)` exposed as
/// `GET <path>`, with only the second parameter decorated.
pub fn greet_controller(registry: &mut MetadataRegistry, path: &str) -> ClassId {
    let class = registry
        .define_class(
            ClassDef::new("TestController")
                .method("greet", [TypeDescriptor::string(), TypeDescriptor::string()]),
        )
        .unwrap();
    registry.get(class, "greet", path, None).unwrap();
    registry
        .param(class, "greet", 1, Parameter::query("message"))
        .unwrap();
    class
}

/// Write `content` to a temporary file with the given extension.
pub fn temp_file(content: &str, ext: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("ctrlr_test_")
        .suffix(&format!(".{ext}"))
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a thread-local subscriber and return its plain-text log output.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, logs)
}
